use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("malformed manifest line {line}: expected at least {expected} fields, found {found}")]
    MalformedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),
    #[error(
        "grapheme correction mismatch in '{word}': {graphemes} occurrence(s) of '{grapheme}' \
         but {phonemes} default phoneme(s)"
    )]
    GraphemeCorrectionMismatch {
        word: String,
        grapheme: String,
        graphemes: usize,
        phonemes: usize,
    },
    #[error("failed to decode audio at {path}: {source}")]
    AudioDecode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("unsupported language {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
