use crate::{constants::Language, errors::Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Major,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordUnit {
    Break { kind: BreakKind, text: String },
    /// `lexical` marks pronunciations taken verbatim from a lexicon; they
    /// are final and skip orthography correction.
    Word {
        text: String,
        phonemes: Vec<String>,
        lexical: bool,
    },
}

impl WordUnit {
    pub fn word(text: impl Into<String>, phonemes: &[&str]) -> Self {
        WordUnit::Word {
            text: text.into(),
            phonemes: phonemes.iter().map(|p| p.to_string()).collect(),
            lexical: false,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, WordUnit::Break { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            WordUnit::Break { text, .. } | WordUnit::Word { text, .. } => text,
        }
    }
}

// Implementations must be deterministic, otherwise ids drift between
// training and serving.
pub trait G2pEngine: Send + Sync {
    fn sentences(&self, text: &str, language: Language) -> Result<Vec<Vec<WordUnit>>>;

    fn name(&self) -> &'static str;
}
