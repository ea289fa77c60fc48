use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalizer::normalize_text;
use crate::{
    constants::Language,
    errors::{ProcessorError, Result},
    nlp::g2p::{BreakKind, G2pEngine, WordUnit},
};

static GRAPHEMES: &[(&str, &[&str])] = &[
    ("a", &["ɑ"]),
    ("b", &["ɓ"]),
    ("c", &["k"]),
    ("d", &["ɗ"]),
    ("e", &["ɛ"]),
    ("f", &["f"]),
    ("g", &["ɠ"]),
    ("h", &["h"]),
    ("i", &["i"]),
    ("j", &["ʄ"]),
    ("k", &["k"]),
    ("l", &["l"]),
    ("m", &["m"]),
    ("n", &["n"]),
    ("o", &["ɔ"]),
    ("p", &["p"]),
    ("q", &["k"]),
    ("r", &["ɾ"]),
    ("s", &["s"]),
    ("t", &["t"]),
    ("u", &["u"]),
    ("v", &["v"]),
    ("w", &["w"]),
    ("x", &["k", "s"]),
    ("y", &["j"]),
    ("z", &["z"]),
    ("ch", &["t͡ʃ"]),
    ("sh", &["ʃ"]),
    ("th", &["θ"]),
    ("dh", &["ð"]),
    ("gh", &["ɣ"]),
    ("kh", &["x"]),
    ("ny", &["n", "j"]),
    ("ng", &["ᵑg"]),
    ("mb", &["ᵐɓ"]),
    ("mv", &["ᶬv"]),
    ("nd", &["ⁿɗ"]),
    ("nj", &["ⁿɗ͡ʒ"]),
    ("nz", &["ⁿz"]),
];

static GRAPHEME_TO_PHONEMES: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| GRAPHEMES.iter().copied().collect());

const MAX_GRAPHEME_CHARS: usize = 2;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\s!,.?;:]+|[!,.?;:]").expect("token regex"));

fn break_kind(token: &str) -> Option<BreakKind> {
    match token {
        "." | "!" | "?" => Some(BreakKind::Major),
        "," | ";" | ":" => Some(BreakKind::Minor),
        _ => None,
    }
}

fn is_silent_mark(ch: char) -> bool {
    ch == '\'' || ch == '-'
}

// Reads `ng'` as plain `ng`; the orthography corrector restores /ŋ/.
// Characters outside the table pass through for the assembler to reject.
#[derive(Debug, Clone, Default)]
pub struct SwahiliG2p {
    lexicon: HashMap<String, Vec<String>>,
}

impl SwahiliG2p {
    pub fn new() -> Self {
        Self::default()
    }

    // Lexicon pronunciations are final and skip orthography correction.
    pub fn with_lexicon<I, W, P>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (W, Vec<P>)>,
        W: Into<String>,
        P: Into<String>,
    {
        self.lexicon.extend(entries.into_iter().map(|(word, phonemes)| {
            (
                word.into().to_lowercase(),
                phonemes.into_iter().map(Into::into).collect(),
            )
        }));
        self
    }

    pub fn word_to_phonemes(&self, word: &str) -> Vec<String> {
        match self.lexicon.get(word) {
            Some(phonemes) => phonemes.clone(),
            None => self.rule_phonemes(word),
        }
    }

    fn rule_phonemes(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().filter(|&c| !is_silent_mark(c)).collect();
        let mut phonemes = Vec::with_capacity(chars.len());
        let mut idx = 0;
        'outer: while idx < chars.len() {
            for len in (1..=MAX_GRAPHEME_CHARS.min(chars.len() - idx)).rev() {
                let grapheme: String = chars[idx..idx + len].iter().collect();
                if let Some(mapped) = GRAPHEME_TO_PHONEMES.get(grapheme.as_str()) {
                    phonemes.extend(mapped.iter().map(|p| p.to_string()));
                    idx += len;
                    continue 'outer;
                }
            }
            phonemes.push(chars[idx].to_string());
            idx += 1;
        }
        phonemes
    }
}

impl G2pEngine for SwahiliG2p {
    fn sentences(&self, text: &str, language: Language) -> Result<Vec<Vec<WordUnit>>> {
        if language != Language::Sw {
            return Err(ProcessorError::UnsupportedLanguage(language.to_string()));
        }

        let normalized = normalize_text(text);
        let mut sentences = Vec::new();
        let mut current = Vec::new();

        for token in TOKEN_PATTERN.find_iter(&normalized) {
            let token = token.as_str();
            if let Some(kind) = break_kind(token) {
                current.push(WordUnit::Break {
                    kind,
                    text: token.to_string(),
                });
                if kind == BreakKind::Major {
                    sentences.push(std::mem::take(&mut current));
                }
                continue;
            }

            let word = token.to_lowercase();
            let unit = match self.lexicon.get(&word) {
                Some(phonemes) => WordUnit::Word {
                    phonemes: phonemes.clone(),
                    text: word,
                    lexical: true,
                },
                None => WordUnit::Word {
                    phonemes: self.rule_phonemes(&word),
                    text: word,
                    lexical: false,
                },
            };
            current.push(unit);
        }

        if !current.is_empty() {
            sentences.push(current);
        }
        Ok(sentences)
    }

    fn name(&self) -> &'static str {
        "SwahiliRules"
    }
}
