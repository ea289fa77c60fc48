use std::collections::{HashMap, HashSet};

use crate::errors::{ProcessorError, Result};

pub const PHONEME_TAG: &str = "@";
pub const PAD: &str = "@PAD";
pub const SIL: &str = "@SIL";
pub const EOS: &str = "@EOS";

pub fn tag(phoneme: &str) -> String {
    format!("{PHONEME_TAG}{phoneme}")
}

/// Closed, ordered symbol table.
///
/// Layout is `[PAD] + tagged alphabet + punctuation characters + [SIL, EOS]`.
/// Trained checkpoints depend on these ids, so a vocabulary must never be
/// reordered; extending it means publishing a new one under a new name.
#[derive(Debug, Clone)]
pub struct SymbolVocabulary {
    name: String,
    symbols: Vec<String>,
    symbol_to_id: HashMap<String, i32>,
    punctuation: HashSet<String>,
}

impl SymbolVocabulary {
    pub fn new(name: impl Into<String>, alphabet: &[&str], punctuation: &str) -> Result<Self> {
        let mut symbols = Vec::with_capacity(alphabet.len() + punctuation.len() + 3);
        symbols.push(PAD.to_string());
        symbols.extend(alphabet.iter().map(|p| tag(p)));
        symbols.extend(punctuation.chars().map(|c| c.to_string()));
        symbols.push(SIL.to_string());
        symbols.push(EOS.to_string());

        let mut symbol_to_id = HashMap::with_capacity(symbols.len());
        for (idx, symbol) in symbols.iter().enumerate() {
            if symbol_to_id.insert(symbol.clone(), idx as i32).is_some() {
                return Err(ProcessorError::Config(format!(
                    "duplicate symbol '{symbol}' in vocabulary"
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            symbols,
            symbol_to_id,
            punctuation: punctuation.chars().map(|c| c.to_string()).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol_to_id(&self, symbol: &str) -> Result<i32> {
        self.symbol_to_id
            .get(symbol)
            .copied()
            .ok_or_else(|| ProcessorError::UnknownSymbol(symbol.to_string()))
    }

    pub fn id_to_symbol(&self, id: i32) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.symbols.get(idx))
            .map(String::as_str)
    }

    pub fn is_punctuation(&self, token: &str) -> bool {
        self.punctuation.contains(token)
    }

    pub fn contains_phoneme(&self, phoneme: &str) -> bool {
        self.symbol_to_id.contains_key(&tag(phoneme))
    }

    pub fn is_reserved(&self, symbol: &str) -> bool {
        matches!(symbol, PAD | SIL | EOS)
    }

    pub fn pad_id(&self) -> i32 {
        0
    }

    pub fn sil_id(&self) -> i32 {
        self.symbol_to_id[SIL]
    }

    pub fn eos_id(&self) -> i32 {
        self.symbol_to_id[EOS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> SymbolVocabulary {
        SymbolVocabulary::new("toy", &["a", "t͡ʃ", "ᵑg"], ".,").expect("toy vocabulary")
    }

    #[test]
    fn layout_follows_declared_order() {
        let vocab = toy();
        assert_eq!(
            vocab.symbols(),
            ["@PAD", "@a", "@t͡ʃ", "@ᵑg", ".", ",", "@SIL", "@EOS"]
        );
        assert_eq!(vocab.pad_id(), 0);
        assert_eq!(vocab.sil_id(), 6);
        assert_eq!(vocab.eos_id(), 7);
        assert_eq!(vocab.len(), 8);
    }

    #[test]
    fn multi_char_phonemes_are_single_symbols() {
        let vocab = toy();
        assert_eq!(vocab.symbol_to_id("@t͡ʃ").expect("known"), 2);
        assert!(vocab.contains_phoneme("ᵑg"));
        assert!(!vocab.contains_phoneme("ŋ"));
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let err = toy().symbol_to_id("@q").expect_err("unknown");
        assert!(matches!(err, ProcessorError::UnknownSymbol(s) if s == "@q"));
    }

    #[test]
    fn id_lookup_is_bounded() {
        let vocab = toy();
        assert_eq!(vocab.id_to_symbol(4), Some("."));
        assert_eq!(vocab.id_to_symbol(-1), None);
        assert_eq!(vocab.id_to_symbol(8), None);
    }

    #[test]
    fn control_symbols_are_reserved() {
        let vocab = toy();
        assert!(vocab.is_reserved("@PAD"));
        assert!(vocab.is_reserved("@EOS"));
        assert!(!vocab.is_reserved("@a"));
        assert!(!vocab.is_reserved("PAD"));
    }

    #[test]
    fn punctuation_is_untagged() {
        let vocab = toy();
        assert!(vocab.is_punctuation("."));
        assert!(!vocab.is_punctuation("@."));
        assert!(vocab.symbol_to_id("@.").is_err());
    }

    #[test]
    fn duplicate_alphabet_entries_are_rejected() {
        let err = SymbolVocabulary::new("dup", &["a", "a"], "").expect_err("duplicate");
        assert!(matches!(err, ProcessorError::Config(_)));
    }
}
