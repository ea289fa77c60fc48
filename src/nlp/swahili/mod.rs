pub mod g2p;
pub mod normalizer;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{
    errors::Result,
    nlp::{
        correction::{CorrectionRule, MismatchPolicy, OrthographyCorrector},
        symbols::SymbolVocabulary,
    },
};

pub use g2p::SwahiliG2p;

pub const VOCABULARY_NAME: &str = "swahili-ipa-v1";

pub const PUNCTUATION: &str = "!,.?;:";

/// Phoneme alphabet, in checkpoint order. Append-only through a new
/// vocabulary version; never reorder.
pub static VALID_SYMBOLS: &[&str] = &[
    "f", "h", "i", "j", "k", "l", "m", "n", "p", "s", "t", "t͡ʃ", "u", "v", "w", "x", "z", "ð",
    "ŋ", "ɑ", "ɓ", "ɔ", "ɗ", "ɛ", "ɠ", "ɣ", "ɾ", "ʃ", "ʄ", "θ", "ᵐɓ", "ᵑg", "ᶬv", "ⁿz", "ⁿɗ",
    "ⁿɗ͡ʒ",
];

pub static SWAHILI_IPA_VOCABULARY: Lazy<Arc<SymbolVocabulary>> = Lazy::new(|| {
    Arc::new(
        SymbolVocabulary::new(VOCABULARY_NAME, VALID_SYMBOLS, PUNCTUATION)
            .expect("swahili alphabet has no duplicate symbols"),
    )
});

pub const NG_GRAPHEME: &str = "ng'";
pub const NG_PRENASALIZED_PHONEME: &str = "ᵑg";
pub const NG_PHONEME: &str = "ŋ";

/// `ng'` is the velar nasal /ŋ/ (ng'ombe), but G2P renders it like plain
/// `ng`, the prenasalised /ᵑg/ (ngoma).
pub fn default_rules() -> Result<Vec<CorrectionRule>> {
    Ok(vec![CorrectionRule::new(
        "velar-nasal-apostrophe",
        NG_GRAPHEME,
        "ng'?",
        NG_PRENASALIZED_PHONEME,
        NG_PHONEME,
    )?])
}

pub fn default_corrector(policy: MismatchPolicy) -> Result<OrthographyCorrector> {
    Ok(OrthographyCorrector::new(default_rules()?, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::symbols::tag;

    #[test]
    fn vocabulary_layout_is_stable() {
        let vocab = &*SWAHILI_IPA_VOCABULARY;
        assert_eq!(vocab.len(), 1 + 36 + 6 + 2);
        assert_eq!(vocab.symbol_to_id("@PAD").expect("pad"), 0);
        assert_eq!(vocab.symbol_to_id("@f").expect("first phoneme"), 1);
        assert_eq!(vocab.symbol_to_id("@ⁿɗ͡ʒ").expect("last phoneme"), 36);
        assert_eq!(vocab.symbol_to_id("!").expect("first punctuation"), 37);
        assert_eq!(vocab.symbol_to_id(":").expect("last punctuation"), 42);
        assert_eq!(vocab.sil_id(), 43);
        assert_eq!(vocab.eos_id(), 44);
    }

    #[test]
    fn every_phoneme_round_trips() {
        let vocab = &*SWAHILI_IPA_VOCABULARY;
        for phoneme in VALID_SYMBOLS {
            let symbol = tag(phoneme);
            let id = vocab.symbol_to_id(&symbol).expect("phoneme in vocabulary");
            assert!((0..vocab.len() as i32).contains(&id));
            assert_eq!(vocab.id_to_symbol(id), Some(symbol.as_str()));
        }
    }

    #[test]
    fn default_rule_targets_velar_nasal() {
        let rules = default_rules().expect("rules");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].grapheme(), NG_GRAPHEME);
        assert_eq!(rules[0].corrected_phoneme(), NG_PHONEME);
        assert!(SWAHILI_IPA_VOCABULARY.contains_phoneme(NG_PHONEME));
    }
}
