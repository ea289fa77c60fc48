// `family` matches every spelling the engine renders as `default_phoneme`,
// so text matches line up one-to-one with phoneme occurrences. Only matches
// spelled exactly as `grapheme` become `corrected_phoneme`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    errors::{ProcessorError, Result},
    nlp::symbols::SymbolVocabulary,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    #[default]
    Fail,
    Skip,
}

#[derive(Debug, Clone)]
pub struct CorrectionRule {
    name: &'static str,
    grapheme: String,
    family: Regex,
    default_phoneme: String,
    corrected_phoneme: String,
}

impl CorrectionRule {
    pub fn new(
        name: &'static str,
        grapheme: impl Into<String>,
        family_pattern: &str,
        default_phoneme: impl Into<String>,
        corrected_phoneme: impl Into<String>,
    ) -> Result<Self> {
        let grapheme = grapheme.into();
        let family = Regex::new(family_pattern)?;
        if !family.is_match(&grapheme) {
            return Err(ProcessorError::Config(format!(
                "correction rule '{name}': pattern '{family_pattern}' does not match '{grapheme}'"
            )));
        }
        Ok(Self {
            name,
            grapheme,
            family,
            default_phoneme: default_phoneme.into(),
            corrected_phoneme: corrected_phoneme.into(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn grapheme(&self) -> &str {
        &self.grapheme
    }

    pub fn corrected_phoneme(&self) -> &str {
        &self.corrected_phoneme
    }

    pub fn applies_to(&self, word: &str, vocab: &SymbolVocabulary) -> bool {
        word.contains(self.grapheme.as_str()) && vocab.contains_phoneme(&self.corrected_phoneme)
    }

    pub fn apply(&self, word: &str, phonemes: &mut [String]) -> Result<usize> {
        let graphemes: Vec<&str> = self.family.find_iter(word).map(|m| m.as_str()).collect();
        let positions: Vec<usize> = phonemes
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == self.default_phoneme)
            .map(|(idx, _)| idx)
            .collect();

        if graphemes.len() != positions.len() {
            return Err(ProcessorError::GraphemeCorrectionMismatch {
                word: word.to_string(),
                grapheme: self.grapheme.clone(),
                graphemes: graphemes.len(),
                phonemes: positions.len(),
            });
        }

        let mut replaced = 0;
        for (idx, grapheme) in positions.into_iter().zip(graphemes) {
            if grapheme == self.grapheme {
                phonemes[idx] = self.corrected_phoneme.clone();
                replaced += 1;
            }
        }
        Ok(replaced)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrthographyCorrector {
    rules: Vec<CorrectionRule>,
    policy: MismatchPolicy,
}

impl OrthographyCorrector {
    pub fn new(rules: Vec<CorrectionRule>, policy: MismatchPolicy) -> Self {
        Self { rules, policy }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }

    pub fn policy(&self) -> MismatchPolicy {
        self.policy
    }

    pub fn correct(
        &self,
        word: &str,
        mut phonemes: Vec<String>,
        vocab: &SymbolVocabulary,
    ) -> Result<Vec<String>> {
        let lowered = word.to_lowercase();
        for rule in &self.rules {
            if !rule.applies_to(&lowered, vocab) {
                continue;
            }
            let mut candidate = phonemes.clone();
            match rule.apply(&lowered, &mut candidate) {
                Ok(replaced) => {
                    debug!(rule = rule.name(), word, replaced, "applied orthography correction");
                    phonemes = candidate;
                }
                Err(err) if self.policy == MismatchPolicy::Skip => {
                    warn!(rule = rule.name(), word, "skipping orthography correction: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(phonemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ng_rule() -> CorrectionRule {
        CorrectionRule::new("ng-apostrophe", "ng'", "ng'?", "ᵑg", "ŋ").expect("valid rule")
    }

    fn vocab_with(alphabet: &[&str]) -> SymbolVocabulary {
        SymbolVocabulary::new("test", alphabet, ".,").expect("vocabulary")
    }

    fn phones(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn replaces_every_marked_occurrence_positionally() {
        let vocab = vocab_with(&["ᵑg", "ŋ", "ɑ", "n", "i"]);
        let corrector = OrthographyCorrector::new(vec![ng_rule()], MismatchPolicy::Fail);
        let corrected = corrector
            .correct(
                "ng'ang'ania",
                phones(&["ᵑg", "ɑ", "ᵑg", "ɑ", "n", "i", "ɑ"]),
                &vocab,
            )
            .expect("counts agree");
        assert_eq!(corrected, phones(&["ŋ", "ɑ", "ŋ", "ɑ", "n", "i", "ɑ"]));
    }

    #[test]
    fn unmarked_cluster_keeps_default_phoneme() {
        let vocab = vocab_with(&["ᵑg", "ŋ", "ɔ", "ɑ", "ᵐɓ", "ɛ"]);
        let corrector = OrthographyCorrector::new(vec![ng_rule()], MismatchPolicy::Fail);
        let corrected = corrector
            .correct("ng'ombe-nga", phones(&["ᵑg", "ɔ", "ᵐɓ", "ɛ", "ᵑg", "ɑ"]), &vocab)
            .expect("counts agree");
        assert_eq!(corrected, phones(&["ŋ", "ɔ", "ᵐɓ", "ɛ", "ᵑg", "ɑ"]));
    }

    #[test]
    fn count_mismatch_is_fatal() {
        let vocab = vocab_with(&["ᵑg", "ŋ", "ɔ"]);
        let corrector = OrthographyCorrector::new(vec![ng_rule()], MismatchPolicy::Fail);
        let err = corrector
            .correct("ng'ɔ", phones(&["ᵑg", "ɔ", "ᵑg"]), &vocab)
            .expect_err("one grapheme, two phonemes");
        match err {
            ProcessorError::GraphemeCorrectionMismatch {
                graphemes,
                phonemes,
                ..
            } => {
                assert_eq!(graphemes, 1);
                assert_eq!(phonemes, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn skip_policy_leaves_word_uncorrected() {
        let vocab = vocab_with(&["ᵑg", "ŋ", "ɔ"]);
        let corrector = OrthographyCorrector::new(vec![ng_rule()], MismatchPolicy::Skip);
        let raw = phones(&["ᵑg", "ɔ", "ᵑg"]);
        let corrected = corrector
            .correct("ng'ɔ", raw.clone(), &vocab)
            .expect("skipped");
        assert_eq!(corrected, raw);
    }

    #[test]
    fn rule_is_inactive_without_target_phoneme() {
        let vocab = vocab_with(&["ᵑg", "ɔ"]);
        let corrector = OrthographyCorrector::new(vec![ng_rule()], MismatchPolicy::Fail);
        let raw = phones(&["ᵑg", "ɔ", "ᵑg"]);
        let corrected = corrector.correct("ng'ɔ", raw.clone(), &vocab).expect("no-op");
        assert_eq!(corrected, raw);
    }

    #[test]
    fn words_without_grapheme_are_untouched() {
        let vocab = vocab_with(&["ᵑg", "ŋ", "ɔ"]);
        let corrector = OrthographyCorrector::new(vec![ng_rule()], MismatchPolicy::Fail);
        let raw = phones(&["ᵑg", "ɔ"]);
        assert_eq!(corrector.correct("ngo", raw.clone(), &vocab).expect("no-op"), raw);
    }

    #[test]
    fn empty_corrector_passes_phonemes_through() {
        let vocab = vocab_with(&["ᵑg", "ŋ", "ɔ"]);
        let raw = phones(&["ᵑg", "ɔ", "ᵑg"]);
        let corrected = OrthographyCorrector::none()
            .correct("ng'ɔ", raw.clone(), &vocab)
            .expect("no rules");
        assert_eq!(corrected, raw);
    }

    #[test]
    fn rule_pattern_must_cover_grapheme() {
        let err = CorrectionRule::new("broken", "ng'", "mb", "ᵑg", "ŋ").expect_err("invalid");
        assert!(matches!(err, ProcessorError::Config(_)));
    }
}
