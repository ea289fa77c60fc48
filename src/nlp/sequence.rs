use crate::{
    errors::{ProcessorError, Result},
    nlp::symbols::{SymbolVocabulary, tag},
};

pub struct SequenceAssembler<'a> {
    vocab: &'a SymbolVocabulary,
}

impl<'a> SequenceAssembler<'a> {
    pub fn new(vocab: &'a SymbolVocabulary) -> Self {
        Self { vocab }
    }

    /// Punctuation passes through, bare spaces are dropped, everything else
    /// is tagged as a phoneme.
    pub fn clean<I, S>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|token| {
                let token = token.as_ref();
                if self.vocab.is_punctuation(token) {
                    Some(token.to_string())
                } else if token != " " {
                    Some(tag(token))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn to_ids(&self, symbols: &[String]) -> Result<Vec<i32>> {
        symbols
            .iter()
            .map(|symbol| {
                // control symbols are never produced from text
                if self.vocab.is_reserved(symbol) {
                    return Err(ProcessorError::UnknownSymbol(symbol.clone()));
                }
                self.vocab.symbol_to_id(symbol)
            })
            .collect()
    }

    pub fn assemble<I, S>(&self, tokens: I) -> Result<Vec<i32>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.to_ids(&self.clean(tokens))
    }
}
