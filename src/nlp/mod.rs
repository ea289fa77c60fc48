pub mod correction;
pub mod g2p;
pub mod sequence;
pub mod swahili;
pub mod symbols;

pub use correction::{CorrectionRule, MismatchPolicy, OrthographyCorrector};
pub use g2p::{BreakKind, G2pEngine, WordUnit};
pub use sequence::SequenceAssembler;
pub use symbols::{EOS, PAD, PHONEME_TAG, SIL, SymbolVocabulary};
