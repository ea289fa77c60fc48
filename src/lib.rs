//! Text-to-sequence front end for TTS acoustic models.
//!
//! Raw orthographic text (inference) or pre-phonemised text (training) is
//! turned into the integer symbol ids an acoustic model embeds. The symbol
//! table is compiled in per language and its ordering is part of every
//! trained checkpoint.

pub mod audio;
pub mod config;
pub mod constants;
pub mod errors;
pub mod nlp;
pub mod processor;

pub use config::ProcessorConfig;
pub use errors::{ProcessorError, Result};
pub use processor::{ProcessorMode, TextProcessor, TrainingSample, processor_for};
