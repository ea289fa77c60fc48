pub mod manifest;
pub mod swahili;

use std::{collections::BTreeMap, fs, path::Path, sync::Arc};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::ProcessorConfig,
    constants::{Language, PROCESSOR_FILE_NAME},
    errors::Result,
    nlp::{g2p::G2pEngine, symbols::SymbolVocabulary},
};

pub use manifest::ManifestItem;
pub use swahili::SwahiliIpaProcessor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorMode {
    #[default]
    Train,
    #[serde(alias = "eval")]
    Inference,
}

#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub raw_text: String,
    pub text_ids: Vec<i32>,
    pub audio: Vec<f32>,
    pub channels: u16,
    pub utt_id: String,
    pub speaker_name: String,
    pub rate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorMapper {
    pub processor_name: String,
    #[serde(default)]
    pub vocabulary: String,
    /// Auxiliary symbol mapping; empty when the vocabulary is compiled in.
    #[serde(default)]
    pub symbol_to_id: BTreeMap<String, i32>,
    #[serde(default)]
    pub speakers_map: BTreeMap<String, usize>,
}

impl ProcessorMapper {
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(PROCESSOR_FILE_NAME), json)?;
        Ok(())
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let buf = fs::read_to_string(dir.join(PROCESSOR_FILE_NAME))?;
        Ok(serde_json::from_str(&buf)?)
    }
}

pub trait TextProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn mode(&self) -> ProcessorMode;

    fn set_mode(&mut self, mode: ProcessorMode);

    fn vocabulary(&self) -> &SymbolVocabulary;

    fn items(&self) -> &[ManifestItem];

    fn create_items(&mut self) -> Result<()>;

    fn get_one_sample(&self, item: &ManifestItem) -> Result<TrainingSample>;

    fn text_to_sequence(&self, text: &str) -> Result<Vec<i32>>;

    fn save_pretrained(&self, dir: &Path) -> Result<()>;

    fn speaker_id(&self, speaker_name: &str) -> Option<usize>;

    fn samples(&self) -> Result<Vec<TrainingSample>> {
        self.items()
            .par_iter()
            .map(|item| self.get_one_sample(item))
            .collect()
    }

    /// Hands samples to `sink` in item order, decoding at most `chunk_size`
    /// clips at a time. Returns the number of samples produced.
    fn for_each_sample(
        &self,
        chunk_size: usize,
        sink: &mut dyn FnMut(TrainingSample) -> Result<()>,
    ) -> Result<usize> {
        let mut count = 0;
        for chunk in self.items().chunks(chunk_size.max(1)) {
            let samples = chunk
                .par_iter()
                .map(|item| self.get_one_sample(item))
                .collect::<Result<Vec<_>>>()?;
            for sample in samples {
                sink(sample)?;
                count += 1;
            }
        }
        Ok(count)
    }
}

pub fn processor_for(
    config: ProcessorConfig,
    engine: Arc<dyn G2pEngine>,
) -> Result<Box<dyn TextProcessor>> {
    match config.language {
        Language::Sw => Ok(Box::new(SwahiliIpaProcessor::new(config, engine)?)),
    }
}

pub fn processor_from_pretrained(
    dir: &Path,
    config: ProcessorConfig,
    engine: Arc<dyn G2pEngine>,
) -> Result<Box<dyn TextProcessor>> {
    match config.language {
        Language::Sw => Ok(Box::new(SwahiliIpaProcessor::from_pretrained(
            dir, config, engine,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_round_trips_through_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("nested/processor");
        let mapper = ProcessorMapper {
            processor_name: "Demo".to_string(),
            vocabulary: "demo-v1".to_string(),
            symbol_to_id: BTreeMap::new(),
            speakers_map: BTreeMap::from([("spk01".to_string(), 0)]),
        };
        mapper.save(&target).expect("save");
        assert!(target.join(PROCESSOR_FILE_NAME).exists());
        assert_eq!(ProcessorMapper::load(&target).expect("load"), mapper);
    }

    #[test]
    fn mode_accepts_eval_alias() {
        let mode: ProcessorMode = serde_json::from_str("\"eval\"").expect("alias");
        assert_eq!(mode, ProcessorMode::Inference);
        assert_eq!(
            serde_json::to_string(&ProcessorMode::Train).expect("serialize"),
            "\"train\""
        );
    }
}
