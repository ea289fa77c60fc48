use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_AUDIO_EXTENSION, DEFAULT_DELIMITER, DEFAULT_TRAIN_FILE, Language},
    errors::{ProcessorError, Result},
    nlp::correction::MismatchPolicy,
    processor::ProcessorMode,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_train_f_name")]
    pub train_f_name: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub positions: ColumnPositions,
    #[serde(default = "default_f_extension")]
    pub f_extension: String,
    #[serde(default)]
    pub mode: ProcessorMode,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub on_correction_mismatch: MismatchPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPositions {
    pub file: usize,
    pub text: usize,
    pub speaker_name: usize,
}

impl Default for ColumnPositions {
    fn default() -> Self {
        Self {
            file: 0,
            text: 1,
            speaker_name: 2,
        }
    }
}

impl ColumnPositions {
    pub fn min_fields(&self) -> usize {
        self.file.max(self.text).max(self.speaker_name) + 1
    }
}

fn default_train_f_name() -> String {
    DEFAULT_TRAIN_FILE.to_string()
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_f_extension() -> String {
    DEFAULT_AUDIO_EXTENSION.to_string()
}

impl ProcessorConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            train_f_name: default_train_f_name(),
            delimiter: default_delimiter(),
            positions: ColumnPositions::default(),
            f_extension: default_f_extension(),
            mode: ProcessorMode::default(),
            language: Language::default(),
            on_correction_mismatch: MismatchPolicy::default(),
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let buf = fs::read_to_string(&path)?;
        let config: ProcessorConfig = serde_json::from_str(&buf)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(ProcessorError::Config(
                "manifest delimiter must not be empty".to_string(),
            ));
        }
        let ColumnPositions {
            file,
            text,
            speaker_name,
        } = self.positions;
        if file == text || file == speaker_name || text == speaker_name {
            return Err(ProcessorError::Config(format!(
                "manifest column positions must be distinct (file={file}, text={text}, speaker_name={speaker_name})"
            )));
        }
        Ok(())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.train_f_name)
    }
}
