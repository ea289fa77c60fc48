use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ProcessorError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sw,
}

impl Language {
    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Sw => "sw",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Language {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sw" | "swahili" => Ok(Language::Sw),
            _ => Err(ProcessorError::UnsupportedLanguage(s.to_string())),
        }
    }
}

pub const PROCESSOR_FILE_NAME: &str = "processor.json";

pub const DEFAULT_TRAIN_FILE: &str = "train.txt";
pub const DEFAULT_DELIMITER: &str = "|";
pub const DEFAULT_AUDIO_EXTENSION: &str = ".wav";
