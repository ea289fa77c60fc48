use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::errors::{ProcessorError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }
}

/// Reads a WAV file as float32, scaling integer PCM into `[-1.0, 1.0)`.
pub fn load_wav(path: &Path) -> Result<AudioClip> {
    let decode_err = |source: hound::Error| ProcessorError::AudioDecode {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = WavReader::open(path).map_err(decode_err)?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(decode_err)?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(decode_err)?
        }
    };

    Ok(AudioClip {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}
