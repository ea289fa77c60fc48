use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    config::ProcessorConfig,
    errors::{ProcessorError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub text: String,
    pub wav_path: PathBuf,
    pub speaker_name: String,
}

impl ManifestItem {
    /// File name up to the first `.`.
    pub fn utt_id(&self) -> String {
        self.wav_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.split('.').next().map(str::to_string))
            .unwrap_or_default()
    }
}

pub fn read_manifest(config: &ProcessorConfig) -> Result<Vec<ManifestItem>> {
    config.validate()?;
    if !config.data_dir.is_dir() {
        return Err(ProcessorError::Config(format!(
            "data directory {} is not readable",
            config.data_dir.display()
        )));
    }
    let path = config.manifest_path();
    let file = File::open(&path)?;
    debug!(path = %path.display(), "reading manifest");

    let mut items = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        items.push(parse_line(&line, idx + 1, config)?);
    }
    Ok(items)
}

pub fn parse_line(line: &str, line_no: usize, config: &ProcessorConfig) -> Result<ManifestItem> {
    let parts: Vec<&str> = line.trim().split(config.delimiter.as_str()).collect();
    let positions = config.positions;
    let expected = positions.min_fields();
    if parts.len() < expected {
        return Err(ProcessorError::MalformedLine {
            line: line_no,
            expected,
            found: parts.len(),
        });
    }

    Ok(ManifestItem {
        text: parts[positions.text].to_string(),
        wav_path: resolve_audio_path(&config.data_dir, parts[positions.file], &config.f_extension),
        speaker_name: parts[positions.speaker_name].to_string(),
    })
}

fn resolve_audio_path(data_dir: &Path, file: &str, extension: &str) -> PathBuf {
    if file.ends_with(extension) {
        data_dir.join(file)
    } else {
        data_dir.join(format!("{file}{extension}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn appends_missing_extension() {
        let config = ProcessorConfig::new("/corpus");
        let item = parse_line("utt1|halo dunia|spk01", 1, &config).expect("valid line");
        assert!(item.wav_path.ends_with("utt1.wav"));
        assert_eq!(item.wav_path, PathBuf::from("/corpus/utt1.wav"));
        assert_eq!(item.text, "halo dunia");
        assert_eq!(item.speaker_name, "spk01");
        assert_eq!(item.utt_id(), "utt1");
    }

    #[test]
    fn keeps_existing_extension() {
        let config = ProcessorConfig::new("/corpus");
        let item = parse_line("wavs/utt2.wav|jambo|spk02\n", 1, &config).expect("valid line");
        assert_eq!(item.wav_path, PathBuf::from("/corpus/wavs/utt2.wav"));
        assert_eq!(item.speaker_name, "spk02");
        assert_eq!(item.utt_id(), "utt2");
    }

    #[test]
    fn honours_custom_columns_and_delimiter() {
        let mut config = ProcessorConfig::new("corpus");
        config.delimiter = "\t".to_string();
        config.positions.file = 1;
        config.positions.text = 2;
        config.positions.speaker_name = 0;
        let item = parse_line("spk09\tclip\tasante sana\textra", 4, &config).expect("valid");
        assert_eq!(item.wav_path, PathBuf::from("corpus/clip.wav"));
        assert_eq!(item.text, "asante sana");
        assert_eq!(item.speaker_name, "spk09");
    }

    #[test]
    fn short_line_is_malformed() {
        let config = ProcessorConfig::new("corpus");
        let err = parse_line("utt1|halo dunia", 7, &config).expect_err("two fields");
        assert!(matches!(
            err,
            ProcessorError::MalformedLine {
                line: 7,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn reads_file_in_order_skipping_blank_lines() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("train.txt"),
            "a|moja|spk1\n\nb|mbili|spk2\nc|tatu|spk1\n",
        )
        .expect("write manifest");
        let items = read_manifest(&ProcessorConfig::new(dir.path())).expect("manifest");
        let ids: Vec<String> = items.iter().map(ManifestItem::utt_id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_manifest(&ProcessorConfig::new(dir.path())).expect_err("no train.txt");
        assert!(matches!(err, ProcessorError::Io(_)));
    }

    #[test]
    fn missing_data_dir_is_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ProcessorConfig::new(dir.path().join("absent"));
        let err = read_manifest(&config).expect_err("no data dir");
        assert!(matches!(err, ProcessorError::Config(msg) if msg.contains("absent")));
    }
}
