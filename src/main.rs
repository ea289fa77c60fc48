use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use tts_text_processor::{
    ProcessorConfig, ProcessorMode, TextProcessor,
    nlp::{g2p::G2pEngine, swahili::SwahiliG2p},
    processor::{processor_for, processor_from_pretrained},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one utterance to symbol ids and print them as JSON
    Ids {
        /// Raw text (inference) or whitespace-separated phonemes (train)
        #[arg(long)]
        text: String,

        #[arg(long, value_enum, default_value_t = CliMode::Inference)]
        mode: CliMode,

        /// Directory previously written by `prepare`
        #[arg(long = "processor-dir")]
        processor_dir: Option<PathBuf>,
    },
    /// Print the symbol table as `id<TAB>symbol`
    Symbols,
    /// Build every training sample of a manifest and write their ids
    Prepare {
        /// Processor configuration (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for ids.jsonl and processor.json
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    Train,
    Inference,
}

impl From<CliMode> for ProcessorMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Train => ProcessorMode::Train,
            CliMode::Inference => ProcessorMode::Inference,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let engine: Arc<dyn G2pEngine> = Arc::new(SwahiliG2p::new());

    match args.command {
        Command::Ids {
            text,
            mode,
            processor_dir,
        } => {
            let mut config = ProcessorConfig::new(".");
            config.mode = mode.into();
            let processor = match processor_dir {
                Some(dir) => processor_from_pretrained(&dir, config, engine)
                    .with_context(|| format!("failed to load processor from {}", dir.display()))?,
                None => processor_for(config, engine).context("failed to build processor")?,
            };
            let ids = processor
                .text_to_sequence(&text)
                .context("failed to convert text to ids")?;
            println!("{}", serde_json::to_string(&ids)?);
        }
        Command::Symbols => {
            let processor = processor_for(ProcessorConfig::new("."), engine)
                .context("failed to build processor")?;
            let vocab = processor.vocabulary();
            for (idx, symbol) in vocab.symbols().iter().enumerate() {
                println!("{idx}\t{symbol}");
            }
        }
        Command::Prepare { config, output } => {
            let config = ProcessorConfig::load_from_file(&config)
                .with_context(|| format!("failed to load config {}", config.display()))?;
            let mut processor = processor_for(config, engine).context("failed to build processor")?;
            processor
                .create_items()
                .context("failed to read manifest")?;
            prepare(&*processor, &output)?;
        }
    }

    Ok(())
}

const PREPARE_CHUNK: usize = 64;

fn prepare(processor: &dyn TextProcessor, output: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let ids_path = output.join("ids.jsonl");
    let mut writer = BufWriter::new(
        File::create(&ids_path).with_context(|| format!("failed to create {}", ids_path.display()))?,
    );

    let written = processor
        .for_each_sample(PREPARE_CHUNK, &mut |sample| {
            let record = json!({
                "utt_id": sample.utt_id,
                "speaker_name": sample.speaker_name,
                "speaker_id": processor.speaker_id(&sample.speaker_name),
                "text_ids": sample.text_ids,
                "rate": sample.rate,
                "num_samples": sample.audio.len(),
            });
            writeln!(writer, "{record}")?;
            Ok(())
        })
        .context("failed to build training samples")?;
    writer.flush()?;

    processor
        .save_pretrained(output)
        .context("failed to save processor")?;
    info!(samples = written, path = %output.display(), "prepared dataset");
    Ok(())
}
