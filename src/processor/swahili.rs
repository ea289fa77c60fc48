use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::Arc,
};

use tracing::{debug, info};

use super::{
    ManifestItem, ProcessorMapper, ProcessorMode, TextProcessor, TrainingSample,
    manifest::read_manifest,
};
use crate::{
    audio::load_wav,
    config::ProcessorConfig,
    errors::{ProcessorError, Result},
    nlp::{
        correction::OrthographyCorrector,
        g2p::{G2pEngine, WordUnit},
        sequence::SequenceAssembler,
        swahili::{SWAHILI_IPA_VOCABULARY, default_corrector},
        symbols::SymbolVocabulary,
    },
};

const PROCESSOR_NAME: &str = "SwahiliIPAProcessor";

pub struct SwahiliIpaProcessor {
    config: ProcessorConfig,
    mode: ProcessorMode,
    vocab: Arc<SymbolVocabulary>,
    engine: Arc<dyn G2pEngine>,
    corrector: OrthographyCorrector,
    items: Vec<ManifestItem>,
    speakers_map: HashMap<String, usize>,
}

impl SwahiliIpaProcessor {
    pub fn new(config: ProcessorConfig, engine: Arc<dyn G2pEngine>) -> Result<Self> {
        Self::with_vocabulary(config, engine, Arc::clone(&*SWAHILI_IPA_VOCABULARY))
    }

    pub fn with_vocabulary(
        config: ProcessorConfig,
        engine: Arc<dyn G2pEngine>,
        vocab: Arc<SymbolVocabulary>,
    ) -> Result<Self> {
        config.validate()?;
        let corrector = default_corrector(config.on_correction_mismatch)?;
        Ok(Self {
            mode: config.mode,
            config,
            vocab,
            engine,
            corrector,
            items: Vec::new(),
            speakers_map: HashMap::new(),
        })
    }

    /// Restores the speaker map saved by `save_pretrained`. The symbol table
    /// itself is compiled in and never read back from disk.
    pub fn from_pretrained(
        dir: &Path,
        config: ProcessorConfig,
        engine: Arc<dyn G2pEngine>,
    ) -> Result<Self> {
        let mapper = ProcessorMapper::load(dir)?;
        if mapper.processor_name != PROCESSOR_NAME {
            return Err(ProcessorError::Config(format!(
                "{} holds a {} processor, expected {PROCESSOR_NAME}",
                dir.display(),
                mapper.processor_name
            )));
        }
        let mut processor = Self::new(config, engine)?;
        if !mapper.vocabulary.is_empty() && mapper.vocabulary != processor.vocab.name() {
            return Err(ProcessorError::Config(format!(
                "saved vocabulary {} does not match {}",
                mapper.vocabulary,
                processor.vocab.name()
            )));
        }
        processor.speakers_map = mapper.speakers_map.into_iter().collect();
        info!(path = %dir.display(), speakers = processor.speakers_map.len(), "loaded processor");
        Ok(processor)
    }

    pub fn corrector(&self) -> &OrthographyCorrector {
        &self.corrector
    }

    pub fn eos_token(&self) -> Option<&'static str> {
        None
    }

    pub fn text_to_phonemes(&self, text: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for sentence in self.engine.sentences(text, self.config.language)? {
            for unit in sentence {
                match unit {
                    WordUnit::Break { text, .. } => tokens.push(text),
                    WordUnit::Word { phonemes, .. } if phonemes.is_empty() => {}
                    WordUnit::Word {
                        phonemes,
                        lexical: true,
                        ..
                    } => tokens.extend(phonemes),
                    WordUnit::Word { text, phonemes, .. } => {
                        tokens.extend(self.corrector.correct(&text, phonemes, &self.vocab)?);
                    }
                }
            }
        }
        Ok(tokens)
    }

    fn create_speaker_map(&mut self) {
        self.speakers_map.clear();
        for item in &self.items {
            let next_id = self.speakers_map.len();
            self.speakers_map
                .entry(item.speaker_name.clone())
                .or_insert(next_id);
        }
    }

    fn assembler(&self) -> SequenceAssembler<'_> {
        SequenceAssembler::new(&self.vocab)
    }
}

impl TextProcessor for SwahiliIpaProcessor {
    fn name(&self) -> &'static str {
        PROCESSOR_NAME
    }

    fn mode(&self) -> ProcessorMode {
        self.mode
    }

    fn set_mode(&mut self, mode: ProcessorMode) {
        self.mode = mode;
    }

    fn vocabulary(&self) -> &SymbolVocabulary {
        &self.vocab
    }

    fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    fn create_items(&mut self) -> Result<()> {
        self.items = read_manifest(&self.config)?;
        self.create_speaker_map();
        info!(
            items = self.items.len(),
            speakers = self.speakers_map.len(),
            "loaded manifest"
        );
        Ok(())
    }

    fn get_one_sample(&self, item: &ManifestItem) -> Result<TrainingSample> {
        let clip = load_wav(&item.wav_path)?;
        let text_ids = self.text_to_sequence(&item.text)?;

        Ok(TrainingSample {
            raw_text: item.text.clone(),
            text_ids,
            audio: clip.samples,
            channels: clip.channels,
            utt_id: item.utt_id(),
            speaker_name: item.speaker_name.clone(),
            rate: clip.sample_rate,
        })
    }

    fn text_to_sequence(&self, text: &str) -> Result<Vec<i32>> {
        match self.mode {
            ProcessorMode::Train => self.assembler().assemble(text.split_whitespace()),
            ProcessorMode::Inference => {
                let phonemes = self.text_to_phonemes(text)?;
                debug!(engine = self.engine.name(), tokens = phonemes.len(), "phonemised text");
                self.assembler().assemble(&phonemes)
            }
        }
    }

    fn save_pretrained(&self, dir: &Path) -> Result<()> {
        let mapper = ProcessorMapper {
            processor_name: PROCESSOR_NAME.to_string(),
            vocabulary: self.vocab.name().to_string(),
            symbol_to_id: BTreeMap::new(),
            speakers_map: self
                .speakers_map
                .iter()
                .map(|(name, id)| (name.clone(), *id))
                .collect(),
        };
        mapper.save(dir)?;
        info!(path = %dir.display(), "saved processor");
        Ok(())
    }

    fn speaker_id(&self, speaker_name: &str) -> Option<usize> {
        self.speakers_map.get(speaker_name).copied()
    }
}
