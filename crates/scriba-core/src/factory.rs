//! Resolves engine names to concrete transcribers.

use std::path::PathBuf;
use std::time::Duration;

use crate::engine::TranscriptionEngine;
use crate::error::TranscriptionError;
use crate::transcriber::{
    Ctranslate2Transcriber, OpenaiWhisperTranscriber, Transcriber, WhisperTimestampedTranscriber,
};

/// Builds transcribers from the injected engine registry.
///
/// The registry is handed over once at startup and read-only afterwards.
/// "Unknown" (not in the registry) and "unimplemented" (registered but
/// not wired up) stay distinct failures: callers retry the former with
/// another name and treat the latter as a build-time gap.
pub struct TranscriberFactory {
    engines: Vec<TranscriptionEngine>,
    timeout: Option<Duration>,
}

impl TranscriberFactory {
    pub fn new(engines: Vec<TranscriptionEngine>) -> Self {
        Self { engines, timeout: None }
    }

    /// Applies a subprocess timeout to every transcriber created from
    /// here on.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn engines(&self) -> &[TranscriptionEngine] {
        &self.engines
    }

    pub fn create_from_engine_name(
        &self,
        engine_name: &str,
        transcript_directory: impl Into<PathBuf>,
    ) -> Result<Box<dyn Transcriber>, TranscriptionError> {
        let engine = self
            .engines
            .iter()
            .find(|engine| engine.name == engine_name)
            .ok_or_else(|| TranscriptionError::UnknownEngine(engine_name.to_string()))?
            .clone();
        let directory = transcript_directory.into();

        match engine.name.as_str() {
            "openai-whisper" => {
                let mut transcriber = OpenaiWhisperTranscriber::new(engine, directory);
                if let Some(timeout) = self.timeout {
                    transcriber = transcriber.with_timeout(timeout);
                }
                Ok(Box::new(transcriber))
            }
            "whisper-ctranslate2" => {
                let mut transcriber = Ctranslate2Transcriber::new(engine, directory);
                if let Some(timeout) = self.timeout {
                    transcriber = transcriber.with_timeout(timeout);
                }
                Ok(Box::new(transcriber))
            }
            "whisper-timestamped" => {
                let mut transcriber = WhisperTimestampedTranscriber::new(engine, directory);
                if let Some(timeout) = self.timeout {
                    transcriber = transcriber.with_timeout(timeout);
                }
                Ok(Box::new(transcriber))
            }
            _ => Err(TranscriptionError::UnimplementedEngine(engine.name)),
        }
    }
}

impl Default for TranscriberFactory {
    fn default() -> Self {
        Self::new(crate::engine::builtin_engines())
    }
}
