//! Driver for the `whisper-ctranslate2` command line interface.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::{EngineRunner, Transcriber};
use crate::engine::TranscriptionEngine;
use crate::error::TranscriptionError;
use crate::model::TranscriptionModel;
use crate::transcript::{TranscriptFile, TranscriptFormat};

/// Flag-compatible with the reference CLI and names its output after the
/// media file stem, so no rename step is needed.
pub struct Ctranslate2Transcriber {
    runner: EngineRunner,
}

impl Ctranslate2Transcriber {
    pub fn new(engine: TranscriptionEngine, transcript_directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            runner: EngineRunner::new(engine, transcript_directory),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.runner.set_timeout(timeout);
        self
    }
}

#[async_trait]
impl Transcriber for Ctranslate2Transcriber {
    fn engine(&self) -> &TranscriptionEngine {
        self.runner.engine()
    }

    async fn transcribe(
        &self,
        media_file_path: &Path,
        model: &TranscriptionModel,
        language: &str,
        format: TranscriptFormat,
    ) -> Result<TranscriptFile, TranscriptionError> {
        let mut run = self.runner.start_run(self, model)?;

        let mut args = vec![
            media_file_path.to_string_lossy().into_owned(),
            "--model".to_string(),
            model.name.clone(),
            "--output_format".to_string(),
            format.as_str().to_string(),
            "--output_dir".to_string(),
            self.runner.transcript_directory().to_string_lossy().into_owned(),
        ];
        if !language.is_empty() {
            args.push("--language".to_string());
            args.push(language.to_string());
        }

        let result = self.runner.run_engine(&args).await;
        run.stop();
        result?;

        let transcript_path = self.runner.canonical_transcript_path(media_file_path, format);
        self.runner.expect_output(&transcript_path)?;

        Ok(TranscriptFile::new(transcript_path, language, format))
    }
}
