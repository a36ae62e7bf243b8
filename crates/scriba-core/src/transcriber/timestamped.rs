//! Driver for the `whisper_timestamped` command line interface.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::{EngineRunner, Transcriber};
use crate::engine::TranscriptionEngine;
use crate::error::TranscriptionError;
use crate::model::TranscriptionModel;
use crate::transcript::{TranscriptFile, TranscriptFormat};

/// `whisper_timestamped` appends the transcript extension to the full
/// media file name (`video.mp4.vtt`), so its output has to be renamed
/// onto the canonical `<stem>.<format>` path.
pub struct WhisperTimestampedTranscriber {
    runner: EngineRunner,
}

impl WhisperTimestampedTranscriber {
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
impl Transcriber for WhisperTimestampedTranscriber {
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

        let file_name = media_file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transcript".to_string());
        let internal_path = self
            .runner
            .transcript_directory()
            .join(format!("{file_name}.{}", format.extension()));
        self.runner.expect_output(&internal_path)?;

        let transcript_path = self.runner.canonical_transcript_path(media_file_path, format);
        tokio::fs::rename(&internal_path, &transcript_path).await?;

        Ok(TranscriptFile::new(transcript_path, language, format))
    }
}
