//! Polymorphic drivers for the supported speech-to-text engines.
//!
//! Every transcriber shells out to an external program, waits for it to
//! exit and maps the program's own output file onto the canonical
//! `<transcript directory>/<media stem>.<format>` path. Engines differ
//! only in the binary invoked, its argument list and that output-name
//! mapping.

mod ctranslate2;
mod openai_whisper;
mod timestamped;

pub use ctranslate2::Ctranslate2Transcriber;
pub use openai_whisper::OpenaiWhisperTranscriber;
pub use timestamped::WhisperTimestampedTranscriber;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::engine::TranscriptionEngine;
use crate::error::TranscriptionError;
use crate::model::TranscriptionModel;
use crate::run::TranscriptionRun;
use crate::transcript::{TranscriptFile, TranscriptFormat};

/// Default subprocess timeout applied by the CLI.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Where transcripts land when the caller does not choose a directory.
pub fn default_transcript_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("scriba")
        .join("transcripts")
}

/// Contract each engine-specific transcriber implements.
///
/// Implementations keep all per-run state in locals, so a single
/// instance may serve concurrent calls from separate tasks. Concurrent
/// runs against the same media file in the same directory race on the
/// output path and must be avoided by the caller.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Capability record of the engine this transcriber drives.
    fn engine(&self) -> &TranscriptionEngine;

    /// Whether the engine accepts the model's weight format. Callers
    /// must branch on this before invoking `transcribe`.
    fn supports(&self, model: &TranscriptionModel) -> bool {
        self.engine().supports(model)
    }

    /// Validation hook: checks local weight presence when the model
    /// carries a `path`. Engines load the actual weights themselves.
    fn load_model(&self, model: &TranscriptionModel) -> Result<(), TranscriptionError> {
        if let Some(path) = &model.path
            && !path.exists()
        {
            return Err(TranscriptionError::ModelFileNotFound {
                name: model.name.clone(),
                path: path.clone(),
            });
        }

        Ok(())
    }

    /// Best-effort language detection. Engines without support report an
    /// empty string.
    async fn detect_language(
        &self,
        _media_file_path: &Path,
        _model: &TranscriptionModel,
    ) -> Result<String, TranscriptionError> {
        Ok(String::new())
    }

    /// Runs the external engine on `media_file_path` and returns the
    /// transcript at the canonical path.
    async fn transcribe(
        &self,
        media_file_path: &Path,
        model: &TranscriptionModel,
        language: &str,
        format: TranscriptFormat,
    ) -> Result<TranscriptFile, TranscriptionError>;
}

/// State shared by every concrete transcriber: the engine descriptor,
/// the directory transcripts land in and an optional subprocess timeout.
#[derive(Debug, Clone)]
pub(crate) struct EngineRunner {
    engine: TranscriptionEngine,
    transcript_directory: PathBuf,
    timeout: Option<Duration>,
}

impl EngineRunner {
    pub(crate) fn new(engine: TranscriptionEngine, transcript_directory: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            transcript_directory: transcript_directory.into(),
            timeout: None,
        }
    }

    pub(crate) fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    pub(crate) fn engine(&self) -> &TranscriptionEngine {
        &self.engine
    }

    pub(crate) fn transcript_directory(&self) -> &Path {
        &self.transcript_directory
    }

    /// Canonical transcript path: `<dir>/<media stem>.<format>`.
    pub(crate) fn canonical_transcript_path(
        &self,
        media_file_path: &Path,
        format: TranscriptFormat,
    ) -> PathBuf {
        let stem = media_file_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transcript".to_string());

        self.transcript_directory.join(format!("{stem}.{}", format.extension()))
    }

    /// Rejects unsupported models and missing weights, then mints and
    /// starts the run governing one `transcribe` call.
    pub(crate) fn start_run(
        &self,
        transcriber: &dyn Transcriber,
        model: &TranscriptionModel,
    ) -> Result<TranscriptionRun, TranscriptionError> {
        if !transcriber.supports(model) {
            return Err(TranscriptionError::UnsupportedModel {
                engine: self.engine.name.clone(),
                format: model.format,
            });
        }
        transcriber.load_model(model)?;

        let mut run = TranscriptionRun::new(&self.engine, model);
        run.start();
        Ok(run)
    }

    /// Spawns the engine binary and waits for it to exit. Stdout and
    /// stderr are captured for diagnostics only; non-zero exit surfaces
    /// the captured stderr. When the timeout elapses the child handle is
    /// dropped with kill-on-drop set, so the subprocess dies with it.
    pub(crate) async fn run_engine(&self, args: &[String]) -> Result<(), TranscriptionError> {
        tokio::fs::create_dir_all(&self.transcript_directory).await?;

        let binary = self.engine.binary_name();
        log::debug!("spawning {binary} {}", args.join(" "));

        let child = Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| TranscriptionError::EngineExecutionFailed {
                engine: self.engine.name.clone(),
                status: None,
                stderr: error.to_string(),
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| TranscriptionError::Timeout {
                    engine: self.engine.name.clone(),
                    timeout: limit,
                })??,
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            return Err(TranscriptionError::EngineExecutionFailed {
                engine: self.engine.name.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !output.stdout.is_empty() {
            log::debug!("{binary} stdout: {}", String::from_utf8_lossy(&output.stdout).trim());
        }

        Ok(())
    }

    /// Distinguishes a missing output file from an execution failure.
    pub(crate) fn expect_output(&self, path: &Path) -> Result<(), TranscriptionError> {
        if path.exists() {
            Ok(())
        } else {
            Err(TranscriptionError::OutputMissing {
                engine: self.engine.name.clone(),
                path: path.to_path_buf(),
            })
        }
    }
}
