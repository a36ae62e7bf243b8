//! Error taxonomy of the transcription core.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::model::ModelFormat;

/// Everything the transcription core can fail with. None of these are
/// retried internally; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The engine name is not in the registry.
    #[error("unknown engine \"{0}\"")]
    UnknownEngine(String),

    /// The engine is registered but no transcriber is wired up for it.
    #[error("engine \"{0}\" has no transcriber implementation")]
    UnimplementedEngine(String),

    /// The engine cannot consume the model's weight format. Callers are
    /// expected to branch on `supports()` before invoking.
    #[error("engine \"{engine}\" does not support {format} models")]
    UnsupportedModel { engine: String, format: ModelFormat },

    /// The model names local weights that are not on disk.
    #[error("model \"{name}\" not found at {path}")]
    ModelFileNotFound { name: String, path: PathBuf },

    /// The engine binary could not be spawned or exited non-zero.
    #[error("engine \"{engine}\" failed (status {status:?}): {stderr}")]
    EngineExecutionFailed {
        engine: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The engine exited successfully but the expected transcript file is
    /// absent, which points at an output-path mapping mismatch rather
    /// than a crash.
    #[error("engine \"{engine}\" produced no transcript at {path}")]
    OutputMissing { engine: String, path: PathBuf },

    /// A run id string does not match the `<uuid>_<engine>_<model>` grammar.
    #[error("malformed run id \"{0}\"")]
    MalformedRunId(String),

    /// The engine subprocess exceeded the caller-imposed timeout and was
    /// killed. Any partially written transcript must not be used.
    #[error("engine \"{engine}\" timed out after {timeout:?}")]
    Timeout { engine: String, timeout: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
