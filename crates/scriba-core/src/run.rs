//! Identity and timing of a single transcription attempt.
//!
//! A run is never persisted. Its externally visible artifacts are the
//! `<uuid>_<engine>_<model>` id string and the start/end marks it emits
//! through the log facade.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::duration::to_human_readable;
use crate::engine::TranscriptionEngine;
use crate::error::TranscriptionError;
use crate::model::TranscriptionModel;

static RUN_ID_MASK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})_([a-zA-Z0-9-]+)_([a-zA-Z0-9-/]+)$",
    )
    .unwrap()
});

/// Structured form of a run identifier. The delimited string is only a
/// serialization of this value, kept for interop with external tooling
/// and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId {
    pub uuid: Uuid,
    pub engine_name: String,
    pub model_name: String,
}

impl RunId {
    /// Mints an id for one attempt. Uniqueness under concurrency is
    /// delegated entirely to the uuid.
    pub fn new(engine: &TranscriptionEngine, model: &TranscriptionModel) -> Self {
        Self::with_uuid(Uuid::new_v4(), engine, model)
    }

    pub fn with_uuid(uuid: Uuid, engine: &TranscriptionEngine, model: &TranscriptionModel) -> Self {
        Self {
            uuid,
            engine_name: engine.name.clone(),
            model_name: model.name.clone(),
        }
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.uuid, self.engine_name, self.model_name)
    }
}

impl FromStr for RunId {
    type Err = TranscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = RUN_ID_MASK
            .captures(s)
            .ok_or_else(|| TranscriptionError::MalformedRunId(s.to_string()))?;
        let uuid = Uuid::parse_str(&captures[1])
            .map_err(|_| TranscriptionError::MalformedRunId(s.to_string()))?;

        Ok(Self {
            uuid,
            engine_name: captures[2].to_string(),
            model_name: captures[3].to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Stopped,
}

/// Lifecycle of one transcription attempt: `idle -> running -> stopped`.
///
/// Timing is best-effort telemetry. Misuse of the state machine is
/// logged, never raised, so a broken stopwatch cannot fail a
/// transcription that otherwise succeeded.
#[derive(Debug)]
pub struct TranscriptionRun {
    id: RunId,
    state: RunState,
    started_at: Option<Instant>,
    duration: Option<Duration>,
}

impl TranscriptionRun {
    pub fn new(engine: &TranscriptionEngine, model: &TranscriptionModel) -> Self {
        Self {
            id: RunId::new(engine, model),
            state: RunState::Idle,
            started_at: None,
            duration: None,
        }
    }

    pub fn id(&self) -> &RunId {
        &self.id
    }

    pub fn start_mark_name(&self) -> String {
        format!("{}-started", self.id)
    }

    pub fn end_mark_name(&self) -> String {
        format!("{}-ended", self.id)
    }

    /// Records the monotonic start mark and transitions to `running`.
    pub fn start(&mut self) {
        if self.state != RunState::Idle {
            log::error!("run {} already started", self.id);
            return;
        }

        self.started_at = Some(Instant::now());
        self.state = RunState::Running;
        log::debug!("{}", self.start_mark_name());
    }

    /// Records the end mark, measures the duration between the two marks
    /// and transitions to `stopped`.
    pub fn stop(&mut self) {
        match (self.state, self.started_at) {
            (RunState::Running, Some(started_at)) => {
                let elapsed = started_at.elapsed();
                self.duration = Some(elapsed);
                self.state = RunState::Stopped;
                log::debug!("{}", self.end_mark_name());
                log::info!(
                    "transcription {} took {}",
                    self.id,
                    to_human_readable(elapsed.as_millis() as u64)
                );
            }
            _ => log::error!("cannot stop run {}: it is not running", self.id),
        }
    }

    /// Measured duration, available once the run has stopped.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builtin_engines;

    fn engine(name: &str) -> TranscriptionEngine {
        builtin_engines()
            .into_iter()
            .find(|e| e.name == name)
            .unwrap()
    }

    #[test]
    fn test_matches_supposedly_valid_ids() {
        let supposedly_valid_ids = [
            "a44521d0-0fb8-4ade-8002-3385545c3318_openai-whisper_tiny",
            "a44521d0-0fb8-4ade-8002-3385545c3318_openai-whisper_openai/tiny",
        ];

        for id in supposedly_valid_ids {
            assert!(RunId::from_str(id).is_ok(), "{id} should parse");
        }
    }

    #[test]
    fn test_round_trip() {
        let engine = engine("openai-whisper");
        let model = TranscriptionModel::new("openai/tiny");
        let uuid = Uuid::new_v4();

        let id = RunId::with_uuid(uuid, &engine, &model);
        let parsed = RunId::from_str(&id.to_string()).unwrap();

        assert_eq!(parsed.uuid, uuid);
        assert_eq!(parsed.engine_name, "openai-whisper");
        assert_eq!(parsed.model_name, "openai/tiny");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_malformed_ids_are_rejected() {
        let malformed = [
            "",
            "openai-whisper_tiny",
            "not-a-uuid_openai-whisper_tiny",
            "a44521d0-0fb8-4ade-8002-3385545c3318_openai-whisper",
            "a44521d0-0fb8-4ade-8002-3385545c3318__tiny",
            "a44521d0-0fb8-4ade-8002-3385545c3318_openai whisper_tiny",
        ];

        for id in malformed {
            assert!(
                matches!(
                    RunId::from_str(id),
                    Err(TranscriptionError::MalformedRunId(_))
                ),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn test_run_measures_duration_between_marks() {
        let engine = engine("openai-whisper");
        let model = TranscriptionModel::new("tiny");

        let mut run = TranscriptionRun::new(&engine, &model);
        assert!(run.duration().is_none());

        run.start();
        run.stop();

        assert!(run.duration().is_some());
        assert!(run.start_mark_name().ends_with("-started"));
        assert!(run.end_mark_name().ends_with("-ended"));
    }

    #[test]
    fn test_stop_without_start_is_swallowed() {
        let engine = engine("openai-whisper");
        let model = TranscriptionModel::new("tiny");

        let mut run = TranscriptionRun::new(&engine, &model);
        run.stop();

        assert!(run.duration().is_none());
    }
}
