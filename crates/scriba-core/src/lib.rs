pub mod benchmark;
pub mod duration;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod factory;
pub mod model;
pub mod run;
pub mod transcriber;
pub mod transcript;

pub use benchmark::{Benchmark, BenchmarkEntry, BenchmarkOptions, render_summary};
pub use duration::{to_human_readable, to_timecode};
pub use engine::{EngineType, TranscriptionEngine, builtin_engines};
pub use error::TranscriptionError;
pub use evaluation::{EvaluationResult, evaluate};
pub use factory::TranscriberFactory;
pub use model::{ModelFormat, TranscriptionModel};
pub use run::{RunId, TranscriptionRun};
pub use transcriber::{
    Ctranslate2Transcriber, DEFAULT_TIMEOUT_SECS, OpenaiWhisperTranscriber, Transcriber,
    WhisperTimestampedTranscriber, default_transcript_directory,
};
pub use transcript::{TranscriptFile, TranscriptFormat};
