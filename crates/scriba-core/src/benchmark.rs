//! Cross-engine benchmark harness.
//!
//! Runs every (engine, model) pair against one media file, scores each
//! transcript against a fixed reference and aggregates durations and
//! error rates keyed by run id. Per-pair failures are recorded, not
//! propagated, so the matrix always completes.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use crate::duration::to_human_readable;
use crate::error::TranscriptionError;
use crate::evaluation::EvaluationResult;
use crate::factory::TranscriberFactory;
use crate::model::TranscriptionModel;
use crate::run::RunId;
use crate::transcript::{TranscriptFile, TranscriptFormat};

/// Fixed inputs of one benchmark run.
pub struct BenchmarkOptions {
    pub engine_names: Vec<String>,
    pub models: Vec<TranscriptionModel>,
    pub media_file_path: PathBuf,
    /// Reference every produced transcript is scored against.
    pub reference: TranscriptFile,
    pub language: String,
    pub format: TranscriptFormat,
    /// Working directory, removed at completion unless kept.
    pub transcript_directory: PathBuf,
    pub keep_transcript_directory: bool,
}

/// One (engine, model) attempt.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkEntry {
    pub run_id: String,
    pub engine_name: String,
    pub model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Benchmark {
    factory: TranscriberFactory,
    options: BenchmarkOptions,
}

impl Benchmark {
    pub fn new(factory: TranscriberFactory, options: BenchmarkOptions) -> Self {
        Self { factory, options }
    }

    /// Runs the full engine × model matrix.
    pub async fn run(&self) -> Result<Vec<BenchmarkEntry>, TranscriptionError> {
        let options = &self.options;
        let mut entries = Vec::with_capacity(options.engine_names.len() * options.models.len());

        for engine_name in &options.engine_names {
            for model in &options.models {
                entries.push(self.run_pair(engine_name, model).await);
            }
        }

        if !options.keep_transcript_directory
            && let Err(error) = std::fs::remove_dir_all(&options.transcript_directory)
        {
            log::warn!(
                "could not remove transcript directory {}: {error}",
                options.transcript_directory.display()
            );
        }

        Ok(entries)
    }

    async fn run_pair(&self, engine_name: &str, model: &TranscriptionModel) -> BenchmarkEntry {
        let options = &self.options;
        let mut entry = BenchmarkEntry {
            run_id: String::new(),
            engine_name: engine_name.to_string(),
            model_name: model.name.clone(),
            duration_ms: None,
            evaluation: None,
            error: None,
        };

        let transcriber = match self
            .factory
            .create_from_engine_name(engine_name, &options.transcript_directory)
        {
            Ok(transcriber) => transcriber,
            Err(error) => {
                log::error!("skipping {engine_name}/{}: {error}", model.name);
                entry.error = Some(error.to_string());
                return entry;
            }
        };

        entry.run_id = RunId::new(transcriber.engine(), model).to_string();

        if !transcriber.supports(model) {
            let error = TranscriptionError::UnsupportedModel {
                engine: engine_name.to_string(),
                format: model.format,
            };
            log::error!("skipping {engine_name}/{}: {error}", model.name);
            entry.error = Some(error.to_string());
            return entry;
        }

        let started = Instant::now();
        let outcome = transcriber
            .transcribe(&options.media_file_path, model, &options.language, options.format)
            .await;

        match outcome {
            Ok(transcript) => {
                entry.duration_ms = Some(started.elapsed().as_millis() as u64);
                match options.reference.evaluate(&transcript) {
                    Ok(evaluation) => entry.evaluation = Some(evaluation),
                    Err(error) => entry.error = Some(error.to_string()),
                }
            }
            Err(error) => {
                log::error!("{engine_name}/{} failed: {error}", model.name);
                entry.error = Some(error.to_string());
            }
        }

        entry
    }
}

/// Plain-text summary, one row per attempt.
pub fn render_summary(entries: &[BenchmarkEntry]) -> String {
    let mut rows = vec![[
        "ENGINE".to_string(),
        "MODEL".to_string(),
        "DURATION".to_string(),
        "WER".to_string(),
        "CER".to_string(),
        "ERROR".to_string(),
    ]];

    for entry in entries {
        rows.push([
            entry.engine_name.clone(),
            entry.model_name.clone(),
            entry
                .duration_ms
                .map(to_human_readable)
                .unwrap_or_else(|| "-".to_string()),
            entry
                .evaluation
                .map(|evaluation| format!("{:.3}", evaluation.wer))
                .unwrap_or_else(|| "-".to_string()),
            entry
                .evaluation
                .map(|evaluation| format!("{:.3}", evaluation.cer))
                .unwrap_or_else(|| "-".to_string()),
            entry.error.clone().unwrap_or_default(),
        ]);
    }

    let mut widths = [0usize; 6];
    for row in &rows {
        for (width, column) in widths.iter_mut().zip(row) {
            *width = (*width).max(column.len());
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(column, width)| format!("{column:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
