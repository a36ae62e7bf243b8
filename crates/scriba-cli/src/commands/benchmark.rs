use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use scriba_core::{
    Benchmark, BenchmarkOptions, DEFAULT_TIMEOUT_SECS, TranscriberFactory, TranscriptFile,
    TranscriptFormat, TranscriptionModel, builtin_engines, default_transcript_directory,
    render_summary,
};

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Media file every (engine, model) pair transcribes
    media: PathBuf,

    /// Reference transcript the outputs are scored against
    #[arg(short, long)]
    reference: PathBuf,

    /// Engines to benchmark; defaults to every registered engine
    #[arg(short, long)]
    engines: Vec<String>,

    /// Models to benchmark each engine with
    #[arg(short, long, default_values_t = [String::from("tiny")])]
    models: Vec<String>,

    /// ISO 639-1 language code; empty lets the engines detect it
    #[arg(short, long, default_value = "")]
    language: String,

    /// Transcript format the engines produce
    #[arg(short, long, default_value = "vtt")]
    format: TranscriptFormat,

    /// Working directory for the produced transcripts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Subprocess timeout in seconds, per attempt
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Keep the working transcript directory after the run
    #[arg(long)]
    keep: bool,

    /// Emit the entries as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn open_reference(path: &Path) -> Result<TranscriptFile> {
    let format = TranscriptFormat::from_path(path)
        .with_context(|| format!("cannot infer transcript format of {}", path.display()))?;

    Ok(TranscriptFile::new(path, "", format))
}

pub async fn run(args: BenchmarkArgs) -> Result<()> {
    let registry = builtin_engines();
    let engine_names = if args.engines.is_empty() {
        registry.iter().map(|engine| engine.name.clone()).collect()
    } else {
        args.engines
    };

    let reference = open_reference(&args.reference)?;
    let factory =
        TranscriberFactory::new(registry).with_timeout(Duration::from_secs(args.timeout));

    let benchmark = Benchmark::new(
        factory,
        BenchmarkOptions {
            engine_names,
            models: args.models.into_iter().map(TranscriptionModel::new).collect(),
            media_file_path: args.media,
            reference,
            language: args.language,
            format: args.format,
            transcript_directory: args
                .output_dir
                .unwrap_or_else(|| default_transcript_directory().join("benchmark")),
            keep_transcript_directory: args.keep,
        },
    );

    let entries = benchmark.run().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", render_summary(&entries));
    }

    Ok(())
}
