use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use scriba_core::{
    DEFAULT_TIMEOUT_SECS, ModelFormat, TranscriberFactory, TranscriptFormat, TranscriptionModel,
    builtin_engines, default_transcript_directory,
};

#[derive(Args)]
pub struct TranscribeArgs {
    /// Media file to transcribe
    media: PathBuf,

    /// Engine name, as listed by `scriba engines`
    #[arg(short, long, default_value = "openai-whisper")]
    engine: String,

    /// Model name, possibly namespaced (e.g. openai/tiny)
    #[arg(short, long, default_value = "tiny")]
    model: String,

    /// Local model weights; when set, the model name is only an alias
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Model weight format
    #[arg(long, default_value = "pytorch")]
    model_format: ModelFormat,

    /// ISO 639-1 language code; empty lets the engine detect it
    #[arg(short, long, default_value = "")]
    language: String,

    /// Transcript format to produce
    #[arg(short, long, default_value = "vtt")]
    format: TranscriptFormat,

    /// Directory transcripts are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Subprocess timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Print the transcript content after writing it
    #[arg(long)]
    print: bool,
}

pub async fn run(args: TranscribeArgs) -> Result<()> {
    let transcript_directory = args.output_dir.unwrap_or_else(default_transcript_directory);

    let factory = TranscriberFactory::new(builtin_engines())
        .with_timeout(Duration::from_secs(args.timeout));
    let transcriber = factory.create_from_engine_name(&args.engine, &transcript_directory)?;

    let mut model = TranscriptionModel::new(&args.model).with_format(args.model_format);
    if let Some(path) = args.model_path {
        model = model.with_path(path);
    }

    if !transcriber.supports(&model) {
        bail!(
            "engine {} does not accept {} models; pick another engine or --model-format",
            args.engine,
            model.format
        );
    }

    let transcript = transcriber
        .transcribe(&args.media, &model, &args.language, args.format)
        .await
        .with_context(|| format!("transcription with {} failed", args.engine))?;

    println!("{}", transcript.path.display());

    if args.print {
        print!("{}", transcript.read()?);
    }

    Ok(())
}
