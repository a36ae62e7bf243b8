use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use scriba_core::{TranscriptFile, TranscriptFormat};

#[derive(Args)]
pub struct EvaluateArgs {
    /// Reference transcript (txt, vtt or srt)
    reference: PathBuf,

    /// Hypothesis transcript to score
    hypothesis: PathBuf,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

fn open(path: &Path) -> Result<TranscriptFile> {
    let format = TranscriptFormat::from_path(path)
        .with_context(|| format!("cannot infer transcript format of {}", path.display()))?;

    Ok(TranscriptFile::new(path, "", format))
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    let reference = open(&args.reference)?;
    let hypothesis = open(&args.hypothesis)?;

    let result = reference
        .evaluate(&hypothesis)
        .context("evaluation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("WER {:.3}  CER {:.3}", result.wer, result.cer);
    }

    Ok(())
}
