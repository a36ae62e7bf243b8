mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scriba", version, about = "Drive speech-to-text engines and score their transcripts")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered engines and their capabilities
    Engines(commands::engines::EnginesArgs),
    /// Transcribe a media file with one engine
    Transcribe(commands::transcribe::TranscribeArgs),
    /// Score a hypothesis transcript against a reference
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Run an engine x model matrix and print a summary table
    Benchmark(commands::benchmark::BenchmarkArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Engines(args) => commands::engines::run(args),
        Commands::Transcribe(args) => commands::transcribe::run(args).await,
        Commands::Evaluate(args) => commands::evaluate::run(args),
        Commands::Benchmark(args) => commands::benchmark::run(args).await,
    }
}
