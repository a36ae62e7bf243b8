use anyhow::Result;
use clap::Args;
use scriba_core::{TranscriberFactory, builtin_engines, default_transcript_directory};

#[derive(Args)]
pub struct EnginesArgs {
    /// Emit the registry as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: EnginesArgs) -> Result<()> {
    let engines = builtin_engines();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engines)?);
        return Ok(());
    }

    let factory = TranscriberFactory::new(engines.clone());
    // Probing with a throwaway directory only classifies wired vs unwired.
    let probe_directory = default_transcript_directory();

    for engine in &engines {
        let status = match factory.create_from_engine_name(&engine.name, &probe_directory) {
            Ok(_) => "available",
            Err(_) => "not implemented",
        };
        let formats = engine
            .supported_model_formats
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        println!("{} ({}) [{status}]", engine.name, engine.language);
        println!("  {}", engine.description);
        println!("  models: {formats}  license: {}", engine.license);
        println!("  {}", engine.forge_url);
        println!();
    }

    Ok(())
}
