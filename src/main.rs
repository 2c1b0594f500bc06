//! Culture Map - Main Entry Point
//!
//! Command-line access to the cultural distance pipeline.

use clap::Parser;
use culture_map::cli::{
    build_pipeline, cmd_dimensions, cmd_distances, cmd_embed, cmd_list, cmd_report, Cli, Commands,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "culture_map=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Dimensions { data, json } => {
            let map = build_pipeline(config, None)?;
            cmd_dimensions(&map, &data, json)?;
        }
        Commands::Distances { data, metric, normalise, json } => {
            let map = build_pipeline(config, None)?;
            cmd_distances(&map, &data, metric.as_deref(), normalise, json)?;
        }
        Commands::Embed { data, algorithm, seed, json } => {
            let map = build_pipeline(config, seed)?;
            cmd_embed(&map, &data, algorithm.as_deref(), json)?;
        }
        Commands::Report { data, metric, algorithm } => {
            let map = build_pipeline(config, None)?;
            cmd_report(&map, &data, metric.as_deref(), algorithm.as_deref())?;
        }
        Commands::List => {
            cmd_list()?;
        }
    }

    Ok(())
}
