// src/main.rs
use anyhow::Result;
use clap::Parser;
use serde_json::json;

use ndvi_calc::cli::{Cli, Commands};
use ndvi_calc::{logging, processing, server};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Serve(config) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(config.worker_threads())
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(config))?;
        }
        Commands::Ndvi {
            input,
            red_band,
            nir_band,
            stats_only,
        } => {
            let bytes = std::fs::read(&input)?;
            let result = processing::compute(bytes, red_band, nir_band)?;

            let output = if stats_only {
                json!({ "statistics": result.statistics, "shape": result.shape })
            } else {
                serde_json::to_value(&result)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
