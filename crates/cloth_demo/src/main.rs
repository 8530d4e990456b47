#![forbid(unsafe_code)]

//! # Cloth Demo CLI
//!
//! ```bash
//! cloth_demo                         # default 50x50 grid, 3 strokes
//! cloth_demo --config cloth.toml     # settings from a file
//! cloth_demo --dump vertices.json    # write the final vertex buffer
//! ```

use std::fs;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloth_demo::{Cli, DemoConfig, Simulation, default_filter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_cli(&cli).context("failed to load configuration")?;
    tracing::debug!(?config, "Configuration resolved");

    let mut sim = Simulation::new(&config).context("failed to build cloth")?;
    let report = sim.run(config.run.frames).context("frame loop failed")?;

    if let Some(path) = &cli.dump {
        let json = serde_json::to_string(sim.vertices()).context("failed to encode vertices")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Vertex buffer written");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to encode report")?
    );
    Ok(())
}
