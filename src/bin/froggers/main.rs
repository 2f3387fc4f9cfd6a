//! froggers - run the effect on the default audio devices
//!
//! Run with: cargo run -- --topology delay-bump

mod app;
mod control;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use froggers::{CombEq, DelayBump, EngineConfig, Topology};

#[derive(Parser, Debug)]
#[command(name = "froggers")]
#[command(about = "Degradation, comb and tone-shaping effect on live audio input")]
struct Cli {
    /// JSON engine config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Signal chain after the frog block (comb-eq or delay-bump)
    #[arg(long)]
    topology: Option<Topology>,

    /// Seed for the stochastic modulator
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per engine block
    #[arg(long)]
    block_size: Option<usize>,
}

impl Cli {
    fn engine_config(&self) -> EyreResult<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)
                .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(topology) = self.topology {
            config.topology = topology;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;
    tracing::info!(topology = %config.topology, "starting froggers");

    match config.topology {
        Topology::CombEq => app::run::<CombEq>(config),
        Topology::DelayBump => app::run::<DelayBump>(config),
    }
}
