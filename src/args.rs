use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, WorldConfig};

/// Command line of the `voxel-world` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "voxel-world")]
#[command(about = "Generates and meshes a voxel world, then logs what it built", long_about = None)]
pub struct Cli {
    /// JSON configuration file. Missing fields take their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worker threads for the pipeline (0 = available parallelism).
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Terrain seed, overriding the configuration.
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Build on the calling thread instead of the worker pool.
    #[arg(long)]
    pub single_threaded: bool,
}

impl Cli {
    /// The configuration file (or the defaults) with the command line
    /// overrides applied, validated.
    pub fn world_config(&self) -> Result<WorldConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::load(path)?,
            None => WorldConfig::default(),
        };
        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(seed) = self.seed {
            config.terrain.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}
