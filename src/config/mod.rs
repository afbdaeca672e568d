mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub input_root: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub threads: usize,
}

/// Resolved pipeline configuration: the two storage roots plus the worker
/// count for the execution context.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub threads: usize,
}

impl EtlConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let input_root = file
            .input_root
            .map(PathBuf::from)
            .or_else(|| cli.input_root.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("input_root must be specified on the CLI or in the config file")
            })?;

        if !input_root.exists() {
            bail!("Input root does not exist: {:?}", input_root);
        }
        if !input_root.is_dir() {
            bail!("Input root is not a directory: {:?}", input_root);
        }

        let output_root = file
            .output_root
            .map(PathBuf::from)
            .or_else(|| cli.output_root.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("output_root must be specified on the CLI or in the config file")
            })?;

        let threads = file.threads.unwrap_or(cli.threads);

        Ok(Self {
            input_root,
            output_root,
            threads,
        })
    }

    /// Root of the catalog feed tree.
    pub fn song_data_path(&self) -> PathBuf {
        self.input_root.join("song_data")
    }

    /// Root of the event-log tree.
    pub fn log_data_path(&self) -> PathBuf {
        self.input_root.join("log_data")
    }
}
