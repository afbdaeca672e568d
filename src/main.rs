use anyhow::{Context, Result};
use clap::Parser;
use songlake::config::{CliConfig, EtlConfig, FileConfig};
use songlake::context::EtlContext;
use songlake::stats::TracingReporter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Root directory holding the song_data/ and log_data/ input trees.
    #[clap(value_parser = parse_path)]
    pub input_root: PathBuf,

    /// Root directory the five output tables are written under.
    #[clap(value_parser = parse_path)]
    pub output_root: PathBuf,

    /// Optional TOML config file; its values override the CLI.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Number of worker threads (0 = one per core).
    #[clap(long, default_value_t = 0)]
    pub threads: usize,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        input_root: Some(cli_args.input_root),
        output_root: Some(cli_args.output_root),
        threads: cli_args.threads,
    };
    let config = EtlConfig::resolve(&cli_config, file_config)?;

    info!(
        "Starting run: input {:?}, output {:?}",
        config.input_root, config.output_root
    );
    let ctx = EtlContext::new(config.threads, Arc::new(TracingReporter))?;
    songlake::pipeline::run(&ctx, &config)
}
