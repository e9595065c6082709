//! NativeState Player - headless host shell
//!
//! Stands in for the host UI: reads commands from stdin, pushes the
//! resulting state through the channel, and runs an engine thread whose
//! scene logs every applied change.
//!
//! # Usage
//!
//! ```bash
//! nativestate-player
//! nativestate-player --assets ./assets --autostart
//! nativestate-player --config player.toml --tick-rate 30
//! RUST_LOG=debug nativestate-player
//! ```

mod commands;
mod player;
mod scene;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::player::{PlayerConfig, run};

#[derive(Parser)]
#[command(name = "nativestate-player")]
#[command(author, version, about = "Headless host shell for the native state channel")]
struct Args {
    /// Config file (default: config.toml in the platform config directory)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the preloaded textures
    #[arg(long, short = 'a', value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Engine tick rate in Hz
    #[arg(long, short = 't')]
    tick_rate: Option<u32>,

    /// Start the engine immediately
    #[arg(long)]
    autostart: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config
        && !path.exists()
    {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    if args.tick_rate == Some(0) {
        anyhow::bail!("Tick rate must be at least 1");
    }

    run(PlayerConfig {
        config_path: args.config,
        asset_dir: args.assets,
        tick_rate: args.tick_rate,
        autostart: args.autostart,
    })
}
