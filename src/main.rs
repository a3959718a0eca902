// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camera-preview")]
#[command(about = "Real-time camera preview pipeline with native frame processing")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/camera-preview/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline activity at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the preview pipeline against the synthetic camera
    Run {
        /// Start on the front-facing camera
        #[arg(short, long)]
        front: bool,

        /// Run duration in seconds
        #[arg(short, long)]
        duration: Option<u64>,

        /// Synthetic camera frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Toggle between front and back camera every N seconds
        #[arg(long)]
        toggle_every: Option<u64>,
    },

    /// List cameras and the preview size chosen for each
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set RUST_LOG to override, e.g. RUST_LOG=camera_preview=debug
    let default_filter = if cli.verbose {
        "warn,camera_preview=info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let config = camera_preview::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            front,
            duration,
            fps,
            toggle_every,
        } => {
            let options = cli::RunOptions {
                facing: if front {
                    camera_preview::Facing::Front
                } else {
                    config.initial_facing()
                },
                duration_secs: duration.unwrap_or(camera_preview::constants::timing::DEFAULT_RUN_SECS),
                source_fps: fps.unwrap_or(config.source_fps).max(1),
                toggle_every_secs: toggle_every.filter(|&s| s > 0),
            };
            cli::run_preview(&config, options)?;
        }
        Commands::List => cli::list_cameras(&config)?,
    }

    Ok(())
}
