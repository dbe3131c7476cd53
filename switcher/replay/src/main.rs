//! Tabswitch Replay
//!
//! Replays a scripted sequence of taps, scrolls and swipes through the
//! tab switcher core and prints one JSON snapshot per step. Useful for
//! checking header and transition behavior without a UI.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script with the default 320x568 content area
//! tabswitch-replay script.json
//!
//! # Custom geometry and header height
//! tabswitch-replay --width 375 --height 667 --header-height 64 script.json
//!
//! # With verbose logging (to stderr)
//! RUST_LOG=debug tabswitch-replay script.json
//! ```
//!
//! # Environment Variables
//!
//! - `TABSWITCH_CONFIG`: Configuration file path
//! - `TABSWITCH_HEADER_HEIGHT`, `TABSWITCH_CONTENT_TOP`,
//!   `TABSWITCH_DURATION_MS`, `TABSWITCH_COMPLETION_THRESHOLD`: config
//!   overrides
//! - `RUST_LOG`: Log filter (overrides `--log-level`)

mod runner;
mod script;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tabswitch_core::{load_config_from_path, ConfigOverrides};

use runner::Replay;

/// Tabswitch Replay - scripted event playback for the tab switcher
#[derive(Parser, Debug)]
#[command(name = "tabswitch-replay")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON script of steps to replay
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long, env = "TABSWITCH_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content area width
    #[arg(long, default_value_t = 320.0)]
    width: f32,

    /// Content area height
    #[arg(long, default_value_t = 568.0)]
    height: f32,

    /// Header height (overrides config)
    #[arg(long, value_name = "UNITS")]
    header_height: Option<f32>,

    /// Timed slide duration in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    duration_ms: Option<u64>,

    /// Print setup host calls before the first step
    #[arg(long)]
    show_setup: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,
}

/// Initialize logging with the specified level
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "tabswitch_replay={level},tabswitch_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = load_config_from_path(args.config.clone())
        .context("Failed to load configuration")?;

    let mut overrides = ConfigOverrides::new();
    if let Some(height) = args.header_height {
        overrides = overrides.with_header_height(height);
    }
    if let Some(ms) = args.duration_ms {
        overrides = overrides.with_duration_ms(ms);
    }
    overrides
        .apply(&mut config)
        .context("Invalid command-line override")?;

    info!(source = %config.source(), "Configuration loaded");

    let steps = script::load_script(&args.script)?;
    info!(steps = steps.len(), script = ?args.script, "Replaying");

    let mut replay = Replay::new(config, args.width, args.height);
    let setup = replay.take_calls();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.show_setup {
        serde_json::to_writer(&mut out, &setup)?;
        writeln!(out)?;
    }

    for step in &steps {
        let snapshot = replay.apply(step)?;
        serde_json::to_writer(&mut out, &snapshot)?;
        writeln!(out)?;
    }

    info!(
        selected = replay.controller().committed_index(),
        "Replay finished"
    );
    Ok(())
}
