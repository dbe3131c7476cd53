//! Tabswitch TUI Entry Point
//!
//! Launches the terminal surface for the tab switcher.
//!
//! Usage:
//!   tabswitch-tui [OPTIONS] [PAGE_A PAGE_B]
//!
//! Options:
//!   -c, --config <FILE>           Configuration file
//!   --header-rows <ROWS>          Rows the header spans (default: 3)
//!   --duration-ms <MS>            Timed slide duration
//!
//! Logging goes to stderr and is off unless `RUST_LOG` is set.

use std::io;
use std::panic;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabswitch_core::{load_config_from_path, ConfigOverrides};
use tabswitch_tui::surface::HEADER_ROWS;
use tabswitch_tui::widgets::{sample_pages, Page};
use tabswitch_tui::App;

/// Tabswitch TUI - two scrollable pages under a collapsible header
#[derive(Parser, Debug)]
#[command(name = "tabswitch-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Two text files to show as the pages
    #[arg(value_name = "PAGE", num_args = 2)]
    pages: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "TABSWITCH_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rows the header spans
    #[arg(long, default_value_t = HEADER_ROWS)]
    header_rows: u16,

    /// Timed slide duration in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    duration_ms: Option<u64>,
}

fn load_pages(paths: &[PathBuf]) -> Result<[Page; 2]> {
    match paths {
        [first, second] => Ok([
            Page::from_file(first).with_context(|| format!("Failed to read {}", first.display()))?,
            Page::from_file(second)
                .with_context(|| format!("Failed to read {}", second.display()))?,
        ]),
        _ => Ok(sample_pages()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config =
        load_config_from_path(args.config.clone()).context("Failed to load configuration")?;
    let mut overrides = ConfigOverrides::new();
    if let Some(ms) = args.duration_ms {
        overrides = overrides.with_duration_ms(ms);
    }
    overrides
        .apply(&mut config)
        .context("Invalid command-line override")?;

    let pages = load_pages(&args.pages)?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: tabswitch-tui requires a terminal (TTY)");
        eprintln!("Use tabswitch-replay to drive the switcher without one.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let size = crossterm::terminal::size()?;
    let mut app = App::new(config, pages, args.header_rows, size);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}
