//! Applock TUI - Terminal chat client with a passcode screen lock
//!
//! The chat locks on startup, after an idle timeout and on the lock shortcut.
//! Logs go to a file next to the config so they do not tear the alternate
//! screen.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use applock_core::{ConfigStore, LockConfig, Notifier, Severity};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use applock_tui::app::{App, EventHandler, JsonConfigStore};

/// Log file name, created next to the config file
const LOG_FILE_NAME: &str = "applock.log";

/// Applock - chat client with a passcode screen lock
#[derive(Parser)]
#[command(name = "applock-tui")]
#[command(about = "Terminal chat client with a passcode screen lock")]
#[command(version)]
struct Cli {
    /// Path to the settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Remove the stored passcode and choose a new one
    #[arg(long)]
    reset_passcode: bool,

    /// Timer resolution in milliseconds
    #[arg(long, default_value = "250")]
    tick_rate_ms: u64,
}

/// Application entry point with panic handling for terminal restoration
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => JsonConfigStore::new(path),
        None => JsonConfigStore::open_default()?,
    };
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| store.path().with_file_name(LOG_FILE_NAME));
    init_logging(&log_path)?;

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_app(cli, store).await;

    if let Err(e) = &result {
        error!("Application error: {:#}", e);
    }

    result
}

/// Send tracing output to `path`
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(
            EnvFilter::from_default_env()
                .add_directive("applock_tui=info".parse()?)
                .add_directive("applock=info".parse()?),
        )
        .init();

    Ok(())
}

/// Main application runner
async fn run_app(cli: Cli, store: JsonConfigStore) -> Result<()> {
    let (config, load_error) = match store.load() {
        Ok(config) => (config, None),
        Err(e) => {
            warn!("Could not load {:?}: {}", store.path(), e);
            (LockConfig::default(), Some(e))
        }
    };
    info!("Starting with settings from {:?}", store.path());

    let mut app = App::new(config, store).context("Invalid lock settings")?;

    if let Some(e) = load_error {
        app.controller.host_mut().notify(
            "Settings unreadable",
            &format!("Using defaults: {}", e),
            Severity::Warning,
        );
    }
    if cli.reset_passcode {
        app.controller.clear_passcode();
        app.controller.host_mut().notify(
            "Passcode removed",
            "Choose a new passcode",
            Severity::Info,
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(Duration::from_millis(cli.tick_rate_ms.max(10)));
    events.spawn();
    let result = app.run(&mut terminal, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
