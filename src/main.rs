//! SCP Terminal - A console browser for a fictional anomaly database
//!
//! Entry point for the application. Handles CLI argument parsing,
//! logging initialization, and the event loop that feeds console commands
//! and timer ticks to the application.

mod app;
mod config;
mod data;
mod error;
mod i18n;
mod message;
mod state;
mod storage;
mod ui;

use anyhow::Context;
use app::{Response, ScpTerminal};
use config::{Config, LogConfig};
use data::Catalog;
use error::AppResult;
use message::{Message, SystemMessage};
use state::Language;
use std::path::PathBuf;
use storage::{FileStore, MemoryStore, SettingsStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time;
use ui::PaneRenderer;

/// Application name for logging
const APP_NAME: &str = "scp-terminal";

/// Command line flags
#[derive(Debug, Default)]
struct Flags {
    /// Overrides the configured data directory
    data_dir: Option<PathBuf>,

    /// Overrides the configured preference directory
    storage_dir: Option<PathBuf>,

    /// Keep preferences in memory only
    ephemeral: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    log::info!("Starting SCP Terminal");

    let flags = parse_args();

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("{}; using default configuration", e);
        Config::default()
    });
    if let Some(dir) = flags.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(dir) = flags.storage_dir.clone() {
        config.storage_dir = Some(dir);
    }

    let terminal = bootstrap(&config, &flags).context("Failed to start the terminal")?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
    runtime.block_on(run(terminal, &config.log));

    log::info!("Shutting down");
    // A stdin read still pending on the blocking pool must not hold up exit
    runtime.shutdown_background();
    Ok(())
}

/// Load the catalog, open the preference store and apply saved settings
fn bootstrap(config: &Config, flags: &Flags) -> AppResult<ScpTerminal<PaneRenderer>> {
    let (catalog, errors) = Catalog::load_or_empty(&config.data_dir);
    for e in &errors {
        log::error!("Failed to load {}: {}", e.path().display(), e);
    }
    for language in Language::all() {
        log::debug!(
            "{} translation keys for '{}'",
            catalog.translations.keys(*language).len(),
            language
        );
    }

    let store = if flags.ephemeral {
        log::info!("Preferences kept in memory for this session");
        SettingsStore::new(MemoryStore::new())
    } else {
        let backend = FileStore::new(config.storage_dir()?);
        log::debug!("Preference directory: {}", backend.dir().display());
        SettingsStore::new(backend)
    };

    let mut terminal = ScpTerminal::new(catalog, store, PaneRenderer::default())
        .with_warning_threshold(config.log.warning_threshold);
    terminal.initialize();
    Ok(terminal)
}

/// Drive the application from stdin lines and log timers until `quit` or
/// end of input
async fn run(mut terminal: ScpTerminal<PaneRenderer>, log_config: &LogConfig) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut routine = time::interval(log_config.routine_interval());
    let mut warning = time::interval(log_config.warning_interval());
    // The first tick of an interval completes immediately
    routine.tick().await;
    warning.tick().await;

    let mut printed = print_new_log_entries(&terminal, 0);
    println!("{}", terminal.login_screen());

    loop {
        let message = tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match Message::parse(&line) {
                    Ok(message) => message,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    log::error!("Failed to read from stdin: {}", e);
                    break;
                }
            },
            _ = routine.tick() => Message::System(SystemMessage::RoutineLogTick),
            _ = warning.tick() => Message::System(SystemMessage::WarningLogTick),
        };

        let response = terminal.update(message);
        printed = print_new_log_entries(&terminal, printed);

        match response {
            Response::Nothing => {}
            Response::Print(text) => println!("{}", text),
            Response::Quit => break,
        }
    }
}

/// Print log entries added since `from`, returning the next unseen sequence
fn print_new_log_entries(terminal: &ScpTerminal<PaneRenderer>, from: u64) -> u64 {
    for entry in terminal.state.log.entries_since(from) {
        println!("{}", ui::format_log_entry(entry));
    }
    terminal.state.log.next_seq()
}

/// Initialize the logging system
fn init_logging() {
    // Set default log level if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,scp_terminal=debug");
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}

/// Parse command line arguments
fn parse_args() -> Flags {
    let args: Vec<String> = std::env::args().collect();
    let mut flags = Flags::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-d" | "--data" => {
                if i + 1 < args.len() {
                    flags.data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --data requires a path argument");
                    std::process::exit(1);
                }
            }
            "-s" | "--storage" => {
                if i + 1 < args.len() {
                    flags.storage_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --storage requires a path argument");
                    std::process::exit(1);
                }
            }
            "--ephemeral" => flags.ephemeral = true,
            arg => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    flags
}

/// Print help message
fn print_help() {
    println!(
        r#"SCP Terminal - Anomaly database console

USAGE:
    scp-terminal [OPTIONS]

OPTIONS:
    -h, --help              Show this help message
    -v, --version           Show version information
    -d, --data <DIR>        Directory with scps.json, personnel.json,
                            incidents.json and translations.json
    -s, --storage <DIR>     Directory for saved preferences
        --ephemeral         Do not write preferences to disk

CONSOLE COMMANDS:
{}
"#,
        message::COMMAND_HELP
    );
}

/// Print version information
fn print_version() {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
}
