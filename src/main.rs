//! ascii-art - terminal client for an ASCII art generation service
//!
//! - Fullscreen TUI with a typewriter title, text input, style selector and result panel
//! - One-shot `generate` command for scripts
//! - Saves the displayed art to `ascii_art.txt`

mod api;
mod art;
mod config;
mod tui;

use crate::api::ArtClient;
use crate::art::{GenerationRequest, ResultView};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "ascii-art.log";

/// ascii-art - Turn text into ASCII art
#[derive(Parser)]
#[command(name = "ascii-art")]
#[command(version)]
#[command(about = "Generate ASCII art from text using a generation service")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the fullscreen terminal UI (default)
    Tui,

    /// Generate art once and print it
    Generate {
        /// Text to render
        #[arg(short, long)]
        text: String,

        /// Style name (defaults to the configured default style)
        #[arg(short, long)]
        style: Option<String>,

        /// Also save the art as ascii_art.txt (into DIR, or the configured download directory)
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        save: Option<Option<PathBuf>>,
    },

    /// Show configuration path and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long, default_value_t = false)]
        init: bool,
    },
}

enum LogTarget {
    Stderr,
    File,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Some(Commands::Tui) | None);
    init_logging(
        cli.verbose,
        if interactive {
            LogTarget::File
        } else {
            LogTarget::Stderr
        },
    );

    match cli.command {
        Some(Commands::Tui) | None => {
            if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
                println!(
                    "{}",
                    "The terminal UI requires an interactive TTY. Try `ascii-art generate --text <TEXT>`."
                        .bright_yellow()
                );
                return Ok(ExitCode::SUCCESS);
            }

            let config = Config::load_effective()?;
            let rt = tokio::runtime::Runtime::new()?;
            tui::run_tui(&rt, config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Generate { text, style, save }) => {
            let config = Config::load_effective()?;
            let rt = tokio::runtime::Runtime::new()?;
            run_generate(&rt, &config, text, style, save)
        }
        Some(Commands::Config { init }) => {
            show_config_info(init)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8, target: LogTarget) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        // The TUI owns the terminal, so logs go to a file in the data dir.
        LogTarget::File => match open_log_file() {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            Err(_) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::sink)
                    .init();
            }
        },
    }
}

fn open_log_file() -> Result<std::fs::File> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn run_generate(
    rt: &tokio::runtime::Runtime,
    config: &Config,
    text: String,
    style: Option<String>,
    save: Option<Option<PathBuf>>,
) -> Result<ExitCode> {
    let style = style.unwrap_or_else(|| config.styles.default.clone());
    let request = GenerationRequest::new(text, style);
    let client = ArtClient::from_config(&config.api);

    let outcome = rt.block_on(client.generate(&request));

    let mut view = ResultView::default();
    view.apply(&outcome);

    if !view.download_enabled() {
        eprintln!("{}", view.text().bright_red());
        return Ok(ExitCode::FAILURE);
    }

    print!("{}", view.text());

    if let Some(dir) = save {
        let dir = dir.unwrap_or_else(|| config.export.resolved_directory());
        let path = art::export_art(view.text(), &dir)?;
        eprintln!(
            "{} {}",
            "Saved to".bright_green(),
            path.display().to_string().bright_white()
        );
        if config.export.open_after_save {
            art::open_exported(&path);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn show_config_info(init: bool) -> Result<()> {
    let config = if init { Config::init()? } else { Config::load()? };

    println!("{}", "Configuration".bright_cyan().bold());
    println!(
        "  {} {}",
        "Config file:".bright_white(),
        config::get_config_path()?
    );
    println!("  {} {}", "Endpoint:".bright_white(), config.api.endpoint);
    let timeout = match config.api.timeout_seconds {
        0 => "none".to_string(),
        secs => format!("{secs}s"),
    };
    println!("  {} {}", "Timeout:".bright_white(), timeout);
    println!(
        "  {} {} (default: {})",
        "Styles:".bright_white(),
        config.styles.available.join(", "),
        config.styles.default
    );
    println!(
        "  {} {}",
        "Titles:".bright_white(),
        config.title.titles.join(" | ")
    );
    println!(
        "  {} {}",
        "Downloads:".bright_white(),
        config.export.resolved_directory().display()
    );

    if let Err(err) = config.validate() {
        println!("  {} {}", "Invalid:".bright_red(), err);
    }
    Ok(())
}
