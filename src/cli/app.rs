//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{session, tui};
use crate::config::{Config, LoadedConfig};

#[derive(Parser)]
#[command(name = "todoq")]
#[command(author, version, about = "Enqueue tasks, dequeue them into a completed list")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, short = 'c', global = true, env = "TODOQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run (defaults to the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive to-do list
    Tui,

    /// Run a session script from FILE (or stdin)
    ///
    /// Commands, one per line:
    ///   enqueue --name NAME --type TYPE --length HOURS
    ///   dequeue
    ///   list
    ///   status
    Run {
        /// Script file; `-` or omitted reads stdin
        file: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("todoq starting");

    let LoadedConfig { config, source } = Config::load(cli.config.as_deref())?;
    match &source {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "No config file, using defaults"),
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run(&output, config)?,
        Commands::Run { file } => session::run(&output, &config, file.as_deref())?,
        Commands::Config => show_config(&output, &config, source.as_deref())?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Prints the effective configuration and where it came from
fn show_config(output: &Output, config: &Config, source: Option<&std::path::Path>) -> Result<()> {
    let source = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "source": source,
            "config": config,
        }));
    } else {
        println!("# source: {}", source);
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
