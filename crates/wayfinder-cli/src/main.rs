//! Wayfinder CLI - Find cheapest paths through weighted graph files

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, completions, config as config_cmd, find};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(author, version, about = "A* pathfinding over weighted graphs")]
pub struct Cli {
    /// Output format: table, json, csv (default from config)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Config file
    #[arg(long, global = true, env = "WAYFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::config_file_path)
    }

    /// Output format from the command line, falling back to the config
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        OutputFormat::from(
            self.format
                .as_deref()
                .unwrap_or(config.default_format.as_str()),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the cheapest path through a graph file
    Find(find::FindArgs),
    /// Validate a graph file
    Check(check::CheckArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting wayfinder CLI");

    let config = Config::load(&cli.config_path());

    match &cli.command {
        Commands::Find(args) => {
            if !find::run(args, &cli, &config)? {
                std::process::exit(2);
            }
        }
        Commands::Check(args) => check::run(args, &cli, &config)?,
        Commands::Config(args) => config_cmd::run(args, &cli.config_path())?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
