//! Paramgraph CLI - Command line driver for node type definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod definition;
mod output;

use commands::{check, completions, kinds, names};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "paramgraph")]
#[command(author, version, about = "Typed parameter definitions for node graphs")]
pub struct Cli {
    /// Config file
    #[arg(short, long, global = true, env = "PARAMGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: table, json (default from config)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check names against the naming rules
    Names(names::NamesArgs),
    /// Build a node type from a definition and apply values to a node
    Check(check::CheckArgs),
    /// List parameter kinds
    Kinds,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context shared by commands
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config_path = cli.config.clone().unwrap_or_else(config::config_file_path);
        let config = Config::load(&config_path);
        let format = OutputFormat::from(cli.format.as_deref().unwrap_or(&config.output_format));
        Self {
            config,
            config_path,
            format,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => ctx.config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!(config = %ctx.config_path.display(), "Starting paramgraph CLI");

    match &cli.command {
        Commands::Names(args) => names::run(args)?,
        Commands::Check(args) => check::run(args, &ctx)?,
        Commands::Kinds => kinds::run()?,
        Commands::Config(args) => commands::config::run(args, &ctx)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
