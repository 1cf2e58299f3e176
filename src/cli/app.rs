//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::sort::SortArgs;
use super::{config_cmd, inspect, sort};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "pairsort")]
#[command(author, version, about = "Sort a list by answering pairwise comparisons")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of the global one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort the lines of a file interactively
    Sort(SortArgs),

    /// Count items and comparison bounds without asking anything
    Inspect {
        /// File with one item per line (`-` for stdin)
        input: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write a default global config file
        #[arg(long)]
        init: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("pairsort starting");

    let (config, source) = Config::load(cli.config.as_deref())?;
    match &source {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "Using built-in defaults"),
    }

    match cli.command {
        Commands::Sort(args) => {
            output.verbose_ctx("sort", &format!("Sorting {}", args.input.display()));
            sort::run(args, &config, &output)?
        }

        Commands::Inspect { input } => {
            output.verbose_ctx("inspect", &format!("Inspecting {}", input.display()));
            inspect::run(&input, &output)?
        }

        Commands::Config { init } => config_cmd::run(&config, source.as_deref(), init, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
