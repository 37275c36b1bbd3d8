//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Syllable transition network analysis CLI
#[derive(Parser, Debug)]
#[command(name = "syllable-network")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides config; RUST_LOG overrides both)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the transition network of a bird (or an ad-hoc sequence) and score it
    Analyze {
        /// Bird id to load from the data source
        #[arg(short, long, conflicts_with_all = ["sequence", "alphabet"])]
        bird: Option<String>,

        /// Data source type (defaults to the config's default.source)
        #[arg(short, long, value_enum)]
        source: Option<DataSourceType>,

        /// Records file for the file data source
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Ad-hoc syllable sequence, one character per syllable
        #[arg(long, requires = "alphabet")]
        sequence: Option<String>,

        /// Ad-hoc alphabet; its last character is the stop state
        #[arg(long, requires = "sequence")]
        alphabet: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Also report the probability matrix
        #[arg(long)]
        normalize: bool,

        /// Write output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate a records file
    Validate {
        /// Path to records file
        input: PathBuf,
    },
}

/// Data source types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSourceType {
    /// Built-in sample data
    Mock,
    /// TOML or JSON records file
    File,
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text table
    Table,
    /// JSON output
    Json,
    /// DOT format (Graphviz)
    Dot,
}

/// Execute the CLI command
pub async fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Analyze { .. } => commands::analyze::execute(args, config).await,
        Commands::Validate { input } => commands::validate::execute(input, &config).await,
    }
}
