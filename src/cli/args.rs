//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::calc::CalcArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::config::ConfigCommands;
use crate::cli::commands::doc::DocArgs;
use crate::cli::commands::prices::PricesArgs;
use crate::cli::commands::quote::QuoteCommands;

#[derive(Parser, Debug)]
#[command(name = "roofquote")]
#[command(author, version, about = "Metal roof material estimates and printable quotes")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "ROOFQUOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Quote database (defaults to the platform data directory)
    #[arg(long, global = true, env = "ROOFQUOTE_STORE")]
    pub store: Option<PathBuf>,

    /// YAML price book overriding the configured one
    #[arg(long, global = true)]
    pub price_book: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Log debug detail to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table on a terminal listing, YAML for single records
    #[default]
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price both gauges for a set of roof measurements
    Calc(CalcArgs),

    /// Save, list, show, and delete saved quotes
    #[command(subcommand)]
    Quote(QuoteCommands),

    /// Produce a printable quote document
    Doc(DocArgs),

    /// Show or change persisted settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print the active price book as YAML
    Prices(PricesArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
