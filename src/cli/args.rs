//! Command line argument parsing for the ftsmachine CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::query::{DEFAULT_LIMIT, MatchType};

/// ftsmachine - in-memory full-text search over rows loaded from SQLite
#[derive(Parser, Debug, Clone)]
#[command(name = "ftsmachine")]
#[command(about = "Load rows from SQLite into an in-memory full-text index and search them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FtsArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FtsArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load rows and run one search
    Search(SearchArgs),

    /// Load rows and show index statistics
    Stats(StatsArgs),
}

/// Where rows come from and how they are indexed.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// SQLite database file
    #[arg(long, env = "FTSMACHINE_DB", value_name = "DB_PATH")]
    pub db: PathBuf,

    /// SELECT statement producing the rows to index
    #[arg(long, value_name = "SQL")]
    pub sql: String,

    /// Column names (comma-separated; default: the statement's result columns)
    #[arg(long, value_delimiter = ',', conflicts_with = "schema_file")]
    pub columns: Vec<String>,

    /// Schema definition file path (JSON)
    #[arg(short, long, value_name = "SCHEMA_FILE")]
    pub schema_file: Option<PathBuf>,

    /// Tokenizer, e.g. "porter unicode61" or "ascii"
    #[arg(short, long, default_value = "porter unicode61", conflicts_with = "schema_file")]
    pub tokenizer: String,
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Search term
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Column to search in (default: all columns)
    #[arg(short, long)]
    pub column: Option<String>,

    /// How the term is matched
    #[arg(short = 'm', long = "match", value_enum, default_value = "token")]
    pub match_type: MatchMode,

    /// Maximum number of results to return
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

/// Arguments for showing statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Match modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every token of the term must occur
    Token,
    /// Tokens starting with the term
    Prefix,
    /// Tokens in sequence
    Phrase,
}

impl From<MatchMode> for MatchType {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Token => MatchType::TokenMatch,
            MatchMode::Prefix => MatchType::PrefixMatch,
            MatchMode::Phrase => MatchType::ExactPhrase,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
