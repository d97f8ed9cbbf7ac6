//! Command implementations for the ftsmachine CLI.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::index::FtsTable;
use crate::query::SearchQuery;
use crate::schema::{Schema, TokenizerConfig};
use crate::source::sqlite::SqliteRowSource;
use crate::source::table::TableBuilder;

/// Execute a CLI command.
pub fn execute_command(args: FtsArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Load the rows described by `source` into a fresh table.
fn load_table(source: &SourceArgs) -> Result<FtsTable> {
    let rows = SqliteRowSource::new(&source.db, source.sql.as_str());

    let schema = if let Some(schema_file) = &source.schema_file {
        load_schema_from_file(schema_file)?
    } else {
        let tokenizer: TokenizerConfig = source.tokenizer.parse()?;
        let columns = if source.columns.is_empty() {
            rows.column_names()?
        } else {
            source.columns.clone()
        };
        Schema::new(columns, tokenizer)?
    };

    let start = Instant::now();
    let frame = TableBuilder::new(schema.column_names().iter().cloned()).build(rows)?;
    let mut table = FtsTable::create(schema);
    let stats = table.load_frame(frame)?;
    info!(
        "Indexed {} rows from {} in {:?}",
        stats.documents,
        source.db.display(),
        start.elapsed()
    );

    Ok(table)
}

/// Read a JSON schema definition.
fn load_schema_from_file(path: &Path) -> Result<Schema> {
    debug!("Loading schema from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn search(args: &SearchArgs, cli_args: &FtsArgs) -> Result<()> {
    let table = load_table(&args.source)?;

    let query = match &args.column {
        Some(column) => SearchQuery::new(column.as_str(), args.term.as_str()),
        None => SearchQuery::all_columns(args.term.as_str()),
    }
    .with_match_type(args.match_type.into())
    .with_limit(args.limit);

    let start = Instant::now();
    let results = table.execute(&query)?;
    let report = SearchReport {
        query: query.to_string(),
        duration_ms: start.elapsed().as_millis() as u64,
        results,
    };

    output_search(&report, cli_args)
}

fn show_stats(args: &StatsArgs, cli_args: &FtsArgs) -> Result<()> {
    let table = load_table(&args.source)?;
    output_stats(&table.stats(), cli_args)
}
