//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{FtsArgs, OutputFormat};
use crate::error::Result;
use crate::index::table::TableStats;
use crate::query::SearchResults;

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchReport {
    /// The query in FTS5 match syntax.
    pub query: String,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub results: SearchResults,
}

/// Output search results in the selected format.
pub fn output_search(report: &SearchReport, args: &FtsArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            print!("{}", render_search(report, args.verbosity()));
            Ok(())
        }
    }
}

/// Output table statistics in the selected format.
pub fn output_stats(stats: &TableStats, args: &FtsArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(stats, args),
        OutputFormat::Human => {
            print!("{}", render_stats(stats));
            Ok(())
        }
    }
}

fn output_json<T: Serialize>(result: &T, args: &FtsArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn render_search(report: &SearchReport, verbosity: u8) -> String {
    let mut out = String::new();
    if verbosity > 0 {
        out.push_str(&format!("Search Results for {}:\n", report.query));
        out.push_str("═══════════════\n");
    }

    for (i, hit) in report.results.hits.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!(
            "Result {}: doc {} (Score: {:.3})\n",
            i + 1,
            hit.doc_id,
            hit.score
        ));
        out.push_str("─────────────\n");
        for (column, value) in hit.document.iter() {
            out.push_str(&format!("{column}: {value}\n"));
        }
    }

    if verbosity > 0 {
        out.push('\n');
        out.push_str(&format!(
            "Total hits: {} (showing {})\n",
            report.results.total_hits,
            report.results.len()
        ));
        out.push_str(&format!("Search time: {}ms\n", report.duration_ms));
    }
    out
}

fn render_stats(stats: &TableStats) -> String {
    let mut out = String::new();
    out.push_str("Index Statistics:\n");
    out.push_str("════════════════\n");
    out.push_str(&format!("State: {:?}\n", stats.state));
    out.push_str(&format!("Total documents: {}\n", stats.documents));
    out.push_str(&format!("Tokenizer: {}\n", stats.tokenizer));

    for column in &stats.columns {
        out.push('\n');
        out.push_str(&format!("Column: {}\n", column.column));
        out.push_str(&format!("  Total tokens: {}\n", column.stats.total_tokens));
        out.push_str(&format!("  Unique terms: {}\n", column.stats.unique_terms));
        out.push_str(&format!(
            "  Average length: {:.1}\n",
            column.stats.average_length
        ));
        out.push_str(&format!("  Max length: {}\n", column.stats.max_length));
    }
    out
}
