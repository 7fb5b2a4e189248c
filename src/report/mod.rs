//! Rendering of probe outcomes: the plain-text table (optionally preceded by
//! a run summary) and a JSON array.
mod json;
mod summary;
mod table;


use std::io::Write;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::http::ProbeOutcome;

pub use json::render_json;
pub use summary::RunSummary;
pub use table::{TABLE_RULE, outcome_line, table_header, table_lines};

/// Writes the report for `outcomes` in `format`. The summary is only used by
/// the text format.
///
/// # Errors
///
/// Returns an error when writing fails or JSON serialization fails.
pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    summary: Option<&RunSummary<'_>>,
    outcomes: &[ProbeOutcome],
) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            if let Some(summary) = summary {
                writeln!(out)?;
                for line in summary.lines() {
                    writeln!(out, "{}", line)?;
                }
                writeln!(out)?;
            }
            for line in table_lines(outcomes) {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", render_json(outcomes)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
