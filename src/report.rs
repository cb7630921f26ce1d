//! Automation outputs
//!
//! Key/value pairs derived from a summary, in the `key=value` append format
//! CI systems consume (one pair per line).

use crate::error::Result;
use crate::types::EvaluationSummary;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Named outputs for automation consumers
pub fn automation_outputs(summary: &EvaluationSummary) -> Vec<(&'static str, String)> {
    vec![
        ("total", summary.total.to_string()),
        ("up_to_date", summary.up_to_date.to_string()),
        ("needs_update", summary.needs_update.to_string()),
        ("outdated_paths", summary.outdated_paths.join(",")),
    ]
}

/// Append the automation outputs to `path`, one `key=value` per line
pub fn write_outputs(path: &Path, summary: &EvaluationSummary) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (key, value) in automation_outputs(summary) {
        writeln!(file, "{key}={value}")?;
    }
    Ok(())
}
