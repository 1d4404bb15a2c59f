//! The JSON report passed from the scan tool to the metadata writer.
//!
//! Written once per run, consumed once; there are no append semantics.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Outcome for one processed image. A missed recognition is recorded as a
/// null date, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub filename: String,
    pub date: Option<String>,
}

/// Writes the report as a pretty-printed JSON array.
pub fn write_report(path: &Path, records: &[ResultRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))
}

/// Loads a report written by the scan tool.
pub fn load_report(path: &Path) -> Result<Vec<ResultRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse report {}", path.display()))
}
