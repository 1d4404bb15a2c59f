//! Writes recognized dates into each image's EXIF capture-time tag.
//!
//! Consumes the JSON report produced by the scan tool. Filenames in the
//! report are resolved against the report file's directory, so the report
//! can travel with its images.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use std::path::{Path, PathBuf};

use crate::report::{self, ResultRecord};
use crate::log;

/// Per-run counters for the closing status line.
#[derive(Debug, Default)]
pub struct ApplySummary {
    /// Files whose tag was written (or would be, in dry-run mode)
    pub updated: usize,
    /// Records with no recognized date
    pub skipped: usize,
    /// Missing files and failed writes
    pub failed: usize,
}

/// Converts a report date ("YYYY-MM-DD") into the EXIF datetime form with a
/// zero time of day ("YYYY:MM:DD 00:00:00").
pub fn exif_datetime(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date in report: {}", date))?;
    Ok(parsed.format("%Y:%m:%d 00:00:00").to_string())
}

/// Applies every dated record in a report to its image. Missing files and
/// per-file write failures are logged and skipped; the rest of the batch
/// continues.
pub fn apply_report(report_path: &Path, dry_run: bool) -> Result<ApplySummary> {
    let records = report::load_report(report_path)?;
    let base_dir = report_base_dir(report_path)?;

    let mut summary = ApplySummary::default();
    for record in &records {
        apply_record(record, &base_dir, dry_run, &mut summary);
    }

    Ok(summary)
}

fn apply_record(record: &ResultRecord, base_dir: &Path, dry_run: bool, summary: &mut ApplySummary) {
    let Some(date) = &record.date else {
        summary.skipped += 1;
        return;
    };

    let exif_date = match exif_datetime(date) {
        Ok(d) => d,
        Err(e) => {
            log(&format!("{}: {:#}", record.filename, e));
            summary.failed += 1;
            return;
        }
    };

    let target = base_dir.join(&record.filename);
    if !target.is_file() {
        log(&format!("File not found: {}", target.display()));
        summary.failed += 1;
        return;
    }

    if dry_run {
        log(&format!(
            "[dry run] Would set {} DateTimeOriginal to {}",
            target.display(),
            exif_date
        ));
        summary.updated += 1;
        return;
    }

    match write_capture_date(&target, &exif_date) {
        Ok(()) => {
            log(&format!("Updated {} with date {}", target.display(), exif_date));
            summary.updated += 1;
        }
        Err(e) => {
            log(&format!("Failed to update {}: {:#}", target.display(), e));
            summary.failed += 1;
        }
    }
}

/// Sets the capture-time tag and re-encodes the file in place. Any metadata
/// already present is preserved; only the one tag changes, so a second run
/// with the same report writes identical bytes.
fn write_capture_date(path: &Path, exif_date: &str) -> Result<()> {
    // A file with no metadata block yet starts from an empty one
    let mut metadata = Metadata::new_from_path(path).unwrap_or_else(|_| Metadata::new());
    metadata.set_tag(ExifTag::DateTimeOriginal(exif_date.to_string()));
    metadata
        .write_to_file(path)
        .map_err(|e| anyhow!("EXIF write failed: {}", e))
}

fn report_base_dir(report_path: &Path) -> Result<PathBuf> {
    let absolute = report_path
        .canonicalize()
        .with_context(|| format!("Failed to resolve report path {}", report_path.display()))?;
    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Report path {} has no parent directory", report_path.display()))
}
