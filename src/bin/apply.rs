//! Writes the dates from a scan report into each image's EXIF
//! capture-time tag.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use datestamp::{exif, log};

#[derive(Parser)]
#[command(
    name = "datestamp-apply",
    about = "Set EXIF DateTimeOriginal from a datestamp-scan report"
)]
struct Args {
    /// JSON report produced by datestamp-scan
    json_file: PathBuf,

    /// Preview changes without modifying any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let summary = exif::apply_report(&args.json_file, args.dry_run)?;

    let verb = if args.dry_run { "Would update" } else { "Updated" };
    log(&format!(
        "{} {} file(s); {} without a date, {} failed",
        verb, summary.updated, summary.skipped, summary.failed
    ));

    Ok(())
}
