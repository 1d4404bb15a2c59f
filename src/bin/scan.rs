//! Scans a folder of photographs for burned-in date stamps and writes a
//! JSON report of the recognized dates.

use anyhow::{Result, bail};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use datestamp::config::ScanConfig;
use datestamp::{batch, log, report};

#[derive(Parser)]
#[command(
    name = "datestamp-scan",
    about = "Extract camera date stamps from a folder of photographs"
)]
struct Args {
    /// Folder containing images to scan
    folder: PathBuf,

    /// JSON config with the HSV band and crop rectangle
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the intermediate image of every processing stage
    #[arg(long)]
    debug: bool,

    /// Where to write the JSON report
    #[arg(long, default_value = "output.json")]
    output: PathBuf,

    /// Where to put debug images
    #[arg(long, default_value = "debug_output")]
    debug_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.folder.is_dir() {
        bail!("Invalid folder: {}", args.folder.display());
    }

    let config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };

    let images = batch::list_images(&args.folder)?;
    if images.is_empty() {
        log("No images found.");
        return Ok(());
    }

    let debug_dir = if args.debug {
        fs::create_dir_all(&args.debug_dir)?;
        Some(args.debug_dir.as_path())
    } else {
        None
    };

    log(&format!("Processing {} image(s)...", images.len()));
    let (records, summary) = batch::process_images(&images, &config, debug_dir);

    report::write_report(&args.output, &records)?;
    log(&format!(
        "Done: {} recognized, {} without a date, {} failed out of {} image(s)",
        summary.recognized,
        summary.processed - summary.recognized - summary.failed,
        summary.failed,
        summary.processed
    ));
    log(&format!("Results saved to {}", args.output.display()));

    Ok(())
}
