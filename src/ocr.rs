//! Tesseract wrapper tuned for seven-segment date-stamp digits.
//!
//! Recognition is a pure engine call: image in, raw text out. Retry and
//! validation decisions live in the orchestrator.

use anyhow::{Context, Result, anyhow};
use image::GrayImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

/// Traineddata for seven-segment displays, distinct from ordinary typefaces.
const LANGUAGE: &str = "7seg";

/// Page segmentation mode 6: assume a single uniform block of text.
const PAGE_SEG_MODE: &str = "6";

/// Digits plus the space separator; everything else is noise on a stamp.
const CHAR_WHITELIST: &str = "0123456789 ";

/// Runs Tesseract on a single-channel image and returns the raw recognized
/// text. Engine failures propagate; the caller decides whether they abort
/// the image or the batch.
pub fn recognize_digits(img: &GrayImage) -> Result<String> {
    let tesseract = find_tesseract()?;

    let temp_input = NamedTempFile::with_suffix(".png")?;
    img.save(temp_input.path())
        .context("Failed to write recognition input image")?;

    let output = Command::new(&tesseract)
        .arg(temp_input.path())
        .arg("stdout")
        .arg("-l")
        .arg(LANGUAGE)
        .arg("--psm")
        .arg(PAGE_SEG_MODE)
        .arg("-c")
        .arg(format!("tessedit_char_whitelist={}", CHAR_WHITELIST))
        .output()
        .context("Failed to run tesseract")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("Tesseract failed: {}", stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Finds the Tesseract executable: an explicit `TESSERACT_CMD` override
/// first, then the system PATH.
pub fn find_tesseract() -> Result<PathBuf> {
    if let Ok(cmd) = std::env::var("TESSERACT_CMD") {
        return Ok(PathBuf::from(cmd));
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install tesseract-ocr with the {} traineddata \
         (or point TESSDATA_PREFIX at it), or set TESSERACT_CMD.",
        LANGUAGE
    ))
}
