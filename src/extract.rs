//! Per-image extraction pipeline: isolate the stamp region, recognize,
//! parse, and retry on a binarized region when the first pass comes back
//! empty.

use anyhow::{Context, Result};
use image::GrayImage;
use std::path::Path;

use crate::config::ScanConfig;
use crate::{binarize, isolate, log, ocr, parse};

/// Which recognition pass produced the date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Original,
    Binarized,
}

/// Outcome of one image. `date` is None when neither pass found a
/// plausible candidate; that is a normal result, not an error.
#[derive(Debug)]
pub struct Extraction {
    pub date: Option<String>,
    pub source: Option<Source>,
}

/// Runs the full pipeline on one photograph.
///
/// With `debug_dir` set, the mask, the masked grayscale, the cropped region
/// and (when the retry runs) the binarized region are saved there, keyed by
/// the image's filename. Debug writes are observational: a failed save is
/// logged and recognition continues unchanged.
pub fn extract_date(
    path: &Path,
    config: &ScanConfig,
    debug_dir: Option<&Path>,
) -> Result<Extraction> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let img = image::open(path).with_context(|| format!("Failed to load image {}", name))?;
    let isolated = isolate::isolate(&img, config);

    if let Some(dir) = debug_dir {
        save_debug(dir, &name, "mask", &isolated.mask);
        save_debug(dir, &name, "filtered", &isolated.filtered_gray);
        save_debug(dir, &name, "roi", &isolated.roi);
    }

    let text = ocr::recognize_digits(&isolated.roi)?;
    if let Some(date) = parse::first_date_candidate(&text) {
        log(&format!("{}: date from original -> {}", name, date));
        return Ok(Extraction { date: Some(date), source: Some(Source::Original) });
    }

    let binarized = binarize::adaptive_threshold(&isolated.roi);
    if let Some(dir) = debug_dir {
        save_debug(dir, &name, "binarized", &binarized);
    }

    let text = ocr::recognize_digits(&binarized)?;
    if let Some(date) = parse::first_date_candidate(&text) {
        log(&format!("{}: date from binarized -> {}", name, date));
        return Ok(Extraction { date: Some(date), source: Some(Source::Binarized) });
    }

    log(&format!("{}: no valid date found", name));
    Ok(Extraction { date: None, source: None })
}

fn save_debug(dir: &Path, name: &str, stage: &str, img: &GrayImage) {
    let path = dir.join(format!("{}_{}.jpg", name, stage));
    if let Err(e) = img.save(&path) {
        log(&format!("Failed to write debug image {}: {}", path.display(), e));
    }
}
