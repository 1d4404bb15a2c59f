//! Batch driver: enumerate a folder of photographs, run extraction on each,
//! and collect the result records.
//!
//! One image's failure never aborts the rest of the batch; engine errors
//! are logged and recorded as a null date.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::report::ResultRecord;
use crate::{extract, log};

/// Recognized image extensions. Matching is case-sensitive.
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Per-batch counters for the closing status line.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub recognized: usize,
    pub failed: usize,
}

/// Lists image files in a folder, sorted by filename so the report order is
/// deterministic regardless of how the filesystem enumerates entries.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Failed to read folder {}", folder.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext));
        if path.is_file() && is_image {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

/// Processes each image in order, isolating failures to the image they
/// occurred on.
pub fn process_images(
    images: &[PathBuf],
    config: &ScanConfig,
    debug_dir: Option<&Path>,
) -> (Vec<ResultRecord>, BatchSummary) {
    let mut records = Vec::with_capacity(images.len());
    let mut summary = BatchSummary::default();

    for path in images {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let date = match extract::extract_date(path, config, debug_dir) {
            Ok(extraction) => extraction.date,
            Err(e) => {
                log(&format!("{}: extraction failed: {:#}", filename, e));
                summary.failed += 1;
                None
            }
        };

        summary.processed += 1;
        if date.is_some() {
            summary.recognized += 1;
        }
        records.push(ResultRecord { filename, date });
    }

    (records, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b.jpg");
        touch(dir.path(), "a.png");
        touch(dir.path(), "c.jpeg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "noext");

        let images = list_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.png", "b.jpg", "c.jpeg"]);
    }

    #[test]
    fn test_list_images_extension_match_is_case_sensitive() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "upper.JPG");
        touch(dir.path(), "lower.jpg");

        let images = list_images(dir.path()).unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].ends_with("lower.jpg"));
    }

    #[test]
    fn test_list_images_skips_subdirectories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("album.jpg")).unwrap();
        touch(dir.path(), "photo.jpg");

        let images = list_images(dir.path()).unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].ends_with("photo.jpg"));
    }

    #[test]
    fn test_list_images_missing_folder_fails() {
        let dir = tempdir().unwrap();
        assert!(list_images(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_process_images_records_failures_as_null() {
        // Zero-byte "images" fail to decode; the batch must carry on and
        // record a null date for each
        let dir = tempdir().unwrap();
        touch(dir.path(), "bad1.jpg");
        touch(dir.path(), "bad2.jpg");

        let images = list_images(dir.path()).unwrap();
        let (records, summary) = process_images(&images, &ScanConfig::default(), None);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date.is_none()));
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.recognized, 0);
    }
}
