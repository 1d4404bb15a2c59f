//! Date-stamp recognition for film-era photographs.
//!
//! Old point-and-shoot cameras burned the capture date into the corner of
//! each print as a small colored seven-segment display. This crate isolates
//! that region by color, runs Tesseract over it, and parses the noisy digit
//! stream into an ISO date. A companion binary writes the recovered dates
//! back into each image's EXIF capture-time tag.

pub mod batch;
pub mod binarize;
pub mod config;
pub mod exif;
pub mod extract;
pub mod isolate;
pub mod ocr;
pub mod parse;
pub mod report;

use chrono::Local;

/// Logs a message to the console with a timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    println!("[{}] {}", timestamp, msg);
}
