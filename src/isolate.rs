//! Region isolation: keep only pixels in the configured HSV band, gray out
//! the rest, and crop down to the corner rectangle holding the date stamp.

use image::{DynamicImage, GrayImage, Luma, imageops};

use crate::config::ScanConfig;

/// Intermediate images produced while isolating the stamp region.
pub struct Isolated {
    /// Cropped grayscale region expected to contain only the stamp digits.
    pub roi: GrayImage,
    /// Binary inclusion mask over the full frame (255 = inside the band).
    pub mask: GrayImage,
    /// Masked grayscale frame before cropping.
    pub filtered_gray: GrayImage,
}

/// Isolates the date-stamp region of a photograph.
///
/// Portrait inputs are rotated 90 degrees clockwise first: the stamping
/// devices printed along the long edge, so a taller-than-wide frame is a
/// sideways capture.
pub fn isolate(img: &DynamicImage, config: &ScanConfig) -> Isolated {
    let rgb = if img.height() > img.width() {
        img.rotate90().to_rgb8()
    } else {
        img.to_rgb8()
    };
    let (width, height) = rgb.dimensions();

    // Band bounds in pixel units: hue 0-179, saturation/value 0-255
    let hue_lo = scale(config.hue_range.min, 179, 360);
    let hue_hi = scale(config.hue_range.max, 179, 360);
    let sat_lo = scale(config.saturation_range.min, 255, 100);
    let sat_hi = scale(config.saturation_range.max, 255, 100);
    let val_lo = scale(config.value_range.min, 255, 100);
    let val_hi = scale(config.value_range.max, 255, 100);

    let mut mask = GrayImage::new(width, height);
    let mut filtered_gray = GrayImage::new(width, height);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let (h, s, v) = rgb_to_hsv(r, g, b);

        let inside = (hue_lo..=hue_hi).contains(&h)
            && (sat_lo..=sat_hi).contains(&s)
            && (val_lo..=val_hi).contains(&v);

        if inside {
            mask.put_pixel(x, y, Luma([255]));
            filtered_gray.put_pixel(x, y, Luma([luma(r, g, b)]));
        }
        // Excluded pixels stay black in both outputs
    }

    // Crop fractions apply to the masked grayscale frame's dimensions
    let crop = &config.crop;
    let x0 = width * crop.left / 100;
    let x1 = width * crop.right / 100;
    let y0 = height * crop.top / 100;
    let y1 = height * crop.bottom / 100;
    let roi = imageops::crop_imm(&filtered_gray, x0, y0, x1 - x0, y1 - y0).to_image();

    Isolated { roi, mask, filtered_gray }
}

/// Rescales a config value onto a pixel-unit scale, truncating like the
/// integer conversion the thresholds were tuned against.
fn scale(value: u32, out_max: u32, in_max: u32) -> u8 {
    (value * out_max / in_max).min(255) as u8
}

/// RGB to HSV with hue in [0,179] (degrees halved) and saturation/value
/// in [0,255].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let v = max;
    let s = if max == 0 {
        0
    } else {
        (255.0 * delta / max as f32).round() as u8
    };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g as f32 - b as f32) / delta
    } else if max == g {
        120.0 + 60.0 * (b as f32 - r as f32) / delta
    } else {
        240.0 + 60.0 * (r as f32 - g as f32) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    ((h / 2.0).round().min(179.0) as u8, s, v)
}

/// BT.601 luma, matching the usual color-to-grayscale conversion.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) as u8
}
