//! Adaptive mean thresholding for the second recognition attempt.
//!
//! A single global threshold fails when ambient light falls unevenly across
//! the print; comparing each pixel against the mean of its own neighborhood
//! recovers the digit strokes anyway.

use image::{GrayImage, Luma};

/// Neighborhood edge length, matched to the stamp digit stroke width.
const BLOCK_SIZE: u32 = 15;

/// Constant subtracted from the local mean before comparison.
const MEAN_OFFSET: f64 = 2.0;

/// Binarizes a grayscale image against per-pixel local means: white where
/// the pixel exceeds the neighborhood mean minus the offset, black elsewhere.
pub fn adaptive_threshold(img: &GrayImage) -> GrayImage {
    threshold_with(img, BLOCK_SIZE, MEAN_OFFSET)
}

fn threshold_with(img: &GrayImage, block_size: u32, offset: f64) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return output;
    }

    let integral = integral_image(img);
    let radius = block_size / 2;
    let stride = (width + 1) as usize;

    for y in 0..height {
        for x in 0..width {
            // Window clamped at the borders; the mean covers what's in bounds
            let x0 = x.saturating_sub(radius) as usize;
            let y0 = y.saturating_sub(radius) as usize;
            let x1 = (x + radius).min(width - 1) as usize + 1;
            let y1 = (y + radius).min(height - 1) as usize + 1;

            let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
                - integral[y0 * stride + x1]
                - integral[y1 * stride + x0];
            let count = ((x1 - x0) * (y1 - y0)) as f64;
            let mean = sum as f64 / count;

            let value = if img.get_pixel(x, y)[0] as f64 > mean - offset {
                255u8
            } else {
                0u8
            };
            output.put_pixel(x, y, Luma([value]));
        }
    }

    output
}

/// Summed-area table with a zero row/column prefix, so any window sum is
/// four lookups.
fn integral_image(img: &GrayImage) -> Vec<u64> {
    let (width, height) = img.dimensions();
    let stride = (width + 1) as usize;
    let mut integral = vec![0u64; stride * (height + 1) as usize];

    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += img.get_pixel(x as u32, y as u32)[0] as u64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }

    integral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_two_level() {
        let img = GrayImage::from_fn(20, 20, |x, y| Luma([((x * 13 + y * 7) % 251) as u8]));
        let binary = adaptive_threshold(&img);
        assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_uniform_image_goes_white() {
        // Every pixel equals its local mean, so pixel > mean - offset holds
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        let binary = adaptive_threshold(&img);
        assert!(binary.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_bright_stroke_on_dark_background() {
        let mut img = GrayImage::from_pixel(21, 21, Luma([20]));
        for y in 5..16 {
            img.put_pixel(10, y, Luma([220]));
        }
        let binary = adaptive_threshold(&img);

        assert_eq!(binary.get_pixel(10, 10)[0], 255, "stroke should survive");
        assert_eq!(binary.get_pixel(2, 2)[0], 255, "flat background equals its mean");
        // Dark pixels right next to the bright stroke fall below the local mean
        assert_eq!(binary.get_pixel(8, 10)[0], 0);
    }

    #[test]
    fn test_gradient_background_tracks_local_mean() {
        // A smooth ramp has no local contrast: away from the borders every
        // pixel sits on its own neighborhood mean and lands white, where a
        // global threshold would blacken the whole dark half
        let img = GrayImage::from_fn(64, 16, |x, _| Luma([(x * 4) as u8]));
        let binary = adaptive_threshold(&img);

        assert_eq!(binary.get_pixel(20, 8)[0], 255);
        assert_eq!(binary.get_pixel(44, 8)[0], 255);
        // The clamped window at the left border is right-heavy, putting the
        // local mean above the pixel
        assert_eq!(binary.get_pixel(0, 8)[0], 0);
    }

    #[test]
    fn test_empty_image() {
        let img = GrayImage::new(0, 0);
        let binary = adaptive_threshold(&img);
        assert_eq!(binary.dimensions(), (0, 0));
    }

    #[test]
    fn test_image_smaller_than_block() {
        // Window clamps to the whole image; mean is global
        let mut img = GrayImage::from_pixel(5, 5, Luma([10]));
        img.put_pixel(2, 2, Luma([200]));
        let binary = threshold_with(&img, 15, 2.0);

        assert_eq!(binary.get_pixel(2, 2)[0], 255);
        assert_eq!(binary.get_pixel(0, 0)[0], 0);
    }
}
