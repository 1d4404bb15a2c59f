//! Scan configuration: the color band that picks out the date stamp and the
//! crop rectangle that frames it.
//!
//! Values are kept on human scales (hue in degrees, the rest in percent) and
//! only converted to pixel-space units when a region is isolated.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An inclusive range on a single HSV channel.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Band {
    pub min: u32,
    pub max: u32,
}

impl Band {
    fn validate(&self, name: &str, scale_max: u32) -> Result<()> {
        if self.min > self.max {
            bail!("{} range is inverted: min {} > max {}", name, self.min, self.max);
        }
        if self.max > scale_max {
            bail!("{} range exceeds {}: max {}", name, scale_max, self.max);
        }
        Ok(())
    }
}

/// Crop offsets as percentages of image width/height, applied after masking.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge (% of width)
    pub left: u32,
    /// Right edge (% of width)
    pub right: u32,
    /// Top edge (% of height)
    pub top: u32,
    /// Bottom edge (% of height)
    pub bottom: u32,
}

/// Complete scan configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Stamp hue band in degrees (0-360)
    #[serde(default = "default_hue_range")]
    pub hue_range: Band,
    /// Stamp saturation band in percent (0-100)
    #[serde(default = "default_saturation_range")]
    pub saturation_range: Band,
    /// Stamp brightness band in percent (0-100)
    #[serde(default = "default_value_range")]
    pub value_range: Band,
    /// Corner rectangle holding the stamp digits
    #[serde(default = "default_crop")]
    pub crop: CropRect,
}

fn default_hue_range() -> Band {
    Band { min: 267, max: 345 }
}

fn default_saturation_range() -> Band {
    Band { min: 3, max: 100 }
}

fn default_value_range() -> Band {
    Band { min: 12, max: 100 }
}

fn default_crop() -> CropRect {
    CropRect { left: 74, right: 96, top: 84, bottom: 97 }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            hue_range: default_hue_range(),
            saturation_range: default_saturation_range(),
            value_range: default_value_range(),
            crop: default_crop(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from a JSON document and validates it.
    /// Any problem here is fatal; the batch must not start on a bad config.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: ScanConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.hue_range.validate("hue", 360)?;
        self.saturation_range.validate("saturation", 100)?;
        self.value_range.validate("value", 100)?;

        let crop = &self.crop;
        if crop.left >= crop.right {
            bail!("crop left {} must be less than right {}", crop.left, crop.right);
        }
        if crop.top >= crop.bottom {
            bail!("crop top {} must be less than bottom {}", crop.top, crop.bottom);
        }
        if crop.right > 100 || crop.bottom > 100 {
            bail!("crop offsets must be within 0-100");
        }
        Ok(())
    }
}
