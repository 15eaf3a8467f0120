//! Conversion options and progress reporting types.
//!
//! These are the values that cross the boundary to a host UI, so they all
//! carry serde derives with kebab-case tags.

use serde::{Deserialize, Serialize};

/// How cropped labels are oriented before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationMode {
    /// Keep each label exactly as it was scanned.
    #[default]
    Auto,
    /// Rotate landscape labels 90 degrees so every label is portrait.
    ForcePortrait,
    /// Rotate portrait labels 90 degrees so every label is landscape.
    ForceLandscape,
}

/// Tunables for locating the label on an oversized source page.
///
/// The defaults are tuned for carrier label scans: the label sits somewhere
/// in the upper area of the page against a near-white background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectSettings {
    /// Fraction of the page height (from the top) searched for label content.
    pub region_fraction: f32,
    /// A pixel counts as content when any RGB channel is strictly below this.
    pub white_threshold: u8,
    /// Padding in raster pixels added around the detected bounding box.
    pub padding_px: u32,
}

impl Default for DetectSettings {
    fn default() -> Self {
        Self {
            region_fraction: 0.75,
            white_threshold: 235,
            padding_px: 24,
        }
    }
}

/// Options for one conversion run; immutable for its duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub mode: OrientationMode,
    pub detect: DetectSettings,
    /// Raster resolution relative to the page's native point dimensions.
    pub render_scale: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            mode: OrientationMode::Auto,
            detect: DetectSettings::default(),
            render_scale: 2.0,
        }
    }
}

/// One progress notification, emitted before each page and once more before
/// the output document is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based page number across all inputs.
    pub current: u32,
    /// Total page count across all inputs.
    pub total: u32,
    /// Human-readable status naming the document and page in flight.
    pub message: String,
}
