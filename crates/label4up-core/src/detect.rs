//! Label detection and cropping.
//!
//! Finds the tightest box around non-white content in the upper region of a
//! rendered page, then cuts a padded crop out of the raster. A blank region
//! is not an error: the whole region stands in for the box so the pipeline
//! always produces a label image.

use image::{imageops, RgbaImage};

use crate::options::DetectSettings;

/// A rectangular sub-area of a raster, in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Tightest box enclosing all non-white pixels of the raster, or `None` if
/// the raster is blank.
///
/// A pixel is content when it is not fully transparent and at least one RGB
/// channel is strictly below `threshold`.
pub fn content_bounds(raster: &RgbaImage, threshold: u8) -> Option<Region> {
    bounds_in_rows(raster, raster.height(), threshold)
}

/// Same as [`content_bounds`] but restricted to the first `rows` rows.
///
/// Single pass over the raw sample buffer; this is the dominant per-page
/// cost and must not allocate per pixel.
fn bounds_in_rows(raster: &RgbaImage, rows: u32, threshold: u8) -> Option<Region> {
    let width = raster.width();
    if width == 0 || rows == 0 {
        return None;
    }
    let samples = raster.as_raw();
    let row_len = width as usize * 4;

    let mut min_x = width;
    let mut min_y = rows;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for y in 0..rows {
        let row = &samples[y as usize * row_len..(y as usize + 1) * row_len];
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            if px[0] < threshold || px[1] < threshold || px[2] < threshold {
                let x = x as u32;
                found = true;
                if x < min_x {
                    min_x = x;
                }
                if y < min_y {
                    min_y = y;
                }
                if x > max_x {
                    max_x = x;
                }
                if y > max_y {
                    max_y = y;
                }
            }
        }
    }

    if !found {
        return None;
    }

    Some(Region {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Cut the label out of a rendered page.
///
/// Detection is restricted to the top `region_fraction` of the page (full
/// width): the label sits in the upper area of an oversized source page, and
/// excluding the lower part keeps page furniture out of the box. The box is
/// expanded by `padding_px` on all sides and clamped to the region so the
/// crop never reads outside the raster. The result is always at least 1x1.
pub fn crop_label(page: &RgbaImage, settings: &DetectSettings) -> RgbaImage {
    let (page_width, page_height) = page.dimensions();
    let region_width = page_width.max(1);
    let region_height = ((page_height as f32 * settings.region_fraction).floor() as u32)
        .clamp(1, page_height.max(1));

    let bbox = bounds_in_rows(page, region_height.min(page_height), settings.white_threshold)
        .unwrap_or(Region {
            x: 0,
            y: 0,
            width: region_width,
            height: region_height,
        });

    let pad = settings.padding_px;
    let x = bbox.x.saturating_sub(pad).min(region_width - 1);
    let y = bbox.y.saturating_sub(pad).min(region_height - 1);
    let max_x = (bbox.x + bbox.width + pad).clamp(1, region_width);
    let max_y = (bbox.y + bbox.height + pad).clamp(1, region_height);
    let crop_width = max_x.saturating_sub(x).max(1);
    let crop_height = max_y.saturating_sub(y).max(1);

    imageops::crop_imm(page, x, y, crop_width, crop_height).to_image()
}
