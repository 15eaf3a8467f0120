//! Sheet geometry: A4 slot grid and fit-and-center math.
//!
//! All values are PDF points with the origin at the bottom-left of the
//! sheet, which is why the slot y runs downward from the top margin.

/// Output sheet width (A4) in points.
pub const A4_WIDTH_PT: f32 = 595.28;
/// Output sheet height (A4) in points.
pub const A4_HEIGHT_PT: f32 = 841.89;
/// Outer margin on every side of a sheet, in points.
pub const SHEET_MARGIN_PT: f32 = 18.0;
/// Labels placed on a sheet before a new one is opened.
pub const LABELS_PER_SHEET: u32 = 4;

/// Placement cell for one of the four slots on a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scaled size and centering offsets of an image inside its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Cell rectangle for a slot index 0..=3.
///
/// The sheet interior (margins removed) splits into a 2x2 grid, row-major
/// with the top row first: 0 top-left, 1 top-right, 2 bottom-left,
/// 3 bottom-right.
pub fn slot_rect(slot: u32) -> SlotRect {
    debug_assert!(slot < LABELS_PER_SHEET);
    let inner_width = A4_WIDTH_PT - SHEET_MARGIN_PT * 2.0;
    let inner_height = A4_HEIGHT_PT - SHEET_MARGIN_PT * 2.0;
    let cell_width = inner_width / 2.0;
    let cell_height = inner_height / 2.0;
    let col = (slot % 2) as f32;
    let row = (slot / 2) as f32;

    SlotRect {
        x: SHEET_MARGIN_PT + col * cell_width,
        y: A4_HEIGHT_PT - SHEET_MARGIN_PT - (row + 1.0) * cell_height,
        width: cell_width,
        height: cell_height,
    }
}

/// Uniformly scale `src` to fit inside `dst` and center it.
///
/// The scale factor is the smaller of the two axis ratios, so the image is
/// never distorted and never exceeds the cell; leftover space splits evenly
/// on both sides of each axis.
pub fn fit_rect(src_width: f32, src_height: f32, dst_width: f32, dst_height: f32) -> FitRect {
    let scale = (dst_width / src_width).min(dst_height / src_height);
    let width = src_width * scale;
    let height = src_height * scale;

    FitRect {
        width,
        height,
        offset_x: (dst_width - width) / 2.0,
        offset_y: (dst_height - height) / 2.0,
    }
}
