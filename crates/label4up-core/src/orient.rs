//! Orientation normalization for cropped labels.

use image::{imageops, RgbaImage};

use crate::options::OrientationMode;

/// Rotate a label to match the requested orientation.
///
/// `Auto` keeps the label as scanned. A forced mode rotates 90 degrees
/// clockwise exactly when the label's current orientation (portrait iff
/// height >= width) differs from the requested one. Rotation transposes the
/// canvas, so no content is clipped.
pub fn normalize_orientation(label: RgbaImage, mode: OrientationMode) -> RgbaImage {
    let wants_portrait = match mode {
        OrientationMode::Auto => return label,
        OrientationMode::ForcePortrait => true,
        OrientationMode::ForceLandscape => false,
    };

    let is_portrait = label.height() >= label.width();
    if is_portrait == wants_portrait {
        label
    } else {
        imageops::rotate90(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn marked(width: u32, height: u32) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(width, height, WHITE);
        image.put_pixel(0, 0, BLACK);
        image
    }

    #[test]
    fn auto_mode_is_identity() {
        let label = marked(300, 500);
        let out = normalize_orientation(label.clone(), OrientationMode::Auto);
        assert_eq!(out, label);
    }

    #[test]
    fn matching_orientation_is_unchanged() {
        let portrait = marked(300, 500);
        let out = normalize_orientation(portrait.clone(), OrientationMode::ForcePortrait);
        assert_eq!(out, portrait);

        let landscape = marked(500, 300);
        let out = normalize_orientation(landscape.clone(), OrientationMode::ForceLandscape);
        assert_eq!(out, landscape);
    }

    #[test]
    fn forced_landscape_rotates_portrait() {
        let out = normalize_orientation(marked(300, 500), OrientationMode::ForceLandscape);
        assert_eq!(out.dimensions(), (500, 300));
    }

    #[test]
    fn forced_portrait_rotates_landscape() {
        let out = normalize_orientation(marked(500, 300), OrientationMode::ForcePortrait);
        assert_eq!(out.dimensions(), (300, 500));
    }

    #[test]
    fn square_counts_as_portrait() {
        let square = marked(200, 200);
        let out = normalize_orientation(square.clone(), OrientationMode::ForcePortrait);
        assert_eq!(out, square);
        // A forced landscape must rotate it
        let out = normalize_orientation(square, OrientationMode::ForceLandscape);
        assert_eq!(out.dimensions(), (200, 200));
        assert_eq!(*out.get_pixel(199, 0), BLACK);
    }

    #[test]
    fn rotation_moves_content_clockwise() {
        // (0,0) in a 3x2 image lands at (1,0) after one clockwise turn
        let rotated = imageops::rotate90(&marked(3, 2));
        assert_eq!(rotated.dimensions(), (2, 3));
        assert_eq!(*rotated.get_pixel(1, 0), BLACK);
    }

    #[test]
    fn two_rotations_are_a_half_turn() {
        let original = marked(3, 2);
        let twice = imageops::rotate90(&imageops::rotate90(&original));
        assert_eq!(twice.dimensions(), original.dimensions());
        // (0,0) ends up mirrored to the opposite corner
        assert_eq!(*twice.get_pixel(2, 1), BLACK);
        assert_eq!(*twice.get_pixel(0, 0), WHITE);
    }
}
