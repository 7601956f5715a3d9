//! Remove the background from sprite images.
//!
//! Matches colors in LAB space for perceptual accuracy and removes only
//! background connected to the image border, so background-colored details
//! enclosed by the subject survive.

mod detect;
mod fill;
mod mask;

use image::DynamicImage;

use self::detect::detect_background_color;
use self::fill::clear_edge_connected;
use self::mask::classify_pixels;

/// ΔE distance below which a pixel counts as core background.
const CORE_THRESHOLD: f32 = 10.0;
/// Extended ΔE distance for anti-aliased edge pixels.
const EDGE_THRESHOLD: f32 = 25.0;
/// Pixels below this alpha are left alone during classification.
///
/// Use 1 so semi-transparent background can still be removed when it is
/// connected to the border.
const MIN_PROCESS_ALPHA: u8 = 1;

/// Strip the border-connected background from a decoded image.
///
/// Returns an RGBA image of the same dimensions: background pixels get alpha
/// zero, anti-aliased edges get feathered alpha, everything else is
/// untouched.
pub fn remove_background(img: &DynamicImage) -> DynamicImage {
    let mut rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return DynamicImage::ImageRgba8(rgba);
    }

    let background = detect_background_color(&rgba);
    let mask = classify_pixels(
        &rgba,
        &background,
        CORE_THRESHOLD,
        EDGE_THRESHOLD,
        MIN_PROCESS_ALPHA,
    );
    clear_edge_connected(&mut rgba, &mask);

    DynamicImage::ImageRgba8(rgba)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::remove_background;

    #[test]
    fn clears_single_background_pixel() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));

        let out = remove_background(&img.into()).to_rgba8();
        assert_eq!(out.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn leaves_transparent_pixels_transparent() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([12, 34, 56, 0]));

        let out = remove_background(&img.into()).to_rgba8();
        assert_eq!(out.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn keeps_background_colored_island_inside_the_subject() {
        let mut img = RgbaImage::from_pixel(7, 7, Rgba([255, 255, 255, 255]));
        let subject = Rgba([0, 0, 0, 255]);

        // Closed black ring with a white interior.
        for x in 1..=5 {
            img.put_pixel(x, 1, subject);
            img.put_pixel(x, 5, subject);
        }
        for y in 1..=5 {
            img.put_pixel(1, y, subject);
            img.put_pixel(5, y, subject);
        }

        let out = remove_background(&img.into()).to_rgba8();

        // Outer white is border-connected and goes away.
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        // The white island inside the ring stays.
        assert_eq!(out.get_pixel(3, 3)[3], 255);
        // So does the ring itself.
        assert_eq!(out.get_pixel(1, 1)[3], 255);
    }

    #[test]
    fn works_against_a_non_white_background() {
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([40, 180, 70, 255]));
        img.put_pixel(2, 2, Rgba([250, 250, 250, 255]));

        let out = remove_background(&img.into()).to_rgba8();
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(2, 2)[3], 255);
    }

    #[test]
    fn handles_single_row_and_single_column_images() {
        let row = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
        let out = remove_background(&row.into()).to_rgba8();
        for x in 0..3 {
            assert_eq!(out.get_pixel(x, 0)[3], 0);
        }

        let column = RgbaImage::from_pixel(1, 3, Rgba([255, 255, 255, 255]));
        let out = remove_background(&column.into()).to_rgba8();
        for y in 0..3 {
            assert_eq!(out.get_pixel(0, y)[3], 0);
        }
    }

    #[test]
    fn preserves_dimensions() {
        let img = RgbaImage::from_pixel(13, 9, Rgba([255, 255, 255, 255]));
        let out = remove_background(&img.into());
        assert_eq!((out.width(), out.height()), (13, 9));
    }
}
