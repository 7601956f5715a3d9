//! Per-pixel background classification in LAB space.

use image::RgbaImage;
use lab::{Lab, rgb_bytes_to_labs};
use rayon::prelude::*;

/// Pixel takes no part in removal (subject or already transparent).
pub(super) const CLASS_KEEP: u8 = 0;
/// Anti-aliased edge between subject and background; gets feathered alpha.
pub(super) const CLASS_EDGE: u8 = 1;
/// Core background; fully cleared when border-connected.
pub(super) const CLASS_BACKGROUND: u8 = 2;

/// Images at or above this pixel count classify in parallel.
const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

/// Row-major per-pixel classification with precomputed edge alpha.
pub(super) struct PixelMask {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) classes: Vec<u8>,
    /// Final alpha for `CLASS_EDGE` pixels; zero everywhere else.
    pub(super) edge_alpha: Vec<u8>,
}

impl PixelMask {
    #[inline]
    pub(super) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Squared ΔE distance between two LAB colors.
#[inline]
pub(super) fn delta_e_sq(a: &Lab, b: &Lab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    dl * dl + da * da + db * db
}

/// Batch-convert the image to LAB (SIMD path in the `lab` crate).
fn to_labs(img: &RgbaImage) -> Vec<Lab> {
    let mut rgb = Vec::with_capacity(img.width() as usize * img.height() as usize * 3);
    for pixel in img.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
    }
    rgb_bytes_to_labs(&rgb)
}

/// Classify every pixel against the detected background color.
///
/// Pixels within `core_threshold` ΔE of the background are core background;
/// pixels between the two thresholds are anti-aliased edge and get an alpha
/// proportional to their distance from the background color.
pub(super) fn classify_pixels(
    img: &RgbaImage,
    background: &Lab,
    core_threshold: f32,
    edge_threshold: f32,
    min_alpha: u8,
) -> PixelMask {
    let (width, height) = img.dimensions();
    let len = width as usize * height as usize;

    let labs = to_labs(img);
    debug_assert_eq!(labs.len(), len);

    let mut classes = vec![CLASS_KEEP; len];
    let mut edge_alpha = vec![0_u8; len];

    let core_sq = core_threshold * core_threshold;
    let edge_sq = edge_threshold * edge_threshold;
    let span = (edge_threshold - core_threshold).max(f32::EPSILON);

    let classify = |class: &mut u8, alpha_out: &mut u8, lab: &Lab, pixel: &[u8]| {
        if pixel[3] < min_alpha {
            return;
        }

        let dist_sq = delta_e_sq(lab, background);
        if dist_sq <= core_sq {
            *class = CLASS_BACKGROUND;
        } else if dist_sq <= edge_sq {
            *class = CLASS_EDGE;
            let ratio = ((dist_sq.sqrt() - core_threshold) / span).clamp(0.0, 1.0);
            *alpha_out = (pixel[3] as f32 * ratio).round() as u8;
        }
    };

    let raw = img.as_raw();
    if len >= PARALLEL_PIXEL_THRESHOLD {
        classes
            .par_iter_mut()
            .zip(edge_alpha.par_iter_mut())
            .zip(labs.par_iter())
            .zip(raw.par_chunks_exact(4))
            .for_each(|(((class, alpha_out), lab), pixel)| classify(class, alpha_out, lab, pixel));
    } else {
        for (((class, alpha_out), lab), pixel) in classes
            .iter_mut()
            .zip(edge_alpha.iter_mut())
            .zip(labs.iter())
            .zip(raw.chunks_exact(4))
        {
            classify(class, alpha_out, lab, pixel);
        }
    }

    PixelMask {
        width,
        height,
        classes,
        edge_alpha,
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use lab::Lab;

    use super::*;

    const WHITE: Lab = Lab {
        l: 100.0,
        a: 0.0,
        b: 0.0,
    };

    #[test]
    fn background_and_subject_classify_apart() {
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let mask = classify_pixels(&img, &WHITE, 10.0, 25.0, 1);
        assert_eq!(mask.classes[0], CLASS_BACKGROUND);
        assert_eq!(mask.classes[1], CLASS_KEEP);
        assert_eq!(mask.classes[2], CLASS_BACKGROUND);
    }

    #[test]
    fn transparent_pixels_are_kept_out_of_the_mask() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));

        let mask = classify_pixels(&img, &WHITE, 10.0, 25.0, 1);
        assert!(mask.classes.iter().all(|&c| c == CLASS_KEEP));
    }

    #[test]
    fn near_background_pixels_get_feathered_alpha() {
        // Light gray: close to white but outside the core threshold.
        let img = RgbaImage::from_pixel(1, 1, Rgba([215, 215, 215, 255]));

        let mask = classify_pixels(&img, &WHITE, 10.0, 25.0, 1);
        assert_eq!(mask.classes[0], CLASS_EDGE);
        assert!(mask.edge_alpha[0] > 0);
        assert!(mask.edge_alpha[0] < 255);
    }

    #[test]
    fn edge_alpha_grows_with_distance_from_background() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([220, 220, 220, 255]));
        img.put_pixel(1, 0, Rgba([190, 190, 190, 255]));

        let mask = classify_pixels(&img, &WHITE, 10.0, 25.0, 1);
        assert_eq!(mask.classes[0], CLASS_EDGE);
        assert_eq!(mask.classes[1], CLASS_EDGE);
        assert!(mask.edge_alpha[1] > mask.edge_alpha[0]);
    }

    #[test]
    fn parallel_and_serial_paths_agree() {
        // Above PARALLEL_PIXEL_THRESHOLD so the rayon path runs.
        let side = 200_u32;
        let mut img = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));
        for y in 60..140 {
            for x in 60..140 {
                img.put_pixel(x, y, Rgba([30, 60, 90, 255]));
            }
        }

        let big = classify_pixels(&img, &WHITE, 10.0, 25.0, 1);

        // Same pixels through the serial path, one crop at a time.
        let crop = image::imageops::crop_imm(&img, 0, 0, 16, 16).to_image();
        let small = classify_pixels(&crop, &WHITE, 10.0, 25.0, 1);
        for y in 0..16_u32 {
            for x in 0..16_u32 {
                assert_eq!(
                    big.classes[big.index(x, y)],
                    small.classes[small.index(x, y)]
                );
            }
        }
    }
}
