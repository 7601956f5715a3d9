//! Border-seeded background clearing.

use std::collections::VecDeque;

use image::RgbaImage;

use super::mask::{CLASS_BACKGROUND, CLASS_EDGE, CLASS_KEEP, PixelMask};

/// Clear background reachable from the image border.
///
/// Breadth-first fill seeded from every border pixel: background and edge
/// pixels connected to the border get their mask alpha applied; enclosed
/// background-colored regions inside the subject are never reached.
pub(super) fn clear_edge_connected(img: &mut RgbaImage, mask: &PixelMask) {
    let width = mask.width;
    let height = mask.height;
    if width == 0 || height == 0 {
        return;
    }

    debug_assert_eq!(img.width(), width);
    debug_assert_eq!(img.height(), height);

    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();

    for x in 0..width {
        seed(&mut queue, &mut visited, mask, x, 0);
        if height > 1 {
            seed(&mut queue, &mut visited, mask, x, height - 1);
        }
    }
    for y in 1..height.saturating_sub(1) {
        seed(&mut queue, &mut visited, mask, 0, y);
        if width > 1 {
            seed(&mut queue, &mut visited, mask, width - 1, y);
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let idx = mask.index(x, y);
        match mask.classes[idx] {
            CLASS_BACKGROUND => img.get_pixel_mut(x, y)[3] = 0,
            CLASS_EDGE => img.get_pixel_mut(x, y)[3] = mask.edge_alpha[idx],
            _ => continue,
        }

        if x > 0 {
            seed(&mut queue, &mut visited, mask, x - 1, y);
        }
        if x + 1 < width {
            seed(&mut queue, &mut visited, mask, x + 1, y);
        }
        if y > 0 {
            seed(&mut queue, &mut visited, mask, x, y - 1);
        }
        if y + 1 < height {
            seed(&mut queue, &mut visited, mask, x, y + 1);
        }
    }
}

#[inline]
fn seed(queue: &mut VecDeque<(u32, u32)>, visited: &mut [bool], mask: &PixelMask, x: u32, y: u32) {
    let idx = mask.index(x, y);
    if !visited[idx] && mask.classes[idx] != CLASS_KEEP {
        visited[idx] = true;
        queue.push_back((x, y));
    }
}
