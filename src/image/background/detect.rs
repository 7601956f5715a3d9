//! Background color detection.

use image::RgbaImage;
use lab::Lab;

use super::mask::delta_e_sq;

/// Side length of the corner windows sampled for background color.
const CORNER_WINDOW: u32 = 5;
/// Samples closer than this ΔE join an existing cluster.
const CLUSTER_THRESHOLD: f32 = 8.0;
/// Samples more transparent than this say nothing about the background.
const MIN_SAMPLE_ALPHA: u8 = 8;

const WHITE: Lab = Lab {
    l: 100.0,
    a: 0.0,
    b: 0.0,
};

struct Cluster {
    sum: [f32; 3],
    count: usize,
}

impl Cluster {
    #[inline]
    fn new(lab: Lab) -> Self {
        Self {
            sum: [lab.l, lab.a, lab.b],
            count: 1,
        }
    }

    #[inline]
    fn mean(&self) -> Lab {
        let n = self.count as f32;
        Lab {
            l: self.sum[0] / n,
            a: self.sum[1] / n,
            b: self.sum[2] / n,
        }
    }

    #[inline]
    fn push(&mut self, lab: Lab) {
        self.sum[0] += lab.l;
        self.sum[1] += lab.a;
        self.sum[2] += lab.b;
        self.count += 1;
    }
}

/// Detect the dominant background color from the four corner windows.
///
/// Opaque corner samples are greedily clustered in LAB space and the mean of
/// the most populous cluster wins, so a sprite limb poking into one corner
/// does not skew the result. Falls back to white when every corner is
/// transparent.
pub(super) fn detect_background_color(img: &RgbaImage) -> Lab {
    let (width, height) = img.dimensions();

    let mut clusters: Vec<Cluster> = Vec::new();
    for (corner_x, corner_y) in corner_origins(width, height) {
        for dy in 0..CORNER_WINDOW {
            for dx in 0..CORNER_WINDOW {
                let x = (corner_x + dx).min(width - 1);
                let y = (corner_y + dy).min(height - 1);
                let pixel = img.get_pixel(x, y);
                if pixel[3] < MIN_SAMPLE_ALPHA {
                    continue;
                }

                push_sample(
                    &mut clusters,
                    Lab::from_rgb(&[pixel[0], pixel[1], pixel[2]]),
                );
            }
        }
    }

    clusters
        .iter()
        .max_by_key(|cluster| cluster.count)
        .map(Cluster::mean)
        .unwrap_or(WHITE)
}

fn corner_origins(width: u32, height: u32) -> [(u32, u32); 4] {
    let right = width.saturating_sub(CORNER_WINDOW);
    let bottom = height.saturating_sub(CORNER_WINDOW);
    [(0, 0), (right, 0), (0, bottom), (right, bottom)]
}

/// Add a sample to its nearest cluster, or start a new one.
fn push_sample(clusters: &mut Vec<Cluster>, lab: Lab) {
    let mut best: Option<(usize, f32)> = None;
    for (idx, cluster) in clusters.iter().enumerate() {
        let dist_sq = delta_e_sq(&cluster.mean(), &lab);
        if best.is_none_or(|(_, d)| dist_sq < d) {
            best = Some((idx, dist_sq));
        }
    }

    match best {
        Some((idx, dist_sq)) if dist_sq <= CLUSTER_THRESHOLD * CLUSTER_THRESHOLD => {
            clusters[idx].push(lab);
        }
        _ => clusters.push(Cluster::new(lab)),
    }
}
