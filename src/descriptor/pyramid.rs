//! Spatial pyramid of orientation histograms.
//!
//! Level 0 covers the whole image, level 1 its four quadrants, level `l`
//! a `2^l × 2^l` grid. Cell sizes are truncated, so remainder pixels on the
//! right and bottom only count at level 0.

use std::f64::consts::PI;

use ndarray::Array2;

use crate::filters::canny::EdgeMap;

/// Largest quantized histogram value.
pub const QUANT_MAX: f64 = 31.0;

/// Axis-aligned rectangle scoping one histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start_x: usize,
    pub start_y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(start_x: usize, start_y: usize, width: usize, height: usize) -> Self {
        Self {
            start_x,
            start_y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Number of regions in a pyramid with `levels` levels (1 + 4 + 16 + ...).
pub fn region_count(levels: usize) -> usize {
    (0..levels).map(|l| 1usize << (2 * l)).sum()
}

/// Generate pyramid regions in feature-vector order.
///
/// Quadrants are emitted row by row; finer grids column by column
/// (outer loop over x steps, inner over y steps).
pub fn pyramid_regions(width: usize, height: usize, levels: usize) -> Vec<Region> {
    let mut regions = Vec::with_capacity(region_count(levels));

    for level in 0..levels {
        match level {
            0 => regions.push(Region::new(0, 0, width, height)),
            1 => {
                let (w, h) = (width / 2, height / 2);
                regions.push(Region::new(0, 0, w, h));
                regions.push(Region::new(w, 0, w, h));
                regions.push(Region::new(0, h, w, h));
                regions.push(Region::new(w, h, w, h));
            }
            _ => {
                let cells = 1usize << level;
                let (w_step, h_step) = (width / cells, height / cells);
                for i in 0..cells {
                    for j in 0..cells {
                        regions.push(Region::new(i * w_step, j * h_step, w_step, h_step));
                    }
                }
            }
        }
    }

    regions
}

#[inline]
fn wrap_bin(position: f64, bins: usize) -> usize {
    (position as usize) % bins
}

/// Build the quantized orientation histogram of the edge pixels in a region.
///
/// Each edge pixel votes for `(direction/π + 0.5) * bins`. Votes between two
/// bins are split by fractional distance; bin `bins` wraps to 0.
pub fn orientation_histogram(
    edges: &EdgeMap,
    direction: &Array2<f64>,
    region: &Region,
    bins: usize,
) -> Vec<f64> {
    let mut result = vec![0.0f64; bins];
    if bins == 0 {
        return result;
    }

    // x-major traversal keeps the float accumulation order stable
    for x in region.start_x..region.start_x + region.width {
        for y in region.start_y..region.start_y + region.height {
            if !edges.is_edge(y, x) {
                continue;
            }

            let actual = (direction[[y, x]] / PI + 0.5) * bins as f64;
            let floor = actual.floor();
            if actual == floor {
                result[wrap_bin(floor, bins)] += 1.0;
            } else {
                let ceil = actual.ceil();
                result[wrap_bin(floor, bins)] += actual - floor;
                result[wrap_bin(ceil, bins)] += ceil - actual;
            }
        }
    }

    quantize(&mut result);
    result
}

/// Max-normalize and quantize a histogram to integers in `[0, 31]`.
///
/// All-zero histograms are left untouched.
pub fn quantize(histogram: &mut [f64]) {
    let max = histogram.iter().fold(0.0f64, |acc, &v| acc.max(v));
    if max > 0.0 {
        for v in histogram.iter_mut() {
            // round half up
            *v = (QUANT_MAX * *v / max + 0.5).floor();
        }
    }
}
