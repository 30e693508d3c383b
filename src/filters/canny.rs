//! Canny-style edge classification.
//!
//! Three passes over an owned [`EdgeMap`]:
//! - Non-maximum suppression with a double threshold (STRONG / WEAK / NON_EDGE)
//! - Hysteresis: WEAK pixels 8-connected to STRONG ones become STRONG
//! - Pruning: leftover WEAK pixels inside a 2-pixel inset are cleared
//!
//! No Gaussian smoothing happens here; see [`super::blur`] for the optional
//! pre-blur stage.
//!
//! ## Suppression quirk
//!
//! The diagonal (π/8..3π/8) and vertical (|d| ≥ 3π/8) direction buckets of
//! the reference descriptor compare the center against the same neighbor
//! twice. [`SuppressionMode::Legacy`] keeps that behavior so existing
//! indexes stay comparable; [`SuppressionMode::Symmetric`] checks both sides.

use std::f64::consts::PI;
use std::ops::{Index, IndexMut};

use log::trace;
use ndarray::Array2;

use super::edge::GradientField;

/// Classification of a pixel in the edge map.
///
/// Discriminants are the luminance values used when rendering the map.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    Strong = 0,
    Weak = 128,
    NonEdge = 255,
}

impl EdgeClass {
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Neighbor selection used by non-maximum suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuppressionMode {
    /// Bit-compatible with the reference descriptor (one-sided checks in two buckets)
    #[default]
    Legacy,
    /// Compare against both neighbors along the gradient in every bucket
    Symmetric,
}

/// Double threshold on gradient magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for CannyThresholds {
    fn default() -> Self {
        Self {
            low: 60.0,
            high: 100.0,
        }
    }
}

impl CannyThresholds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Classify a local maximum by its magnitude.
    #[inline]
    pub fn classify(&self, magnitude: f64) -> EdgeClass {
        if magnitude > self.high {
            EdgeClass::Strong
        } else if magnitude > self.low {
            EdgeClass::Weak
        } else {
            EdgeClass::NonEdge
        }
    }
}

/// Per-pixel edge classification, indexed `[[y, x]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMap {
    classes: Array2<EdgeClass>,
}

impl EdgeMap {
    /// Map of the given size with every pixel NON_EDGE.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            classes: Array2::from_elem((height, width), EdgeClass::NonEdge),
        }
    }

    /// (height, width)
    pub fn dim(&self) -> (usize, usize) {
        self.classes.dim()
    }

    pub fn classes(&self) -> &Array2<EdgeClass> {
        &self.classes
    }

    #[inline]
    pub fn is_edge(&self, y: usize, x: usize) -> bool {
        self.classes[[y, x]] == EdgeClass::Strong
    }

    pub fn count(&self, class: EdgeClass) -> usize {
        self.classes.iter().filter(|&&c| c == class).count()
    }

    /// Render as luminance: edges black, weak gray, background white.
    pub fn to_luma(&self) -> Array2<u8> {
        self.classes.mapv(EdgeClass::value)
    }

    /// Force the outermost rows and columns to NON_EDGE.
    pub fn clear_border(&mut self) {
        let (height, width) = self.dim();
        if height == 0 || width == 0 {
            return;
        }
        for x in 0..width {
            self.classes[[0, x]] = EdgeClass::NonEdge;
            self.classes[[height - 1, x]] = EdgeClass::NonEdge;
        }
        for y in 0..height {
            self.classes[[y, 0]] = EdgeClass::NonEdge;
            self.classes[[y, width - 1]] = EdgeClass::NonEdge;
        }
    }
}

impl Index<[usize; 2]> for EdgeMap {
    type Output = EdgeClass;

    fn index(&self, index: [usize; 2]) -> &EdgeClass {
        &self.classes[index]
    }
}

impl IndexMut<[usize; 2]> for EdgeMap {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut EdgeClass {
        &mut self.classes[index]
    }
}

/// Thin the gradient field to local maxima and apply the double threshold.
///
/// Borders are cleared first; every interior pixel is overwritten.
pub fn non_max_suppression(
    field: &GradientField,
    thresholds: CannyThresholds,
    mode: SuppressionMode,
    edges: &mut EdgeMap,
) {
    let (height, width) = field.dim();
    edges.clear_border();

    let mag = &field.magnitude;
    let dir = &field.direction;

    let eighth = PI / 8.0;
    let three_eighths = 3.0 * PI / 8.0;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let m = mag[[y, x]];
            let d = dir[[y, x]];

            let neighbors = if d < eighth && d >= -eighth {
                // Horizontal gradient: compare left and right
                Some((mag[[y, x + 1]], mag[[y, x - 1]]))
            } else if d < three_eighths && d >= eighth {
                match mode {
                    SuppressionMode::Legacy => Some((mag[[y - 1, x - 1]], mag[[y - 1, x - 1]])),
                    SuppressionMode::Symmetric => Some((mag[[y - 1, x - 1]], mag[[y + 1, x + 1]])),
                }
            } else if d < -three_eighths || d >= three_eighths {
                match mode {
                    SuppressionMode::Legacy => Some((mag[[y + 1, x]], mag[[y + 1, x]])),
                    SuppressionMode::Symmetric => Some((mag[[y + 1, x]], mag[[y - 1, x]])),
                }
            } else if d < -eighth && d >= -three_eighths {
                Some((mag[[y - 1, x + 1]], mag[[y + 1, x - 1]]))
            } else {
                // NaN direction
                None
            };

            edges[[y, x]] = match neighbors {
                Some((a, b)) if m > a && m > b => thresholds.classify(m),
                _ => EdgeClass::NonEdge,
            };
        }
    }
}

/// Promote WEAK pixels connected to STRONG ones.
///
/// Flood fill driven by an explicit stack, seeded with every interior
/// STRONG pixel. Returns the number of promoted pixels.
pub fn hysteresis(edges: &mut EdgeMap) -> usize {
    let (height, width) = edges.dim();
    if height < 3 || width < 3 {
        return 0;
    }

    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if edges[[y, x]] == EdgeClass::Strong {
                stack.push((y, x));
            }
        }
    }

    let mut promoted = 0;
    while let Some((y, x)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                if edges[[ny, nx]] == EdgeClass::Weak {
                    edges[[ny, nx]] = EdgeClass::Strong;
                    promoted += 1;
                    stack.push((ny, nx));
                }
            }
        }
    }

    trace!("hysteresis promoted {} weak pixels", promoted);
    promoted
}

/// Clear unlinked WEAK pixels.
///
/// Only the interior inset by two pixels is touched; WEAK pixels on the
/// first interior ring survive but never count as edges.
pub fn prune_weak(edges: &mut EdgeMap) {
    let (height, width) = edges.dim();
    for y in 2..height.saturating_sub(2) {
        for x in 2..width.saturating_sub(2) {
            if edges[[y, x]] != EdgeClass::Strong {
                edges[[y, x]] = EdgeClass::NonEdge;
            }
        }
    }
}

/// Run suppression, hysteresis and pruning on a gradient field.
pub fn detect_edges(
    field: &GradientField,
    thresholds: CannyThresholds,
    mode: SuppressionMode,
) -> EdgeMap {
    let (height, width) = field.dim();
    let mut edges = EdgeMap::new(height, width);

    non_max_suppression(field, thresholds, mode, &mut edges);
    hysteresis(&mut edges);
    prune_weak(&mut edges);

    edges
}
