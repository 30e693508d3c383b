//! PHOG: Pyramid Histogram of Oriented Gradients.
//!
//! Shape descriptor after Bosch, Zisserman & Munoz, "Representing shape
//! with a spatial pyramid kernel" (CIVR 2007). Edges come from a Canny-style
//! detector; their gradient orientations are histogrammed over a spatial
//! pyramid and quantized to 5 bits per bin.
//!
//! ## Pipeline
//!
//! 1. Luminance conversion ([`crate::filters::grayscale`])
//! 2. Optional Gaussian smoothing ([`crate::filters::blur`])
//! 3. Sobel gradients ([`crate::filters::edge`])
//! 4. Suppression, hysteresis, pruning ([`crate::filters::canny`])
//! 5. Pyramid histograms ([`pyramid`])
//!
//! With the default configuration the feature has `(1 + 4 + 16) × 40 = 840`
//! entries, each an integer in [0, 31].
//!
//! ## Example
//!
//! ```
//! use ndarray::Array3;
//! use phog_rust::Phog;
//!
//! let image = Array3::<u8>::from_shape_fn((64, 64, 3), |(_, x, _)| if x < 32 { 0 } else { 255 });
//! let mut phog = Phog::new();
//! phog.extract(image.view()).unwrap();
//! assert_eq!(phog.histogram().len(), 840);
//! ```

pub mod compact;
pub mod distance;
pub mod pyramid;

use log::debug;
use ndarray::{Array2, Array3, ArrayView3};
use rayon::prelude::*;

use crate::error::{PhogError, PhogResult};
use crate::filters::blur::{gaussian_blur_gray, DEFAULT_SMOOTHING_SIGMA};
use crate::filters::canny::{detect_edges, CannyThresholds, EdgeClass, EdgeMap, SuppressionMode};
use crate::filters::edge::{sobel_field, GradientField};
use crate::filters::grayscale::{luminance_u8, LuminanceWeights};

pub use distance::DistanceMetric;
pub use pyramid::{pyramid_regions, region_count, Region};

/// Default number of orientation bins per region
pub const DEFAULT_BINS: usize = 40;
/// Default pyramid depth (levels 0, 1 and 2)
pub const DEFAULT_LEVELS: usize = 3;
/// Deepest supported pyramid (level 5 is a 32x32 grid)
pub const MAX_LEVELS: usize = 6;

/// Extraction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhogConfig {
    /// Orientation bins per region
    pub bins: usize,
    /// Canny double threshold on gradient magnitude
    pub thresholds: CannyThresholds,
    /// Non-maximum suppression neighbor selection
    pub suppression: SuppressionMode,
    /// Pyramid levels, including the whole-image level 0
    pub levels: usize,
    /// Gaussian sigma applied to the luminance plane before gradients
    pub smoothing_sigma: Option<f32>,
    /// RGB weights for luminance conversion
    pub weights: LuminanceWeights,
}

impl Default for PhogConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            thresholds: CannyThresholds::default(),
            suppression: SuppressionMode::default(),
            levels: DEFAULT_LEVELS,
            smoothing_sigma: None,
            weights: LuminanceWeights::default(),
        }
    }
}

impl PhogConfig {
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.thresholds = CannyThresholds::new(low, high);
        self
    }

    pub fn with_suppression(mut self, mode: SuppressionMode) -> Self {
        self.suppression = mode;
        self
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Blur the luminance plane with a 5x5 Gaussian before the gradients.
    ///
    /// [`DEFAULT_SMOOTHING_SIGMA`] (1.4) is the usual Canny choice.
    pub fn with_smoothing(mut self, sigma: f32) -> Self {
        self.smoothing_sigma = Some(sigma);
        self
    }

    pub fn with_default_smoothing(self) -> Self {
        self.with_smoothing(DEFAULT_SMOOTHING_SIGMA)
    }

    pub fn with_weights(mut self, weights: LuminanceWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Length of the feature vector this configuration produces.
    pub fn feature_length(&self) -> usize {
        self.bins * region_count(self.levels)
    }

    pub fn validate(&self) -> PhogResult<()> {
        if self.bins == 0 {
            return Err(PhogError::InvalidConfig("bins must be positive".into()));
        }
        if self.levels == 0 || self.levels > MAX_LEVELS {
            return Err(PhogError::InvalidConfig(format!(
                "levels must be between 1 and {}, got {}",
                MAX_LEVELS, self.levels
            )));
        }
        let CannyThresholds { low, high } = self.thresholds;
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(PhogError::InvalidConfig(format!(
                "thresholds must be finite with low <= high, got {}..{}",
                low, high
            )));
        }
        if let Some(sigma) = self.smoothing_sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(PhogError::InvalidConfig(format!(
                    "smoothing sigma must be positive, got {}",
                    sigma
                )));
            }
        }
        Ok(())
    }
}

/// PHOG feature: configuration plus the last extracted histogram.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Phog {
    config: PhogConfig,
    histogram: Vec<f64>,
}

impl Phog {
    /// Feature with the default configuration and an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PhogConfig) -> PhogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            histogram: Vec::new(),
        })
    }

    pub fn config(&self) -> &PhogConfig {
        &self.config
    }

    /// The feature vector as real values.
    pub fn histogram(&self) -> &[f64] {
        &self.histogram
    }

    /// Extract the descriptor from an image, replacing any previous state.
    ///
    /// # Arguments
    /// * `image` - Image with 1, 3, or 4 channels (height, width, channels)
    pub fn extract(&mut self, image: ArrayView3<u8>) -> PhogResult<()> {
        let gray = self.luminance(image)?;
        self.extract_gray(&gray)
    }

    /// Extract from an interleaved pixel buffer.
    pub fn extract_raw(
        &mut self,
        data: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> PhogResult<()> {
        let image = raster_from_raw(data, width, height, channels)?;
        self.extract(image.view())
    }

    /// Extract from an already converted luminance plane (height, width).
    pub fn extract_gray(&mut self, gray: &Array2<u8>) -> PhogResult<()> {
        self.config.validate()?;
        let (height, width) = gray.dim();
        check_dimensions(width, height)?;

        let (edges, field) = self.edge_stage(gray);
        let regions = pyramid_regions(width, height, self.config.levels);
        let bins = self.config.bins;

        let histograms: Vec<Vec<f64>> = regions
            .par_iter()
            .map(|region| pyramid::orientation_histogram(&edges, &field.direction, region, bins))
            .collect();

        self.histogram = histograms.concat();

        debug!(
            "PHOG {}x{}: {} edge pixels, {} regions, {} values",
            width,
            height,
            edges.count(EdgeClass::Strong),
            regions.len(),
            self.histogram.len()
        );
        Ok(())
    }

    /// Run only the edge detection part of the pipeline.
    pub fn edge_map(&self, image: ArrayView3<u8>) -> PhogResult<EdgeMap> {
        self.config.validate()?;
        let gray = self.luminance(image)?;
        Ok(self.edge_stage(&gray).0)
    }

    fn luminance(&self, image: ArrayView3<u8>) -> PhogResult<Array2<u8>> {
        let (height, width, _) = image.dim();
        check_dimensions(width, height)?;
        luminance_u8(image, self.config.weights)
    }

    fn edge_stage(&self, gray: &Array2<u8>) -> (EdgeMap, GradientField) {
        let field = match self.config.smoothing_sigma {
            Some(sigma) => sobel_field(&gaussian_blur_gray(gray, sigma)),
            None => sobel_field(gray),
        };
        let edges = detect_edges(&field, self.config.thresholds, self.config.suppression);
        (edges, field)
    }

    /// Compact storage form: one byte per entry.
    pub fn to_compact_bytes(&self) -> Vec<u8> {
        compact::encode(&self.histogram)
    }

    /// Rebuild a feature (default configuration) from its compact form.
    pub fn from_compact_bytes(bytes: &[u8]) -> Self {
        let mut phog = Self::new();
        phog.set_compact_bytes(bytes);
        phog
    }

    /// Replace the histogram with the decoded bytes.
    pub fn set_compact_bytes(&mut self, bytes: &[u8]) {
        self.histogram = compact::decode(bytes);
    }

    /// Replace the histogram with `length` bytes read from `offset`.
    pub fn set_compact_bytes_range(
        &mut self,
        bytes: &[u8],
        offset: usize,
        length: usize,
    ) -> PhogResult<()> {
        self.histogram = compact::decode_range(bytes, offset, length)?;
        Ok(())
    }

    /// L1 distance to another feature; smaller is more similar.
    pub fn distance(&self, other: &Phog) -> PhogResult<f64> {
        self.distance_with(other, DistanceMetric::L1)
    }

    pub fn distance_with(&self, other: &Phog, metric: DistanceMetric) -> PhogResult<f64> {
        metric.compute(&self.histogram, &other.histogram)
    }

    /// PHOG has no textual form.
    pub fn string_representation(&self) -> Option<String> {
        None
    }

    /// Textual input is ignored.
    pub fn set_string_representation(&mut self, _repr: &str) {}
}

fn check_dimensions(width: usize, height: usize) -> PhogResult<()> {
    if width == 0 || height == 0 {
        return Err(PhogError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Wrap an interleaved buffer as a (height, width, channels) raster.
pub fn raster_from_raw(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> PhogResult<Array3<u8>> {
    check_dimensions(width, height)?;
    if !matches!(channels, 1 | 3 | 4) {
        return Err(PhogError::UnsupportedChannels(channels));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(PhogError::InvalidDimensions { width, height })?;
    if data.len() != expected {
        return Err(PhogError::BufferSize {
            expected,
            actual: data.len(),
        });
    }
    Array3::from_shape_vec((height, width, channels), data.to_vec()).map_err(|_| {
        PhogError::BufferSize {
            expected,
            actual: data.len(),
        }
    })
}
