//! PHOG image descriptor
//!
//! Pyramid Histogram of Oriented Gradients for content-based image
//! retrieval: Canny-style edges, orientation histograms over a spatial
//! pyramid, quantized to a compact fixed-length vector, with Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! The extractor accepts u8 images with 1, 3 or 4 channels:
//! - **Grayscale**: (height, width, 1) - single channel
//! - **RGB**: (height, width, 3) - 3 color channels
//! - **RGBA**: (height, width, 4) - alpha is ignored
//!
//! ## Feature Format
//! With the default configuration a feature is 840 integers in [0, 31]:
//! the whole-image histogram, four quadrant histograms and sixteen cell
//! histograms of 40 bins each. Stored compactly as one byte per value and
//! compared with the L1 distance.

pub mod descriptor;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use descriptor::{DistanceMetric, Phog, PhogConfig};
pub use error::{PhogError, PhogResult};
pub use filters::canny::{EdgeClass, EdgeMap, SuppressionMode};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::descriptor::{DistanceMetric, Phog, PhogConfig};
    use crate::error::PhogError;
    use crate::filters::canny::SuppressionMode;

    impl From<PhogError> for PyErr {
        fn from(err: PhogError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn build_config(
        bins: usize,
        levels: usize,
        threshold_low: f64,
        threshold_high: f64,
        symmetric: bool,
        sigma: Option<f32>,
    ) -> PhogConfig {
        let mode = if symmetric {
            SuppressionMode::Symmetric
        } else {
            SuppressionMode::Legacy
        };
        let mut config = PhogConfig::default()
            .with_bins(bins)
            .with_levels(levels)
            .with_thresholds(threshold_low, threshold_high)
            .with_suppression(mode);
        config.smoothing_sigma = sigma;
        config
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    /// Extract the PHOG feature of a u8 image (1, 3 or 4 channels).
    ///
    /// Returns a float64 vector of quantized values in [0, 31].
    #[pyfunction]
    #[pyo3(signature = (image, bins=40, levels=3, threshold_low=60.0, threshold_high=100.0, symmetric=false, sigma=None))]
    pub fn phog_extract<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        bins: usize,
        levels: usize,
        threshold_low: f64,
        threshold_high: f64,
        symmetric: bool,
        sigma: Option<f32>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let config = build_config(bins, levels, threshold_low, threshold_high, symmetric, sigma);
        let mut phog = Phog::with_config(config)?;
        phog.extract(image.as_array())?;
        Ok(phog.histogram().to_vec().into_pyarray(py))
    }

    /// Extract the PHOG feature and return its compact byte form.
    #[pyfunction]
    #[pyo3(signature = (image, bins=40, levels=3, threshold_low=60.0, threshold_high=100.0, symmetric=false, sigma=None))]
    pub fn phog_compact<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        bins: usize,
        levels: usize,
        threshold_low: f64,
        threshold_high: f64,
        symmetric: bool,
        sigma: Option<f32>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let config = build_config(bins, levels, threshold_low, threshold_high, symmetric, sigma);
        let mut phog = Phog::with_config(config)?;
        phog.extract(image.as_array())?;
        Ok(PyBytes::new(py, &phog.to_compact_bytes()))
    }

    /// Canny edge map used by the descriptor (0 = edge, 128 = weak, 255 = none).
    #[pyfunction]
    #[pyo3(signature = (image, threshold_low=60.0, threshold_high=100.0, symmetric=false, sigma=None))]
    pub fn phog_edge_map<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold_low: f64,
        threshold_high: f64,
        symmetric: bool,
        sigma: Option<f32>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let config = build_config(1, 1, threshold_low, threshold_high, symmetric, sigma);
        let phog = Phog::with_config(config)?;
        let edges = phog.edge_map(image.as_array())?;
        Ok(edges.to_luma().into_pyarray(py))
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Distance between two feature vectors ("l1" or "chi2").
    #[pyfunction]
    #[pyo3(signature = (a, b, metric="l1"))]
    pub fn phog_distance<'py>(
        a: PyReadonlyArray1<'py, f64>,
        b: PyReadonlyArray1<'py, f64>,
        metric: &str,
    ) -> PyResult<f64> {
        let metric = match metric {
            "l1" => DistanceMetric::L1,
            "chi2" => DistanceMetric::ChiSquared,
            other => {
                return Err(PyValueError::new_err(format!("unknown metric: {}", other)));
            }
        };
        Ok(metric.compute(a.as_slice()?, b.as_slice()?)?)
    }

    #[pymodule]
    pub fn phog_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(phog_extract, m)?)?;
        m.add_function(wrap_pyfunction!(phog_compact, m)?)?;
        m.add_function(wrap_pyfunction!(phog_edge_map, m)?)?;
        m.add_function(wrap_pyfunction!(phog_distance, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::phog_rust;
