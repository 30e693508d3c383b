//! WebAssembly exports for the PHOG descriptor.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and take
//! flat RGBA byte buffers (length = width * height * 4).

use wasm_bindgen::prelude::*;

use crate::descriptor::{raster_from_raw, Phog};
use crate::error::PhogError;

fn to_js(err: PhogError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Extract the PHOG feature of an RGBA image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Compact feature bytes (840 values in 0-31 with the default configuration)
#[wasm_bindgen]
pub fn phog_extract_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let mut phog = Phog::new();
    phog.extract_raw(data, width, height, 4).map_err(to_js)?;
    Ok(phog.to_compact_bytes())
}

/// L1 distance between two compact features.
#[wasm_bindgen]
pub fn phog_distance_wasm(a: &[u8], b: &[u8]) -> Result<f64, JsValue> {
    Phog::from_compact_bytes(a)
        .distance(&Phog::from_compact_bytes(b))
        .map_err(to_js)
}

/// Canny edge map of an RGBA image, as one luminance byte per pixel.
///
/// # Returns
/// Flat array of length width * height (0 = edge, 255 = background)
#[wasm_bindgen]
pub fn phog_edge_map_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let image = raster_from_raw(data, width, height, 4).map_err(to_js)?;
    let edges = Phog::new().edge_map(image.view()).map_err(to_js)?;
    Ok(edges.to_luma().into_raw_vec_and_offset().0)
}
