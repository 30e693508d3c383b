//! Luminance conversion for descriptor input.
//!
//! Collapses a 1, 3 or 4 channel u8 raster into a single 8-bit luminance
//! plane. Uses ITU-R BT.709 luminosity coefficients by default.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - copied as-is
//! - **RGB**: (height, width, 3) - weighted luminance
//! - **RGBA**: (height, width, 4) - weighted luminance, alpha ignored

use ndarray::{Array2, ArrayView3};

use crate::error::{PhogError, PhogResult};

/// ITU-R BT.709 luminosity coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// RGB channel weights used for the luminance transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for LuminanceWeights {
    fn default() -> Self {
        Self {
            r: LUMA_R,
            g: LUMA_G,
            b: LUMA_B,
        }
    }
}

impl LuminanceWeights {
    /// BT.709 luminosity (default)
    pub fn bt709() -> Self {
        Self::default()
    }

    /// ITU-R BT.601 luma, the classic "NTSC" weighting
    pub fn bt601() -> Self {
        Self { r: 0.299, g: 0.587, b: 0.114 }
    }

    /// Simple average (R+G+B)/3
    pub fn average() -> Self {
        Self { r: 1.0 / 3.0, g: 1.0 / 3.0, b: 1.0 / 3.0 }
    }

    /// Create custom weights (normalized automatically)
    pub fn custom(r: f32, g: f32, b: f32) -> Self {
        let sum = (r + g + b).abs().max(0.001);
        Self {
            r: r / sum,
            g: g / sum,
            b: b / sum,
        }
    }
}

/// Convert an image to a single-channel luminance plane.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `weights` - RGB channel weights, ignored for single channel input
///
/// # Returns
/// Luminance grid of shape (height, width)
pub fn luminance_u8(input: ArrayView3<u8>, weights: LuminanceWeights) -> PhogResult<Array2<u8>> {
    let (height, width, channels) = input.dim();

    match channels {
        1 => Ok(input.index_axis(ndarray::Axis(2), 0).to_owned()),
        3 | 4 => {
            let mut output = Array2::<u8>::zeros((height, width));
            for y in 0..height {
                for x in 0..width {
                    let r = input[[y, x, 0]] as f32;
                    let g = input[[y, x, 1]] as f32;
                    let b = input[[y, x, 2]] as f32;
                    output[[y, x]] =
                        (weights.r * r + weights.g * g + weights.b * b).clamp(0.0, 255.0) as u8;
                }
            }
            Ok(output)
        }
        other => Err(PhogError::UnsupportedChannels(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_luminance_red() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = 255; // R
        img[[0, 0, 3]] = 255; // A

        let result = luminance_u8(img.view(), LuminanceWeights::bt709()).unwrap();

        // 0.2126 * 255 ≈ 54
        assert!((result[[0, 0]] as i32 - 54).abs() <= 1);
    }

    #[test]
    fn test_luminance_green_rgb() {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 1]] = 255; // G

        let result = luminance_u8(img.view(), LuminanceWeights::default()).unwrap();

        // 0.7152 * 255 ≈ 182
        assert!((result[[0, 0]] as i32 - 182).abs() <= 1);
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let mut opaque = Array3::<u8>::zeros((1, 1, 4));
        opaque[[0, 0, 0]] = 128;
        opaque[[0, 0, 1]] = 64;
        opaque[[0, 0, 2]] = 32;
        opaque[[0, 0, 3]] = 255;
        let mut faded = opaque.clone();
        faded[[0, 0, 3]] = 10;

        let a = luminance_u8(opaque.view(), LuminanceWeights::default()).unwrap();
        let b = luminance_u8(faded.view(), LuminanceWeights::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_channel_is_copied() {
        let mut img = Array3::<u8>::zeros((2, 3, 1));
        img[[0, 1, 0]] = 17;
        img[[1, 2, 0]] = 250;

        let result = luminance_u8(img.view(), LuminanceWeights::default()).unwrap();
        assert_eq!(result.dim(), (2, 3));
        assert_eq!(result[[0, 1]], 17);
        assert_eq!(result[[1, 2]], 250);
    }

    #[test]
    fn test_custom_weights_are_normalized() {
        let w = LuminanceWeights::custom(2.0, 2.0, 4.0);
        assert!((w.r + w.g + w.b - 1.0).abs() < 1e-6);
        assert!((w.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_channels() {
        let img = Array3::<u8>::zeros((2, 2, 2));
        let err = luminance_u8(img.view(), LuminanceWeights::default()).unwrap_err();
        assert_eq!(err, PhogError::UnsupportedChannels(2));
    }
}
