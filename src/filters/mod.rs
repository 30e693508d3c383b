//! Image filters feeding the PHOG descriptor.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 (alpha ignored) |
//!
//! Every stage after [`grayscale`] works on a single (H, W) plane.
//!
//! ## Stages
//!
//! - **Luminance**: grayscale (BT.709 by default)
//! - **Smoothing**: optional Gaussian pre-blur
//! - **Gradients**: 3x3 Sobel, magnitude and direction
//! - **Edges**: Canny-style suppression, hysteresis, pruning

pub mod grayscale;
pub mod blur;
pub mod edge;
pub mod canny;
