//! Gaussian pre-smoothing of the luminance plane.
//!
//! Optional stage ahead of the Sobel gradients: a fixed 5x5 Gaussian,
//! applied as two 5-tap passes with clamped borders.

use ndarray::{Array2, ArrayView2, Axis};

/// Taps on each side of the kernel center
pub const SMOOTHING_RADIUS: usize = 2;
/// Kernel width (5)
pub const SMOOTHING_TAPS: usize = 2 * SMOOTHING_RADIUS + 1;
/// Standard deviation of the classic Canny pre-blur
pub const DEFAULT_SMOOTHING_SIGMA: f32 = 1.4;

/// Normalized 5-tap Gaussian weights for `sigma`.
///
/// The 5x5 kernel is the outer product of this vector with itself.
pub fn smoothing_kernel(sigma: f32) -> [f32; SMOOTHING_TAPS] {
    let mut kernel = [0.0f32; SMOOTHING_TAPS];
    if sigma.is_nan() || sigma <= 0.0 {
        kernel[SMOOTHING_RADIUS] = 1.0;
        return kernel;
    }

    let denom = 2.0 * sigma * sigma;
    for (tap, weight) in kernel.iter_mut().enumerate() {
        let offset = tap as f32 - SMOOTHING_RADIUS as f32;
        *weight = (-offset * offset / denom).exp();
    }
    let total: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= total);
    kernel
}

fn convolve_axis(plane: ArrayView2<f32>, kernel: &[f32; SMOOTHING_TAPS], axis: Axis) -> Array2<f32> {
    let last = plane.len_of(axis) as isize - 1;
    Array2::from_shape_fn(plane.dim(), |(y, x)| {
        let center = (if axis == Axis(0) { y } else { x }) as isize;
        kernel
            .iter()
            .enumerate()
            .map(|(tap, &w)| {
                let pos = (center + tap as isize - SMOOTHING_RADIUS as isize).clamp(0, last) as usize;
                let sample = if axis == Axis(0) { plane[[pos, x]] } else { plane[[y, pos]] };
                sample * w
            })
            .sum()
    })
}

/// Blur a luminance plane with the 5x5 Gaussian of the given sigma.
///
/// Non-positive sigma leaves the plane unchanged. Results are rounded
/// back to u8.
pub fn gaussian_blur_gray(gray: &Array2<u8>, sigma: f32) -> Array2<u8> {
    if sigma.is_nan() || sigma <= 0.0 || gray.is_empty() {
        return gray.clone();
    }

    let kernel = smoothing_kernel(sigma);
    let plane = gray.mapv(f32::from);
    let rows = convolve_axis(plane.view(), &kernel, Axis(1));
    let smoothed = convolve_axis(rows.view(), &kernel, Axis(0));
    smoothed.mapv(|v| v.round().clamp(0.0, 255.0) as u8)
}
