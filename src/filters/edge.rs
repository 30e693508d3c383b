//! Sobel gradient estimation.
//!
//! Computes horizontal and vertical derivatives of a luminance plane with
//! fixed 3x3 kernels, then per-pixel gradient magnitude and direction.
//! Only interior pixels are convolved; border gradients are zero.

use std::f64::consts::FRAC_PI_2;

use ndarray::Array2;

/// Horizontal Sobel kernel, indexed `[dy][dx]`. Responds positively when
/// the left column is brighter than the right.
pub const SOBEL_X: [[i32; 3]; 3] = [[1, 0, -1], [2, 0, -2], [1, 0, -1]];

/// Vertical Sobel kernel, indexed `[dy][dx]`. Responds positively when
/// the top row is brighter than the bottom.
pub const SOBEL_Y: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Per-pixel gradient magnitude and direction.
#[derive(Debug, Clone)]
pub struct GradientField {
    /// `hypot(gy, gx)`
    pub magnitude: Array2<f64>,
    /// `atan(gy / gx)` in (-π/2, π/2], or π/2 where `gx == 0`
    pub direction: Array2<f64>,
}

impl GradientField {
    pub fn dim(&self) -> (usize, usize) {
        self.magnitude.dim()
    }
}

/// Convolve the interior of a luminance plane with a 3x3 kernel.
fn convolve_interior(gray: &Array2<u8>, kernel: &[[i32; 3]; 3]) -> Array2<f64> {
    let (height, width) = gray.dim();
    let mut output = Array2::<f64>::zeros((height, width));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sum = 0i32;
            for ky in 0..3 {
                for kx in 0..3 {
                    let py = y + ky - 1;
                    let px = x + kx - 1;
                    sum += gray[[py, px]] as i32 * kernel[ky][kx];
                }
            }
            output[[y, x]] = sum as f64;
        }
    }

    output
}

/// Apply both Sobel kernels to a luminance plane.
///
/// # Returns
/// `(gx, gy)` with zeros on the one-pixel border
pub fn sobel_gradients(gray: &Array2<u8>) -> (Array2<f64>, Array2<f64>) {
    (convolve_interior(gray, &SOBEL_X), convolve_interior(gray, &SOBEL_Y))
}

/// Compute magnitude and direction from the two derivative planes.
pub fn gradient_field(gx: &Array2<f64>, gy: &Array2<f64>) -> GradientField {
    let mut magnitude = Array2::<f64>::zeros(gx.dim());
    let mut direction = Array2::<f64>::zeros(gx.dim());

    ndarray::Zip::from(&mut magnitude)
        .and(&mut direction)
        .and(gx)
        .and(gy)
        .for_each(|m, d, &dx, &dy| {
            *d = if dx != 0.0 { (dy / dx).atan() } else { FRAC_PI_2 };
            *m = dy.hypot(dx);
        });

    GradientField { magnitude, direction }
}

/// Sobel gradients followed by magnitude/direction.
pub fn sobel_field(gray: &Array2<u8>) -> GradientField {
    let (gx, gy) = sobel_gradients(gray);
    gradient_field(&gx, &gy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(width: usize, height: usize, split: usize) -> Array2<u8> {
        Array2::from_shape_fn((height, width), |(_, x)| if x < split { 0 } else { 255 })
    }

    #[test]
    fn test_sobel_detects_vertical_edge() {
        let gray = vertical_step(5, 5, 2);
        let (gx, gy) = sobel_gradients(&gray);

        // Dark left, bright right: 0 - (255 + 2*255 + 255)
        assert_eq!(gx[[2, 2]], -1020.0);
        assert_eq!(gx[[2, 1]], -1020.0);
        assert_eq!(gy[[2, 2]], 0.0);
        assert_eq!(gx[[2, 3]], 0.0);
    }

    #[test]
    fn test_sobel_detects_horizontal_edge() {
        let gray = Array2::from_shape_fn((5, 5), |(y, _)| if y < 2 { 255u8 } else { 0 });
        let (gx, gy) = sobel_gradients(&gray);

        // Bright top row contributes positively
        assert_eq!(gy[[2, 2]], 1020.0);
        assert_eq!(gx[[2, 2]], 0.0);
    }

    #[test]
    fn test_border_gradients_are_zero() {
        let gray = Array2::from_shape_fn((6, 7), |(y, x)| ((x * 31 + y * 17) % 256) as u8);
        let (gx, gy) = sobel_gradients(&gray);

        for x in 0..7 {
            assert_eq!(gx[[0, x]], 0.0);
            assert_eq!(gx[[5, x]], 0.0);
            assert_eq!(gy[[0, x]], 0.0);
            assert_eq!(gy[[5, x]], 0.0);
        }
        for y in 0..6 {
            assert_eq!(gx[[y, 0]], 0.0);
            assert_eq!(gx[[y, 6]], 0.0);
            assert_eq!(gy[[y, 0]], 0.0);
            assert_eq!(gy[[y, 6]], 0.0);
        }
    }

    #[test]
    fn test_direction_defaults_to_half_pi() {
        let gx = Array2::<f64>::zeros((2, 2));
        let mut gy = Array2::<f64>::zeros((2, 2));
        gy[[0, 0]] = 5.0;

        let field = gradient_field(&gx, &gy);

        assert!(field.direction.iter().all(|&d| d == FRAC_PI_2));
        assert_eq!(field.magnitude[[0, 0]], 5.0);
        assert_eq!(field.magnitude[[1, 1]], 0.0);
    }

    #[test]
    fn test_direction_and_magnitude() {
        let mut gx = Array2::<f64>::zeros((1, 3));
        let mut gy = Array2::<f64>::zeros((1, 3));
        gx[[0, 0]] = 3.0;
        gy[[0, 0]] = 4.0;
        gx[[0, 1]] = -2.0;
        gy[[0, 1]] = 2.0;
        gx[[0, 2]] = 7.0;

        let field = gradient_field(&gx, &gy);

        assert!((field.magnitude[[0, 0]] - 5.0).abs() < 1e-12);
        assert!((field.direction[[0, 1]] + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(field.direction[[0, 2]], 0.0);
    }

    #[test]
    fn test_tiny_image_has_no_interior() {
        let gray = Array2::<u8>::from_elem((2, 2), 200);
        let field = sobel_field(&gray);
        assert!(field.magnitude.iter().all(|&m| m == 0.0));
        assert_eq!(field.dim(), (2, 2));
    }
}
