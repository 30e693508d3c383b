use ndarray::Array3;

/// Constant-color RGB image.
pub fn flat_rgb(width: usize, height: usize, value: u8) -> Array3<u8> {
    Array3::from_elem((height, width, 3), value)
}

/// Dark left half, bright right half, one mid-gray column at `width / 2`.
///
/// The mid column gives the horizontal gradient a single-pixel ridge.
pub fn vertical_edge_rgb(width: usize, height: usize) -> Array3<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mid = width / 2;
    Array3::from_shape_fn((height, width, 3), |(_, x, _)| {
        if x < mid {
            0
        } else if x == mid {
            128
        } else {
            255
        }
    })
}

/// Two-level step without a transition column.
pub fn binary_step_gray(width: usize, height: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 1), |(_, x, _)| if x < width / 2 { 0 } else { 255 })
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_rgba(width: usize, height: usize, cell: usize) -> Array3<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
        if c == 3 {
            return 255;
        }
        let sum = x / cell + y / cell;
        if sum & 1 == 0 {
            32
        } else {
            220
        }
    })
}

/// Deterministic pseudo-random RGB noise.
pub fn noise_rgb(width: usize, height: usize, seed: u64) -> Array3<u8> {
    let mut state = seed;
    Array3::from_shape_fn((height, width, 3), |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 56) as u8
    })
}
