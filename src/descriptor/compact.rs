//! One-byte-per-entry storage encoding.
//!
//! Entries are truncated to a signed byte and stored as its bit pattern.
//! Quantized histograms live in [0, 31], so the encoding is lossless for
//! them; larger values wrap like any integer-to-byte narrowing.

use crate::error::{PhogError, PhogResult};

/// Encode histogram entries, one byte each.
pub fn encode(histogram: &[f64]) -> Vec<u8> {
    histogram.iter().map(|&v| (v as i32) as i8 as u8).collect()
}

/// Decode every byte back to a histogram entry.
pub fn decode(bytes: &[u8]) -> Vec<f64> {
    bytes.iter().map(|&b| b as i8 as f64).collect()
}

/// Decode `length` bytes starting at `offset`.
///
/// The result is indexed from 0 regardless of `offset`.
pub fn decode_range(bytes: &[u8], offset: usize, length: usize) -> PhogResult<Vec<f64>> {
    let end = offset.checked_add(length).filter(|&end| end <= bytes.len());
    match end {
        Some(end) => Ok(decode(&bytes[offset..end])),
        None => Err(PhogError::OutOfBounds {
            offset,
            length,
            available: bytes.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_quantized_values() {
        let hist: Vec<f64> = (0..=31).map(f64::from).collect();
        assert_eq!(decode(&encode(&hist)), hist);
    }

    #[test]
    fn test_encode_truncates() {
        assert_eq!(encode(&[3.9, 0.2]), vec![3, 0]);
    }

    #[test]
    fn test_out_of_range_values_wrap_through_signed_byte() {
        let bytes = encode(&[200.0, -1.0]);
        assert_eq!(bytes, vec![200, 255]);
        assert_eq!(decode(&bytes), vec![-56.0, -1.0]);
    }

    #[test]
    fn test_decode_range_starts_at_offset() {
        let bytes = [9u8, 9, 1, 2, 3, 9];
        assert_eq!(decode_range(&bytes, 2, 3).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(decode_range(&bytes, 6, 0).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_decode_range_out_of_bounds() {
        let bytes = [0u8; 4];
        assert_eq!(
            decode_range(&bytes, 2, 3),
            Err(PhogError::OutOfBounds {
                offset: 2,
                length: 3,
                available: 4
            })
        );
        assert!(decode_range(&bytes, usize::MAX, 2).is_err());
    }
}
