//! Numeric helpers shared by the response and suppression stages.

use crate::util::{HarrisError, HarrisResult};

/// Validates an odd, non-zero window size and returns its half extent.
pub(crate) fn odd_window_half(name: &'static str, size: usize) -> HarrisResult<usize> {
    if size == 0 {
        return Err(HarrisError::param(name, "must be at least 1"));
    }
    if size % 2 == 0 {
        return Err(HarrisError::param(name, "must be odd"));
    }
    Ok(size / 2)
}

/// Returns the inclusive index range `[center - half, center + half]`
/// clipped to `[0, len)`. `len` must be non-zero.
#[inline]
pub(crate) fn clipped_span(center: usize, half: usize, len: usize) -> (usize, usize) {
    let lo = center.saturating_sub(half);
    let hi = (center + half).min(len - 1);
    (lo, hi)
}

/// Row `order` of Pascal's triangle as `f32` coefficients.
pub(crate) fn binomial_row(order: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 0..order {
        let mut next = vec![0.0f32; row.len() + 1];
        for (i, &v) in row.iter().enumerate() {
            next[i] += v;
            next[i + 1] += v;
        }
        row = next;
    }
    row
}

/// Full 1D convolution of two coefficient sequences.
pub(crate) fn convolve_full(a: &[f32], b: &[f32]) -> Vec<f32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0f32; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{binomial_row, clipped_span, convolve_full, odd_window_half};
    use crate::util::HarrisError;

    #[test]
    fn odd_window_half_rejects_even_and_zero() {
        assert_eq!(odd_window_half("w", 1).unwrap(), 0);
        assert_eq!(odd_window_half("w", 7).unwrap(), 3);
        assert!(matches!(
            odd_window_half("w", 0),
            Err(HarrisError::InvalidParameter { name: "w", .. })
        ));
        assert!(matches!(
            odd_window_half("w", 4),
            Err(HarrisError::InvalidParameter { name: "w", .. })
        ));
    }

    #[test]
    fn clipped_span_respects_borders() {
        assert_eq!(clipped_span(0, 2, 10), (0, 2));
        assert_eq!(clipped_span(5, 2, 10), (3, 7));
        assert_eq!(clipped_span(9, 2, 10), (7, 9));
        assert_eq!(clipped_span(0, 3, 1), (0, 0));
    }

    #[test]
    fn binomial_rows_match_pascal() {
        assert_eq!(binomial_row(0), vec![1.0]);
        assert_eq!(binomial_row(2), vec![1.0, 2.0, 1.0]);
        assert_eq!(binomial_row(4), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
    }

    #[test]
    fn convolve_full_builds_sobel_derivative() {
        let deriv = convolve_full(&binomial_row(2), &[-1.0, 0.0, 1.0]);
        assert_eq!(deriv, vec![-1.0, -2.0, 0.0, 2.0, 1.0]);
    }
}
