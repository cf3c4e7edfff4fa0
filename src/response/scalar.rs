//! Scalar per-row response evaluation.

use crate::tensor::TensorIntegrals;

/// Writes the scores of row `y` into `out` (length = image width).
#[cfg_attr(feature = "simd", allow(dead_code))]
pub(crate) fn score_row(
    integrals: &TensorIntegrals,
    y: usize,
    half: usize,
    k: f32,
    out: &mut [f32],
) {
    for (x, dst) in out.iter_mut().enumerate() {
        *dst = integrals.window(x, y, half).harris_score(k);
    }
}
