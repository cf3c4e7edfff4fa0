//! SIMD row scoring using the `wide` crate.
//!
//! Where the window lies fully inside the image horizontally, the four
//! summed-area corners of 8 neighbouring pixels sit at consecutive table
//! indices. Those runs are loaded as `f64x4` pairs, reduced per lane, and the
//! score is evaluated on `f32x8`. Clipped columns near the left and right
//! borders fall back to the per-pixel lookup. Every lane performs the same
//! operations in the same order as `TensorIntegrals::window` followed by
//! `harris_score`, so results are bit-identical to the scalar path.

use crate::tensor::{harris_score, TensorIntegrals};
use crate::util::math::clipped_span;
use wide::{f32x8, f64x4};

const LANES: usize = 8;

#[inline]
fn load_f64x4(table: &[f64], start: usize) -> f64x4 {
    f64x4::from([
        table[start],
        table[start + 1],
        table[start + 2],
        table[start + 3],
    ])
}

/// Box sums of 8 consecutive windows whose corners start at `a`, `b`, `c`, `d`.
#[inline]
fn box_sums(table: &[f64], a: usize, b: usize, c: usize, d: usize) -> f32x8 {
    let mut out = [0.0f32; LANES];
    for (half, lanes) in out.chunks_exact_mut(4).enumerate() {
        let o = half * 4;
        let sum = load_f64x4(table, d + o) - load_f64x4(table, b + o) - load_f64x4(table, c + o)
            + load_f64x4(table, a + o);
        for (dst, v) in lanes.iter_mut().zip(sum.to_array()) {
            *dst = v as f32;
        }
    }
    f32x8::from(out)
}

#[inline]
fn score_scalar(integrals: &TensorIntegrals, x: usize, y: usize, half: usize, k: f32) -> f32 {
    let m = integrals.window(x, y, half);
    harris_score(m.xx, m.yy, m.xy, k)
}

/// Writes the scores of row `y` into `out` (length = image width).
pub(crate) fn score_row(
    integrals: &TensorIntegrals,
    y: usize,
    half: usize,
    k: f32,
    out: &mut [f32],
) {
    let width = out.len();
    // Columns in [lo, hi) have windows that are not clipped horizontally.
    let lo = half.min(width);
    let hi = width.saturating_sub(half).max(lo);

    for (x, dst) in out[..lo].iter_mut().enumerate() {
        *dst = score_scalar(integrals, x, y, half, k);
    }

    let (y0, y1) = clipped_span(y, half, integrals.height());
    let stride = integrals.width() + 1;
    let top = y0 * stride;
    let bottom = (y1 + 1) * stride;
    let (txx, txy, tyy) = integrals.tables();
    let kv = f32x8::splat(k);

    let mut x = lo;
    while x + LANES <= hi {
        let x0 = x - half;
        let x1 = x + half + 1;
        let (a, b, c, d) = (top + x0, top + x1, bottom + x0, bottom + x1);
        let xx = box_sums(txx, a, b, c, d);
        let xy = box_sums(txy, a, b, c, d);
        let yy = box_sums(tyy, a, b, c, d);
        let det = xx * yy - xy * xy;
        let trace = xx + yy;
        let score = det - kv * trace * trace;
        out[x..x + LANES].copy_from_slice(&score.to_array());
        x += LANES;
    }

    for (x, dst) in out.iter_mut().enumerate().skip(x) {
        *dst = score_scalar(integrals, x, y, half, k);
    }
}

#[cfg(test)]
mod tests {
    use super::score_row;
    use crate::gradient::sobel_gradients;
    use crate::image::ImageView;
    use crate::response::scalar;
    use crate::tensor::TensorIntegrals;

    #[test]
    fn rows_match_scalar_bits_for_all_clipping_cases() {
        let (w, h) = (37usize, 9usize);
        let data: Vec<f32> = (0..w * h)
            .map(|i| ((i * 53) % 97) as f32 * 1.37 - (i % 7) as f32)
            .collect();
        let view = ImageView::from_slice(&data, w, h).unwrap();
        let field = sobel_gradients(view, 3).unwrap();
        let integrals = TensorIntegrals::from_gradients(&field);

        for half in [0usize, 1, 3, 10, 18, 40] {
            for y in 0..h {
                let mut fast = vec![0.0f32; w];
                let mut slow = vec![0.0f32; w];
                score_row(&integrals, y, half, 0.04, &mut fast);
                scalar::score_row(&integrals, y, half, 0.04, &mut slow);
                for x in 0..w {
                    assert_eq!(
                        fast[x].to_bits(),
                        slow[x].to_bits(),
                        "({x},{y}) half {half}"
                    );
                }
            }
        }
    }
}
