//! Reference windowed suppression: a full neighbourhood scan per candidate.

use crate::image::{ImageView, MASK_ON};
use crate::util::math::clipped_span;

/// Marks the accepted pixels of row `y` in `out`.
///
/// A candidate at or above `threshold` survives unless an in-bounds
/// neighbour within `half` pixels is strictly greater. Neighbours outside the
/// image are not examined, and equal neighbours never suppress each other.
pub(crate) fn suppress_row(
    map: ImageView<'_, f32>,
    y: usize,
    half: usize,
    threshold: f32,
    out: &mut [u8],
) {
    let Some(row) = map.row(y) else {
        return;
    };
    let (y0, y1) = clipped_span(y, half, map.height());

    for (x, dst) in out.iter_mut().enumerate() {
        let value = row[x];
        if value.is_nan() || value < threshold {
            continue;
        }

        let (x0, x1) = clipped_span(x, half, map.width());
        let dominated = (y0..=y1)
            .filter_map(|ny| map.row(ny))
            .any(|neighbours| neighbours[x0..=x1].iter().any(|&n| value < n));
        if !dominated {
            *dst = MASK_ON;
        }
    }
}
