//! Windowed suppression via a separable sliding-window maximum.
//!
//! The window maximum is computed in two passes (rows, then columns) with a
//! monotonic deque per line, so the cost per pixel does not depend on the
//! window size. Windows are clipped at the image border and NaN samples are
//! treated as `-inf`, so they never dominate a candidate.
//!
//! Since the window includes the candidate itself, "no strictly greater
//! neighbour" is the same as `value >= window_max`. Plateaus of equal values
//! are therefore accepted as a whole, exactly like the direct scan.

use crate::image::{ImageView, MASK_ON};
use crate::util::rows::for_each_row;
use std::collections::VecDeque;

/// Clipped window maxima stored column-major (`x * height + y`).
pub(crate) struct WindowMaxima {
    data: Vec<f32>,
    height: usize,
}

impl WindowMaxima {
    #[inline]
    fn get(&self, x: usize, y: usize) -> f32 {
        self.data[x * self.height + y]
    }
}

#[inline]
fn ordered(v: f32) -> f32 {
    if v.is_nan() {
        f32::NEG_INFINITY
    } else {
        v
    }
}

/// Sliding maximum over `[i - half, i + half] ∩ [0, len)` for every `i`.
fn sliding_max_line(src: &[f32], half: usize, dst: &mut [f32], deque: &mut VecDeque<usize>) {
    deque.clear();
    let len = src.len();
    let mut next = 0;
    for i in 0..len {
        let right = (i + half).min(len - 1);
        while next <= right {
            let v = ordered(src[next]);
            while deque.back().is_some_and(|&b| ordered(src[b]) <= v) {
                deque.pop_back();
            }
            deque.push_back(next);
            next += 1;
        }
        let left = i.saturating_sub(half);
        while deque.front().is_some_and(|&f| f < left) {
            deque.pop_front();
        }
        if let Some(&best) = deque.front() {
            dst[i] = ordered(src[best]);
        }
    }
}

/// A deque never holds more indices than the line has samples, however wide
/// the window is.
#[inline]
fn deque_capacity(line_len: usize, half: usize) -> usize {
    half.saturating_mul(2).saturating_add(1).min(line_len)
}

/// Computes the clipped `(2 * half + 1)²` window maximum of every pixel.
pub(crate) fn window_max(map: ImageView<'_, f32>, half: usize, parallel: bool) -> WindowMaxima {
    let width = map.width();
    let height = map.height();

    let mut row_max = vec![f32::NEG_INFINITY; width * height];
    for_each_row(&mut row_max, width, parallel, |y, dst| {
        if let Some(src) = map.row(y) {
            let mut deque = VecDeque::with_capacity(deque_capacity(width, half));
            sliding_max_line(src, half, dst, &mut deque);
        }
    });

    let mut columns = vec![f32::NEG_INFINITY; width * height];
    for y in 0..height {
        for x in 0..width {
            columns[x * height + y] = row_max[y * width + x];
        }
    }

    let mut data = vec![f32::NEG_INFINITY; width * height];
    for_each_row(&mut data, height, parallel, |x, dst| {
        let mut deque = VecDeque::with_capacity(deque_capacity(height, half));
        sliding_max_line(&columns[x * height..(x + 1) * height], half, dst, &mut deque);
    });

    WindowMaxima { data, height }
}

/// Marks the accepted pixels of row `y` given precomputed window maxima.
pub(crate) fn accept_row(
    map: ImageView<'_, f32>,
    maxima: &WindowMaxima,
    y: usize,
    threshold: f32,
    out: &mut [u8],
) {
    let Some(row) = map.row(y) else {
        return;
    };
    for (x, (dst, &value)) in out.iter_mut().zip(row).enumerate() {
        if value.is_nan() || value < threshold {
            continue;
        }
        if value >= maxima.get(x, y) {
            *dst = MASK_ON;
        }
    }
}
