//! Row-wise output filling, optionally on the rayon pool.
//!
//! Every stage writes each output row from read-only inputs only, so rows
//! can be filled in any order without changing the result.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Calls `fill(y, row)` for every `width`-sample row of `buf`.
///
/// `parallel` is honoured only when the `rayon` feature is enabled.
#[cfg(feature = "rayon")]
pub(crate) fn for_each_row<T, F>(buf: &mut [T], width: usize, parallel: bool, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if width == 0 {
        return;
    }
    if parallel {
        buf.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    } else {
        buf.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    }
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn for_each_row<T, F>(buf: &mut [T], width: usize, _parallel: bool, fill: F)
where
    F: Fn(usize, &mut [T]),
{
    if width == 0 {
        return;
    }
    buf.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill(y, row));
}
