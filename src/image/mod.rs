//! Image views, owned buffers and format helpers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than `width * channels` represents padded rows. Samples of
//! multi-channel views are interleaved; the detection stages only accept
//! single-channel views and reject everything else with `InvalidInput`.
//!
//! Zero-sized views are representable so that callers can hand over whatever
//! a capture backend produced; the processing stages reject them.

use crate::util::{HarrisError, HarrisResult};

pub mod convert;
#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::{Mask, OwnedImage, ResponseMap, MASK_OFF, MASK_ON};

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous single-channel view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> HarrisResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a single-channel view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> HarrisResult<Self> {
        Self::with_layout(data, width, height, stride, 1)
    }

    /// Creates a contiguous view over interleaved samples with `channels`
    /// values per pixel.
    pub fn interleaved(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> HarrisResult<Self> {
        let stride = width
            .checked_mul(channels)
            .ok_or(HarrisError::input("row length overflows usize"))?;
        Self::with_layout(data, width, height, stride, channels)
    }

    fn with_layout(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
        channels: usize,
    ) -> HarrisResult<Self> {
        if channels == 0 {
            return Err(HarrisError::input("channel count must be non-zero"));
        }
        let needed = required_len(width, height, stride, channels)?;
        if data.len() < needed {
            return Err(HarrisError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            channels,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns true when the view has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the first-channel sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.channels)?)?;
        self.data.get(idx)
    }

    /// Returns the `width * channels` samples of row `y`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Checks the preconditions shared by every processing stage: exactly
    /// one channel and at least one pixel.
    pub(crate) fn ensure_gray(&self) -> HarrisResult<()> {
        if self.channels != 1 {
            return Err(HarrisError::input("expected a single-channel image"));
        }
        if self.is_empty() {
            return Err(HarrisError::input("image has zero rows or columns"));
        }
        Ok(())
    }

    /// Rows as contiguous slices of `width` samples (single-channel views).
    pub(crate) fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }
}

fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
) -> HarrisResult<usize> {
    let row_len = width
        .checked_mul(channels)
        .ok_or(HarrisError::input("row length overflows usize"))?;
    if stride < row_len {
        return Err(HarrisError::InvalidStride {
            width: row_len,
            stride,
        });
    }
    if width == 0 || height == 0 {
        return Ok(0);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(HarrisError::input("image geometry overflows usize"))
}
