//! Owned contiguous single-channel buffers.

use crate::image::ImageView;
use crate::util::{HarrisError, HarrisResult};

/// Mask value marking an accepted corner.
pub const MASK_ON: u8 = 255;
/// Mask value for every other pixel.
pub const MASK_OFF: u8 = 0;

/// Per-pixel cornerness scores.
pub type ResponseMap = OwnedImage<f32>;

/// Binary suppression result with values in `{MASK_OFF, MASK_ON}`.
pub type Mask = OwnedImage<u8>;

/// Owned contiguous single-channel image buffer (`stride == width`).
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> OwnedImage<T> {
    /// Wraps a packed row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> HarrisResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(HarrisError::input("image geometry overflows usize"))?;
        if data.len() < needed {
            return Err(HarrisError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(HarrisError::input("buffer longer than width * height"));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates an image with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Copies a single-channel view into a packed buffer.
    pub fn from_view(view: ImageView<'_, T>) -> HarrisResult<Self> {
        if view.channels() != 1 {
            return Err(HarrisError::input("expected a single-channel image"));
        }
        let mut data = Vec::with_capacity(view.width() * view.height());
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
            channels: 1,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the packed row-major samples.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Consumes the image and returns its packed samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Mask {
    /// Number of pixels marked as accepted corners.
    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|&&v| v == MASK_ON).count()
    }
}
