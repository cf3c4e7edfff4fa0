//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::convert::u8_to_f32;
use crate::image::{ImageView, OwnedImage};
use crate::util::{HarrisError, HarrisResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> HarrisResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Converts a decoded image of any color type to a single-channel `f32` image.
pub fn gray_f32_from_dynamic_image(img: &image::DynamicImage) -> HarrisResult<OwnedImage<f32>> {
    let gray = img.to_luma8();
    u8_to_f32(view_from_gray_image(&gray)?)
}

/// Loads an image from disk as a single-channel `f32` image in `[0, 255]`.
pub fn load_gray_f32<P: AsRef<Path>>(path: P) -> HarrisResult<OwnedImage<f32>> {
    let img = image::open(path).map_err(|err| HarrisError::ImageIo {
        reason: err.to_string(),
    })?;
    gray_f32_from_dynamic_image(&img)
}

/// Writes a single-channel 8-bit view (e.g. a mask) to disk. The format is
/// inferred from the file extension.
pub fn save_gray_u8<P: AsRef<Path>>(path: P, view: ImageView<'_, u8>) -> HarrisResult<()> {
    let packed = OwnedImage::from_view(view)?;
    let width = u32::try_from(packed.width())
        .map_err(|_| HarrisError::input("image width exceeds u32"))?;
    let height = u32::try_from(packed.height())
        .map_err(|_| HarrisError::input("image height exceeds u32"))?;
    let buffer = image::GrayImage::from_raw(width, height, packed.into_vec())
        .ok_or(HarrisError::input("buffer does not match image geometry"))?;
    buffer.save(path).map_err(|err| HarrisError::ImageIo {
        reason: err.to_string(),
    })
}
