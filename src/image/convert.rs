//! Caller-side format conversions.
//!
//! The detection stages never convert pixel formats themselves; these helpers
//! cover the usual steps between a capture buffer and `compute_response`, and
//! between a response map and something displayable.

use crate::image::{ImageView, OwnedImage};
use crate::util::{HarrisError, HarrisResult};

// ITU-R BT.601 luma weights.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Converts an 8-bit gray (1 channel) or RGB (3 channels) view to a
/// single-channel `f32` image in the `[0, 255]` range.
pub fn u8_to_f32(view: ImageView<'_, u8>) -> HarrisResult<OwnedImage<f32>> {
    let width = view.width();
    let height = view.height();
    let channels = view.channels();
    if channels != 1 && channels != 3 {
        return Err(HarrisError::input("expected 1 or 3 channels"));
    }

    let mut data = Vec::with_capacity(width * height);
    for row in view.rows() {
        if channels == 1 {
            data.extend(row.iter().map(|&v| v as f32));
        } else {
            data.extend(row.chunks_exact(3).map(|px| {
                LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32
            }));
        }
    }
    OwnedImage::new(data, width, height)
}

/// Min-max normalises a float map to `[0, 255]` for display.
///
/// Non-finite samples are ignored when finding the range and map to 0. A
/// constant map normalises to all zeros.
pub fn normalize_to_u8(view: ImageView<'_, f32>) -> HarrisResult<OwnedImage<u8>> {
    view.ensure_gray()?;

    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for row in view.rows() {
        for &v in row.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }

    let span = (hi as f64) - (lo as f64);
    let scale = if span > 0.0 { 255.0 / span } else { 0.0 };
    let mut data = Vec::with_capacity(view.width() * view.height());
    for row in view.rows() {
        data.extend(row.iter().map(|&v| {
            if !v.is_finite() {
                return 0u8;
            }
            ((v as f64 - lo as f64) * scale).round().clamp(0.0, 255.0) as u8
        }));
    }
    OwnedImage::new(data, view.width(), view.height())
}
