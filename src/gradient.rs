//! First-derivative estimation with Sobel-family separable filters.
//!
//! Both passes sample with **replicate** borders: an index that falls outside
//! the image is clamped to the nearest edge sample. A constant image therefore
//! has zero gradient everywhere, including the outermost rows and columns.
//!
//! Kernels are unnormalised and applied as correlations, so positive `gx`
//! means intensity increasing to the right and positive `gy` means intensity
//! increasing downwards.

use crate::image::{ImageView, OwnedImage};
use crate::util::math::{binomial_row, convolve_full};
use crate::util::{HarrisError, HarrisResult};

const CENTRAL_DIFF: [f32; 3] = [-1.0, 0.0, 1.0];

/// Horizontal and vertical derivative images of one frame.
#[derive(Clone, Debug)]
pub struct GradientField {
    gx: OwnedImage<f32>,
    gy: OwnedImage<f32>,
}

impl GradientField {
    /// Derivative along x (columns).
    pub fn gx(&self) -> &OwnedImage<f32> {
        &self.gx
    }

    /// Derivative along y (rows).
    pub fn gy(&self) -> &OwnedImage<f32> {
        &self.gy
    }

    /// Width shared by both derivative images.
    pub fn width(&self) -> usize {
        self.gx.width()
    }

    /// Height shared by both derivative images.
    pub fn height(&self) -> usize {
        self.gx.height()
    }
}

/// Returns `(derivative, smoothing)` taps for a Sobel aperture.
///
/// Aperture 1 is the bare central difference with no cross smoothing;
/// apertures 3, 5 and 7 follow the binomial construction
/// (`3 -> [-1, 0, 1] / [1, 2, 1]`).
pub fn sobel_kernels(aperture_size: usize) -> HarrisResult<(Vec<f32>, Vec<f32>)> {
    match aperture_size {
        1 => Ok((CENTRAL_DIFF.to_vec(), vec![1.0])),
        3 | 5 | 7 => {
            let smooth = binomial_row(aperture_size - 1);
            let deriv = convolve_full(&binomial_row(aperture_size - 3), &CENTRAL_DIFF);
            Ok((deriv, smooth))
        }
        _ => Err(HarrisError::param("aperture_size", "must be one of 1, 3, 5, 7")),
    }
}

/// Computes `gx` and `gy` for a single-channel float image.
pub fn sobel_gradients(
    image: ImageView<'_, f32>,
    aperture_size: usize,
) -> HarrisResult<GradientField> {
    image.ensure_gray()?;
    let (deriv, smooth) = sobel_kernels(aperture_size)?;
    let width = image.width();
    let height = image.height();

    let dx_rows = correlate_rows(image, &deriv);
    let gx = correlate_cols(&dx_rows, width, height, &smooth);
    let smooth_rows = correlate_rows(image, &smooth);
    let gy = correlate_cols(&smooth_rows, width, height, &deriv);

    Ok(GradientField {
        gx: OwnedImage::new(gx, width, height)?,
        gy: OwnedImage::new(gy, width, height)?,
    })
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Horizontal pass; returns a packed `width * height` buffer.
fn correlate_rows(image: ImageView<'_, f32>, kernel: &[f32]) -> Vec<f32> {
    let width = image.width();
    let half = (kernel.len() / 2) as isize;
    let mut out = Vec::with_capacity(width * image.height());
    for row in image.rows() {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = clamp_index(x as isize + ki as isize - half, width);
                acc += row[sx] * kv;
            }
            out.push(acc);
        }
    }
    out
}

/// Vertical pass over a packed buffer.
fn correlate_cols(src: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let half = (kernel.len() / 2) as isize;
    let mut out = vec![0.0f32; width * height];
    for y in 0..height {
        let dst = &mut out[y * width..(y + 1) * width];
        for (ki, &kv) in kernel.iter().enumerate() {
            let sy = clamp_index(y as isize + ki as isize - half, height);
            let src_row = &src[sy * width..(sy + 1) * width];
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += s * kv;
            }
        }
    }
    out
}
