//! Structure tensor accumulation.
//!
//! `TensorIntegrals` keeps summed-area tables of `gx²`, `gy²` and `gx·gy`
//! so that the tensor of any axis-aligned window is four lookups per entry.
//! Windows are clipped to the image: a pixel near the border only sums the
//! gradients that exist, it never sees zero padding.

use crate::gradient::GradientField;
use crate::util::math::clipped_span;

/// Second-moment matrix `[[xx, xy], [xy, yy]]` of one window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StructureTensor {
    /// Sum of `gx²`.
    pub xx: f32,
    /// Sum of `gx·gy`.
    pub xy: f32,
    /// Sum of `gy²`.
    pub yy: f32,
}

impl StructureTensor {
    /// Determinant of the tensor.
    #[inline]
    pub fn det(&self) -> f32 {
        self.xx * self.yy - self.xy * self.xy
    }

    /// Trace of the tensor.
    #[inline]
    pub fn trace(&self) -> f32 {
        self.xx + self.yy
    }

    /// Corner score `det(M) - k * trace(M)²`.
    #[inline]
    pub fn harris_score(&self, k: f32) -> f32 {
        harris_score(self.xx, self.yy, self.xy, k)
    }
}

/// Scalar form of [`StructureTensor::harris_score`]; the SIMD path evaluates
/// the same operations in the same order.
#[inline]
pub(crate) fn harris_score(xx: f32, yy: f32, xy: f32, k: f32) -> f32 {
    let det = xx * yy - xy * xy;
    let trace = xx + yy;
    det - k * trace * trace
}

/// Summed-area tables over the gradient products of one frame.
pub struct TensorIntegrals {
    width: usize,
    height: usize,
    xx: Vec<f64>,
    xy: Vec<f64>,
    yy: Vec<f64>,
}

impl TensorIntegrals {
    /// Builds the tables in a single pass over the gradient field.
    pub fn from_gradients(field: &GradientField) -> Self {
        let width = field.width();
        let height = field.height();
        let stride = width + 1;
        let len = stride * (height + 1);
        let mut xx = vec![0.0f64; len];
        let mut xy = vec![0.0f64; len];
        let mut yy = vec![0.0f64; len];

        let gx = field.gx().data();
        let gy = field.gy().data();
        for y in 0..height {
            let mut run_xx = 0.0f64;
            let mut run_xy = 0.0f64;
            let mut run_yy = 0.0f64;
            for x in 0..width {
                let dx = gx[y * width + x] as f64;
                let dy = gy[y * width + x] as f64;
                run_xx += dx * dx;
                run_xy += dx * dy;
                run_yy += dy * dy;

                let above = y * stride + x + 1;
                let here = (y + 1) * stride + x + 1;
                xx[here] = xx[above] + run_xx;
                xy[here] = xy[above] + run_xy;
                yy[here] = yy[above] + run_yy;
            }
        }

        Self {
            width,
            height,
            xx,
            xy,
            yy,
        }
    }

    /// Width of the source gradient field.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the source gradient field.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw `(xx, xy, yy)` tables, `(width + 1) * (height + 1)` entries each
    /// with a zero first row and column.
    #[cfg_attr(not(feature = "simd"), allow(dead_code))]
    pub(crate) fn tables(&self) -> (&[f64], &[f64], &[f64]) {
        (&self.xx, &self.xy, &self.yy)
    }

    /// Tensor of the `(2 * half + 1)²` window centered at `(x, y)`, clipped
    /// to the image bounds.
    #[inline]
    pub fn window(&self, x: usize, y: usize, half: usize) -> StructureTensor {
        let (x0, x1) = clipped_span(x, half, self.width);
        let (y0, y1) = clipped_span(y, half, self.height);
        let stride = self.width + 1;
        let a = y0 * stride + x0;
        let b = y0 * stride + x1 + 1;
        let c = (y1 + 1) * stride + x0;
        let d = (y1 + 1) * stride + x1 + 1;
        let rect = |t: &[f64]| (t[d] - t[b] - t[c] + t[a]) as f32;
        StructureTensor {
            xx: rect(&self.xx),
            xy: rect(&self.xy),
            yy: rect(&self.yy),
        }
    }
}

/// Reference accumulation by direct summation over the clipped window.
///
/// O(block²) per pixel; kept for validating [`TensorIntegrals`] and for
/// callers that need a single tensor without building the tables.
pub fn structure_tensor_at(
    field: &GradientField,
    x: usize,
    y: usize,
    half: usize,
) -> StructureTensor {
    let width = field.width();
    let (x0, x1) = clipped_span(x, half, width);
    let (y0, y1) = clipped_span(y, half, field.height());
    let gx = field.gx().data();
    let gy = field.gy().data();
    let (mut xx, mut xy, mut yy) = (0.0f64, 0.0f64, 0.0f64);
    for yy_idx in y0..=y1 {
        for xx_idx in x0..=x1 {
            let dx = gx[yy_idx * width + xx_idx] as f64;
            let dy = gy[yy_idx * width + xx_idx] as f64;
            xx += dx * dx;
            xy += dx * dy;
            yy += dy * dy;
        }
    }
    StructureTensor {
        xx: xx as f32,
        xy: xy as f32,
        yy: yy as f32,
    }
}
