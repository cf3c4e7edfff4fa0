//! Harris corner response.
//!
//! `compute_response` runs three steps per frame: Sobel gradients with
//! replicate borders, structure tensor accumulation over a clipped
//! `block_size × block_size` window, and the score `det(M) - k·trace(M)²`.
//! Scores are unnormalised; their scale grows with image contrast, the
//! aperture and the block size.

use crate::gradient::{sobel_gradients, GradientField};
use crate::image::{ImageView, OwnedImage, ResponseMap};
use crate::tensor::TensorIntegrals;
use crate::trace::{trace_event, trace_span};
use crate::util::math::odd_window_half;
use crate::util::rows::for_each_row;
use crate::util::{HarrisError, HarrisResult};

pub(crate) mod scalar;
#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(not(feature = "simd"))]
use scalar::score_row;
#[cfg(feature = "simd")]
use simd::score_row;

/// Parameters of the response stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponseConfig {
    /// Sensitivity constant in `[0, 1]`; corners are usually separated from
    /// edges for values between 0.02 and 0.2.
    pub k: f32,
    /// Side of the square accumulation window. Odd, at least 1.
    pub block_size: usize,
    /// Sobel aperture: 1, 3, 5 or 7.
    pub aperture_size: usize,
    /// Computes output rows on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            k: 0.04,
            block_size: 3,
            aperture_size: 3,
            parallel: false,
        }
    }
}

impl ResponseConfig {
    fn validate(&self) -> HarrisResult<usize> {
        if !self.k.is_finite() || !(0.0..=1.0).contains(&self.k) {
            return Err(HarrisError::param("k", "must be finite and within [0, 1]"));
        }
        odd_window_half("block_size", self.block_size)
    }
}

/// Computes the Harris response map of a single-channel float image.
///
/// The output has the dimensions of `image`. Integer inputs must be converted
/// by the caller, see [`crate::image::convert::u8_to_f32`].
pub fn compute_response(
    image: ImageView<'_, f32>,
    cfg: &ResponseConfig,
) -> HarrisResult<ResponseMap> {
    image.ensure_gray()?;
    let half = cfg.validate()?;
    let _span = trace_span!(
        "compute_response",
        width = image.width(),
        height = image.height(),
        block_size = cfg.block_size,
        aperture_size = cfg.aperture_size
    )
    .entered();

    let field = sobel_gradients(image, cfg.aperture_size)?;
    response_with_half(&field, cfg.k, half, cfg.parallel)
}

/// Computes the response from precomputed gradients.
///
/// Useful when the gradients are shared with other stages of a pipeline.
pub fn response_from_gradients(
    field: &GradientField,
    k: f32,
    block_size: usize,
) -> HarrisResult<ResponseMap> {
    if field.width() == 0 || field.height() == 0 {
        return Err(HarrisError::input("image has zero rows or columns"));
    }
    let half = ResponseConfig {
        k,
        block_size,
        ..ResponseConfig::default()
    }
    .validate()?;
    response_with_half(field, k, half, false)
}

fn response_with_half(
    field: &GradientField,
    k: f32,
    half: usize,
    parallel: bool,
) -> HarrisResult<ResponseMap> {
    let width = field.width();
    let height = field.height();
    let integrals = TensorIntegrals::from_gradients(field);
    let mut out = OwnedImage::filled(width, height, 0.0f32);
    for_each_row(out.data_mut(), width, parallel, |y, row| {
        score_row(&integrals, y, half, k, row)
    });
    trace_event!("response_done", rows = height, parallel = parallel);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{compute_response, response_from_gradients, ResponseConfig};
    use crate::gradient::sobel_gradients;
    use crate::image::ImageView;
    use crate::tensor::structure_tensor_at;
    use crate::util::HarrisError;

    fn checkerboard(size: usize, cell: usize) -> Vec<f32> {
        let mut data = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let on = (x / cell + y / cell) % 2 == 0;
                data.push(if on { 20.0 } else { 230.0 });
            }
        }
        data
    }

    #[test]
    fn default_config_matches_documented_values() {
        let cfg = ResponseConfig::default();
        assert_eq!(cfg.k, 0.04);
        assert_eq!(cfg.block_size, 3);
        assert_eq!(cfg.aperture_size, 3);
        assert!(!cfg.parallel);
    }

    #[test]
    fn response_matches_direct_formula() {
        let data = checkerboard(12, 4);
        let view = ImageView::from_slice(&data, 12, 12).unwrap();
        let cfg = ResponseConfig {
            k: 0.05,
            block_size: 5,
            ..ResponseConfig::default()
        };
        let map = compute_response(view, &cfg).unwrap();
        let field = sobel_gradients(view, cfg.aperture_size).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                let want = structure_tensor_at(&field, x, y, 2).harris_score(cfg.k);
                let got = map.get(x, y).unwrap();
                let tol = 1e-3 * (1.0 + want.abs());
                assert!((got - want).abs() <= tol, "({x},{y}): {got} vs {want}");
            }
        }
    }

    #[test]
    fn flat_image_scores_zero() {
        let data = vec![77.0f32; 64];
        let view = ImageView::from_slice(&data, 8, 8).unwrap();
        let map = compute_response(view, &ResponseConfig::default()).unwrap();
        assert!(map.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let data = vec![0.0f32; 16];
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let bad = [
            ResponseConfig {
                block_size: 0,
                ..ResponseConfig::default()
            },
            ResponseConfig {
                block_size: 2,
                ..ResponseConfig::default()
            },
            ResponseConfig {
                aperture_size: 4,
                ..ResponseConfig::default()
            },
            ResponseConfig {
                k: f32::NAN,
                ..ResponseConfig::default()
            },
            ResponseConfig {
                k: 1.5,
                ..ResponseConfig::default()
            },
        ];
        for cfg in bad {
            assert!(matches!(
                compute_response(view, &cfg),
                Err(HarrisError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn gradients_entry_point_agrees_with_full_pipeline() {
        let data = checkerboard(10, 3);
        let view = ImageView::from_slice(&data, 10, 10).unwrap();
        let field = sobel_gradients(view, 3).unwrap();
        let a = response_from_gradients(&field, 0.04, 3).unwrap();
        let b = compute_response(view, &ResponseConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
