//! Windowed non-maximum suppression of a response map.
//!
//! A pixel is accepted when its value is at least `threshold` and no
//! in-bounds neighbour inside the `window_size × window_size` window centered
//! on it is strictly greater. Consequences worth knowing:
//!
//! - plateaus of equal maximal values are accepted as a whole;
//! - pixels near the border are only compared with neighbours that exist;
//! - raising the threshold or widening the window never adds corners.
//!
//! Two strategies compute the same mask: [`NmsStrategy::Direct`] scans every
//! neighbourhood, [`NmsStrategy::SlidingMax`] compares against a separable
//! window maximum and wins for wide windows.

use crate::image::{ImageView, Mask, OwnedImage, MASK_OFF};
use crate::trace::{trace_event, trace_span};
use crate::util::math::odd_window_half;
use crate::util::rows::for_each_row;
use crate::util::{HarrisError, HarrisResult};

pub(crate) mod direct;
pub(crate) mod sliding;

/// Window size from which [`NmsStrategy::Auto`] switches to the sliding maximum.
pub const SLIDING_MAX_MIN_WINDOW: usize = 7;

/// How the window comparison is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NmsStrategy {
    /// Direct scan for small windows, sliding maximum from
    /// [`SLIDING_MAX_MIN_WINDOW`] upwards.
    #[default]
    Auto,
    /// Nested scan of every neighbourhood, O(w²) per pixel.
    Direct,
    /// Two-pass sliding window maximum, O(1) amortised per pixel.
    SlidingMax,
}

impl NmsStrategy {
    fn resolve(self, window_size: usize) -> Self {
        match self {
            Self::Auto if window_size >= SLIDING_MAX_MIN_WINDOW => Self::SlidingMax,
            Self::Auto => Self::Direct,
            other => other,
        }
    }
}

/// Parameters of the suppression stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuppressConfig {
    /// Minimum accepted response, in the units of the response map.
    pub threshold: f32,
    /// Side of the square neighbourhood. Odd, at least 1.
    pub window_size: usize,
    /// Evaluation strategy; does not affect the result.
    pub strategy: NmsStrategy,
    /// Fills mask rows on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for SuppressConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            window_size: 3,
            strategy: NmsStrategy::Auto,
            parallel: false,
        }
    }
}

impl SuppressConfig {
    /// Config with the given threshold and window and default strategy.
    pub fn new(threshold: f32, window_size: usize) -> Self {
        Self {
            threshold,
            window_size,
            ..Self::default()
        }
    }

    fn validate(&self) -> HarrisResult<usize> {
        if self.threshold.is_nan() {
            return Err(HarrisError::param("threshold", "must not be NaN"));
        }
        odd_window_half("window_size", self.window_size)
    }
}

/// Produces the binary mask of isolated local maxima of `map`.
///
/// The mask has the dimensions of `map`; accepted pixels hold
/// [`crate::image::MASK_ON`], all others [`MASK_OFF`].
pub fn suppress(map: ImageView<'_, f32>, cfg: &SuppressConfig) -> HarrisResult<Mask> {
    map.ensure_gray()?;
    let half = cfg.validate()?;
    let strategy = cfg.strategy.resolve(cfg.window_size);
    let _span = trace_span!(
        "suppress",
        width = map.width(),
        height = map.height(),
        window_size = cfg.window_size
    )
    .entered();

    let width = map.width();
    let mut mask = OwnedImage::filled(width, map.height(), MASK_OFF);
    let threshold = cfg.threshold;
    match strategy {
        NmsStrategy::SlidingMax => {
            let maxima = sliding::window_max(map, half, cfg.parallel);
            for_each_row(mask.data_mut(), width, cfg.parallel, |y, row| {
                sliding::accept_row(map, &maxima, y, threshold, row)
            });
        }
        NmsStrategy::Direct | NmsStrategy::Auto => {
            for_each_row(mask.data_mut(), width, cfg.parallel, |y, row| {
                direct::suppress_row(map, y, half, threshold, row)
            });
        }
    }

    trace_event!("suppress_done", corners = mask.count_on());
    Ok(mask)
}
