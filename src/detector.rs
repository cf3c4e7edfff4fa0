//! High-level detector chaining the response and suppression stages.

use crate::corner::{corners_from_mask, Corner};
use crate::image::{ImageView, Mask, ResponseMap};
use crate::response::{compute_response, ResponseConfig};
use crate::suppress::{suppress, SuppressConfig};
use crate::trace::trace_span;
use crate::util::HarrisResult;

/// Configuration of both stages plus corner list limits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectorConfig {
    /// Response stage parameters.
    pub response: ResponseConfig,
    /// Suppression stage parameters.
    pub suppress: SuppressConfig,
    /// Upper bound on the number of corners returned by
    /// [`CornerDetector::detect_corners`]; `None` keeps all of them.
    pub max_corners: Option<usize>,
}

impl DetectorConfig {
    /// Enables or disables row parallelism in both stages.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.response.parallel = parallel;
        self.suppress.parallel = parallel;
        self
    }
}

/// Output of one detection call.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Corner response of the input image.
    pub response: ResponseMap,
    /// Suppression mask of `response`.
    pub mask: Mask,
}

impl Detection {
    /// Every accepted corner, strongest first.
    ///
    /// Fails with `InvalidInput` if `response` and `mask` were replaced by
    /// buffers of different sizes.
    pub fn corners(&self) -> HarrisResult<Vec<Corner>> {
        corners_from_mask(self.response.view(), self.mask.view())
    }

    /// The `k` strongest accepted corners.
    pub fn corners_topk(&self, k: usize) -> HarrisResult<Vec<Corner>> {
        let mut corners = self.corners()?;
        corners.truncate(k);
        Ok(corners)
    }
}

/// Stateless corner detector; each call depends only on its arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerDetector {
    cfg: DetectorConfig,
}

impl CornerDetector {
    /// Creates a detector with the given configuration.
    pub fn new(cfg: DetectorConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DetectorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Computes the response map and its suppression mask.
    pub fn detect(&self, image: ImageView<'_, f32>) -> HarrisResult<Detection> {
        let _span =
            trace_span!("detect", width = image.width(), height = image.height()).entered();
        let response = compute_response(image, &self.cfg.response)?;
        let mask = suppress(response.view(), &self.cfg.suppress)?;
        Ok(Detection { response, mask })
    }

    /// Detects and returns corners, strongest first, limited by `max_corners`.
    pub fn detect_corners(&self, image: ImageView<'_, f32>) -> HarrisResult<Vec<Corner>> {
        let detection = self.detect(image)?;
        match self.cfg.max_corners {
            Some(k) => detection.corners_topk(k),
            None => detection.corners(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CornerDetector, DetectorConfig};
    use crate::corner::Corner;
    use crate::image::{ImageView, Mask};
    use crate::suppress::SuppressConfig;
    use crate::util::HarrisError;

    fn square(size: usize, lo: usize, hi: usize) -> Vec<f32> {
        let mut data = vec![10.0f32; size * size];
        for y in lo..hi {
            for x in lo..hi {
                data[y * size + x] = 200.0;
            }
        }
        data
    }

    #[test]
    fn bright_square_corners_are_found() {
        let data = square(24, 8, 16);
        let view = ImageView::from_slice(&data, 24, 24).unwrap();
        let detector = CornerDetector::new(DetectorConfig {
            suppress: SuppressConfig::new(1e6, 7),
            ..DetectorConfig::default()
        });
        let corners = detector.detect_corners(view).unwrap();
        let targets = [(8usize, 8usize), (15, 8), (8, 15), (15, 15)];
        let near = |c: &Corner, (tx, ty): (usize, usize)| {
            c.x.abs_diff(tx) <= 3 && c.y.abs_diff(ty) <= 3
        };

        for c in &corners {
            assert!(
                targets.iter().any(|&t| near(c, t)),
                "corner {c:?} is not near a square corner"
            );
        }
        for t in targets {
            assert!(
                corners.iter().any(|c| near(c, t)),
                "no corner detected near {t:?}"
            );
        }
    }

    #[test]
    fn max_corners_limits_output() {
        let data = square(24, 8, 16);
        let view = ImageView::from_slice(&data, 24, 24).unwrap();
        let cfg = DetectorConfig {
            suppress: SuppressConfig::new(1e6, 5),
            max_corners: Some(2),
            ..DetectorConfig::default()
        };
        let detector = CornerDetector::new(cfg);
        let limited = detector.detect_corners(view).unwrap();
        let all = detector.detect(view).unwrap().corners().unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[..], all[..2]);
    }

    #[test]
    fn corners_topk_is_a_prefix_of_all_corners() {
        let data = square(24, 8, 16);
        let view = ImageView::from_slice(&data, 24, 24).unwrap();
        let detector = CornerDetector::new(DetectorConfig {
            suppress: SuppressConfig::new(1e6, 5),
            ..DetectorConfig::default()
        });
        let detection = detector.detect(view).unwrap();
        let all = detection.corners().unwrap();
        assert!(!all.is_empty());
        assert!(detection.corners_topk(0).unwrap().is_empty());
        assert_eq!(detection.corners_topk(1).unwrap()[..], all[..1]);
        assert_eq!(detection.corners_topk(all.len() + 10).unwrap(), all);
    }

    #[test]
    fn mismatched_detection_buffers_are_reported() {
        let data = square(12, 4, 8);
        let view = ImageView::from_slice(&data, 12, 12).unwrap();
        let mut detection = CornerDetector::default().detect(view).unwrap();
        detection.mask = Mask::filled(6, 6, 0);
        assert!(matches!(
            detection.corners(),
            Err(HarrisError::InvalidInput { .. })
        ));
        assert!(matches!(
            detection.corners_topk(3),
            Err(HarrisError::InvalidInput { .. })
        ));
    }
}
