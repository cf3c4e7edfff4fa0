#![cfg(feature = "rayon")]

use harris_corner::{
    compute_response, suppress, CornerDetector, DetectorConfig, ImageView, NmsStrategy,
    ResponseConfig, SuppressConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_image(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as f32);
        }
    }
    data
}

#[test]
fn parallel_response_matches_sequential() {
    let (w, h) = (97, 61);
    let data = make_image(w, h);
    let view = ImageView::from_slice(&data, w, h).unwrap();
    for block_size in [1usize, 3, 5] {
        let seq_cfg = ResponseConfig {
            block_size,
            ..ResponseConfig::default()
        };
        let par_cfg = ResponseConfig {
            parallel: true,
            ..seq_cfg
        };
        let seq = compute_response(view, &seq_cfg).unwrap();
        let par = compute_response(view, &par_cfg).unwrap();
        assert_eq!(seq, par, "block size {block_size}");
    }
}

#[test]
fn parallel_suppression_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(99);
    let (w, h) = (83, 57);
    let data: Vec<f32> = (0..w * h).map(|_| rng.random_range(0..8) as f32).collect();
    let view = ImageView::from_slice(&data, w, h).unwrap();
    for strategy in [NmsStrategy::Direct, NmsStrategy::SlidingMax] {
        for window in [1usize, 3, 9] {
            let seq_cfg = SuppressConfig {
                strategy,
                ..SuppressConfig::new(2.0, window)
            };
            let par_cfg = SuppressConfig {
                parallel: true,
                ..seq_cfg
            };
            let seq = suppress(view, &seq_cfg).unwrap();
            let par = suppress(view, &par_cfg).unwrap();
            assert_eq!(seq, par, "{strategy:?}, window {window}");
        }
    }
}

#[test]
fn parallel_detector_matches_sequential() {
    let (w, h) = (128, 96);
    let data = make_image(w, h);
    let view = ImageView::from_slice(&data, w, h).unwrap();
    let base = DetectorConfig {
        suppress: SuppressConfig::new(1e9, 7),
        ..DetectorConfig::default()
    };
    let seq = CornerDetector::new(base.with_parallel(false))
        .detect_corners(view)
        .unwrap();
    let par = CornerDetector::new(base.with_parallel(true))
        .detect_corners(view)
        .unwrap();
    assert_eq!(seq, par);
}
