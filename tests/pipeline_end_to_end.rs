use harris_corner::lowlevel::u8_to_f32;
use harris_corner::{
    compute_response, suppress, CornerDetector, DetectorConfig, ImageView, ResponseConfig,
    SuppressConfig, MASK_ON,
};

/// Dark background with bright axis-aligned rectangles, as an 8-bit frame.
fn make_frame(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> Vec<u8> {
    let mut data = vec![15u8; width * height];
    for &(x0, y0, x1, y1) in rects {
        for y in y0..y1 {
            for x in x0..x1 {
                data[y * width + x] = 220;
            }
        }
    }
    data
}

#[test]
fn frame_loop_detects_rectangle_corners() {
    let (w, h) = (64usize, 48usize);
    let rects = [(10, 8, 26, 20), (36, 24, 56, 40)];
    let frame = make_frame(w, h, &rects);
    let raw = ImageView::from_slice(&frame, w, h).unwrap();
    let gray = u8_to_f32(raw).unwrap();

    let detector = CornerDetector::new(DetectorConfig {
        response: ResponseConfig::default(),
        suppress: SuppressConfig::new(1e8, 7),
        max_corners: None,
    });
    let corners = detector.detect_corners(gray.view()).unwrap();

    let mut targets = Vec::new();
    for &(x0, y0, x1, y1) in &rects {
        targets.extend([(x0, y0), (x1 - 1, y0), (x0, y1 - 1), (x1 - 1, y1 - 1)]);
    }
    assert_eq!(corners.len(), targets.len(), "corners: {corners:?}");
    for (tx, ty) in targets {
        assert!(
            corners
                .iter()
                .any(|c| c.x.abs_diff(tx) <= 1 && c.y.abs_diff(ty) <= 1),
            "missing corner near ({tx},{ty})"
        );
    }
    for pair in corners.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn stages_can_be_driven_with_fresh_parameters_per_frame() {
    let (w, h) = (40usize, 40usize);
    let frame = make_frame(w, h, &[(8, 8, 30, 30)]);
    let gray = u8_to_f32(ImageView::from_slice(&frame, w, h).unwrap()).unwrap();

    let mut previous = usize::MAX;
    for (k, threshold) in [(0.04f32, 1e6f32), (0.04, 1e10), (0.06, 1e11), (0.06, 1e14)] {
        let response = compute_response(
            gray.view(),
            &ResponseConfig {
                k,
                ..ResponseConfig::default()
            },
        )
        .unwrap();
        let mask = suppress(response.view(), &SuppressConfig::new(threshold, 5)).unwrap();
        assert_eq!((mask.width(), mask.height()), (w, h));
        let count = mask.data().iter().filter(|&&v| v == MASK_ON).count();
        assert!(count <= previous, "k {k}, threshold {threshold}");
        previous = count;
    }
    assert_eq!(previous, 0);
}

#[test]
fn detection_exposes_response_and_mask() {
    let (w, h) = (32usize, 32usize);
    let frame = make_frame(w, h, &[(8, 8, 24, 24)]);
    let gray = u8_to_f32(ImageView::from_slice(&frame, w, h).unwrap()).unwrap();
    let detection = CornerDetector::default().detect(gray.view()).unwrap();
    assert_eq!(detection.response.width(), w);
    assert_eq!(detection.mask.height(), h);
    assert_eq!(detection.corners().unwrap().len(), detection.mask.count_on());
    assert!(detection.corners_topk(1).unwrap().len() <= 1);
}
