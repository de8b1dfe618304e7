use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_sides() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(Canvas::MAX_DIM + 1, 10).is_err());
    let c = Canvas::new(500, 300).unwrap();
    assert_eq!(c.width_f64(), 500.0);
    assert_eq!(c.height_f64(), 300.0);
}

#[test]
fn frame_index_next_saturates() {
    assert_eq!(FrameIndex(4).next(), FrameIndex(5));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}

#[test]
fn gray_applies_alpha() {
    let c = Rgba8::gray(210, 0.8);
    assert_eq!((c.r, c.g, c.b), (210, 210, 210));
    assert_eq!(c.a, 204);
}
