use super::*;

fn canvas(w: u32, h: u32) -> CpuCanvas {
    CpuCanvas::new(Canvas::new(w, h).unwrap()).unwrap()
}

#[test]
fn empty_frame_is_transparent() {
    let mut c = canvas(8, 8);
    c.begin_frame();
    let f = c.finish().unwrap();
    assert_eq!((f.width, f.height), (8, 8));
    assert_eq!(f.data.len(), 8 * 8 * 4);
    assert!(f.premultiplied);
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn fill_rect_covers_whole_canvas() {
    let mut c = canvas(16, 16);
    c.begin_frame();
    c.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), Rgba8::rgb(35, 35, 35))
        .unwrap();
    let f = c.finish().unwrap();
    assert_eq!(f.pixel(0, 0), Some([35, 35, 35, 255]));
    assert_eq!(f.pixel(15, 15), Some([35, 35, 35, 255]));
}

#[test]
fn stroke_lights_pixels_along_the_diagonal() {
    let mut c = canvas(32, 32);
    c.begin_frame();
    c.fill_rect(Rect::new(0.0, 0.0, 32.0, 32.0), Rgba8::rgb(0, 0, 0))
        .unwrap();
    c.set_stroke_color(Rgba8::rgb(255, 255, 255));
    c.set_line_width(4.0);
    c.translate(16.0, 16.0);
    c.stroke_segment(Point::new(-10.0, -10.0), Point::new(10.0, 10.0))
        .unwrap();
    let f = c.finish().unwrap();
    let center = f.pixel(16, 16).unwrap();
    assert!(center[0] > 200, "center {center:?}");
    let off_diagonal = f.pixel(28, 4).unwrap();
    assert_eq!(off_diagonal, [0, 0, 0, 255]);
}

#[test]
fn screen_mode_brightens_overlap() {
    let mut c = canvas(8, 8);
    c.begin_frame();
    c.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::rgb(100, 100, 100))
        .unwrap();
    c.set_composite(CompositeMode::Screen);
    c.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::rgb(100, 100, 100))
        .unwrap();
    let f = c.finish().unwrap();
    let px = f.pixel(4, 4).unwrap();
    // screen(100, 100) = 255 - (155 * 155) / 255 ~= 161
    assert!(px[0] > 140 && px[0] < 180, "got {px:?}");
}

#[test]
fn unrestored_save_fails_the_frame() {
    let mut c = canvas(4, 4);
    c.begin_frame();
    c.save();
    assert!(matches!(c.finish(), Err(LinesError::Render(_))));
    c.begin_frame();
    assert!(c.finish().is_ok());
}

#[test]
fn non_finite_geometry_is_rejected() {
    let mut c = canvas(4, 4);
    c.begin_frame();
    assert!(
        c.stroke_segment(Point::new(f64::NAN, 0.0), Point::ZERO)
            .is_err()
    );
    assert!(
        c.fill_rect(Rect::new(0.0, 0.0, f64::INFINITY, 1.0), Rgba8::rgb(0, 0, 0))
            .is_err()
    );
}
