use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn pixel_reads_row_major_and_checks_bounds() {
    let f = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], false);
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let f = frame(vec![64, 0, 0, 128, 10, 20, 30, 255], true);
    let img = f.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [10, 20, 30, 255]);
}

#[test]
fn to_rgba_image_rejects_short_buffers() {
    let f = frame(vec![0; 4], false);
    assert!(f.to_rgba_image().is_err());
}
