use super::*;

fn lines(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn font_size_and_bands_follow_resolution() {
    let b = TextMaskBuilder::new(lines(&["BROKEN", "INTO", "LINES"]), 500);
    assert!((b.font_size() - 112.5).abs() < 1e-9);

    let c = b.band_centers();
    assert_eq!(c.len(), 3);
    // (S - border/2) * k/6 + border/2 with S=500, border=50.
    assert!((c[0] - (475.0 / 6.0 + 25.0)).abs() < 1e-9);
    assert!((c[1] - (475.0 / 2.0 + 25.0)).abs() < 1e-9);
    assert!((c[2] - (475.0 * 5.0 / 6.0 + 25.0)).abs() < 1e-9);
}

#[test]
fn svg_document_escapes_text_and_skips_blank_lines() {
    let b = TextMaskBuilder::new(lines(&["A<B", "  ", "\"&\""]), 100).with_font_family("Hack");
    let svg = b.svg_document();
    assert!(svg.contains("A&lt;B"));
    assert!(svg.contains("&quot;&amp;&quot;"));
    assert_eq!(svg.matches("<text").count(), 2);
    assert!(svg.contains(r#"font-family="Hack, monospace""#));
    assert!(svg.contains(r#"fill="black""#));
}

#[test]
fn lit_indices_ignore_alpha_and_keep_order() {
    let rgba = [
        0, 0, 0, 255, // unlit, opaque black
        1, 0, 0, 255, // lit red
        0, 0, 0, 0, // unlit transparent
        0, 0, 9, 0, // lit blue, zero alpha
        0, 3, 0, 128, // lit green
    ];
    assert_eq!(lit_indices(&rgba), vec![1, 3, 4]);
}

#[test]
fn blank_text_yields_empty_mask() {
    let b = TextMaskBuilder::new(Vec::new(), 64);
    let m = b.build(Canvas::new(128, 128).unwrap()).unwrap();
    assert!(m.is_empty());
    assert_eq!(m.ratio(), 2.0);
}

#[test]
fn rasterized_mask_is_square_and_in_canvas_bounds() {
    let b = TextMaskBuilder::new(lines(&["BROKEN", "INTO", "LINES"]), 100);
    let bitmap = b.rasterize().unwrap();
    assert_eq!(bitmap.size, 100);
    assert_eq!(bitmap.data.len(), 100 * 100 * 4);

    // Font availability depends on the host; an empty mask is a valid outcome.
    let canvas = Canvas::new(300, 200).unwrap();
    let m = b.build(canvas).unwrap();
    for p in m.points() {
        assert!((0.0..=300.0).contains(&p.x));
        assert!((0.0..=200.0).contains(&p.y));
    }
}
