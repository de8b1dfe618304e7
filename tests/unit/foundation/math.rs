use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn ease_hits_fixed_points() {
    assert!(approx(ease(0.0), 0.0));
    assert!(approx(ease(0.5), 0.5));
    assert!(approx(ease(1.0), 1.0));
}

#[test]
fn ease_is_monotonic_on_unit_interval() {
    let mut prev = ease(0.0);
    for i in 1..=1000 {
        let v = ease(f64::from(i) / 1000.0);
        assert!(v >= prev, "ease decreased at step {i}");
        prev = v;
    }
}

#[test]
fn dist_matches_pythagoras() {
    assert_eq!(dist_sq(0.0, 0.0, 3.0, 4.0), 25.0);
    assert_eq!(dist(1.0, 1.0, 4.0, 5.0), 5.0);
}

#[test]
fn fnv1a_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_u64(1);
    a.write_u64(2);
    let mut b = Fnv1a64::new_default();
    b.write_u64(2);
    b.write_u64(1);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
}
