use super::*;

fn clock(frame: u64, duration: u64) -> AnimationClock {
    AnimationClock::new(FrameIndex(frame), duration).unwrap()
}

#[test]
fn zero_duration_is_rejected() {
    assert!(AnimationClock::new(FrameIndex(0), 0).is_err());
}

#[test]
fn percent_stays_in_half_open_unit_range() {
    for f in 0..2000 {
        let p = clock(f, 900).percent();
        assert!((0.0..1.0).contains(&p), "frame {f} gave percent {p}");
    }
}

#[test]
fn percent_is_periodic_in_duration() {
    for f in [0, 1, 17, 449, 450, 899] {
        assert_eq!(clock(f, 900).percent(), clock(f + 900, 900).percent());
        assert_eq!(clock(f, 900).percent(), clock(f + 9000, 900).percent());
    }
}

#[test]
fn tick_advances_one_frame() {
    let c = clock(899, 900).tick();
    assert_eq!(c.frame(), FrameIndex(900));
    assert_eq!(c.percent(), 0.0);
}

#[test]
fn first_frame_signal_is_at_rest() {
    let s = clock(0, 900).signal();
    assert_eq!(s.percent, 0.0);
    assert_eq!(s.time_theta, 0.0);
    assert_eq!(s.trig, 0.0);
    assert_eq!(s.eased, 0.0);
}

#[test]
fn mid_loop_signal_peaks() {
    let s = clock(450, 900).signal();
    assert_eq!(s.percent, 0.5);
    assert!((s.time_theta - 0.5 * PI).abs() < 1e-12);
    assert!((s.trig - 1.0).abs() < 1e-12);
    assert!((s.eased - 1.0).abs() < 1e-12);
}

#[test]
fn eased_rises_then_falls() {
    let a = clock(100, 900).signal().eased;
    let b = clock(300, 900).signal().eased;
    let c = clock(450, 900).signal().eased;
    let d = clock(800, 900).signal().eased;
    assert!(a < b && b < c);
    assert!(d < c);
}
