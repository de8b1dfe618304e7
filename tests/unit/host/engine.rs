use super::*;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::LinesError;

#[derive(Default)]
struct Tally {
    inits: u32,
    drawn: Vec<u64>,
    seen: Vec<(u64, [u8; 4])>,
    fail_at: Option<u64>,
}

impl Sketch for Tally {
    fn initialize(&mut self, canvas: Canvas) -> LinesResult<()> {
        assert_eq!((canvas.width, canvas.height), (4, 4));
        self.inits += 1;
        Ok(())
    }

    fn render_frame(&mut self, ctx: &mut dyn DrawContext, frame: FrameIndex) -> LinesResult<()> {
        if self.fail_at == Some(frame.0) {
            return Err(LinesError::render("forced failure"));
        }
        ctx.begin_frame();
        let shade = (frame.0 * 10) as u8;
        ctx.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::rgb(shade, shade, shade))?;
        self.drawn.push(frame.0);
        Ok(())
    }

    fn frame_rendered(&mut self, frame: FrameIndex, surface: &FrameRGBA) -> LinesResult<()> {
        let px = surface.pixel(0, 0).unwrap_or_default();
        self.seen.push((frame.0, px));
        Ok(())
    }
}

fn engine(tally: Tally) -> Engine<Tally> {
    Engine::new(tally, Canvas::new(4, 4).unwrap(), EngineOpts::default()).unwrap()
}

#[test]
fn frames_count_up_from_zero_and_initialize_once() {
    let mut e = engine(Tally::default());
    let last = e.run(3).unwrap().unwrap();
    assert_eq!(last.pixel(0, 0), Some([20, 20, 20, 255]));
    assert_eq!(e.frame(), FrameIndex(3));

    let tally = e.into_sketch();
    assert_eq!(tally.inits, 1);
    assert_eq!(tally.drawn, vec![0, 1, 2]);
    assert_eq!(
        tally.seen,
        vec![
            (0, [0, 0, 0, 255]),
            (1, [10, 10, 10, 255]),
            (2, [20, 20, 20, 255])
        ]
    );
}

#[test]
fn failed_frame_does_not_advance() {
    let mut e = engine(Tally {
        fail_at: Some(1),
        ..Tally::default()
    });
    e.step().unwrap();
    assert!(e.step().is_err());
    assert_eq!(e.frame(), FrameIndex(1));
    assert_eq!(e.sketch().seen.len(), 1);
}

#[test]
fn seek_moves_the_counter() {
    let mut e = engine(Tally::default());
    e.seek(FrameIndex(7));
    e.step().unwrap();
    assert_eq!(e.sketch().drawn, vec![7]);
}

#[test]
fn run_until_stops_on_condition_or_limit() {
    let mut e = engine(Tally::default());
    assert_eq!(e.run_until(100, |p| p.drawn.len() == 4).unwrap(), 4);
    assert_eq!(e.run_until(2, |_| false).unwrap(), 2);
    assert_eq!(e.frame(), FrameIndex(6));
}

#[test]
fn fps_meter_reports_once_per_interval() {
    let mut meter = FpsMeter::default();
    assert!(meter.tick(3).is_none());
    assert!(meter.tick(3).is_none());
    assert!(meter.tick(3).is_some());
    assert!(meter.tick(3).is_none());
}

#[test]
fn sketch_mut_changes_take_effect_on_the_next_step() {
    let mut e = engine(Tally::default());
    e.step().unwrap();
    e.sketch_mut().fail_at = Some(1);
    assert!(e.step().is_err());
    e.sketch_mut().fail_at = None;
    e.step().unwrap();
    assert_eq!(e.into_sketch().drawn, vec![0, 1]);
}
