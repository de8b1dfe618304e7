use super::*;
use crate::animation::random::FixedRandom;
use crate::capture::memory::InMemoryCapture;
use crate::config::preset::Preset;
use crate::host::engine::{Engine, EngineOpts};
use crate::render::recording::RecordingCanvas;

fn small_config() -> RenderConfig {
    let mut cfg = Preset::BrokenLines.config();
    cfg.canvas = Canvas::new(20, 20).unwrap();
    cfg.cell_scale = 10.0;
    cfg.mask_resolution = 2;
    cfg.duration = 4;
    cfg.show_fps = false;
    cfg.seed = Some(7);
    cfg
}

fn full_mask(cfg: &RenderConfig) -> MaskSet {
    MaskSet::from_lit_indices(0..4usize, 2, cfg.canvas, cfg.mask_ratio())
}

#[test]
fn recording_without_adapter_fails_at_initialize() {
    let mut cfg = small_config();
    cfg.recording = true;
    let mut sketch = BrokenLines::new(cfg.clone()).unwrap().with_mask(full_mask(&cfg));
    let err = sketch.initialize(cfg.canvas).unwrap_err();
    assert!(matches!(err, LinesError::Validation(_)), "{err}");
}

#[test]
fn records_exactly_one_loop() {
    let mut cfg = small_config();
    cfg.recording = true;
    let mem = InMemoryCapture::new();
    let sketch = BrokenLines::new(cfg.clone())
        .unwrap()
        .with_mask(full_mask(&cfg))
        .with_capture(Box::new(mem.clone()));

    let mut engine = Engine::new(sketch, cfg.canvas, EngineOpts::default()).unwrap();
    let drawn = engine.run_until(100, |s| !s.is_recording()).unwrap();
    // Frames 0..4 are captured; frame 4 triggers stop + save.
    assert_eq!(drawn, 5);
    engine.run(10).unwrap();

    let log = mem.log();
    assert_eq!(log.frames.len(), 4);
    assert_eq!((log.starts, log.stops, log.saves), (1, 1, 1));
    assert!(log.frames.iter().all(|f| f.width == 20 && f.height == 20));
}

#[test]
fn attached_adapter_is_idle_when_not_recording() {
    let cfg = small_config();
    let mem = InMemoryCapture::new();
    let sketch = BrokenLines::new(cfg.clone())
        .unwrap()
        .with_mask(full_mask(&cfg))
        .with_capture(Box::new(mem.clone()));
    let mut engine = Engine::new(sketch, cfg.canvas, EngineOpts::default()).unwrap();
    engine.run(6).unwrap();
    assert!(!engine.sketch().is_recording());
    assert_eq!(mem.log().starts, 0);
}

#[test]
fn render_before_initialize_is_an_error() {
    let cfg = small_config();
    let mut sketch = BrokenLines::new(cfg.clone()).unwrap();
    let mut ctx = RecordingCanvas::new(cfg.canvas);
    assert!(sketch.render_frame(&mut ctx, FrameIndex(0)).is_err());
}

#[test]
fn surface_must_match_config_canvas() {
    let cfg = small_config();
    let mut sketch = BrokenLines::new(cfg.clone()).unwrap().with_mask(full_mask(&cfg));
    assert!(sketch.initialize(Canvas::new(30, 20).unwrap()).is_err());
}

#[test]
fn pick_follows_the_loop() {
    let cfg = small_config();
    let mut sketch = BrokenLines::new(cfg.clone())
        .unwrap()
        .with_mask(full_mask(&cfg))
        .with_random(Box::new(FixedRandom::new(0.999)));
    sketch.initialize(cfg.canvas).unwrap();

    let mut ctx = RecordingCanvas::new(cfg.canvas);
    sketch.render_frame(&mut ctx, FrameIndex(0)).unwrap();
    assert_eq!(sketch.last_stats().unwrap().picked, 0);

    // Half-way through the 4-frame loop everything covered is picked.
    sketch.render_frame(&mut ctx, FrameIndex(2)).unwrap();
    let stats = sketch.last_stats().unwrap();
    assert_eq!(stats.cells, 16);
    assert_eq!(stats.picked, 4);
}

#[test]
fn same_seed_gives_same_frames() {
    let cfg = small_config();
    let run = || {
        let sketch = BrokenLines::new(cfg.clone()).unwrap().with_mask(full_mask(&cfg));
        let mut engine = Engine::new(sketch, cfg.canvas, EngineOpts::default()).unwrap();
        engine.seek(FrameIndex(1));
        engine.step().unwrap().data
    };
    assert_eq!(run(), run());
}
