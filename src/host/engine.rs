use crate::config::model::RenderConfig;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::LinesResult;
use crate::render::backend::FrameRGBA;
use crate::render::context::DrawContext;
use crate::render::cpu::CpuCanvas;
use std::time::Instant;

/// An animation plugged into the [`Engine`].
pub trait Sketch {
    /// One-time setup before the first frame.
    fn initialize(&mut self, canvas: Canvas) -> LinesResult<()>;

    /// Draw frame `frame` into `ctx`.
    fn render_frame(&mut self, ctx: &mut dyn DrawContext, frame: FrameIndex) -> LinesResult<()>;

    /// Called with the read-back pixels after each frame has been drawn.
    fn frame_rendered(&mut self, _frame: FrameIndex, _surface: &FrameRGBA) -> LinesResult<()> {
        Ok(())
    }
}

/// Options for [`Engine`].
#[derive(Clone, Copy, Debug)]
pub struct EngineOpts {
    /// Log the measured frame rate.
    pub show_fps: bool,
    /// Frames between FPS log lines.
    pub fps_log_interval: u64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            show_fps: false,
            fps_log_interval: 60,
        }
    }
}

impl EngineOpts {
    /// Options matching a render config.
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self {
            show_fps: cfg.show_fps,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct FpsMeter {
    window_start: Option<Instant>,
    frames: u64,
}

impl FpsMeter {
    /// Count one frame; yields the average rate once `interval` frames have elapsed.
    fn tick(&mut self, interval: u64) -> Option<f64> {
        let now = Instant::now();
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        if self.frames < interval.max(1) {
            return None;
        }
        let secs = now.duration_since(start).as_secs_f64();
        let fps = if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            f64::INFINITY
        };
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

/// Headless frame loop.
///
/// Owns the frame counter (starting at 0) and a [`CpuCanvas`]; each step draws one frame, reads it
/// back and hands it to [`Sketch::frame_rendered`].
pub struct Engine<S: Sketch> {
    sketch: S,
    surface: CpuCanvas,
    frame: FrameIndex,
    opts: EngineOpts,
    initialized: bool,
    meter: FpsMeter,
}

impl<S: Sketch> Engine<S> {
    /// Create an engine drawing `sketch` onto a `canvas`-sized surface.
    pub fn new(sketch: S, canvas: Canvas, opts: EngineOpts) -> LinesResult<Self> {
        Ok(Self {
            sketch,
            surface: CpuCanvas::new(canvas)?,
            frame: FrameIndex(0),
            opts,
            initialized: false,
            meter: FpsMeter::default(),
        })
    }

    /// Run [`Sketch::initialize`] if it has not run yet.
    pub fn initialize(&mut self) -> LinesResult<()> {
        if self.initialized {
            return Ok(());
        }
        let canvas = self.surface.canvas();
        self.sketch.initialize(canvas)?;
        self.initialized = true;
        tracing::debug!(width = canvas.width, height = canvas.height, "sketch initialized");
        Ok(())
    }

    /// Draw the current frame, hand it to the sketch, then advance the counter.
    ///
    /// On error the counter does not advance.
    pub fn step(&mut self) -> LinesResult<FrameRGBA> {
        self.initialize()?;
        let frame = self.frame;
        self.sketch.render_frame(&mut self.surface, frame)?;
        let rgba = self.surface.finish()?;
        self.sketch.frame_rendered(frame, &rgba)?;
        self.frame = frame.next();

        if self.opts.show_fps
            && let Some(fps) = self.meter.tick(self.opts.fps_log_interval)
        {
            tracing::info!(frame = frame.0, fps = (fps * 10.0).round() / 10.0, "fps");
        }
        Ok(rgba)
    }

    /// Step `frames` times; returns the last frame drawn.
    pub fn run(&mut self, frames: u64) -> LinesResult<Option<FrameRGBA>> {
        let mut last = None;
        for _ in 0..frames {
            last = Some(self.step()?);
        }
        Ok(last)
    }

    /// Step until `done` returns `true` for the sketch, or `max_frames` frames have been drawn.
    ///
    /// Returns the number of frames drawn.
    pub fn run_until(&mut self, max_frames: u64, mut done: impl FnMut(&S) -> bool) -> LinesResult<u64> {
        let mut drawn = 0;
        while drawn < max_frames && !done(&self.sketch) {
            self.step()?;
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Move the counter to `frame`; the next step draws it.
    pub fn seek(&mut self, frame: FrameIndex) {
        self.frame = frame;
    }

    /// Index of the next frame to draw.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Borrow the sketch.
    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    /// Mutably borrow the sketch.
    pub fn sketch_mut(&mut self) -> &mut S {
        &mut self.sketch
    }

    /// Consume the engine, returning the sketch.
    pub fn into_sketch(self) -> S {
        self.sketch
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/engine.rs"]
mod tests;
