use crate::animation::clock::AnimationClock;
use crate::animation::random::{RandomSource, SplitMix64};
use crate::capture::adapter::{CaptureAdapter, Recorder};
use crate::capture::adapter_from_config;
use crate::config::model::RenderConfig;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{LinesError, LinesResult};
use crate::host::engine::Sketch;
use crate::mask::builder::TextMaskBuilder;
use crate::mask::set::MaskSet;
use crate::render::backend::FrameRGBA;
use crate::render::context::DrawContext;
use crate::render::frame::{FrameRenderer, FrameStats};

/// The line-field animation with a text-mask reveal.
///
/// The mask is built in [`Sketch::initialize`] unless one was supplied with
/// [`BrokenLines::with_mask`]. When `recording` is set, the first loop is handed to the capture
/// adapter and the recorder then disarms for good.
pub struct BrokenLines {
    config: RenderConfig,
    renderer: FrameRenderer,
    mask: Option<MaskSet>,
    rng: Box<dyn RandomSource>,
    recorder: Option<Recorder>,
    last_stats: Option<FrameStats>,
}

impl BrokenLines {
    /// Create the sketch without a capture adapter.
    ///
    /// Draws come from `config.seed` when set, otherwise from an entropy-seeded generator.
    pub fn new(config: RenderConfig) -> LinesResult<Self> {
        let renderer = FrameRenderer::try_from(&config)?;
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SplitMix64::new(seed)),
            None => Box::new(SplitMix64::from_entropy()),
        };
        Ok(Self {
            config,
            renderer,
            mask: None,
            rng,
            recorder: None,
            last_stats: None,
        })
    }

    /// Create the sketch with the adapter described by `config.capture`, if any.
    pub fn from_config(config: RenderConfig) -> LinesResult<Self> {
        let adapter = config
            .capture
            .as_ref()
            .map(|c| adapter_from_config(c, config.canvas, config.style.background));
        let sketch = Self::new(config)?;
        Ok(match adapter {
            Some(adapter) => sketch.with_capture(adapter),
            None => sketch,
        })
    }

    /// Attach the adapter that receives the recorded loop.
    pub fn with_capture(mut self, adapter: Box<dyn CaptureAdapter>) -> Self {
        self.recorder = Some(Recorder::new(adapter, self.config.duration));
        self
    }

    /// Replace the random source.
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Use a prebuilt mask instead of rasterizing the configured text.
    pub fn with_mask(mut self, mask: MaskSet) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The text mask, once initialized.
    pub fn mask(&self) -> Option<&MaskSet> {
        self.mask.as_ref()
    }

    /// Stats of the most recently drawn frame.
    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    /// Return `true` while a configured recording has not yet been saved.
    pub fn is_recording(&self) -> bool {
        self.config.recording && self.recorder.as_ref().is_some_and(Recorder::is_recording)
    }

    /// The recorder, when a capture adapter is attached.
    pub fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref()
    }
}

impl Sketch for BrokenLines {
    fn initialize(&mut self, canvas: Canvas) -> LinesResult<()> {
        if canvas != self.config.canvas {
            return Err(LinesError::validation(format!(
                "surface is {}x{} but the config canvas is {}x{}",
                canvas.width, canvas.height, self.config.canvas.width, self.config.canvas.height
            )));
        }

        if self.mask.is_none() {
            let mask = TextMaskBuilder::from_config(&self.config).build(canvas)?;
            self.mask = Some(mask);
        }

        if self.config.recording {
            let recorder = self.recorder.as_mut().ok_or_else(|| {
                LinesError::validation("recording is enabled but no capture adapter is configured")
            })?;
            recorder.start()?;
        }

        tracing::info!(
            duration = self.config.duration,
            cell_scale = self.config.cell_scale,
            mask_points = self.mask.as_ref().map_or(0, MaskSet::len),
            recording = self.config.recording,
            "broken lines ready"
        );
        Ok(())
    }

    fn render_frame(&mut self, ctx: &mut dyn DrawContext, frame: FrameIndex) -> LinesResult<()> {
        let mask = self
            .mask
            .as_ref()
            .ok_or_else(|| LinesError::render("frame requested before initialize"))?;
        let clock = AnimationClock::new(frame, self.config.duration)?;
        let stats = self.renderer.render(ctx, clock, mask, self.rng.as_mut())?;
        self.last_stats = Some(stats);
        Ok(())
    }

    fn frame_rendered(&mut self, frame: FrameIndex, surface: &FrameRGBA) -> LinesResult<()> {
        if !self.config.recording {
            return Ok(());
        }
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.on_frame(frame, surface)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/sketch.rs"]
mod tests;
