//! broken-lines renders a looping generative animation: a grid of short diagonal line segments
//! whose length, color and chromatic-aberration offsets breathe over a loop, with the cells under
//! a rasterized text mask ("BROKEN / INTO / LINES") progressively picked out.
//!
//! The public API is layered:
//!
//! - Load and validate a [`RenderConfig`] (JSON or a named [`Preset`])
//! - Build the [`BrokenLines`] sketch and drive it with the headless [`Engine`]
//! - Optionally export one loop through a [`CaptureAdapter`] (PNG sequence or ffmpeg MP4)
//!
//! [`FrameRenderer`] draws against the [`DrawContext`] trait, so the same frame can be rasterized
//! by [`CpuCanvas`] or inspected command-by-command with [`RecordingCanvas`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Loop clock and random sources.
pub mod animation;
/// Frame export adapters.
pub mod capture;
/// Configuration model and presets.
pub mod config;
/// Engine, sketch contract and the line-field sketch.
pub mod host;
/// Text mask construction and queries.
pub mod mask;
/// Draw contexts and the frame renderer.
pub mod render;

pub use crate::foundation::core::{Affine, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{LinesError, LinesResult};
pub use crate::foundation::math::{dist, dist_sq, ease};

pub use crate::animation::clock::{AnimationClock, TimeSignal};
pub use crate::animation::random::{FixedRandom, RandomSource, SplitMix64};
pub use crate::capture::adapter::{CaptureAdapter, RecordEvent, Recorder, RecorderState};
pub use crate::capture::ffmpeg::{FfmpegCapture, FfmpegCaptureOpts};
pub use crate::capture::memory::{CaptureLog, InMemoryCapture};
pub use crate::capture::png_seq::PngSequenceCapture;
pub use crate::config::model::{
    AberrationConfig, AberrationLayer, CaptureConfig, CaptureFormat, RenderConfig, StrokeProfile,
    StyleConfig,
};
pub use crate::config::preset::Preset;
pub use crate::host::engine::{Engine, EngineOpts, Sketch};
pub use crate::host::sketch::BrokenLines;
pub use crate::mask::builder::TextMaskBuilder;
pub use crate::mask::set::{MaskPoint, MaskSet};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::context::{CompositeMode, DrawContext};
pub use crate::render::cpu::CpuCanvas;
pub use crate::render::frame::{FrameRenderer, FrameStats};
pub use crate::render::recording::{DrawCommand, RecordingCanvas};
