//! Exporting one loop of frames.

/// Adapter trait and the one-shot recorder.
pub mod adapter;
/// MP4 output through the system `ffmpeg`.
pub mod ffmpeg;
/// In-memory capture for tests.
pub mod memory;
/// Numbered PNG files.
pub mod png_seq;

use crate::config::model::{CaptureConfig, CaptureFormat};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::LinesResult;
use anyhow::Context as _;
use std::path::Path;

/// Build the adapter described by a capture config.
///
/// `background` flattens any residual alpha in MP4 output.
pub fn adapter_from_config(
    capture: &CaptureConfig,
    canvas: Canvas,
    background: Rgba8,
) -> Box<dyn adapter::CaptureAdapter> {
    match capture.format {
        CaptureFormat::Png => Box::new(png_seq::PngSequenceCapture::new(&capture.out)),
        CaptureFormat::Mp4 => {
            let mut opts = ffmpeg::FfmpegCaptureOpts::new(&capture.out, canvas, capture.fps);
            opts.background = background;
            Box::new(ffmpeg::FfmpegCapture::new(opts))
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> LinesResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/capture/mod.rs"]
mod tests;
