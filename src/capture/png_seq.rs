use crate::capture::adapter::CaptureAdapter;
use crate::foundation::error::{LinesError, LinesResult};
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Writes a recorded loop as `frame_00000.png`, `frame_00001.png`, ... into a directory.
///
/// Frames are PNG-encoded as they arrive and kept in memory; nothing touches disk until `save`.
pub struct PngSequenceCapture {
    dir: PathBuf,
    encoded: Vec<Vec<u8>>,
    running: bool,
    stopped: bool,
}

impl PngSequenceCapture {
    /// Capture into `dir` (created on `save` when missing).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encoded: Vec::new(),
            running: false,
            stopped: false,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames encoded so far.
    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    /// Return `true` when no frame has been captured.
    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// File name used for the `index`-th frame.
    pub fn file_name(index: usize) -> String {
        format!("frame_{index:05}.png")
    }
}

impl CaptureAdapter for PngSequenceCapture {
    fn start(&mut self) -> LinesResult<()> {
        if self.dir.is_file() {
            return Err(LinesError::capture(format!(
                "png capture output '{}' is a file, expected a directory",
                self.dir.display()
            )));
        }
        self.encoded.clear();
        self.running = true;
        self.stopped = false;
        Ok(())
    }

    fn capture(&mut self, frame: &FrameRGBA) -> LinesResult<()> {
        if !self.running {
            return Err(LinesError::capture("png capture is not running"));
        }
        let img = frame.to_rgba_image()?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| LinesError::capture(format!("png encode failed: {e}")))?;
        self.encoded.push(buf);
        Ok(())
    }

    fn stop(&mut self) -> LinesResult<()> {
        self.running = false;
        self.stopped = true;
        Ok(())
    }

    fn save(&mut self) -> LinesResult<()> {
        if !self.stopped {
            return Err(LinesError::capture("png capture saved before stop"));
        }
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create capture directory '{}'", self.dir.display())
        })?;
        for (i, bytes) in self.encoded.iter().enumerate() {
            let path = self.dir.join(Self::file_name(i));
            std::fs::write(&path, bytes)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        tracing::info!(
            frames = self.encoded.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/png_seq.rs"]
mod tests;
