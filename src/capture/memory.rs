use crate::capture::adapter::CaptureAdapter;
use crate::foundation::error::{LinesError, LinesResult};
use crate::render::backend::FrameRGBA;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lifecycle counters and frames seen by an [`InMemoryCapture`].
#[derive(Debug, Default)]
pub struct CaptureLog {
    /// Captured frames, in order.
    pub frames: Vec<FrameRGBA>,
    /// Number of `start` calls.
    pub starts: u32,
    /// Number of `stop` calls.
    pub stops: u32,
    /// Number of `save` calls.
    pub saves: u32,
}

/// In-memory adapter for tests and debugging.
///
/// Clones share the same log, so a test can keep a handle while the recorder owns the adapter.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCapture {
    log: Arc<Mutex<CaptureLog>>,
}

impl InMemoryCapture {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the shared log.
    pub fn log(&self) -> MutexGuard<'_, CaptureLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CaptureAdapter for InMemoryCapture {
    fn start(&mut self) -> LinesResult<()> {
        let mut log = self.log();
        log.starts += 1;
        log.frames.clear();
        Ok(())
    }

    fn capture(&mut self, frame: &FrameRGBA) -> LinesResult<()> {
        let mut log = self.log();
        if log.starts == 0 || log.stops > 0 {
            return Err(LinesError::capture("in-memory capture is not running"));
        }
        log.frames.push(frame.clone());
        Ok(())
    }

    fn stop(&mut self) -> LinesResult<()> {
        self.log().stops += 1;
        Ok(())
    }

    fn save(&mut self) -> LinesResult<()> {
        self.log().saves += 1;
        Ok(())
    }
}
