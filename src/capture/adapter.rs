use crate::foundation::core::FrameIndex;
use crate::foundation::error::LinesResult;
use crate::render::backend::FrameRGBA;

/// Export pipeline that consumes rendered frames.
///
/// Call order: `start` once, `capture` for each frame in order, then `stop` and `save` once.
pub trait CaptureAdapter: Send {
    /// Prepare the export (open files, spawn encoders).
    fn start(&mut self) -> LinesResult<()>;
    /// Consume one freshly drawn frame.
    fn capture(&mut self, frame: &FrameRGBA) -> LinesResult<()>;
    /// Stop accepting frames and flush pending work.
    fn stop(&mut self) -> LinesResult<()>;
    /// Finalize the export.
    fn save(&mut self) -> LinesResult<()>;
}

impl<A: CaptureAdapter + ?Sized> CaptureAdapter for Box<A> {
    fn start(&mut self) -> LinesResult<()> {
        (**self).start()
    }

    fn capture(&mut self, frame: &FrameRGBA) -> LinesResult<()> {
        (**self).capture(frame)
    }

    fn stop(&mut self) -> LinesResult<()> {
        (**self).stop()
    }

    fn save(&mut self) -> LinesResult<()> {
        (**self).save()
    }
}

/// Recorder lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    /// Created, adapter not started yet.
    Idle,
    /// Capturing frames `0 .. duration`.
    Recording,
    /// `stop`/`save` have run. Never re-arms.
    Finished,
}

/// What [`Recorder::on_frame`] did with a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordEvent {
    /// The frame was passed to the adapter.
    Captured,
    /// The loop is complete; the adapter was stopped and saved.
    Finished,
    /// Nothing happened (already finished).
    Skipped,
}

/// Drives a [`CaptureAdapter`] through exactly one loop of `duration` frames.
pub struct Recorder<A: CaptureAdapter = Box<dyn CaptureAdapter>> {
    adapter: A,
    duration: u64,
    state: RecorderState,
    captured: u64,
}

impl<A: CaptureAdapter> Recorder<A> {
    /// Wrap `adapter` for a loop of `duration` frames.
    pub fn new(adapter: A, duration: u64) -> Self {
        Self {
            adapter,
            duration,
            state: RecorderState::Idle,
            captured: 0,
        }
    }

    /// Start the adapter. Calling it again after a successful start is a no-op.
    pub fn start(&mut self) -> LinesResult<()> {
        if self.state != RecorderState::Idle {
            return Ok(());
        }
        self.adapter.start()?;
        self.state = RecorderState::Recording;
        tracing::info!(duration = self.duration, "recording started");
        Ok(())
    }

    /// Handle one drawn frame.
    ///
    /// Frames before `duration` are captured. The first frame at or past `duration` stops and
    /// saves the adapter; the recorder is finished from then on, even if `stop`/`save` fail.
    pub fn on_frame(&mut self, frame: FrameIndex, surface: &FrameRGBA) -> LinesResult<RecordEvent> {
        if self.state == RecorderState::Idle {
            self.start()?;
        }
        if self.state == RecorderState::Finished {
            return Ok(RecordEvent::Skipped);
        }

        if frame.0 < self.duration {
            self.adapter.capture(surface)?;
            self.captured += 1;
            return Ok(RecordEvent::Captured);
        }

        self.state = RecorderState::Finished;
        self.adapter.stop()?;
        self.adapter.save()?;
        tracing::info!(frames = self.captured, "recording ended");
        Ok(RecordEvent::Finished)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Return `true` until the loop has been stopped and saved.
    pub fn is_recording(&self) -> bool {
        self.state != RecorderState::Finished
    }

    /// Frames passed to the adapter so far.
    pub fn captured(&self) -> u64 {
        self.captured
    }

    /// Borrow the wrapped adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/adapter.rs"]
mod tests;
