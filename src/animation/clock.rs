use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LinesError, LinesResult};
use crate::foundation::math::ease;
use std::f64::consts::PI;

/// Looping animation clock: a frame counter and the loop length in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClock {
    frame: FrameIndex,
    duration: u64,
}

impl AnimationClock {
    /// Create a clock positioned at `frame` with a loop of `duration` frames (`> 0`).
    pub fn new(frame: FrameIndex, duration: u64) -> LinesResult<Self> {
        if duration == 0 {
            return Err(LinesError::validation("animation duration must be > 0"));
        }
        Ok(Self { frame, duration })
    }

    /// Current frame counter.
    pub fn frame(self) -> FrameIndex {
        self.frame
    }

    /// Loop length in frames.
    pub fn duration(self) -> u64 {
        self.duration
    }

    /// Return the same clock advanced by one frame.
    pub fn tick(self) -> Self {
        Self {
            frame: self.frame.next(),
            ..self
        }
    }

    /// Position within the loop: `(frame mod duration) / duration`, in `[0, 1)`.
    pub fn percent(self) -> f64 {
        ((self.frame.0 % self.duration) as f64) / (self.duration as f64)
    }

    /// Derive every time-driven value the renderer needs for this frame.
    pub fn signal(self) -> TimeSignal {
        TimeSignal::from_percent(self.percent())
    }
}

/// Per-frame oscillator values, all derived from the loop percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSignal {
    /// Loop position in `[0, 1)`.
    pub percent: f64,
    /// `ease(percent) * π`.
    pub time_theta: f64,
    /// `sin(time_theta)`: rises 0 → 1 → 0 over one loop.
    pub trig: f64,
    /// `ease(trig)`: reveal probability for mask-covered cells.
    pub eased: f64,
}

impl TimeSignal {
    /// Build the signal for a raw percent value.
    pub fn from_percent(percent: f64) -> Self {
        let time_theta = ease(percent) * PI;
        let trig = time_theta.sin();
        Self {
            percent,
            time_theta,
            trig,
            eased: ease(trig),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
