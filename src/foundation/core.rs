use crate::foundation::error::{LinesError, LinesResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Absolute 0-based frame counter, incremented once per rendered frame by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Return the next frame index (saturating).
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest side accepted by the CPU raster backend.
    pub const MAX_DIM: u32 = u16::MAX as u32;

    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> LinesResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check that both sides are in `1..=MAX_DIM`.
    pub fn validate(self) -> LinesResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LinesError::validation("canvas width/height must be > 0"));
        }
        if self.width > Self::MAX_DIM || self.height > Self::MAX_DIM {
            return Err(LinesError::validation(format!(
                "canvas {}x{} exceeds max side {}",
                self.width,
                self.height,
                Self::MAX_DIM
            )));
        }
        Ok(())
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Straight-alpha RGBA8 color.
///
/// Serialized as `#RRGGBBAA`; see `config::color` for the accepted input forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from straight-alpha components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Gray with the same value on every channel and a `[0, 1]` alpha.
    pub fn gray(channel: u8, alpha: f64) -> Self {
        Self::rgb(channel, channel, channel).with_alpha(alpha)
    }

    /// Replace alpha with `alpha` in `[0, 1]` (clamped).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }
}

pub(crate) fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
