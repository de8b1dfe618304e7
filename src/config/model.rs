use crate::config::preset::Preset;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{LinesError, LinesResult};
use crate::render::frame::{GridAxis, MAX_GRID_CELLS, grid_cells};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Largest accepted offscreen mask side.
pub const MAX_MASK_RESOLUTION: u32 = 4096;

/// Immutable tunables for one run. Read-only during the frame loop.
///
/// JSON input may name a `"preset"`; the remaining keys are merged over that preset, so a config
/// only lists what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Output canvas size in pixels.
    pub canvas: Canvas,
    /// Frames per loop cycle.
    pub duration: u64,
    /// Export one loop through the capture adapter.
    pub recording: bool,
    /// Log the measured frame rate every 60 frames.
    pub show_fps: bool,
    /// Fraction of each canvas side left out of the grid, in `[0, 1)`.
    pub border: f64,
    /// Grid pitch in output pixels.
    pub cell_scale: f64,
    /// Side of the square offscreen text surface.
    pub mask_resolution: u32,
    /// Text lines rasterized into the mask, one band each.
    pub text_lines: Vec<String>,
    /// Font family requested for the mask text; falls back to any monospace face.
    pub font_family: String,
    /// Extra font file loaded before resolving `font_family`.
    pub font_file: Option<PathBuf>,
    /// Colors and stroke profiles.
    pub style: StyleConfig,
    /// Export target used when `recording` is set.
    pub capture: Option<CaptureConfig>,
    /// Fixed seed for the reveal draws. `None` seeds from the clock.
    pub seed: Option<u64>,
}

/// Visual parameters of a preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Background fill.
    pub background: Rgba8,
    /// Stroke profile for picked cells.
    pub picked: StrokeProfile,
    /// Stroke profile for cells that are not picked.
    pub idle: StrokeProfile,
    /// Channel-split copies drawn under picked segments.
    pub aberration: AberrationConfig,
    /// Shift picked cells by `eased * scl / 2 * trig`.
    pub jitter: bool,
}

/// Segment drawing parameters for one pick state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrokeProfile {
    /// Half of the segment's diagonal extent, as a fraction of the cell pitch.
    pub half_length: f64,
    /// Mirror the segment vertically (`scale(1, -1)`).
    pub mirror: bool,
    /// Stroke alpha in `[0, 1]`.
    pub alpha: f64,
    /// Gray value written to every color channel.
    pub channel: u8,
    /// Stroke width in pixels.
    pub line_width: f64,
}

impl StrokeProfile {
    /// `-1.0` when mirrored, `1.0` otherwise.
    pub fn flip_sign(self) -> f64 {
        if self.mirror { -1.0 } else { 1.0 }
    }

    /// Stroke color for this profile.
    pub fn color(self) -> Rgba8 {
        Rgba8::gray(self.channel, self.alpha)
    }

    fn validate(self, what: &str) -> LinesResult<()> {
        if !self.half_length.is_finite() || self.half_length < 0.0 {
            return Err(LinesError::validation(format!(
                "{what}.half_length must be finite and >= 0"
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(LinesError::validation(format!(
                "{what}.alpha must be in [0, 1]"
            )));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(LinesError::validation(format!(
                "{what}.line_width must be finite and > 0"
            )));
        }
        Ok(())
    }
}

/// Chromatic-aberration settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AberrationConfig {
    /// Stroke width of every copy.
    pub line_width: f64,
    /// Offset magnitude at `trig == 1`.
    pub offset: f64,
    /// Copies drawn in order, before the base segment.
    pub layers: Vec<AberrationLayer>,
}

/// One color copy of a picked segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AberrationLayer {
    /// Stroke color.
    pub color: Rgba8,
    /// Horizontal offset in units of `offset * trig`.
    pub dx: f64,
    /// Vertical offset in units of `offset * trig`.
    pub dy: f64,
}

/// Output format for recorded loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureFormat {
    /// Numbered PNG files in a directory.
    Png,
    /// H.264 MP4 through the system `ffmpeg`.
    Mp4,
}

/// Where and how a recording is written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Output format.
    pub format: CaptureFormat,
    /// Output directory (PNG) or file (MP4).
    pub out: PathBuf,
    /// Playback rate written into MP4 output.
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_fps() -> u32 {
    60
}

impl Default for RenderConfig {
    fn default() -> Self {
        Preset::BrokenLines.config()
    }
}

impl RenderConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LinesResult<Self> {
        let mut value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| LinesError::validation(format!("parse config JSON: {e}")))?;

        let preset = match value.as_object_mut() {
            Some(obj) => match obj.remove("preset") {
                Some(serde_json::Value::String(name)) => name.parse::<Preset>()?,
                Some(_) => return Err(LinesError::validation("\"preset\" must be a string")),
                None => Preset::BrokenLines,
            },
            None => return Err(LinesError::validation("config JSON must be an object")),
        };

        let mut base = serde_json::to_value(preset.config())
            .map_err(|e| LinesError::validation(format!("serialize preset: {e}")))?;
        merge_json(&mut base, value);

        serde_json::from_value(base)
            .map_err(|e| LinesError::validation(format!("invalid config: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LinesResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LinesError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges and cross-field constraints.
    pub fn validate(&self) -> LinesResult<()> {
        self.canvas.validate()?;
        if self.duration == 0 {
            return Err(LinesError::validation("duration must be > 0"));
        }
        if !(0.0..1.0).contains(&self.border) {
            return Err(LinesError::validation("border must be in [0, 1)"));
        }
        if !self.cell_scale.is_finite() || self.cell_scale <= 0.0 {
            return Err(LinesError::validation("cell_scale must be finite and > 0"));
        }
        let rows = GridAxis::new(self.canvas.height_f64(), self.border, self.cell_scale);
        let cols = GridAxis::new(self.canvas.width_f64(), self.border, self.cell_scale);
        if grid_cells(&rows, &cols).is_err() {
            return Err(LinesError::validation(format!(
                "cell_scale {} gives a {} x {} grid, above the {MAX_GRID_CELLS} cell limit",
                self.cell_scale,
                rows.len(),
                cols.len()
            )));
        }
        if self.mask_resolution == 0 || self.mask_resolution > MAX_MASK_RESOLUTION {
            return Err(LinesError::validation(format!(
                "mask_resolution must be in 1..={MAX_MASK_RESOLUTION}"
            )));
        }
        self.style.picked.validate("style.picked")?;
        self.style.idle.validate("style.idle")?;

        let ab = &self.style.aberration;
        if !ab.line_width.is_finite() || ab.line_width <= 0.0 {
            return Err(LinesError::validation(
                "style.aberration.line_width must be finite and > 0",
            ));
        }
        if !ab.offset.is_finite() {
            return Err(LinesError::validation("style.aberration.offset must be finite"));
        }
        if ab
            .layers
            .iter()
            .any(|l| !l.dx.is_finite() || !l.dy.is_finite())
        {
            return Err(LinesError::validation(
                "style.aberration.layers offsets must be finite",
            ));
        }

        if let Some(capture) = &self.capture
            && capture.fps == 0
        {
            return Err(LinesError::validation("capture.fps must be > 0"));
        }
        Ok(())
    }

    /// Mask-space to canvas-space scale factor (`canvas height / mask resolution`).
    pub fn mask_ratio(&self) -> f64 {
        self.canvas.height_f64() / f64::from(self.mask_resolution)
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(b), serde_json::Value::Object(p)) => {
            for (k, v) in p {
                match b.get_mut(&k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
