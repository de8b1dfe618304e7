use crate::config::model::{
    AberrationConfig, AberrationLayer, RenderConfig, StrokeProfile, StyleConfig,
};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{LinesError, LinesResult};
use std::str::FromStr;

/// Named configuration variants.
///
/// Both share one renderer; they only differ in border, palette and jitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Full-bleed grid, red/green/blue split, no jitter.
    BrokenLines,
    /// 10% border, red/yellow/blue split, jittered picks.
    Drift,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 2] = [Preset::BrokenLines, Preset::Drift];

    /// Stable identifier used in JSON and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::BrokenLines => "broken_lines",
            Self::Drift => "drift",
        }
    }

    /// Build the full configuration for this preset.
    pub fn config(self) -> RenderConfig {
        let picked = StrokeProfile {
            half_length: 0.35,
            mirror: true,
            alpha: 1.0,
            channel: 240,
            line_width: 2.0,
        };
        let idle = StrokeProfile {
            half_length: 0.5,
            mirror: false,
            alpha: 0.8,
            channel: 210,
            line_width: 1.0,
        };
        let red = AberrationLayer {
            color: Rgba8::rgb(255, 0, 0),
            dx: -1.0,
            dy: -1.0,
        };
        let blue = AberrationLayer {
            color: Rgba8::rgb(0, 0, 255),
            dx: 1.0,
            dy: 1.0,
        };
        let middle = match self {
            Self::BrokenLines => Rgba8::rgb(0, 255, 0).with_alpha(0.6),
            Self::Drift => Rgba8::rgb(255, 255, 0).with_alpha(0.6),
        };
        let middle = AberrationLayer {
            color: middle,
            dx: 1.0,
            dy: 0.0,
        };

        RenderConfig {
            canvas: Canvas {
                width: 1000,
                height: 1000,
            },
            duration: 900,
            recording: false,
            show_fps: true,
            border: match self {
                Self::BrokenLines => 0.0,
                Self::Drift => 0.1,
            },
            cell_scale: 10.0,
            mask_resolution: 500,
            text_lines: ["BROKEN", "INTO", "LINES"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            font_family: "Hack".to_owned(),
            font_file: None,
            style: StyleConfig {
                background: Rgba8::rgb(35, 35, 35),
                picked,
                idle,
                aberration: AberrationConfig {
                    line_width: 2.0,
                    offset: 2.0,
                    layers: vec![red, middle, blue],
                },
                jitter: matches!(self, Self::Drift),
            },
            capture: None,
            seed: None,
        }
    }
}

impl FromStr for Preset {
    type Err = LinesError;

    fn from_str(s: &str) -> LinesResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                LinesError::validation(format!(
                    "unknown preset '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
