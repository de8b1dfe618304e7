use crate::config::model::RenderConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{LinesError, LinesResult};
use crate::mask::set::MaskSet;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Fraction of the mask side used as the border inset around the text bands.
const BORDER_FRACTION: f64 = 0.1;

/// Offscreen RGBA8 bitmap produced by text rasterization.
#[derive(Clone, Debug)]
pub struct MaskBitmap {
    /// Bitmap side in pixels (the surface is square).
    pub size: u32,
    /// Premultiplied RGBA8, row-major.
    pub data: Vec<u8>,
}

/// Rasterizes text lines onto a small square surface and extracts the lit pixels.
///
/// This is the only expensive step of a run; build the mask once before the frame loop.
#[derive(Clone, Debug)]
pub struct TextMaskBuilder {
    lines: Vec<String>,
    resolution: u32,
    font_family: String,
    font_file: Option<PathBuf>,
}

impl TextMaskBuilder {
    /// Create a builder for `lines` on a `resolution`-sided surface.
    pub fn new(lines: Vec<String>, resolution: u32) -> Self {
        Self {
            lines,
            resolution,
            font_family: "monospace".to_owned(),
            font_file: None,
        }
    }

    /// Builder configured from a run configuration.
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self::new(cfg.text_lines.clone(), cfg.mask_resolution)
            .with_font_family(cfg.font_family.clone())
            .with_font_file(cfg.font_file.clone())
    }

    /// Preferred font family. Any monospace face is used when it is not installed.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Font file loaded in addition to the system fonts.
    pub fn with_font_file(mut self, path: Option<PathBuf>) -> Self {
        self.font_file = path;
        self
    }

    /// Font size: `(S - border) / 4`.
    pub fn font_size(&self) -> f64 {
        let s = f64::from(self.resolution);
        (s - BORDER_FRACTION * s) / 4.0
    }

    /// Vertical center of each line's band.
    ///
    /// With three lines this places them at 1/6, 1/2 and 5/6 of the border-adjusted height.
    pub fn band_centers(&self) -> Vec<f64> {
        let s = f64::from(self.resolution);
        let border = BORDER_FRACTION * s;
        let n = self.lines.len() as f64;
        (0..self.lines.len())
            .map(|i| (s - border / 2.0) * (2.0 * i as f64 + 1.0) / (2.0 * n) + border / 2.0)
            .collect()
    }

    /// SVG document drawing the text white on black.
    pub fn svg_document(&self) -> String {
        let s = self.resolution;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}"><rect width="{s}" height="{s}" fill="black"/>"#
        );
        let family = escape_xml(&self.font_family);
        let size = self.font_size();
        let cx = f64::from(s) / 2.0;
        for (line, cy) in self.lines.iter().zip(self.band_centers()) {
            if line.trim().is_empty() {
                continue;
            }
            svg.push_str(&format!(
                r#"<text x="{cx}" y="{cy}" font-family="{family}, monospace" font-size="{size}" fill="white" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                escape_xml(line)
            ));
        }
        svg.push_str("</svg>");
        svg
    }

    /// Rasterize the text into an offscreen bitmap.
    #[tracing::instrument(skip(self), fields(lines = self.lines.len(), size = self.resolution))]
    pub fn rasterize(&self) -> LinesResult<MaskBitmap> {
        let opts = usvg::Options {
            fontdb: Arc::new(self.font_database()),
            font_family: self.font_family.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&self.svg_document(), &opts)
            .map_err(|e| LinesError::mask(format!("parse text mask svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(self.resolution, self.resolution)
            .ok_or_else(|| LinesError::mask("failed to allocate text mask pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(MaskBitmap {
            size: self.resolution,
            data: pixmap.take(),
        })
    }

    /// Rasterize, sample and rescale into canvas space.
    pub fn build(&self, canvas: Canvas) -> LinesResult<MaskSet> {
        canvas.validate()?;
        let ratio = canvas.height_f64() / f64::from(self.resolution);
        let bitmap = self.rasterize()?;
        let lit = lit_indices(&bitmap.data);
        let mask = MaskSet::from_lit_indices(lit, bitmap.size, canvas, ratio);
        if mask.is_empty() {
            tracing::warn!("text mask has no lit pixels; every cell will render unpicked");
        } else {
            tracing::debug!(points = mask.len(), ratio, "text mask built");
        }
        Ok(mask)
    }

    fn font_database(&self) -> usvg::fontdb::Database {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(path) = &self.font_file
            && let Err(e) = db.load_font_file(path)
        {
            tracing::warn!(path = %path.display(), "failed to load font file: {e}");
        }

        // Generic `monospace` resolves to the first installed fixed-pitch face.
        let mono = db
            .faces()
            .find(|f| f.monospaced)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()));
        if let Some(name) = mono {
            db.set_monospace_family(name);
        }
        db
    }
}

/// Linear indices of pixels whose red, green or blue channel is non-zero. Alpha is ignored.
///
/// Order is ascending.
pub fn lit_indices(rgba: &[u8]) -> Vec<usize> {
    rgba.par_chunks_exact(4)
        .enumerate()
        .filter_map(|(i, px)| (px[0] > 0 || px[1] > 0 || px[2] > 0).then_some(i))
        .collect()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mask/builder.rs"]
mod tests;
