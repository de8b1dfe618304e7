use crate::foundation::core::Canvas;

/// Canvas-space coordinate of one lit glyph pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskPoint {
    /// Horizontal position in output pixels.
    pub x: f64,
    /// Vertical position in output pixels.
    pub y: f64,
}

/// Decode a row-major linear pixel index into 2D coordinates scaled by `ratio`.
pub fn xy_from_index(i: usize, width: u32, ratio: f64) -> MaskPoint {
    let width = width as usize;
    let x = i % width;
    let y = i / width;
    MaskPoint {
        x: (x as f64) * ratio,
        y: (y as f64) * ratio,
    }
}

/// Read-only set of lit mask points in canvas space.
///
/// Points are kept in row-major order, so `y` is non-decreasing; [`MaskSet::row_window`] relies
/// on this to find a row's neighbours by binary search.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskSet {
    points: Vec<MaskPoint>,
    ratio: f64,
    canvas: Canvas,
}

impl MaskSet {
    /// A mask with no lit points; every cell renders unpicked.
    pub fn empty(canvas: Canvas, ratio: f64) -> Self {
        Self {
            points: Vec::new(),
            ratio,
            canvas,
        }
    }

    /// Build from lit pixel indices of a `mask_width`-wide bitmap.
    ///
    /// Indices may come in any order; points are stored row-major. Points landing outside the
    /// canvas after rescaling (possible when the canvas is narrower than it is tall) are dropped.
    pub fn from_lit_indices(
        indices: impl IntoIterator<Item = usize>,
        mask_width: u32,
        canvas: Canvas,
        ratio: f64,
    ) -> Self {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        let mut points: Vec<MaskPoint> = indices
            .into_iter()
            .map(|i| xy_from_index(i, mask_width, ratio))
            .filter(|p| (0.0..=w).contains(&p.x) && (0.0..=h).contains(&p.y))
            .collect();
        points.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
        Self {
            points,
            ratio,
            canvas,
        }
    }

    /// All points, row-major.
    pub fn points(&self) -> &[MaskPoint] {
        &self.points
    }

    /// Number of lit points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when no pixel was lit.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Membership tolerance: one mask pixel expressed in canvas pixels.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Canvas the points were scaled into.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Points whose vertical distance to `y` is below [`MaskSet::ratio`].
    pub fn row_window(&self, y: f64) -> RowWindow<'_> {
        let r = self.ratio;
        let lo = self.points.partition_point(|p| y - p.y >= r);
        let hi = self.points.partition_point(|p| p.y - y < r);
        RowWindow {
            points: &self.points[lo..hi.max(lo)],
            ratio: r,
        }
    }

    /// Return `true` when a point lies within one ratio unit of `(x, y)` on both axes.
    pub fn covers(&self, x: f64, y: f64) -> bool {
        self.row_window(y).covers(x)
    }

    /// Render the mask at canvas size as a white-on-black image.
    pub fn to_luma_image(&self) -> image::GrayImage {
        let mut img = image::GrayImage::new(self.canvas.width, self.canvas.height);
        for p in &self.points {
            let x = (p.x as u32).min(self.canvas.width.saturating_sub(1));
            let y = (p.y as u32).min(self.canvas.height.saturating_sub(1));
            img.put_pixel(x, y, image::Luma([255]));
        }
        img
    }
}

/// Mask points near one grid row.
#[derive(Clone, Copy, Debug)]
pub struct RowWindow<'a> {
    points: &'a [MaskPoint],
    ratio: f64,
}

impl RowWindow<'_> {
    /// Points in this window.
    pub fn points(&self) -> &[MaskPoint] {
        self.points
    }

    /// Return `true` when the row has no nearby mask points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return `true` when some point is within one ratio unit of column `x`.
    pub fn covers(&self, x: f64) -> bool {
        self.points.iter().any(|p| (p.x - x).abs() < self.ratio)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/set.rs"]
mod tests;
