use crate::animation::clock::{AnimationClock, TimeSignal};
use crate::animation::random::RandomSource;
use crate::config::model::{RenderConfig, StrokeProfile, StyleConfig};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{LinesError, LinesResult};
use crate::mask::set::{MaskSet, RowWindow};
use crate::render::context::{CompositeMode, DrawContext};

/// Largest grid (rows * columns) a frame may visit.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Grid rows visited.
    pub rows: usize,
    /// Grid columns visited per row.
    pub columns: usize,
    /// Cells drawn (`rows * columns`).
    pub cells: usize,
    /// Cells that took the picked treatment.
    pub picked: usize,
}

/// Positions along one grid axis.
///
/// Runs from `border * extent` through `extent * (1 - border) + step`, inclusive, so the final
/// partial cell at the edge is always painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridAxis {
    start: f64,
    step: f64,
    count: usize,
}

impl GridAxis {
    /// Build the axis for a canvas side of `extent` pixels.
    pub fn new(extent: f64, border: f64, step: f64) -> Self {
        let start = border * extent;
        let end = extent - border * extent + step;
        let span = end - start;
        let count = if step > 0.0 && span >= 0.0 {
            (((span / step) + 1e-9).floor() as usize).saturating_add(1)
        } else {
            0
        };
        Self { start, step, count }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Return `true` when the axis has no positions.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate positions in increasing order.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|i| self.start + (i as f64) * self.step)
    }
}

/// Cell count of a `rows` x `cols` grid, rejecting grids above [`MAX_GRID_CELLS`].
pub fn grid_cells(rows: &GridAxis, cols: &GridAxis) -> LinesResult<usize> {
    match rows.len().checked_mul(cols.len()) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(cells),
        _ => Err(LinesError::render(format!(
            "grid of {} x {} cells exceeds {MAX_GRID_CELLS}",
            rows.len(),
            cols.len()
        ))),
    }
}

/// Two-stage pick predicate: the column is covered by the row's mask window, and a uniform draw
/// is `<= eased`. The draw only happens for covered cells.
pub fn pick_cell(row: &RowWindow<'_>, x: f64, eased: f64, rng: &mut dyn RandomSource) -> bool {
    row.covers(x) && rng.next_unit() <= eased
}

/// Draws the line field for one frame.
///
/// Output depends only on the clock, the mask, the configuration and the random draws; cells do
/// not read each other's outcome.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    style: StyleConfig,
    border: f64,
    cell_scale: f64,
}

impl FrameRenderer {
    /// Create a renderer for a validated configuration.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            style: config.style.clone(),
            border: config.border,
            cell_scale: config.cell_scale,
        }
    }

    /// Render one frame into `ctx`.
    ///
    /// The context is reset with `begin_frame` first; any primitive error aborts the frame.
    pub fn render(
        &self,
        ctx: &mut dyn DrawContext,
        clock: AnimationClock,
        mask: &MaskSet,
        rng: &mut dyn RandomSource,
    ) -> LinesResult<FrameStats> {
        let signal = clock.signal();
        let canvas = ctx.canvas();
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        let scl = self.cell_scale;

        let rows = GridAxis::new(h, self.border, scl);
        let cols = GridAxis::new(w, self.border, scl);
        let cells = grid_cells(&rows, &cols)?;
        let mut stats = FrameStats {
            rows: rows.len(),
            columns: cols.len(),
            cells,
            picked: 0,
        };

        ctx.begin_frame();
        ctx.save();
        ctx.fill_rect(Rect::new(0.0, 0.0, w, h), self.style.background)?;
        ctx.set_composite(CompositeMode::Screen);

        for y in rows.positions() {
            let row = mask.row_window(y);
            ctx.save();
            ctx.translate(0.0, y);
            for x in cols.positions() {
                let picked = pick_cell(&row, x, signal.eased, rng);
                if picked {
                    stats.picked += 1;
                }
                self.draw_cell(ctx, x, picked, &signal)?;
            }
            ctx.restore()?;
        }
        ctx.restore()?;

        tracing::trace!(
            frame = clock.frame().0,
            eased = signal.eased,
            picked = stats.picked,
            cells = stats.cells,
            "frame rendered"
        );
        Ok(stats)
    }

    fn draw_cell(
        &self,
        ctx: &mut dyn DrawContext,
        x: f64,
        picked: bool,
        signal: &TimeSignal,
    ) -> LinesResult<()> {
        let scl = self.cell_scale;
        let profile: StrokeProfile = if picked {
            self.style.picked
        } else {
            self.style.idle
        };
        let len = profile.half_length * scl;
        let from = Point::new(-len, -len);
        let to = Point::new(len, len);

        let dpos = if picked && self.style.jitter {
            signal.eased * scl / 2.0 * signal.trig
        } else {
            0.0
        };

        ctx.set_stroke_color(profile.color());
        ctx.set_line_width(profile.line_width);
        ctx.save();
        ctx.translate(x + dpos, dpos);
        ctx.scale(1.0, profile.flip_sign());

        if picked {
            let ab = &self.style.aberration;
            let offset = ab.offset * signal.trig;
            for layer in &ab.layers {
                ctx.save();
                ctx.translate(layer.dx * offset, layer.dy * offset);
                ctx.set_stroke_color(layer.color);
                ctx.set_line_width(ab.line_width);
                ctx.stroke_segment(from, to)?;
                ctx.restore()?;
            }
        }

        ctx.stroke_segment(from, to)?;
        ctx.restore()
    }
}

impl TryFrom<&RenderConfig> for FrameRenderer {
    type Error = LinesError;

    fn try_from(config: &RenderConfig) -> LinesResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
