use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{LinesError, LinesResult};

/// How new strokes combine with what is already drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Normal alpha compositing.
    #[default]
    SourceOver,
    /// `1 - (1 - src)(1 - dst)`: overlapping strokes brighten instead of occluding.
    Screen,
}

/// Transform and stroke style in effect for the next primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// Local-to-canvas transform.
    pub transform: Affine,
    /// Stroke color (straight alpha).
    pub stroke: Rgba8,
    /// Stroke width in local units.
    pub line_width: f64,
    /// Composition mode for fills and strokes.
    pub composite: CompositeMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            stroke: Rgba8::rgb(0, 0, 0),
            line_width: 1.0,
            composite: CompositeMode::SourceOver,
        }
    }
}

/// Save/restore stack of [`DrawState`].
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    /// Drop all saved states and return to the default state.
    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }

    /// State applied to the next primitive.
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Mutable access to the current state.
    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state. Unbalanced restores are errors.
    pub fn restore(&mut self) -> LinesResult<()> {
        self.current = self
            .saved
            .pop()
            .ok_or_else(|| LinesError::render("restore without matching save"))?;
        Ok(())
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// 2D drawing surface the renderer draws into.
///
/// Transform and style follow canvas-2D semantics: `translate`/`scale` post-multiply the current
/// transform, and `save`/`restore` snapshot the whole [`DrawState`]. Implementors provide the
/// state stack and the two primitives; everything else has default implementations.
pub trait DrawContext {
    /// Surface size in pixels.
    fn canvas(&self) -> Canvas;

    /// State stack backing the default methods.
    fn states(&mut self) -> &mut StateStack;

    /// Start a new frame: reset transform/style state and discard pending drawing.
    fn begin_frame(&mut self);

    /// Fill `rect` (local coordinates) with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> LinesResult<()>;

    /// Stroke a straight line from `from` to `to` (local coordinates) with the current style.
    fn stroke_segment(&mut self, from: Point, to: Point) -> LinesResult<()>;

    /// Push the current state.
    fn save(&mut self) {
        self.states().save();
    }

    /// Pop the last saved state.
    fn restore(&mut self) -> LinesResult<()> {
        self.states().restore()
    }

    /// Translate the local coordinate system.
    fn translate(&mut self, dx: f64, dy: f64) {
        let s = self.states().current_mut();
        s.transform = s.transform * Affine::translate(Vec2::new(dx, dy));
    }

    /// Scale the local coordinate system. Negative factors mirror.
    fn scale(&mut self, sx: f64, sy: f64) {
        let s = self.states().current_mut();
        s.transform = s.transform * Affine::scale_non_uniform(sx, sy);
    }

    /// Select the composition mode for subsequent primitives.
    fn set_composite(&mut self, mode: CompositeMode) {
        self.states().current_mut().composite = mode;
    }

    /// Select the stroke color.
    fn set_stroke_color(&mut self, color: Rgba8) {
        self.states().current_mut().stroke = color;
    }

    /// Select the stroke width.
    fn set_line_width(&mut self, width: f64) {
        self.states().current_mut().line_width = width;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
