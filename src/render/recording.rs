use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::LinesResult;
use crate::render::context::{CompositeMode, DrawContext, StateStack};

/// One primitive issued against a [`RecordingCanvas`], in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `fill_rect` with the rect's corners mapped through the transform.
    FillRect {
        /// Bounding box of the transformed rect.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
        /// Composition mode in effect.
        composite: CompositeMode,
    },
    /// `stroke_segment` with both endpoints mapped through the transform.
    Stroke {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        line_width: f64,
        /// Composition mode in effect.
        composite: CompositeMode,
    },
}

/// Draw context that records commands instead of rasterizing. For tests and debugging.
#[derive(Debug)]
pub struct RecordingCanvas {
    canvas: Canvas,
    states: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty recorder for a canvas of the given size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            states: StateStack::default(),
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last `begin_frame`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the stroke commands, in order.
    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    /// Current save depth.
    pub fn save_depth(&self) -> usize {
        self.states.depth()
    }
}

impl DrawContext for RecordingCanvas {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn states(&mut self) -> &mut StateStack {
        &mut self.states
    }

    fn begin_frame(&mut self) {
        self.states.reset();
        self.commands.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> LinesResult<()> {
        let s = self.states.current();
        let rect = s.transform.transform_rect_bbox(rect);
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            composite: s.composite,
        });
        Ok(())
    }

    fn stroke_segment(&mut self, from: Point, to: Point) -> LinesResult<()> {
        let s = self.states.current();
        self.commands.push(DrawCommand::Stroke {
            from: s.transform * from,
            to: s.transform * to,
            color: s.stroke,
            line_width: s.line_width,
            composite: s.composite,
        });
        Ok(())
    }
}
