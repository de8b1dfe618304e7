use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{LinesError, LinesResult};
use crate::render::backend::FrameRGBA;
use crate::render::context::{CompositeMode, DrawContext, StateStack};

/// CPU raster draw context backed by `vello_cpu`.
///
/// Primitives are recorded into a `vello_cpu::RenderContext` and rasterized by
/// [`CpuCanvas::finish`].
pub struct CpuCanvas {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    states: StateStack,
}

impl CpuCanvas {
    /// Create a canvas. Both sides must fit in `u16`.
    pub fn new(canvas: Canvas) -> LinesResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| LinesError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| LinesError::render("canvas height exceeds u16"))?;
        Ok(Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            states: StateStack::default(),
        })
    }

    /// Rasterize everything drawn since `begin_frame` and read it back.
    pub fn finish(&mut self) -> LinesResult<FrameRGBA> {
        if self.states.depth() != 0 {
            return Err(LinesError::render(format!(
                "frame finished with {} unrestored save(s)",
                self.states.depth()
            )));
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn apply_state(&mut self, paint: Rgba8) {
        let s = *self.states.current();
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(s.transform));
        self.ctx.set_blend_mode(blend_mode(s.composite));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            paint.r, paint.g, paint.b, paint.a,
        ));
    }
}

impl DrawContext for CpuCanvas {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn states(&mut self) -> &mut StateStack {
        &mut self.states
    }

    fn begin_frame(&mut self) {
        self.ctx.reset();
        self.states.reset();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> LinesResult<()> {
        if !rect.is_finite() {
            return Err(LinesError::render("fill_rect received a non-finite rect"));
        }
        self.apply_state(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        Ok(())
    }

    fn stroke_segment(&mut self, from: Point, to: Point) -> LinesResult<()> {
        if !from.is_finite() || !to.is_finite() {
            return Err(LinesError::render(
                "stroke_segment received a non-finite point",
            ));
        }
        let s = *self.states.current();
        self.apply_state(s.stroke);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(s.line_width));

        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        self.ctx.stroke_path(&path);
        Ok(())
    }
}

fn blend_mode(mode: CompositeMode) -> vello_cpu::peniko::BlendMode {
    match mode {
        CompositeMode::SourceOver => vello_cpu::peniko::BlendMode::default(),
        CompositeMode::Screen => vello_cpu::peniko::BlendMode::new(
            vello_cpu::peniko::Mix::Screen,
            vello_cpu::peniko::Compose::SrcOver,
        ),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
