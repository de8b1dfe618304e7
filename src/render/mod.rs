//! Drawing surfaces and the per-frame line-field renderer.

/// Rendered frame buffers.
pub mod backend;
/// Drawing-context trait and transform/style state.
pub mod context;
/// `vello_cpu` raster canvas.
pub mod cpu;
/// Per-frame grid walk, pick decision and segment drawing.
pub mod frame;
/// Command-recording canvas.
pub mod recording;
