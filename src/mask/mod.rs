//! Text mask: offscreen glyph rasterization and the canvas-space point set built from it.

/// Offscreen text rasterization and lit-pixel extraction.
pub mod builder;
/// Canvas-space mask points and row/column membership queries.
pub mod set;
