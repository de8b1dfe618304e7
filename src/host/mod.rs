//! Headless host: the sketch contract, the frame loop and the line-field sketch.

/// `Sketch` trait and the `Engine` frame loop.
pub mod engine;
/// The broken-lines sketch.
pub mod sketch;
