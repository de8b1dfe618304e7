//! Run configuration: JSON loading, validation and named presets.

/// Color (de)serialization for [`crate::Rgba8`].
pub(crate) mod color;
/// Configuration data model.
pub mod model;
/// Named configuration variants.
pub mod preset;
