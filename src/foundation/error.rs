/// Convenience result type used across the crate.
pub type LinesResult<T> = Result<T, LinesError>;

/// Top-level error taxonomy used by the sketch, renderer and capture APIs.
#[derive(thiserror::Error, Debug)]
pub enum LinesError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or sampling the text mask.
    #[error("mask error: {0}")]
    Mask(String),

    /// Errors raised by drawing primitives while rendering a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors raised by a capture adapter.
    #[error("capture error: {0}")]
    Capture(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LinesError {
    /// Build a [`LinesError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LinesError::Mask`] value.
    pub fn mask(msg: impl Into<String>) -> Self {
        Self::Mask(msg.into())
    }

    /// Build a [`LinesError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LinesError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
