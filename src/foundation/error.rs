/// Convenience result type used across the stamper.
pub type StampResult<T> = Result<T, StampError>;

/// Top-level error taxonomy used by stamping APIs.
///
/// An unavailable *base* image is not an error: [`crate::Stamper::add_stamp`] reports it as
/// `Ok(None)`.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// Invalid caller-provided configuration; raised before any pixel work is done.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while building or compositing raster surfaces.
    #[error("render error: {0}")]
    Render(String),

    /// A referenced font or stamp image could not be loaded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StampError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StampError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`StampError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
