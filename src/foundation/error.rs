/// Convenience result type used across Veneer.
pub type VeneerResult<T> = Result<T, VeneerError>;

/// Top-level error taxonomy used by compositing APIs.
///
/// Every variant is a caller contract violation or a backend failure; none of them are retried
/// internally.
#[derive(thiserror::Error, Debug)]
pub enum VeneerError {
    /// Non-positive or overflowing width/height supplied at a construction boundary.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
    },

    /// A batch was opened on a backend that is already building an atlas.
    #[error("atlas build already in progress")]
    AlreadyBuilding,

    /// A draw or read back was issued to a backend with no open batch.
    #[error("no atlas build in progress")]
    NotBuilding,

    /// The backend refused to allocate a pixel buffer.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Malformed caller-provided data (font bytes, buffers, config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Text measurement or rasterization failed.
    #[error("text error: {0}")]
    Text(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VeneerError {
    /// Build a [`VeneerError::InvalidDimensions`] value.
    pub fn invalid_dimensions(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        Self::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Build a [`VeneerError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`VeneerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VeneerError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
