/// Convenience result type used across Stellate.
pub type StellateResult<T> = Result<T, StellateError>;

/// Top-level error taxonomy used by the geometry, construction and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum StellateError {
    /// Non-positive radius or count, zero interval, mismatched lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two chords that should cross are parallel (or one of them is degenerate).
    #[error("no intersection: chords for side {side} are parallel")]
    NoIntersection {
        /// Side index whose chord pair failed to intersect.
        side: usize,
    },

    /// A construction action references geometry that was never computed or is not on stage.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// Malformed script, settings or encoder configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// SVG rasterization or video encoding failure.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StellateError {
    /// Build a [`StellateError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`StellateError::MissingDependency`] value.
    pub fn missing_dependency(msg: impl Into<String>) -> Self {
        Self::MissingDependency(msg.into())
    }

    /// Build a [`StellateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StellateError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StellateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StellateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
