/// Convenience result type used across layermint.
pub type LayermintResult<T> = Result<T, LayermintError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum LayermintError {
    /// A required input is missing or empty (category directory, candidate set, config field).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request cannot be satisfied by the available trait space.
    #[error("capacity error: {0}")]
    Capacity(String),

    /// A layer could not be decoded or composited.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing JSON documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayermintError {
    /// Build a [`LayermintError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`LayermintError::Capacity`] value.
    pub fn capacity(msg: impl Into<String>) -> Self {
        Self::Capacity(msg.into())
    }

    /// Build a [`LayermintError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayermintError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for errors raised before any artifact is written.
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Capacity(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
