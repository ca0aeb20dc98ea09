/// Convenience result type used across the crate.
pub type VinylResult<T> = Result<T, VinylError>;

/// Top-level error taxonomy. Every variant is fatal for a run.
#[derive(thiserror::Error, Debug)]
pub enum VinylError {
    /// Malformed or missing input fields in the song dataset.
    #[error("data error: {0}")]
    Data(String),

    /// Missing or invalid design constants.
    #[error("config error: {0}")]
    Config(String),

    /// Failures while building or writing the rendered artifact.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VinylError {
    /// Build a [`VinylError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`VinylError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`VinylError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
