//! Error taxonomy for the gateway and its artifact loader.

use thiserror::Error;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// User input failed a precondition. Surfaced as a warning, never fatal.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("scaling error: {0}")]
    Scaling(String),

    #[error("prediction error: {0}")]
    Prediction(String),

    /// A model artifact is missing, corrupt or fails its checksum. Fatal at startup.
    #[error("failed to load artifact `{artifact}`: {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn artifact(artifact: impl Into<String>, reason: impl ToString) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    /// Validation failures are recovered at the request boundary.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
