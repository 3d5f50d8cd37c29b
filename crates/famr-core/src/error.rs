use thiserror::Error;

/// Errors from the FAMR engine.
#[derive(Debug, Error)]
pub enum FamrError {
    #[error("invalid configuration: {field} -- {detail}")]
    InvalidConfig { field: String, detail: String },

    #[error("engine not trained: no categories have been formed")]
    NotTrained,

    #[error("shape mismatch: expected {expected} input dimensions, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("persistence error: {0}")]
    Persistence(String),
}

impl FamrError {
    pub(crate) fn config(field: &str, detail: impl Into<String>) -> Self {
        FamrError::InvalidConfig {
            field: field.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<std::io::Error> for FamrError {
    fn from(e: std::io::Error) -> Self {
        FamrError::Persistence(e.to_string())
    }
}

/// Convenience type alias for engine results.
pub type FamrResult<T> = Result<T, FamrError>;
