use famr_core::FamrError;
use thiserror::Error;

/// Errors from the host adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("engine error: {0}")]
    Engine(#[from] FamrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("capability not supported: {0}")]
    Unsupported(String),

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("missing value for attribute '{0}'")]
    MissingValue(String),

    #[error("invalid option {option}: {detail}")]
    InvalidOption { option: String, detail: String },
}

/// Adapter result type
pub type AdapterResult<T> = Result<T, AdapterError>;
