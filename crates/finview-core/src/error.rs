use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed category hierarchy: {0}")]
    MalformedHierarchy(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
