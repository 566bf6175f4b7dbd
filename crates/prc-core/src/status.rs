use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrcError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Ordering error: {0}")]
    Ordering(String),
    #[error("Encoding limit exceeded: {0}")]
    EncodingLimit(String),
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("IO error: {0}")]
    Io(String),
}

pub type Status = Result<(), PrcError>;

impl From<std::io::Error> for PrcError {
    fn from(err: std::io::Error) -> Self {
        PrcError::Io(err.to_string())
    }
}

pub fn validation_error(msg: impl Into<String>) -> PrcError {
    PrcError::Validation(msg.into())
}

pub fn ordering_error(msg: impl Into<String>) -> PrcError {
    PrcError::Ordering(msg.into())
}

pub fn limit_error(msg: impl Into<String>) -> PrcError {
    PrcError::EncodingLimit(msg.into())
}

pub fn unsupported(msg: impl Into<String>) -> PrcError {
    PrcError::UnsupportedFeature(msg.into())
}
