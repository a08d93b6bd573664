//! Error types for building allowed collision matrices

use thiserror::Error;

/// ACM construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcmError {
    #[error("Joint '{joint}' references unknown link '{link}'")]
    UnknownLink { joint: String, link: String },

    #[error("Link '{0}' is declared more than once")]
    DuplicateLink(String),
}

/// Result type for ACM construction
pub type AcmResult<T> = Result<T, AcmError>;
