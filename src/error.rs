use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComposerError {
    #[error("invalid ARN: {0}")]
    InvalidArn(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("failed to parse dependency table: {0}")]
    TableParse(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for ComposerError {
    fn from(err: serde_json::Error) -> Self {
        ComposerError::TableParse(err.to_string())
    }
}

impl From<regex::Error> for ComposerError {
    fn from(err: regex::Error) -> Self {
        ComposerError::InvalidPattern(err.to_string())
    }
}
