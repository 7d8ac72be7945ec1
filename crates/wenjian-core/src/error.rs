//! Error types for the Wenjian core

use thiserror::Error;

use crate::templates::{APOLOGY_REPLY, EMPTY_MESSAGE_REPLY, INVALID_PAYLOAD_REPLY};

/// Result type alias for core operations
pub type WenjianResult<T> = Result<T, WenjianError>;

/// Whether a failure is the caller's to fix or ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Internal,
}

/// Errors raised while parsing a request or building a reply
#[derive(Error, Debug)]
pub enum WenjianError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("knowledge category not found: {0}")]
    CategoryNotFound(String),

    #[error("knowledge base format error: {0}")]
    KnowledgeFormat(String),

    #[error("knowledge base parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WenjianError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WenjianError::EmptyMessage | WenjianError::InvalidPayload(_) => ErrorKind::Input,
            _ => ErrorKind::Internal,
        }
    }

    /// Caller-facing text. Internal details stay in the logs.
    pub fn user_reply(&self) -> &'static str {
        match self {
            WenjianError::EmptyMessage => EMPTY_MESSAGE_REPLY,
            WenjianError::InvalidPayload(_) => INVALID_PAYLOAD_REPLY,
            _ => APOLOGY_REPLY,
        }
    }
}
