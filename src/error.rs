//! Crate-level error types.

use std::fmt;

use crate::service::ServiceError;

/// Errors produced by the molview crate.
#[derive(Debug)]
pub enum ViewerError {
    /// A molecule service call failed.
    Service(ServiceError),
    /// An element row failed client-side validation.
    InvalidElement(String),
    /// A molecule upload failed client-side validation.
    InvalidUpload(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background request thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(e) => write!(f, "service error: {e}"),
            Self::InvalidElement(msg) => write!(f, "invalid element: {msg}"),
            Self::InvalidUpload(msg) => write!(f, "invalid upload: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Service(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for ViewerError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
