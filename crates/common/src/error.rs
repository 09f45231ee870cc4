//! Error types shared across Handwave crates.

use std::path::PathBuf;

/// Top-level error type for Handwave operations.
#[derive(Debug, thiserror::Error)]
pub enum HandwaveError {
    #[error("Detector error: {message}")]
    Detector { message: String },

    #[error("Gesture error: {message}")]
    Gesture { message: String },

    #[error("Input injection error: {message}")]
    Injection { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandwaveError.
pub type HandwaveResult<T> = Result<T, HandwaveError>;

impl HandwaveError {
    pub fn detector(msg: impl Into<String>) -> Self {
        Self::Detector {
            message: msg.into(),
        }
    }

    pub fn gesture(msg: impl Into<String>) -> Self {
        Self::Gesture {
            message: msg.into(),
        }
    }

    pub fn injection(msg: impl Into<String>) -> Self {
        Self::Injection {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
