//! Result and error types for the core library

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported bank: {0}")]
    UnsupportedBank(String),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a mapping error
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Stable machine-readable code for the presentation envelope
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIGURATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::UnsupportedBank(_) => "UNSUPPORTED_BANK",
            Error::Mapping(_) => "MAPPING_ERROR",
            Error::Upstream(_) => "UPSTREAM_ERROR",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Response envelope produced by presentation adapters
///
/// The core itself only returns plain domain values and `Error`s;
/// wrapping happens at the edge (CLI JSON output, HTTP handlers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ResponseEnvelope<T> {
    /// Create a successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            error_code: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a successful envelope with a human-readable message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Create a failed envelope from a core error
    pub fn fail(error: &Error) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.to_string()),
            error_code: Some(error.code().to_string()),
            timestamp: Utc::now(),
        }
    }

    /// Create a failed envelope from a bare message (no core error available)
    pub fn fail_with_message(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            error_code: None,
            timestamp: Utc::now(),
        }
    }
}

impl<T> From<Result<T>> for ResponseEnvelope<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(&e),
        }
    }
}
