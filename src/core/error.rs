//! Error taxonomy for the Cursor admin client

use serde_json::Value;
use thiserror::Error;

/// Every transport or HTTP failure, normalized.
///
/// `status_code` is 0 when no HTTP response was received.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct CursorApiError {
    pub status_code: u16,
    pub message: String,
    pub response: Option<Value>,
}

impl CursorApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            response: None,
        }
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }
}

/// Pre-flight checks on daily usage parameters. Raised before any request is sent.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid startDate: must be a positive integer (epoch milliseconds)")]
    InvalidStartDate,
    #[error("Invalid endDate: must be a positive integer (epoch milliseconds)")]
    InvalidEndDate,
    #[error("endDate must be greater than or equal to startDate")]
    EndBeforeStart,
    #[error("Date range cannot exceed 90 days")]
    RangeTooLong,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] CursorApiError),

    #[error("Invalid API key")]
    InvalidApiKey,
}

impl ClientError {
    /// HTTP status of the underlying API failure, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => Some(e.status_code),
            ClientError::InvalidApiKey => Some(401),
            _ => None,
        }
    }
}
