//! Client error types.

use std::collections::BTreeMap;

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing or joining failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding failed, or a well-formed body did not match the target type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a body that is not valid JSON.
    #[error("malformed response ({status}): {source}")]
    MalformedResponse {
        /// HTTP status text, e.g. `200 OK`.
        status: String,
        /// Raw response body.
        body: String,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with a 4xx/5xx status.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, unexpected payload or a 5xx status.
    Internal,
    /// Bad caller input or a 4xx status other than 404.
    Invalid,
    /// The server answered 404.
    NotFound,
    /// The response body was not valid JSON.
    MalformedResponse,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::Status { status: 404, .. } => ErrorKind::NotFound,
            Error::InvalidUrl(_) | Error::Config(_) => ErrorKind::Invalid,
            Error::Status { status, .. } if (400..500).contains(status) => ErrorKind::Invalid,
            Error::Http(_) | Error::Json(_) | Error::Status { .. } => ErrorKind::Internal,
        }
    }

    /// Diagnostic key/value pairs attached to the error.
    ///
    /// Malformed responses carry `body` and `status`; error statuses carry
    /// `body` and `status_code`. Other variants have no metadata.
    pub fn metadata(&self) -> BTreeMap<&'static str, String> {
        let mut meta = BTreeMap::new();
        match self {
            Error::MalformedResponse { status, body, .. } => {
                meta.insert("body", body.clone());
                meta.insert("status", status.clone());
            }
            Error::Status { status, body } => {
                meta.insert("body", body.clone());
                meta.insert("status_code", status.to_string());
            }
            _ => {}
        }
        meta
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Status { status, .. } if *status >= 500)
    }

    /// Check if the response body could not be parsed.
    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::MalformedResponse
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
