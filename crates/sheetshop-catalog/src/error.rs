//! Error types for catalog access.

use thiserror::Error;

use crate::auth::AuthError;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while reading the catalog spreadsheet
///
/// "Not found" outcomes (an empty tab, a lookup that matches nothing) are
/// not errors; they are returned as `None` by the provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input does not contain a recognizable spreadsheet identifier
    #[error("Malformed spreadsheet reference: {0}")]
    MalformedReference(String),

    /// Transport, authorization or remote-side failure
    #[error("{}", remote_message(.status, .message))]
    RemoteService {
        /// HTTP status, when the remote side answered at all
        status: Option<u16>,
        message: String,
    },

    /// The primary-key column is missing from the header row
    #[error("Column '{column}' not found in header of tab '{tab}'")]
    ColumnNotFound { column: String, tab: String },

    /// Column-letter conversion called outside its domain
    #[error("Invalid column index {index} for base {base}")]
    InvalidColumnIndex { index: u32, base: u32 },
}

fn remote_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Remote service error ({}): {}", code, message),
        None => format!("Remote service error: {}", message),
    }
}

impl CatalogError {
    /// Remote failure without an HTTP status (network, timeout, decoding)
    pub fn transport(message: impl Into<String>) -> Self {
        CatalogError::RemoteService {
            status: None,
            message: message.into(),
        }
    }

    /// Remote failure reported with an HTTP status
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        CatalogError::RemoteService {
            status: Some(status),
            message: message.into(),
        }
    }

    /// True for every failure that came from the remote side
    pub fn is_remote(&self) -> bool {
        matches!(self, CatalogError::RemoteService { .. })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return CatalogError::transport(format!("request timed out: {}", err));
        }
        match err.status() {
            Some(status) => CatalogError::status(status.as_u16(), err.to_string()),
            None => CatalogError::transport(err.to_string()),
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        CatalogError::transport(format!("authorization failed: {}", err))
    }
}
