//! Error types for the storefront front end.

use std::path::PathBuf;

use thiserror::Error;

use crate::messenger::ChatId;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for the expected layout
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required key was not set in the file nor the environment
    #[error("Missing required setting: {0}")]
    MissingKey(&'static str),

    /// A key is set but its value cannot be used
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Errors raised while packing or parsing callback data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Callback data does not belong to this storefront
    #[error("Unexpected callback prefix in '{0}'")]
    WrongPrefix(String),

    /// Callback data has the right prefix but an unknown answer
    #[error("Unknown callback answer '{0}'")]
    UnknownAnswer(String),

    /// Callback data is missing its answer or value part
    #[error("Malformed callback data '{0}'")]
    Malformed(String),

    /// Packed callback data exceeds what the chat platform accepts
    #[error("Callback data is {len} bytes, limit is {limit}")]
    TooLong { len: usize, limit: usize },
}

/// Errors raised while delivering a message
#[derive(Debug, Error)]
pub enum MessengerError {
    /// The chat platform refused the message
    #[error("Delivery to chat {chat} failed: {message}")]
    Delivery { chat: ChatId, message: String },

    /// Local output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors a storefront handler can return
///
/// Remote catalog failures are not in here: handlers report those to the
/// user and carry on.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Messenger(#[from] MessengerError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Result type for storefront handlers
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingKey("SHEET_URL");
        assert_eq!(err.to_string(), "Missing required setting: SHEET_URL");

        let err = ConfigError::InvalidValue {
            key: "ADMIN_CHAT_ID",
            message: "not a number".to_string(),
        };
        assert!(err.to_string().contains("ADMIN_CHAT_ID"));
    }

    #[test]
    fn test_bot_error_is_transparent() {
        let err: BotError = ActionError::UnknownAnswer("buy".to_string()).into();
        assert_eq!(err.to_string(), "Unknown callback answer 'buy'");
    }
}
