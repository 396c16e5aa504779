use thiserror::Error;

/// Message shown when the endpoint reports failure without an `error` field.
pub const DEFAULT_TRANSLATION_FAILURE: &str = "translation failed";

/// Message shown when the translation request never got a usable reply.
pub const NETWORK_ERROR_MESSAGE: &str = "network error, check connection";

/// Message shown when writing the output to the clipboard fails.
pub const COPY_FAILED_MESSAGE: &str = "copy failed";

/// Message shown when reading the clipboard fails.
pub const PASTE_FAILED_MESSAGE: &str = "paste failed, check permissions";

// === TranslateError ===

/// Errors produced by a translation attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The endpoint answered with `success: false`.
    #[error("Translation failed: {0}")]
    Failed(String),
    /// The request could not be sent or its reply could not be decoded.
    #[error("Translation network error: {0}")]
    Network(String),
}

impl TranslateError {
    /// Text shown inline to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            TranslateError::Failed(msg) => msg.clone(),
            TranslateError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

// === LanguageError ===

/// Errors fetching the supported language list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The endpoint was unreachable or replied with `success: false`.
    #[error("Language list unavailable: {0}")]
    Unavailable(String),
}

// === ClipboardError ===

/// Errors from clipboard access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard write denied: {0}")]
    CopyDenied(String),
    #[error("Clipboard read denied: {0}")]
    PasteDenied(String),
}

impl ClipboardError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ClipboardError::CopyDenied(_) => COPY_FAILED_MESSAGE,
            ClipboardError::PasteDenied(_) => PASTE_FAILED_MESSAGE,
        }
    }
}

// === StorageError ===

/// Errors from the durable key/value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying database operation failed.
    #[error("Storage database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// The persisted record could not be encoded.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The persisted record exists but is not a valid record.
    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

// === HistoryError ===

/// Errors related to translation history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No history entry at the given position.
    #[error("History entry not found at index {0}")]
    NotFound(usize),
    /// Persisting the history failed.
    #[error("History storage error: {0}")]
    Storage(#[from] StorageError),
}

// === ConfigError ===

/// Errors loading or saving the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

// === AppError ===

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
