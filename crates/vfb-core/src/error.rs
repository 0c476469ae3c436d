//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // REST API Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Request failed: {message}")]
    Http { message: String },

    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Unauthorized (token invalid or expired)")]
    Unauthorized,

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Location / Resolution Errors
    // ─────────────────────────────────────────────────────────────
    #[error("URL query parameter must be one of the following:\n{allowed}")]
    UnknownQueryKey { key: String, allowed: String },

    #[error("Value for query parameter '{key}' is not a valid UUID.\n Value: ({value})")]
    InvalidUuid { key: String, value: String },

    #[error("Specified {key} = '{value}' does not exist!")]
    NotFound { key: String, value: String },

    #[error("Invalid launch location: {message}")]
    Location { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn not_found(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotFound {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn location(message: impl Into<String>) -> Self {
        Self::Location {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::http("connection refused");
        assert_eq!(err.to_string(), "Request failed: connection refused");

        let err = Error::status(502, "https://api.example.org/models/");
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("test_alias", "foo");
        assert_eq!(err.to_string(), "Specified test_alias = 'foo' does not exist!");
    }

    #[test]
    fn test_invalid_uuid_message_names_key_and_value() {
        let err = Error::InvalidUuid {
            key: "model_id".to_string(),
            value: "not-a-uuid".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'model_id'"));
        assert!(msg.contains("(not-a-uuid)"));
    }

    #[test]
    fn test_context_keeps_underlying_error() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        let err = io.context("Failed to write config.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let parsed: std::result::Result<u8, serde_json::Error> = serde_json::from_str("{");
        let err = parsed
            .with_context(|| "Failed to parse offline data".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
