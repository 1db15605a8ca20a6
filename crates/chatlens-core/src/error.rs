//! Error types for chatlens.

use thiserror::Error;

/// Result type alias using chatlens's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for chatlens operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Annotation service call failed
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Response generation failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template file could not be read or parsed
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_annotation() {
        let err = Error::Annotation("service returned 500".to_string());
        assert_eq!(err.to_string(), "Annotation error: service returned 500");
    }

    #[test]
    fn test_error_display_generation() {
        let err = Error::Generation("model timeout".to_string());
        assert_eq!(err.to_string(), "Generation error: model timeout");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing base URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing base URL");
    }

    #[test]
    fn test_error_display_template() {
        let err = Error::Template("line 3: invalid JSON".to_string());
        assert_eq!(err.to_string(), "Template error: line 3: invalid JSON");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty message".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty message");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        let result = get_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::Annotation("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Annotation"));
    }
}
