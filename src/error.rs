//! Error types for strongbox.

use thiserror::Error;

/// Common error type for strongbox.
#[derive(Error, Debug)]
pub enum StrongboxError {
    /// Database error.
    ///
    /// Wraps errors from the metadata store. Errors from sqlx are
    /// automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Blob storage error.
    ///
    /// The message carries the storage key and the failed operation, never
    /// an on-disk path.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    ///
    /// Also covers "exists but belongs to another owner" and "exists but is
    /// in the wrong state for the requested transition", so callers cannot
    /// probe for files they do not own.
    #[error("{0} not found")]
    NotFound(String),

    /// Metadata record exists but the blob is missing from storage.
    #[error("{0} not found on storage")]
    NotFoundOnStorage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for StrongboxError {
    fn from(e: sqlx::Error) -> Self {
        StrongboxError::Database(e.to_string())
    }
}

/// Result type alias for strongbox operations.
pub type Result<T> = std::result::Result<T, StrongboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = StrongboxError::Validation("file name too long".to_string());
        assert_eq!(err.to_string(), "validation error: file name too long");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = StrongboxError::NotFound("File".to_string());
        assert_eq!(err.to_string(), "File not found");
    }

    #[test]
    fn test_not_found_on_storage_display() {
        let err = StrongboxError::NotFoundOnStorage("File".to_string());
        assert_eq!(err.to_string(), "File not found on storage");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StrongboxError::Storage("write failed for key abc.txt".to_string());
        assert_eq!(err.to_string(), "storage error: write failed for key abc.txt");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StrongboxError = io_err.into();
        assert!(matches!(err, StrongboxError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(StrongboxError::Validation("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
