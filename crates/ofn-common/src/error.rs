//! Error types for OFN

use thiserror::Error;

/// Result type alias for OFN operations
pub type Result<T> = std::result::Result<T, OfnError>;

/// Main error type for OFN
///
/// Malformed field values inside a recognized payload are never errors; they
/// are coerced to defaults during extraction. The only caller-visible
/// normalization failure is [`OfnError::UnrecognizedSchema`].
#[derive(Error, Debug)]
pub enum OfnError {
    #[error("unknown provider/schema")]
    UnrecognizedSchema,

    /// Reading payload input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_schema_message() {
        assert_eq!(OfnError::UnrecognizedSchema.to_string(), "unknown provider/schema");
    }

    #[test]
    fn test_io_error_converts() {
        let err: OfnError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, OfnError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
