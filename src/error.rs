// error.rs - Error taxonomy for the linkage pipeline

use thiserror::Error;

/// Errors raised while building locus maps, normalizing metadata or
/// classifying genome pairs.
#[derive(Debug, Error)]
pub enum LinkageError {
    /// A header or table row lacks a field the caller required
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A value cannot be normalized (e.g. invalid calendar year-month)
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LinkageError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        LinkageError::MalformedInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LinkageError::Validation(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LinkageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LinkageError::malformed("header 'abc' has no annotation");
        assert_eq!(err.to_string(), "malformed input: header 'abc' has no annotation");

        let err = LinkageError::validation("month 13");
        assert!(err.to_string().starts_with("validation error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: LinkageError = io.into();
        assert!(matches!(err, LinkageError::Io(_)));
    }
}
