//! Conversion Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A conversion error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source bytes could not be decoded as an image. Don't retry with
    /// the same input.
    #[display("could not decode {_0}")]
    Decode(#[error(not(source))] String),
    /// The decoded image could not be re-encoded.
    #[display("could not encode {_0} as WebP")]
    Encode(#[error(not(source))] String),
    /// The blocking conversion task panicked or was cancelled.
    #[display("conversion task failed")]
    Task,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Decode("map.png".to_string()).to_string(), "could not decode map.png");
        assert_eq!(ErrorKind::Encode("map.png".to_string()).to_string(), "could not encode map.png as WebP");
        assert_eq!(ErrorKind::Task.to_string(), "conversion task failed");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::Decode(String::new()).is_retryable());
        assert!(ErrorKind::Task.is_retryable());
    }
}
