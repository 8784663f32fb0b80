//! Ingest Error Types
//!
//! One kind per pipeline step. Each carries the message of the underlying
//! error, which is what ends up in batch failure reports.

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The image could not be converted to WebP
    #[display("{_0}")]
    Conversion(#[error(not(source))] String),
    /// The upload folder could not be established
    #[display("{_0}")]
    Directory(#[error(not(source))] String),
    #[display("{_0}")]
    Upload(#[error(not(source))] String),
    /// The uploaded image could not be added to the journal
    #[display("{_0}")]
    Filing(#[error(not(source))] String),
}

impl ErrorKind {
    /// Which pipeline step failed.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Conversion(_) => "conversion",
            Self::Directory(_) => "directory",
            Self::Upload(_) => "upload",
            Self::Filing(_) => "filing",
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upload(_))
    }
}
