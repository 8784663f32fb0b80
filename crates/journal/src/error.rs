//! Journal Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No journal with this name, and creating one is not allowed
    #[display("journal \"{_0}\" not found")]
    NotFound(#[error(not(source))] String),
    /// The store could not be searched for the journal
    #[display("could not look up journal \"{_0}\"")]
    Lookup(#[error(not(source))] String),
    #[display("could not create journal \"{_0}\"")]
    Create(#[error(not(source))] String),
    #[display("could not add page \"{_0}\" to journal")]
    Append(#[error(not(source))] String),
    /// A store was asked to modify a journal id it doesn't hold
    #[display("no journal with id {_0}")]
    UnknownJournal(#[error(not(source))] String),
    /// The backing file of a store could not be read or written
    #[display("journal store {} is unreadable or unwritable", _0.display())]
    Persist(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persist(_) | Self::Lookup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::NotFound("Maps".into()).to_string(), "journal \"Maps\" not found");
        assert_eq!(ErrorKind::Append("map".into()).to_string(), "could not add page \"map\" to journal");
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorKind::Persist(PathBuf::from("journals.json")).is_retryable());
        assert!(!ErrorKind::NotFound("Maps".into()).is_retryable());
    }
}
