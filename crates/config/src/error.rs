use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("unknown setting: {_0}")]
    UnknownSetting(#[error(not(source))] String),
    #[display("unknown drop source: {_0}")]
    UnknownDropSource(#[error(not(source))] String),
    /// The value given for a setting has the wrong type.
    #[display("setting {key} expects {expected}")]
    InvalidType { key: &'static str, expected: &'static str },
    #[display("setting {key} is out of range: {value}")]
    OutOfRange { key: &'static str, value: String },
    /// Configuration sources could not be read or merged.
    #[display("could not load configuration from {}", _0.display())]
    Load(#[error(not(source))] PathBuf),
    /// No file was available and the defaults plus environment overrides
    /// could not be merged.
    #[display("could not load configuration from the environment")]
    Environment,
    #[display("no configuration directory for this platform")]
    NoConfigDir,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed. Only reading the sources
    /// can; bad values stay bad.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Environment)
    }
}
