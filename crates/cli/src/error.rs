use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("cannot use storage root {}", _0.display())]
    Storage(#[error(not(source))] PathBuf),
    #[display("cannot open journal store {}", _0.display())]
    Journal(#[error(not(source))] PathBuf),
    #[display("cannot read {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
}
