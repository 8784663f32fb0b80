//! Journals of image pages.
//!
//! Every uploaded image gets a page in a named journal. The journal itself
//! lives in whatever document store the host provides ([`DocumentStore`]);
//! [`JournalFiler`] finds (or creates) the target journal and appends the
//! page.

pub mod error;
mod filer;
mod models;
pub mod store;

pub use crate::filer::{Filed, FilingTarget, ImagePage, JournalFiler};
pub use crate::models::{ImageMeta, Journal, NewJournal, NewPage, Ownership, Page};
pub use crate::store::{DocumentStore, StoreHandle};
