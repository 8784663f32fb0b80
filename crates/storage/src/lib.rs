//! Storage for converted assets.
//!
//! Backends implement [`StorageBackend`]. On top of it, [`ensure_directory`]
//! makes an upload folder exist on backends that can't create nested
//! directories in one go, and [`Uploader`] resolves the folder template and
//! falls back from hosted to local storage.

pub mod backend;
mod ensure;
pub mod error;
mod models;
mod path;
mod upload;

pub use crate::backend::StorageBackend;
pub use crate::ensure::ensure_directory;
pub use crate::models::{Listing, UploadFile, UploadResponse};
pub use crate::path::validate as validate_path;
pub use crate::upload::{Uploader, WORLD_ID_PLACEHOLDER, resolve_folder};
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
