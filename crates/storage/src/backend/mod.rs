//! Storage backend trait and implementations.
//!
//! This module defines the `StorageBackend` trait: the three operations the
//! upload path needs from whatever storage the host exposes (browse a
//! directory, create a directory, upload a file into a directory).

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::local::LocalBackend;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::{Call, MockBackend, UploadMode};
use crate::error::Result;
use crate::models::{Listing, UploadFile, UploadResponse};
use async_trait::async_trait;
use std::path::Path;

/// Unified interface for storage backends.
///
/// All operations are asynchronous since every host storage call may
/// suspend (disk, network, or an RPC into the host process).
///
/// # Path Handling
/// All paths are relative to the storage root and must be validated using
/// [`validate_path`](crate::validate_path) before use. Implementations should
/// enforce this validation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use minup_storage::{StorageBackend, error::Result};
///
/// async fn folder_is_empty(backend: &dyn StorageBackend, folder: &str) -> Result<bool> {
///     let listing = backend.browse(Path::new(folder)).await?;
///     Ok(listing.dirs.is_empty() && listing.files.is_empty())
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Destination identifier of the backend (e.g. `data`). Used for logging
    /// and error messages.
    fn name(&self) -> &str;

    /// List the immediate contents of a directory.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the
    /// directory does not exist.
    async fn browse(&self, path: &Path) -> Result<Listing>;

    /// Create a directory.
    ///
    /// # Notes
    /// - Whether missing parents are created too is backend-specific. Callers
    ///   that need a deep path should go through
    ///   [`ensure_directory`](crate::ensure_directory).
    /// - Returns [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists) if
    ///   the directory is already there.
    async fn create_directory(&self, path: &Path) -> Result<()>;

    /// Store `file` inside `folder`, overwriting any file with the same name.
    ///
    /// The folder must already exist. A successful call may still come back
    /// without a path; see [`UploadResponse`].
    async fn upload(&self, folder: &Path, file: &UploadFile) -> Result<UploadResponse>;
}
