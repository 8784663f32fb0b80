//! Local filesystem storage backend.
//!
//! Files are stored below a configured root directory and accessed via
//! `tokio::fs`. This is the default (`data`) destination.

use crate::error::{ErrorKind, Result};
use crate::models::{Listing, UploadFile, UploadResponse};
use crate::path::{to_storage_string, validate as validate_path};
use crate::StorageBackend;
use async_trait::async_trait;
use exn::ResultExt;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage backend.
///
/// # Examples
///
/// ```no_run
/// use minup_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("data", "/srv/vtt/Data")?.with_recursive_create();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    /// Root directory that all storage paths are relative to
    root: PathBuf,
    /// Whether `create_directory` also creates missing parents
    recursive: bool,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not absolute or exists but is not a
    /// directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            // Use non-async here; it only happens once on startup and it's not
            // worth making the constructor async.
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self {
            name: name.into(),
            root,
            recursive: false,
        })
    }

    /// Make [`create_directory`](StorageBackend::create_directory) create
    /// missing parent directories as well.
    pub fn with_recursive_create(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Validates the path and joins it with the root directory.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn relative_path(&self, absolute: &Path) -> Result<PathBuf> {
        let relative = absolute.strip_prefix(&self.root).or_raise(|| {
            ErrorKind::BackendError(format!("path `{:?}` is not within root `{:?}`", absolute, self.root))
        })?;
        validate_path(relative)
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn browse(&self, path: &Path) -> Result<Listing> {
        let abs_path = self.absolute_path(path)?;
        let mut entries = fs::read_dir(&abs_path).await.map_err(|e| Self::map_io_error(e, path))?;
        let mut listing = Listing::default();
        while let Some(entry) = entries.next_entry().await.map_err(|e| Self::map_io_error(e, path))? {
            let file_type = entry.file_type().await.map_err(|e| Self::map_io_error(e, path))?;
            let relative = self.relative_path(&entry.path())?;
            if file_type.is_dir() {
                listing.dirs.push(relative);
            } else if file_type.is_file() {
                listing.files.push(relative);
            }
            // Note: silently drop what is most likely a broken symlink.
        }
        listing.dirs.sort();
        listing.files.sort();
        Ok(listing)
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        // create_dir_all succeeds on an existing directory; keep the
        // AlreadyExists contract of the trait.
        if self.recursive && fs::try_exists(&abs_path).await.map_err(ErrorKind::Io)? {
            exn::bail!(ErrorKind::AlreadyExists(path.to_path_buf()));
        }
        let created = match self.recursive {
            true => fs::create_dir_all(&abs_path).await,
            false => fs::create_dir(&abs_path).await,
        };
        created.map_err(|e| Self::map_io_error(e, path))?;
        tracing::debug!(backend = %self.name, path = %path.display(), "Created directory");
        Ok(())
    }

    async fn upload(&self, folder: &Path, file: &UploadFile) -> Result<UploadResponse> {
        let target = validate_path(folder.join(&file.name))?;
        let abs_path = self.root.join(&target);
        // No implicit parent creation: directory setup belongs to the caller.
        fs::write(&abs_path, &file.data).await.map_err(|e| Self::map_io_error(e, &target))?;
        tracing::debug!(backend = %self.name, path = %target.display(), bytes = file.data.len(), "Stored upload");
        Ok(UploadResponse::stored(to_storage_string(&target)))
    }
}
