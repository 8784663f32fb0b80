//! Path validation for storage-relative paths.
//!
//! Upload folders come from a user-editable template, so every path handed
//! to a backend is normalised here first and may never leave the storage
//! root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalises a storage path.
///
/// `.` and empty segments are dropped and `..` is resolved, but a path may
/// never climb above the storage root. Null bytes, drive prefixes and paths
/// that normalise to nothing are rejected with
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use minup_storage::validate_path;
///
/// assert!(validate_path("uploads/world/webp-images").is_ok());
/// assert!(validate_path("uploads/../assets").is_ok());
/// assert!(validate_path("../outside").is_err());
/// assert!(validate_path("").is_err());
/// assert_eq!(
///     validate_path("uploads//./world/").unwrap(),
///     Path::new("uploads/world")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let mut components = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but cause
                // truncation in C-based syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
            },
        }
    }
    match components.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
        false => Ok(components.into_iter().collect()),
    }
}

/// Renders a validated path the way hosts report it: `/`-separated,
/// regardless of platform.
pub(crate) fn to_storage_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
