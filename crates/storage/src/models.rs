//! Values passed to and returned from storage backends.

use std::path::PathBuf;

/// Contents of a browsed directory, relative to the storage root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// A named blob ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}
impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }
}

/// What a backend reports after an upload.
///
/// Hosts are known to answer a successful request without a path, so it is
/// optional here and checked by the [`Uploader`](crate::Uploader).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResponse {
    pub path: Option<String>,
}
impl UploadResponse {
    pub fn stored(path: impl Into<String>) -> Self {
        Self { path: Some(path.into()) }
    }
}
