use crate::{BackendHandle, StorageBackend};
use crate::ensure::ensure_directory;
use crate::error::{ErrorKind, Result};
use crate::models::{UploadFile, UploadResponse};
use exn::OptionExt;
use std::path::Path;
use tracing::instrument;

/// Token in folder templates that is replaced by the world identifier.
pub const WORLD_ID_PLACEHOLDER: &str = "{worldId}";

/// Substitutes every [`WORLD_ID_PLACEHOLDER`] in `template`.
///
/// ```
/// use minup_storage::resolve_folder;
///
/// assert_eq!(resolve_folder("uploads/{worldId}/webp-images", "my-world"), "uploads/my-world/webp-images");
/// assert_eq!(resolve_folder("assets/maps", "my-world"), "assets/maps");
/// ```
pub fn resolve_folder(template: &str, world_id: &str) -> String {
    template.replace(WORLD_ID_PLACEHOLDER, world_id)
}

/// Uploads converted assets into the configured folder.
///
/// The target folder is established on a destination right before a file is
/// uploaded there. When a platform-hosted destination is configured, uploads
/// go there first. The local destination is used once as a fallback if the
/// hosted folder can't be established or the hosted upload errors out.
pub struct Uploader {
    local: BackendHandle,
    hosted: Option<BackendHandle>,
    folder_template: String,
    world_id: String,
}

impl Uploader {
    pub fn new(local: BackendHandle, folder_template: impl Into<String>, world_id: impl Into<String>) -> Self {
        Self {
            local,
            hosted: None,
            folder_template: folder_template.into(),
            world_id: world_id.into(),
        }
    }

    /// Prefer `hosted` for uploads, as when running on a hosting platform.
    pub fn with_hosted(mut self, hosted: BackendHandle) -> Self {
        self.hosted = Some(hosted);
        self
    }

    /// The folder an upload would land in: `folder` if given, the configured
    /// template otherwise, with the world identifier substituted.
    pub fn target_folder(&self, folder: Option<&str>) -> String {
        resolve_folder(folder.unwrap_or(&self.folder_template), &self.world_id)
    }

    /// Uploads `file` and returns the path reported by the backend.
    ///
    /// # Errors
    /// - [`ErrorKind::Directory`] if the target folder can't be established
    ///   on the destination that ends up being used.
    /// - [`ErrorKind::Upload`] if the chosen backend answers without a path.
    ///   This is not retried.
    /// - Any error of the local destination, including after a failed hosted
    ///   upload has been retried locally.
    #[instrument(skip_all, fields(file = %file.name))]
    pub async fn upload(&self, file: UploadFile, folder: Option<&str>) -> Result<String> {
        let folder = self.target_folder(folder);
        if let Some(hosted) = &self.hosted {
            match ensure_directory(hosted.as_ref(), &folder).await {
                true => match hosted.upload(Path::new(&folder), &file).await {
                    Ok(response) => return Self::stored_path(hosted.as_ref(), response),
                    Err(e) => {
                        let backend = hosted.name();
                        tracing::warn!(backend, error = %e, "Hosted upload failed, trying local storage");
                    },
                },
                false => {
                    let backend = hosted.name();
                    tracing::warn!(backend, %folder, "Hosted folder unavailable, trying local storage");
                },
            }
        }

        if !ensure_directory(self.local.as_ref(), &folder).await {
            exn::bail!(ErrorKind::Directory(folder));
        }
        let response = self.local.upload(Path::new(&folder), &file).await?;
        Self::stored_path(self.local.as_ref(), response)
    }

    fn stored_path(backend: &dyn StorageBackend, response: UploadResponse) -> Result<String> {
        let path = response.path.ok_or_raise(|| ErrorKind::Upload(backend.name().to_string()))?;
        tracing::info!(backend = backend.name(), %path, "Uploaded");
        Ok(path)
    }
}
