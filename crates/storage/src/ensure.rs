use crate::StorageBackend;
use std::path::Path;
use tracing::instrument;

/// Makes sure `path` exists as a directory on `backend`.
///
/// Never fails: returns `false` when the directory could not be established.
/// Three strategies are tried in order:
///
/// 1. **Browse** the path. If it can be listed, it exists.
/// 2. **Create** the path in one call, for backends that create parents.
/// 3. **Walk** the path one segment at a time (`a`, `a/b`, `a/b/c`),
///    browsing each prefix and creating it when browsing fails. The walk
///    stops at the first prefix that can be neither browsed nor created.
///
/// # Examples
///
/// ```no_run
/// use minup_storage::{ensure_directory, backend::LocalBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("data", "/srv/vtt/Data")?;
/// if !ensure_directory(&backend, "uploads/my-world/webp-images").await {
///     eprintln!("no upload folder");
/// }
/// # Ok(())
/// # }
/// ```
#[instrument(skip(backend), fields(backend = backend.name()))]
pub async fn ensure_directory(backend: &dyn StorageBackend, path: &str) -> bool {
    if backend.browse(Path::new(path)).await.is_ok() {
        return true;
    }
    if backend.create_directory(Path::new(path)).await.is_ok() {
        tracing::debug!("Created directory in one call");
        return true;
    }

    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);

        if backend.browse(Path::new(&current)).await.is_ok() {
            continue;
        }
        if let Err(e) = backend.create_directory(Path::new(&current)).await {
            tracing::error!(segment = %current, error = %e, "Failed to create directory");
            return false;
        }
    }
    true
}
