//! In-memory storage backend for testing.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::models::{Listing, UploadFile, UploadResponse};
use crate::path::{to_storage_string, validate as validate_path};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// One recorded call against a [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Browse(PathBuf),
    CreateDirectory(PathBuf),
    Upload(PathBuf),
}

/// How a [`MockBackend`] answers uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadMode {
    /// Store the file and report its path.
    #[default]
    Store,
    /// Accept the request but report no path.
    EmptyResponse,
    /// Fail every upload with a network error.
    Fail,
}

#[derive(Default)]
struct State {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    calls: Vec<Call>,
}

/// In-memory storage backend for testing.
///
/// Directories and files live behind a [`RwLock`] so all trait methods work
/// on `&self`. Every call is recorded (see [`calls`](Self::calls)) and
/// individual paths can be made to fail, which is what the directory
/// fallback and upload retry tests are built on.
///
/// Like most hosted storage, `create_directory` only creates one level
/// unless [`with_recursive_create`](Self::with_recursive_create) is used.
///
/// # Examples
///
/// ```
/// use minup_storage::StorageBackend;
/// use minup_storage::backend::MockBackend;
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_directories(["uploads/w1"]);
/// assert!(backend.browse(Path::new("uploads")).await.is_ok());
/// assert!(backend.create_directory(Path::new("assets/tokens")).await.is_err());
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    recursive: bool,
    upload_mode: UploadMode,
    failing_browse: HashSet<PathBuf>,
    failing_create: HashSet<PathBuf>,
    failing_uploads: Vec<String>,
    state: RwLock<State>,
}

impl MockBackend {
    /// Create a mock backend with pre-existing directories. Parents of every
    /// given directory exist as well.
    ///
    /// Panics if any path fails validation. If test setup is wrong, then the
    /// test should not pass.
    pub fn with_directories(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        let mut state = State::default();
        for dir in dirs {
            let dir = dir.into();
            let Ok(validated) = validate_path(&dir) else {
                // The panic here is DELIBERATE. MockBackend is intended to be
                // used in tests; panics are expected.
                panic!("MockBackend::with_directories: invalid path {}", dir.display());
            };
            state.dirs.extend(validated.ancestors().filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf));
        }
        Self {
            name: "mock".to_string(),
            recursive: false,
            upload_mode: UploadMode::default(),
            failing_browse: HashSet::new(),
            failing_create: HashSet::new(),
            failing_uploads: Vec::new(),
            state: RwLock::new(state),
        }
    }

    /// Change the name (destination identifier) of the mock backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Let `create_directory` create missing parents.
    pub fn with_recursive_create(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn with_upload_mode(mut self, mode: UploadMode) -> Self {
        self.upload_mode = mode;
        self
    }

    /// Make `browse` fail for this exact path, even if it exists.
    pub fn with_failing_browse(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_browse.insert(path.into());
        self
    }

    /// Make `create_directory` fail for this exact path.
    pub fn with_failing_create(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_create.insert(path.into());
        self
    }

    /// Make uploads of files whose name starts with `prefix` fail.
    pub fn with_failing_upload(mut self, prefix: impl Into<String>) -> Self {
        self.failing_uploads.push(prefix.into());
        self
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<Call> {
        self.state.read().await.calls.clone()
    }

    pub async fn has_directory(&self, path: impl AsRef<Path>) -> bool {
        self.state.read().await.dirs.contains(path.as_ref())
    }

    /// Paths of all stored files.
    pub async fn files(&self) -> Vec<PathBuf> {
        self.state.read().await.files.keys().cloned().collect()
    }

    pub async fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.state.read().await.files.get(path.as_ref()).cloned()
    }

    async fn record(&self, call: Call) {
        self.state.write().await.calls.push(call);
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let dirs: [&str; 0] = [];
        Self::with_directories(dirs)
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn browse(&self, path: &Path) -> Result<Listing> {
        self.record(Call::Browse(path.to_path_buf())).await;
        let path = validate_path(path)?;
        if self.failing_browse.contains(&path) {
            exn::bail!(ErrorKind::Network(format!("browse {} refused", path.display())));
        }
        let guard = self.state.read().await;
        if !guard.dirs.contains(&path) {
            exn::bail!(ErrorKind::NotFound(path));
        }
        let children = |p: &&PathBuf| p.parent() == Some(path.as_path());
        Ok(Listing {
            dirs: guard.dirs.iter().filter(children).cloned().collect(),
            files: guard.files.keys().filter(children).cloned().collect(),
        })
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        self.record(Call::CreateDirectory(path.to_path_buf())).await;
        let path = validate_path(path)?;
        if self.failing_create.contains(&path) {
            exn::bail!(ErrorKind::PermissionDenied(path));
        }
        let mut guard = self.state.write().await;
        if guard.dirs.contains(&path) {
            exn::bail!(ErrorKind::AlreadyExists(path));
        }
        let missing: Vec<PathBuf> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty() && !guard.dirs.contains(*p))
            .map(Path::to_path_buf)
            .collect();
        // `missing` always holds `path` itself; anything more is a parent.
        if missing.len() > 1 && !self.recursive {
            exn::bail!(ErrorKind::NotFound(missing[1].clone()));
        }
        guard.dirs.extend(missing);
        Ok(())
    }

    async fn upload(&self, folder: &Path, file: &UploadFile) -> Result<UploadResponse> {
        self.record(Call::Upload(folder.join(&file.name))).await;
        let target = validate_path(folder.join(&file.name))?;
        if self.upload_mode == UploadMode::Fail || self.failing_uploads.iter().any(|p| file.name.starts_with(p)) {
            exn::bail!(ErrorKind::Network(format!("upload of {} to {} refused", file.name, self.name)));
        }
        if self.upload_mode == UploadMode::EmptyResponse {
            return Ok(UploadResponse::default());
        }
        let mut guard = self.state.write().await;
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty())
            && !guard.dirs.contains(parent)
        {
            exn::bail!(ErrorKind::NotFound(parent.to_path_buf()));
        }
        guard.files.insert(target.clone(), file.data.clone());
        Ok(UploadResponse::stored(to_storage_string(&target)))
    }
}
