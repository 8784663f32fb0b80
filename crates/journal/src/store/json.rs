use super::{DocumentStore, Library};
use crate::error::{ErrorKind, Result};
use crate::models::{Journal, NewJournal, NewPage, Page};
use async_trait::async_trait;
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Journals cached in memory and persisted to a JSON file.
///
/// The file is rewritten after every change. A change that can't be written
/// is not applied in memory either.
///
/// # Examples
///
/// ```no_run
/// use minup_journal::store::JsonFileStore;
///
/// # async fn example() -> minup_journal::error::Result<()> {
/// let store = JsonFileStore::open("/srv/vtt/journals.json").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    library: RwLock<Library>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; it is
    /// only created on the first change.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let library = load(&path).await?;
        tracing::debug!(path = %path.display(), journals = library.journals.len(), "Loaded journal store");
        Ok(Self {
            path,
            library: RwLock::new(library),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, library: &Library) -> Result<()> {
        let json = serde_json::to_vec_pretty(library).or_raise(|| ErrorKind::Persist(self.path.clone()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.or_raise(|| ErrorKind::Persist(self.path.clone()))?;
        }
        fs::write(&self.path, json).await.or_raise(|| ErrorKind::Persist(self.path.clone()))?;
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Library> {
    if !fs::try_exists(path).await.or_raise(|| ErrorKind::Persist(path.to_path_buf()))? {
        return Ok(Library::default());
    }
    let data = fs::read(path).await.or_raise(|| ErrorKind::Persist(path.to_path_buf()))?;
    serde_json::from_slice(&data).or_raise(|| ErrorKind::Persist(path.to_path_buf()))
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Journal>> {
        Ok(self.library.read().await.find(name))
    }

    async fn create(&self, journal: NewJournal) -> Result<Journal> {
        let mut guard = self.library.write().await;
        let mut updated = guard.clone();
        let created = updated.create(journal);
        self.persist(&updated).await?;
        *guard = updated;
        Ok(created)
    }

    async fn append_page(&self, journal_id: &str, page: NewPage) -> Result<Page> {
        let mut guard = self.library.write().await;
        let mut updated = guard.clone();
        let appended = updated.append(journal_id, page)?;
        self.persist(&updated).await?;
        *guard = updated;
        Ok(appended)
    }
}
