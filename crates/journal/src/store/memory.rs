use super::{DocumentStore, Library};
use crate::error::Result;
use crate::models::{Journal, NewJournal, NewPage, Page};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps journals in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    library: RwLock<Library>,
}

impl MemoryStore {
    /// Every journal, in creation order.
    pub async fn journals(&self) -> Vec<Journal> {
        self.library.read().await.journals.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Journal>> {
        Ok(self.library.read().await.find(name))
    }

    async fn create(&self, journal: NewJournal) -> Result<Journal> {
        Ok(self.library.write().await.create(journal))
    }

    async fn append_page(&self, journal_id: &str, page: NewPage) -> Result<Page> {
        self.library.write().await.append(journal_id, page)
    }
}
