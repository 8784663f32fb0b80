//! Document store trait and implementations.

mod json;
mod memory;

pub use self::json::JsonFileStore;
pub use self::memory::MemoryStore;
use crate::error::{ErrorKind, Result};
use crate::models::{Journal, NewJournal, NewPage, Page};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to a document store.
pub type StoreHandle = Arc<dyn DocumentStore + Send + Sync>;

/// The journal operations the filer needs from the host.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The first journal called `name`, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<Journal>>;

    /// Create an empty journal.
    async fn create(&self, journal: NewJournal) -> Result<Journal>;

    /// Append a page to the journal with id `journal_id`.
    ///
    /// Returns [`UnknownJournal`](ErrorKind::UnknownJournal) if there is no
    /// such journal.
    async fn append_page(&self, journal_id: &str, page: NewPage) -> Result<Page>;
}

/// In-memory state shared by the bundled stores.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Library {
    #[serde(default)]
    journals: Vec<Journal>,
    /// Last id handed out, for journals and pages alike
    #[serde(default)]
    last_id: u64,
}

impl Library {
    fn find(&self, name: &str) -> Option<Journal> {
        self.journals.iter().find(|j| j.name == name).cloned()
    }

    fn create(&mut self, new: NewJournal) -> Journal {
        let journal = Journal {
            id: self.next_id(),
            name: new.name,
            ownership: new.ownership,
            pages: Vec::new(),
        };
        self.journals.push(journal.clone());
        journal
    }

    fn append(&mut self, journal_id: &str, new: NewPage) -> Result<Page> {
        let id = self.next_id();
        let Some(journal) = self.journals.iter_mut().find(|j| j.id == journal_id) else {
            exn::bail!(ErrorKind::UnknownJournal(journal_id.to_string()));
        };
        let page = Page {
            id,
            name: new.name,
            src: new.src,
            image: new.image,
        };
        journal.pages.push(page.clone());
        Ok(page)
    }

    fn next_id(&mut self) -> String {
        self.last_id += 1;
        format!("{:016x}", self.last_id)
    }
}
