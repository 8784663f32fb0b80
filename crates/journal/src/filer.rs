use crate::error::{ErrorKind, Result};
use crate::models::{ImageMeta, NewJournal, NewPage, Ownership, Page};
use crate::store::StoreHandle;
use exn::ResultExt;
use tracing::instrument;

/// Which journal to file into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingTarget {
    pub name: String,
    /// Create the journal (observer ownership) when it doesn't exist.
    pub create_if_missing: bool,
}

/// An uploaded image to be added as a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePage {
    /// Storage path returned by the upload
    pub src: String,
    /// Page title
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filed {
    pub page: Page,
    /// Whether the journal had to be created for this page
    pub journal_created: bool,
}

/// Files uploaded images as pages of a named journal.
#[derive(Clone)]
pub struct JournalFiler {
    store: StoreHandle,
}

impl JournalFiler {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Appends `image` as a page of the journal named by `target`.
    ///
    /// The page caption is empty. Dimensions are recorded only if both are
    /// known and non-zero.
    ///
    /// # Errors
    /// - [`ErrorKind::NotFound`] if the journal doesn't exist and may not be
    ///   created.
    /// - [`ErrorKind::Lookup`] / [`ErrorKind::Create`] /
    ///   [`ErrorKind::Append`] when the store fails at that step.
    #[instrument(skip_all, fields(journal = %target.name, page = %image.name))]
    pub async fn file_image(&self, target: &FilingTarget, image: ImagePage) -> Result<Filed> {
        let existing = self
            .store
            .find_by_name(&target.name)
            .await
            .or_raise(|| ErrorKind::Lookup(target.name.clone()))?;
        let (journal, journal_created) = match (existing, target.create_if_missing) {
            (Some(journal), _) => (journal, false),
            (None, true) => {
                let new = NewJournal {
                    name: target.name.clone(),
                    ownership: Ownership::Observer,
                };
                let journal = self.store.create(new).await.or_raise(|| ErrorKind::Create(target.name.clone()))?;
                tracing::info!(id = %journal.id, "Created journal");
                (journal, true)
            },
            (None, false) => exn::bail!(ErrorKind::NotFound(target.name.clone())),
        };

        let (width, height) = match (image.width.filter(|w| *w > 0), image.height.filter(|h| *h > 0)) {
            (Some(w), Some(h)) => (Some(w), Some(h)),
            _ => (None, None),
        };
        let new_page = NewPage {
            name: image.name.clone(),
            src: image.src,
            image: ImageMeta {
                caption: String::new(),
                width,
                height,
            },
        };
        let page = self
            .store
            .append_page(&journal.id, new_page)
            .await
            .or_raise(|| ErrorKind::Append(image.name))?;
        tracing::debug!(page_id = %page.id, "Filed image page");
        Ok(Filed { page, journal_created })
    }
}
