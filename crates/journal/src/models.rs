use serde::{Deserialize, Serialize};

/// Default permission level of a journal for players who aren't its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    None,
    Limited,
    /// Players can view, not edit.
    #[default]
    Observer,
    Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: String,
    pub name: String,
    /// Ownership for everyone without an explicit grant
    pub ownership: Ownership,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// An image page inside a [`Journal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    /// Storage path of the image
    pub src: String,
    pub image: ImageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Attributes for [`DocumentStore::create`](crate::DocumentStore::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournal {
    pub name: String,
    pub ownership: Ownership,
}

/// Attributes for [`DocumentStore::append_page`](crate::DocumentStore::append_page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub name: String,
    pub src: String,
    pub image: ImageMeta,
}
