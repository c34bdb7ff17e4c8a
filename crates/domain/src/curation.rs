//! Curation records for collections and items
//!
//! Both curation kinds embed a shared [`CurationBase`] and differ only in the
//! foreign key they carry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for CurationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurationStatus::Pending => write!(f, "pending"),
            CurationStatus::Approved => write!(f, "approved"),
            CurationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Fields shared by every curation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationBase {
    pub id: String,
    pub status: CurationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCuration {
    #[serde(flatten)]
    pub base: CurationBase,
    pub collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCuration {
    #[serde(flatten)]
    pub base: CurationBase,
    pub item_id: String,
    pub content_hash: String,
}

/// Either kind of curation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Curation {
    Item(ItemCuration),
    Collection(CollectionCuration),
}

impl From<CollectionCuration> for Curation {
    fn from(curation: CollectionCuration) -> Self {
        Curation::Collection(curation)
    }
}

impl From<ItemCuration> for Curation {
    fn from(curation: ItemCuration) -> Self {
        Curation::Item(curation)
    }
}
