//! Collections

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::now_millis;

/// Collection entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub urn: String,
    pub is_published: bool,
    pub is_approved: bool,
    pub minters: Vec<String>,
    pub managers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_link: Option<String>,
    /// Epoch ms until which the collection is locked for publishing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Collection {
    pub fn new(name: String, owner: String, urn: String) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            owner,
            urn,
            is_published: false,
            is_approved: false,
            minters: Vec::new(),
            managers: Vec::new(),
            salt: None,
            contract_address: None,
            forum_link: None,
            lock: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Review thread opened for a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: String,
    pub raw: String,
}
