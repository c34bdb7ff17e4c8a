//! Wearable items

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::asset::ModelMetrics;
use crate::now_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Wearable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRarity {
    Unique,
    Mythic,
    Legendary,
    Epic,
    Rare,
    Uncommon,
    Common,
}

impl std::fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ItemRarity::Unique => "unique",
            ItemRarity::Mythic => "mythic",
            ItemRarity::Legendary => "legendary",
            ItemRarity::Epic => "epic",
            ItemRarity::Rare => "rare",
            ItemRarity::Uncommon => "uncommon",
            ItemRarity::Common => "common",
        };
        f.write_str(name)
    }
}

/// Rarity tier as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rarity {
    pub name: String,
    pub price: String,
    pub max_supply: String,
}

/// Approval payload for a collection, passed through unchanged
pub type ItemApprovalData = serde_json::Value;

/// Item entity.
///
/// Optional fields are `None` when the server sent null, and are omitted
/// from the serialised form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub data: serde_json::Value,
    pub metrics: ModelMetrics,
    /// Content path to content hash
    pub contents: BTreeMap<String, String>,
    pub is_published: bool,
    pub is_approved: bool,
    pub in_catalyst: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<ItemRarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalyst_content_hash: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Item {
    /// Create a new unpublished wearable with a fresh id
    pub fn new(name: String, owner: String, data: serde_json::Value) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: String::new(),
            thumbnail: String::new(),
            owner,
            item_type: ItemType::Wearable,
            data,
            metrics: ModelMetrics::default(),
            contents: BTreeMap::new(),
            is_published: false,
            is_approved: false,
            in_catalyst: false,
            collection_id: None,
            token_id: None,
            price: None,
            urn: None,
            beneficiary: None,
            rarity: None,
            total_supply: None,
            current_content_hash: None,
            blockchain_content_hash: None,
            catalyst_content_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Field name used when uploading the file stored at `path`
    pub fn upload_field_name<'a>(&'a self, path: &'a str) -> &'a str {
        self.contents.get(path).map(String::as_str).unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item::new(
            "Hat".to_string(),
            "0xowner".to_string(),
            serde_json::json!({"category": "hat"}),
        )
    }

    // ITM-U01: A fresh item carries no optional keys when serialised
    #[test]
    fn test_new_item_serialization_omits_optionals() {
        let json = serde_json::to_value(item()).unwrap();
        for key in [
            "collectionId",
            "tokenId",
            "price",
            "urn",
            "beneficiary",
            "rarity",
            "totalSupply",
            "currentContentHash",
        ] {
            assert!(json.get(key).is_none(), "{} should be omitted", key);
        }
        assert_eq!(json["type"], "wearable");
        assert_eq!(json["isPublished"], false);
    }

    // ITM-U02: Zero supply is kept
    #[test]
    fn test_zero_total_supply_serialised() {
        let mut item = item();
        item.total_supply = Some(0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["totalSupply"], 0);
    }

    // ITM-U03: Upload field name resolves through the contents map
    #[test]
    fn test_upload_field_name() {
        let mut item = item();
        item.contents
            .insert("model.glb".to_string(), "QmModel".to_string());
        assert_eq!(item.upload_field_name("model.glb"), "QmModel");
        assert_eq!(item.upload_field_name("other.png"), "other.png");
    }

    #[test]
    fn test_rarity_serde() {
        assert_eq!(
            serde_json::to_value(ItemRarity::Legendary).unwrap(),
            "legendary"
        );
        assert_eq!(ItemRarity::Uncommon.to_string(), "uncommon");
    }
}
