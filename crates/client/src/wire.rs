//! Wire form of Builder server records
//!
//! Flat, snake_case, dates as RFC 3339 strings. Optional fields are `Option`
//! and always serialise as explicit `null`, apart from the asset pack fields
//! the server fills in itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use builder_domain::{Cheque, CurationStatus, ItemRarity, ItemType, ModelMetrics};

/// Treat an explicit `null` like a missing value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response envelope wrapping every API payload
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Structured error body returned with failing HTTP statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemotePage<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteProject {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Derived from the id on read, never sent on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_public: bool,
    pub scene_id: String,
    #[serde(default)]
    pub eth_address: Option<String>,
    pub rows: u32,
    pub cols: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemotePool {
    #[serde(flatten)]
    pub project: RemoteProject,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<String>,
    #[serde(default)]
    pub parcels: Option<u64>,
    #[serde(default)]
    pub transforms: Option<u64>,
    #[serde(default)]
    pub gltf_shapes: Option<u64>,
    #[serde(default)]
    pub nft_shapes: Option<u64>,
    #[serde(default)]
    pub scripts: Option<u64>,
    #[serde(default)]
    pub entities: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub like: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemotePoolGroup {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub active_from: DateTime<Utc>,
    pub active_until: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteManifest {
    pub version: u32,
    pub project: RemoteProject,
    #[serde(default)]
    pub scene: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAssetPack {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub eth_address: Option<String>,
    pub assets: Vec<RemoteAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAsset {
    pub id: String,
    #[serde(default)]
    pub legacy_id: Option<String>,
    pub asset_pack_id: String,
    pub name: String,
    /// Path relative to the asset pack
    pub model: String,
    #[serde(default)]
    pub script: Option<String>,
    /// Content hash, relative to the contents store
    pub thumbnail: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub category: String,
    pub contents: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: ModelMetrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub thumbnail: String,
    pub eth_address: String,
    pub collection_id: Option<String>,
    pub blockchain_item_id: Option<String>,
    pub price: Option<String>,
    pub urn: Option<String>,
    pub beneficiary: Option<String>,
    pub rarity: Option<ItemRarity>,
    pub total_supply: Option<u64>,
    pub is_published: bool,
    pub is_approved: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_catalyst: bool,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub data: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: ModelMetrics,
    pub contents: BTreeMap<String, String>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub local_content_hash: Option<String>,
    #[serde(default)]
    pub catalyst_content_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCollection {
    pub id: String,
    pub name: String,
    pub eth_address: String,
    pub salt: Option<String>,
    pub contract_address: Option<String>,
    pub urn: String,
    pub is_published: bool,
    pub is_approved: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minters: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub managers: Vec<String>,
    #[serde(default)]
    pub forum_link: Option<String>,
    #[serde(default)]
    pub lock: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCurationBase {
    pub id: String,
    pub status: CurationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCollectionCuration {
    #[serde(flatten)]
    pub base: RemoteCurationBase,
    pub collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteItemCuration {
    #[serde(flatten)]
    pub base: RemoteCurationBase,
    pub item_id: String,
    pub content_hash: String,
}

/// A curation of either kind, discriminated by its foreign key
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RemoteCuration {
    Item(RemoteItemCuration),
    Collection(RemoteCollectionCuration),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemotePublishResponse {
    pub collection: RemoteCollection,
    pub items: Vec<RemoteItem>,
    #[serde(rename = "itemCurations", default)]
    pub item_curations: Vec<RemoteItemCuration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemotePublishRequest<'a> {
    #[serde(rename = "itemIds")]
    pub item_ids: &'a [String],
    pub cheque: &'a Cheque,
}
