//! Asset packs and their assets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geometry counters reported for a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub triangles: u64,
    pub materials: u64,
    pub meshes: u64,
    pub bodies: u64,
    pub entities: u64,
    pub textures: u64,
}

/// A placeable asset.
///
/// `thumbnail` is an absolute contents-storage URL. `model` is a path inside
/// the pack and may carry the `{asset_pack_id}/` segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    pub asset_pack_id: String,
    pub name: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub thumbnail: String,
    pub tags: Vec<String>,
    pub category: String,
    pub contents: BTreeMap<String, String>,
    pub metrics: ModelMetrics,
    pub parameters: Vec<serde_json::Value>,
    pub actions: Vec<serde_json::Value>,
}

impl Asset {
    /// Model path with the owning pack segment removed
    pub fn model_path(&self) -> &str {
        let prefix = format!("{}/", self.asset_pack_id);
        self.model.strip_prefix(prefix.as_str()).unwrap_or(&self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPack {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_address: Option<String>,
    pub assets: Vec<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl AssetPack {
    pub fn find_asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(model: &str) -> Asset {
        Asset {
            id: "a1".to_string(),
            legacy_id: None,
            asset_pack_id: "pack-1".to_string(),
            name: "Tree".to_string(),
            model: model.to_string(),
            script: None,
            thumbnail: "https://builder.example.com/storage/contents/QmThumb".to_string(),
            tags: vec!["nature".to_string()],
            category: "decorations".to_string(),
            contents: BTreeMap::new(),
            metrics: ModelMetrics::default(),
            parameters: Vec::new(),
            actions: Vec::new(),
        }
    }

    // AST-U01: model_path strips only the owning pack segment
    #[test]
    fn test_model_path() {
        assert_eq!(asset("pack-1/tree.glb").model_path(), "tree.glb");
        assert_eq!(asset("tree.glb").model_path(), "tree.glb");
        assert_eq!(asset("other/tree.glb").model_path(), "other/tree.glb");
    }

    // AST-U02: Absent optionals are not serialised
    #[test]
    fn test_asset_serialization() {
        let json = serde_json::to_value(asset("tree.glb")).unwrap();
        assert!(json.get("legacyId").is_none());
        assert!(json.get("script").is_none());
        assert_eq!(json["assetPackId"], "pack-1");
    }

    #[test]
    fn test_find_asset() {
        let pack = AssetPack {
            id: "pack-1".to_string(),
            title: "Nature".to_string(),
            thumbnail: String::new(),
            eth_address: None,
            assets: vec![asset("tree.glb")],
            created_at: None,
            updated_at: None,
        };
        assert!(pack.find_asset("a1").is_some());
        assert!(pack.find_asset("missing").is_none());
    }
}
