//! Projects, pools and scene manifests

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::now_millis;

/// Placeholder owner for projects that reached the app without an address.
///
/// Distinguishes projects lost during the storage migration from projects
/// created while logged out, which have no address either.
pub const LEGACY_ETH_ADDRESS: &str = "legacy";

/// Parcel grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: u32,
    pub cols: u32,
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub is_public: bool,
    pub scene_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_address: Option<String>,
    pub layout: Layout,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Project {
    /// Create a new private project with a fresh id
    pub fn new(title: String, scene_id: String, layout: Layout, eth_address: Option<String>) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            thumbnail: String::new(),
            is_public: false,
            scene_id,
            eth_address,
            layout,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace a missing or empty owner with [`LEGACY_ETH_ADDRESS`]
    pub fn mark_legacy_if_unowned(&mut self) {
        let unowned = self
            .eth_address
            .as_deref()
            .map_or(true, |address| address.is_empty());
        if unowned {
            self.eth_address = Some(LEGACY_ETH_ADDRESS.to_string());
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.eth_address.as_deref() == Some(LEGACY_ETH_ADDRESS)
    }
}

/// Scene statistics, reported for pools that have been deployed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatistics {
    pub parcels: u64,
    pub transforms: u64,
    pub gltf_shapes: u64,
    pub nft_shapes: u64,
    pub scripts: u64,
    pub entities: u64,
}

/// A project published to the public scene pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    #[serde(flatten)]
    pub project: Project,
    pub groups: Vec<String>,
    pub likes: u64,
    pub like: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<PoolStatistics>,
}

/// A themed grouping of pools with an activity window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolGroup {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub active_from: i64,
    pub active_until: i64,
}

/// One page of pools plus the unpaginated total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolsPage {
    pub items: Vec<Pool>,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filters, pagination and sorting for the pool listing.
///
/// Serialises straight to the listing's query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Which listing a public project is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicProjectType {
    #[default]
    Public,
    Pool,
}

impl PublicProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicProjectType::Public => "public",
            PublicProjectType::Pool => "pool",
        }
    }
}

/// A project read through one of the public listings
#[derive(Debug, Clone, PartialEq)]
pub enum PublicProject {
    Project(Project),
    Pool(Pool),
}

/// Source of a manifest fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewType {
    #[default]
    Project,
    Pool,
    Public,
}

impl PreviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewType::Project => "project",
            PreviewType::Pool => "pool",
            PreviewType::Public => "public",
        }
    }
}

/// Versioned project + scene document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub project: Project,
    pub scene: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new(
            "Plaza".to_string(),
            "scene-1".to_string(),
            Layout { rows: 2, cols: 3 },
            None,
        )
    }

    // PRJ-U01: New projects get a uuid id and matching timestamps
    #[test]
    fn test_new_project() {
        let project = project();
        assert!(Uuid::parse_str(&project.id).is_ok());
        assert_eq!(project.created_at, project.updated_at);
        assert!(!project.is_public);
    }

    // PRJ-U02: Missing and empty owners become legacy
    #[test]
    fn test_mark_legacy_if_unowned() {
        let mut missing = project();
        missing.mark_legacy_if_unowned();
        assert!(missing.is_legacy());

        let mut empty = project();
        empty.eth_address = Some(String::new());
        empty.mark_legacy_if_unowned();
        assert!(empty.is_legacy());

        let mut owned = project();
        owned.eth_address = Some("0xabc".to_string());
        owned.mark_legacy_if_unowned();
        assert_eq!(owned.eth_address.as_deref(), Some("0xabc"));
    }

    // PRJ-U03: Absent owner is omitted from the serialised project
    #[test]
    fn test_project_serialization_omits_absent_owner() {
        let json = serde_json::to_value(project()).unwrap();
        assert!(json.get("ethAddress").is_none());
        assert_eq!(json["layout"]["rows"], 2);
        assert!(json.get("sceneId").is_some());
    }

    // PRJ-U04: Pool flattens the project fields
    #[test]
    fn test_pool_serialization_flattens_project() {
        let pool = Pool {
            project: project(),
            groups: vec!["g1".to_string()],
            likes: 0,
            like: false,
            statistics: None,
        };
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["title"], "Plaza");
        assert_eq!(json["likes"], 0);
        assert!(json.get("statistics").is_none());
    }

    // PRJ-U05: Unset filters are not serialised
    #[test]
    fn test_pool_filters_serialization() {
        let filters = PoolFilters {
            group: Some("g1".to_string()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json, serde_json::json!({"group": "g1", "sort_order": "desc"}));
    }

    #[test]
    fn test_type_paths() {
        assert_eq!(PreviewType::Pool.as_str(), "pool");
        assert_eq!(PreviewType::default().as_str(), "project");
        assert_eq!(PublicProjectType::default().as_str(), "public");
    }
}
