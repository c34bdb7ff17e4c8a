//! Wire/domain translation
//!
//! `FromRemote` builds a domain record from its wire form, `ToRemote` does the
//! reverse for records the client sends. Both take the server's
//! [`StorageUrls`] so store-relative content paths can be made absolute on
//! the way in and relative again on the way out.

use chrono::{DateTime, Utc};

use builder_common::StorageUrls;
use builder_domain::{
    Asset, AssetPack, Collection, CollectionCuration, Curation, CurationBase, Item, ItemCuration,
    Layout, Manifest, Pool, PoolGroup, PoolStatistics, Project,
};

use crate::wire::{
    RemoteAsset, RemoteAssetPack, RemoteCollection, RemoteCollectionCuration, RemoteCuration,
    RemoteCurationBase, RemoteItem, RemoteItemCuration, RemoteManifest, RemotePool,
    RemotePoolGroup, RemoteProject,
};

pub trait FromRemote<R>: Sized {
    fn from_remote(remote: R, urls: &StorageUrls) -> Self;
}

pub trait ToRemote {
    type Remote;

    fn to_remote(&self, urls: &StorageUrls) -> Self::Remote;
}

fn millis(date: DateTime<Utc>) -> i64 {
    date.timestamp_millis()
}

/// Out-of-range instants collapse to the epoch
fn datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

impl FromRemote<RemoteProject> for Project {
    fn from_remote(remote: RemoteProject, urls: &StorageUrls) -> Self {
        Project {
            thumbnail: urls.project_thumbnail(&remote.id),
            id: remote.id,
            title: remote.title,
            description: remote.description,
            is_public: remote.is_public,
            scene_id: remote.scene_id,
            eth_address: remote.eth_address,
            layout: Layout {
                rows: remote.rows,
                cols: remote.cols,
            },
            created_at: millis(remote.created_at),
            updated_at: millis(remote.updated_at),
        }
    }
}

impl ToRemote for Project {
    type Remote = RemoteProject;

    fn to_remote(&self, _urls: &StorageUrls) -> RemoteProject {
        RemoteProject {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            thumbnail: None,
            is_public: self.is_public,
            scene_id: self.scene_id.clone(),
            eth_address: self.eth_address.clone(),
            rows: self.layout.rows,
            cols: self.layout.cols,
            created_at: datetime(self.created_at),
            updated_at: datetime(self.updated_at),
        }
    }
}

impl FromRemote<RemotePool> for Pool {
    fn from_remote(remote: RemotePool, urls: &StorageUrls) -> Self {
        let statistics = remote.parcels.map(|parcels| PoolStatistics {
            parcels,
            transforms: remote.transforms.unwrap_or_default(),
            gltf_shapes: remote.gltf_shapes.unwrap_or_default(),
            nft_shapes: remote.nft_shapes.unwrap_or_default(),
            scripts: remote.scripts.unwrap_or_default(),
            entities: remote.entities.unwrap_or_default(),
        });

        let mut project = Project::from_remote(remote.project, urls);
        project.thumbnail = urls.project_preview(&project.id);
        project.is_public = true;

        Pool {
            project,
            groups: remote.groups,
            likes: remote.likes,
            like: remote.like,
            statistics,
        }
    }
}

impl FromRemote<RemotePoolGroup> for PoolGroup {
    fn from_remote(remote: RemotePoolGroup, _urls: &StorageUrls) -> Self {
        PoolGroup {
            id: remote.id,
            name: remote.name,
            is_active: remote.is_active,
            active_from: millis(remote.active_from),
            active_until: millis(remote.active_until),
        }
    }
}

impl FromRemote<RemoteManifest> for Manifest {
    fn from_remote(remote: RemoteManifest, urls: &StorageUrls) -> Self {
        Manifest {
            version: remote.version,
            project: Project::from_remote(remote.project, urls),
            scene: remote.scene,
        }
    }
}

impl ToRemote for Manifest {
    type Remote = RemoteManifest;

    fn to_remote(&self, urls: &StorageUrls) -> RemoteManifest {
        RemoteManifest {
            version: self.version,
            project: self.project.to_remote(urls),
            scene: self.scene.clone(),
        }
    }
}

impl FromRemote<RemoteAssetPack> for AssetPack {
    fn from_remote(remote: RemoteAssetPack, urls: &StorageUrls) -> Self {
        AssetPack {
            thumbnail: urls.asset_pack(remote.thumbnail.as_deref().unwrap_or_default()),
            id: remote.id,
            title: remote.title,
            eth_address: remote.eth_address,
            assets: remote
                .assets
                .into_iter()
                .map(|asset| Asset::from_remote(asset, urls))
                .collect(),
            created_at: remote.created_at.map(millis),
            updated_at: remote.updated_at.map(millis),
        }
    }
}

impl ToRemote for AssetPack {
    type Remote = RemoteAssetPack;

    fn to_remote(&self, urls: &StorageUrls) -> RemoteAssetPack {
        RemoteAssetPack {
            id: self.id.clone(),
            title: self.title.clone(),
            url: None,
            thumbnail: None,
            eth_address: self.eth_address.clone(),
            assets: self.assets.iter().map(|asset| asset.to_remote(urls)).collect(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl FromRemote<RemoteAsset> for Asset {
    fn from_remote(remote: RemoteAsset, urls: &StorageUrls) -> Self {
        Asset {
            thumbnail: urls.contents(&remote.thumbnail),
            id: remote.id,
            legacy_id: remote.legacy_id,
            asset_pack_id: remote.asset_pack_id,
            name: remote.name,
            // The pack segment is not restored here; callers resolve it from asset_pack_id
            model: remote.model,
            script: remote.script,
            tags: remote.tags,
            category: remote.category,
            contents: remote.contents,
            metrics: remote.metrics,
            parameters: remote.parameters,
            actions: remote.actions,
        }
    }
}

impl ToRemote for Asset {
    type Remote = RemoteAsset;

    fn to_remote(&self, urls: &StorageUrls) -> RemoteAsset {
        let pack_segment = format!("{}/", self.asset_pack_id);
        RemoteAsset {
            id: self.id.clone(),
            legacy_id: self.legacy_id.clone(),
            asset_pack_id: self.asset_pack_id.clone(),
            name: self.name.clone(),
            model: self.model.replacen(&pack_segment, "", 1),
            script: self.script.clone(),
            thumbnail: urls.strip_contents_prefix(&self.thumbnail).to_string(),
            tags: self.tags.clone(),
            category: self.category.clone(),
            contents: self.contents.clone(),
            metrics: self.metrics,
            parameters: self.parameters.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl FromRemote<RemoteItem> for Item {
    fn from_remote(remote: RemoteItem, _urls: &StorageUrls) -> Self {
        Item {
            id: remote.id,
            name: remote.name,
            description: remote.description,
            thumbnail: remote.thumbnail,
            owner: remote.eth_address,
            item_type: remote.item_type,
            data: remote.data,
            metrics: remote.metrics,
            contents: remote.contents,
            is_published: remote.is_published,
            is_approved: remote.is_approved,
            in_catalyst: remote.in_catalyst,
            collection_id: remote.collection_id,
            token_id: remote.blockchain_item_id,
            price: remote.price,
            urn: remote.urn,
            beneficiary: remote.beneficiary,
            rarity: remote.rarity,
            total_supply: remote.total_supply,
            current_content_hash: remote.local_content_hash,
            blockchain_content_hash: remote.content_hash,
            catalyst_content_hash: remote.catalyst_content_hash,
            created_at: millis(remote.created_at),
            updated_at: millis(remote.updated_at),
        }
    }
}

impl ToRemote for Item {
    type Remote = RemoteItem;

    /// Publication flags are owned by the server and always sent as `false`
    fn to_remote(&self, _urls: &StorageUrls) -> RemoteItem {
        RemoteItem {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            thumbnail: self.thumbnail.clone(),
            eth_address: self.owner.clone(),
            collection_id: self.collection_id.clone(),
            blockchain_item_id: self.token_id.clone(),
            price: self.price.clone(),
            urn: self.urn.clone(),
            beneficiary: self.beneficiary.clone(),
            rarity: self.rarity,
            total_supply: self.total_supply,
            is_published: false,
            is_approved: false,
            in_catalyst: self.in_catalyst,
            item_type: self.item_type,
            data: self.data.clone(),
            metrics: self.metrics,
            contents: self.contents.clone(),
            content_hash: self.blockchain_content_hash.clone(),
            local_content_hash: self.current_content_hash.clone(),
            catalyst_content_hash: self.catalyst_content_hash.clone(),
            created_at: datetime(self.created_at),
            updated_at: datetime(self.updated_at),
        }
    }
}

impl FromRemote<RemoteCollection> for Collection {
    fn from_remote(remote: RemoteCollection, _urls: &StorageUrls) -> Self {
        Collection {
            id: remote.id,
            name: remote.name,
            owner: remote.eth_address,
            urn: remote.urn,
            is_published: remote.is_published,
            is_approved: remote.is_approved,
            minters: remote.minters,
            managers: remote.managers,
            salt: remote.salt,
            contract_address: remote.contract_address,
            forum_link: remote.forum_link,
            lock: remote.lock.map(millis),
            reviewed_at: remote.reviewed_at.map(millis),
            created_at: millis(remote.created_at),
            updated_at: millis(remote.updated_at),
        }
    }
}

impl ToRemote for Collection {
    type Remote = RemoteCollection;

    /// Publication flags are owned by the server and always sent as `false`
    fn to_remote(&self, _urls: &StorageUrls) -> RemoteCollection {
        RemoteCollection {
            id: self.id.clone(),
            name: self.name.clone(),
            eth_address: self.owner.clone(),
            salt: self.salt.clone(),
            contract_address: self.contract_address.clone(),
            urn: self.urn.clone(),
            is_published: false,
            is_approved: false,
            minters: self.minters.clone(),
            managers: self.managers.clone(),
            forum_link: self.forum_link.clone(),
            lock: self.lock.map(datetime),
            reviewed_at: self.reviewed_at.map(datetime),
            created_at: datetime(self.created_at),
            updated_at: datetime(self.updated_at),
        }
    }
}

fn curation_base(remote: RemoteCurationBase) -> CurationBase {
    CurationBase {
        id: remote.id,
        status: remote.status,
        created_at: millis(remote.created_at),
        updated_at: millis(remote.updated_at),
    }
}

impl FromRemote<RemoteCollectionCuration> for CollectionCuration {
    fn from_remote(remote: RemoteCollectionCuration, _urls: &StorageUrls) -> Self {
        CollectionCuration {
            base: curation_base(remote.base),
            collection_id: remote.collection_id,
        }
    }
}

impl FromRemote<RemoteItemCuration> for ItemCuration {
    fn from_remote(remote: RemoteItemCuration, _urls: &StorageUrls) -> Self {
        ItemCuration {
            base: curation_base(remote.base),
            item_id: remote.item_id,
            content_hash: remote.content_hash,
        }
    }
}

impl FromRemote<RemoteCuration> for Curation {
    fn from_remote(remote: RemoteCuration, urls: &StorageUrls) -> Self {
        match remote {
            RemoteCuration::Item(curation) => {
                Curation::Item(ItemCuration::from_remote(curation, urls))
            }
            RemoteCuration::Collection(curation) => {
                Curation::Collection(CollectionCuration::from_remote(curation, urls))
            }
        }
    }
}

/// Translate every element of a wire list
pub fn from_remote_all<R, T>(remotes: Vec<R>, urls: &StorageUrls) -> Vec<T>
where
    T: FromRemote<R>,
{
    remotes
        .into_iter()
        .map(|remote| T::from_remote(remote, urls))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_domain::{CurationStatus, ItemRarity, ItemType, ModelMetrics};
    use serde_json::json;
    use std::collections::BTreeMap;

    const BASE: &str = "https://builder.example.com";

    fn urls() -> StorageUrls {
        StorageUrls::new(BASE)
    }

    fn remote_item() -> serde_json::Value {
        json!({
            "id": "item-1",
            "name": "Hat",
            "description": "A hat",
            "thumbnail": "thumbnail.png",
            "eth_address": "0xowner",
            "collection_id": null,
            "blockchain_item_id": null,
            "price": null,
            "urn": null,
            "beneficiary": null,
            "rarity": null,
            "total_supply": null,
            "is_published": true,
            "is_approved": true,
            "in_catalyst": false,
            "type": "wearable",
            "data": {"category": "hat", "replaces": [], "hides": []},
            "metrics": {"triangles": 10, "materials": 1, "meshes": 1, "bodies": 1, "entities": 1, "textures": 2},
            "contents": {"thumbnail.png": "QmThumb", "model.glb": "QmModel"},
            "content_hash": null,
            "local_content_hash": "QmLocal",
            "catalyst_content_hash": null,
            "created_at": "2021-06-01T10:00:00.000Z",
            "updated_at": "2021-06-02T10:00:00.000Z"
        })
    }

    fn item() -> Item {
        let remote: RemoteItem = serde_json::from_value(remote_item()).unwrap();
        Item::from_remote(remote, &urls())
    }

    fn collection() -> Collection {
        Collection {
            id: "col-1".to_string(),
            name: "Hats".to_string(),
            owner: "0xowner".to_string(),
            urn: "urn:decentraland:mumbai:collections-v2:0x1".to_string(),
            is_published: false,
            is_approved: false,
            minters: vec!["0xminter".to_string()],
            managers: vec![],
            salt: Some("0xsalt".to_string()),
            contract_address: None,
            forum_link: Some("https://forum.example.com/t/1".to_string()),
            lock: Some(1_622_541_600_123),
            reviewed_at: None,
            created_at: 1_622_541_600_000,
            updated_at: 1_622_628_000_000,
        }
    }

    fn asset(model: &str) -> Asset {
        Asset {
            id: "asset-1".to_string(),
            legacy_id: None,
            asset_pack_id: "pack-1".to_string(),
            name: "Tree".to_string(),
            model: model.to_string(),
            script: Some("game.js".to_string()),
            thumbnail: format!("{}/storage/contents/QmThumb", BASE),
            tags: vec!["nature".to_string()],
            category: "decorations".to_string(),
            contents: BTreeMap::from([("tree.glb".to_string(), "QmTree".to_string())]),
            metrics: ModelMetrics::default(),
            parameters: vec![json!({"id": "speed", "type": "integer"})],
            actions: vec![],
        }
    }

    // TR-U01: Null optionals on the wire are absent from the domain item
    #[test]
    fn test_item_null_optionals_are_omitted() {
        let item = item();
        assert!(item.collection_id.is_none());
        assert!(item.total_supply.is_none());

        let json = serde_json::to_value(&item).unwrap();
        for key in [
            "collectionId",
            "tokenId",
            "price",
            "urn",
            "beneficiary",
            "rarity",
            "totalSupply",
            "blockchainContentHash",
            "catalystContentHash",
        ] {
            assert!(json.get(key).is_none(), "{} must not be present", key);
        }
        assert_eq!(json["currentContentHash"], "QmLocal");
    }

    // TR-U02: Zero total supply survives translation
    #[test]
    fn test_item_zero_total_supply_preserved() {
        let mut wire = remote_item();
        wire["total_supply"] = json!(0);
        let remote: RemoteItem = serde_json::from_value(wire).unwrap();
        let item = Item::from_remote(remote, &urls());
        assert_eq!(item.total_supply, Some(0));
        assert_eq!(item.to_remote(&urls()).total_supply, Some(0));
    }

    // TR-U03: Dates become epoch milliseconds
    #[test]
    fn test_item_dates_are_epoch_millis() {
        let item = item();
        assert_eq!(item.created_at, 1_622_541_600_000);
        assert_eq!(item.updated_at, 1_622_628_000_000);
    }

    // TR-U04: Item round trip keeps every field except publication flags
    #[test]
    fn test_item_round_trip() {
        let mut original = item();
        original.is_published = false;
        original.is_approved = false;
        original.collection_id = Some("col-1".to_string());
        original.token_id = Some("7".to_string());
        original.price = Some("1000000000000000000".to_string());
        original.urn = Some("urn:decentraland:mumbai:collections-v2:0x1:7".to_string());
        original.beneficiary = Some("0xbeneficiary".to_string());
        original.rarity = Some(ItemRarity::Epic);
        original.total_supply = Some(3);
        original.blockchain_content_hash = Some("QmChain".to_string());
        original.in_catalyst = true;

        let remote = original.to_remote(&urls());
        let wire = serde_json::to_value(&remote).unwrap();
        let decoded: RemoteItem = serde_json::from_value(wire).unwrap();
        let round_tripped = Item::from_remote(decoded, &urls());

        assert_eq!(round_tripped, original);
    }

    // TR-U05: Publication flags are reset when sending
    #[test]
    fn test_item_to_remote_resets_publication_flags() {
        let item = item();
        assert!(item.is_published);
        let remote = item.to_remote(&urls());
        assert!(!remote.is_published);
        assert!(!remote.is_approved);
    }

    // TR-U06: Absent domain optionals are sent as explicit nulls
    #[test]
    fn test_item_to_remote_sends_nulls() {
        let json = serde_json::to_value(item().to_remote(&urls())).unwrap();
        let object = json.as_object().unwrap();
        for key in ["collection_id", "price", "rarity", "total_supply", "content_hash"] {
            assert!(object.contains_key(key), "{} must be present", key);
            assert!(object[key].is_null());
        }
        assert_eq!(json["type"], "wearable");
    }

    // TR-U07: Collection round trip, dates included
    #[test]
    fn test_collection_round_trip() {
        let original = collection();
        let wire = serde_json::to_value(original.to_remote(&urls())).unwrap();
        assert!(wire["contract_address"].is_null());
        assert!(wire["reviewed_at"].is_null());
        assert!(wire["lock"].is_string());

        let decoded: RemoteCollection = serde_json::from_value(wire).unwrap();
        assert_eq!(Collection::from_remote(decoded, &urls()), original);
    }

    // TR-U08: Collection publication flags reset, null lists default to empty
    #[test]
    fn test_collection_flags_and_null_lists() {
        let mut published = collection();
        published.is_published = true;
        published.is_approved = true;
        let remote = published.to_remote(&urls());
        assert!(!remote.is_published && !remote.is_approved);

        let decoded: RemoteCollection = serde_json::from_value(json!({
            "id": "c", "name": "n", "eth_address": "0x", "salt": null, "contract_address": null,
            "urn": "u", "is_published": true, "is_approved": false, "minters": null,
            "managers": null, "forum_link": null, "lock": null, "reviewed_at": "2021-01-01T00:00:00Z",
            "created_at": "2021-01-01T00:00:00Z", "updated_at": "2021-01-01T00:00:00Z"
        }))
        .unwrap();
        let collection = Collection::from_remote(decoded, &urls());
        assert!(collection.minters.is_empty());
        assert!(collection.lock.is_none());
        assert_eq!(collection.reviewed_at, Some(1_609_459_200_000));
        assert!(collection.is_published);
    }

    // TR-U09: Project thumbnail is derived, eth address is carried
    #[test]
    fn test_project_from_remote() {
        let remote: RemoteProject = serde_json::from_value(json!({
            "id": "p1", "title": "Plaza", "description": "d", "thumbnail": "ignored.png",
            "is_public": true, "scene_id": "s1", "eth_address": "0xabc", "rows": 2, "cols": 3,
            "created_at": "2021-01-01T00:00:00Z", "updated_at": "2021-01-01T00:00:01Z"
        }))
        .unwrap();
        let project = Project::from_remote(remote, &urls());
        assert_eq!(
            project.thumbnail,
            format!("{}/projects/p1/media/thumbnail.png", BASE)
        );
        assert_eq!(project.layout, Layout { rows: 2, cols: 3 });
        assert_eq!(project.eth_address.as_deref(), Some("0xabc"));
        assert_eq!(project.updated_at - project.created_at, 1_000);
    }

    // TR-U10: Project round trip (thumbnail is derived, so it is compared separately)
    #[test]
    fn test_project_round_trip() {
        let mut original = Project::new(
            "Plaza".to_string(),
            "scene-1".to_string(),
            Layout { rows: 1, cols: 4 },
            Some("0xabc".to_string()),
        );
        original.thumbnail = urls().project_thumbnail(&original.id);

        let remote = original.to_remote(&urls());
        assert!(remote.thumbnail.is_none());
        let decoded: RemoteProject =
            serde_json::from_value(serde_json::to_value(&remote).unwrap()).unwrap();
        assert_eq!(Project::from_remote(decoded, &urls()), original);
    }

    // TR-U11: Pools use the preview thumbnail and only get statistics with parcels
    #[test]
    fn test_pool_from_remote() {
        let base = json!({
            "id": "p1", "title": "Pool", "description": "", "is_public": false,
            "scene_id": "s1", "eth_address": "0x1", "rows": 1, "cols": 1,
            "created_at": "2021-01-01T00:00:00Z", "updated_at": "2021-01-01T00:00:00Z",
            "groups": ["g1"], "likes": 4, "like": true
        });

        let without_stats: RemotePool = serde_json::from_value(base.clone()).unwrap();
        let pool = Pool::from_remote(without_stats, &urls());
        assert!(pool.statistics.is_none());
        assert!(pool.project.is_public);
        assert_eq!(
            pool.project.thumbnail,
            format!("{}/projects/p1/media/preview.png", BASE)
        );
        assert_eq!(pool.likes, 4);

        let mut with_stats = base;
        with_stats["parcels"] = json!(0);
        with_stats["entities"] = json!(12);
        let pool = Pool::from_remote(serde_json::from_value(with_stats).unwrap(), &urls());
        let statistics = pool.statistics.unwrap();
        assert_eq!(statistics.parcels, 0);
        assert_eq!(statistics.entities, 12);
        assert_eq!(statistics.scripts, 0);
    }

    // TR-U12: Asset paths are made absolute on read and relative on write
    #[test]
    fn test_asset_content_paths() {
        let remote = asset("pack-1/tree.glb").to_remote(&urls());
        assert_eq!(remote.thumbnail, "QmThumb");
        assert_eq!(remote.model, "tree.glb");

        let back = Asset::from_remote(remote, &urls());
        assert_eq!(back.thumbnail, format!("{}/storage/contents/QmThumb", BASE));
        // The pack segment is not restored on read
        assert_eq!(back.model, "tree.glb");
    }

    // TR-U13: Assets without the pack segment round-trip exactly
    #[test]
    fn test_asset_round_trip() {
        let original = asset("tree.glb");
        let wire = serde_json::to_value(original.to_remote(&urls())).unwrap();
        assert!(wire["legacy_id"].is_null());
        let decoded: RemoteAsset = serde_json::from_value(wire).unwrap();
        assert_eq!(Asset::from_remote(decoded, &urls()), original);
    }

    // TR-U14: Asset packs omit server-owned fields and derive the thumbnail URL
    #[test]
    fn test_asset_pack_translation() {
        let pack = AssetPack {
            id: "pack-1".to_string(),
            title: "Nature".to_string(),
            thumbnail: "data:image/png;base64,AA==".to_string(),
            eth_address: Some("0xabc".to_string()),
            assets: vec![asset("pack-1/tree.glb")],
            created_at: Some(1),
            updated_at: Some(2),
        };
        let json = serde_json::to_value(pack.to_remote(&urls())).unwrap();
        assert!(json.get("thumbnail").is_none());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["assets"][0]["model"], "tree.glb");

        let remote: RemoteAssetPack = serde_json::from_value(json!({
            "id": "pack-1", "title": "Nature", "thumbnail": "pack-1.png", "eth_address": null,
            "assets": [], "created_at": "2021-01-01T00:00:00Z"
        }))
        .unwrap();
        let pack = AssetPack::from_remote(remote, &urls());
        assert_eq!(
            pack.thumbnail,
            format!("{}/storage/assetPacks/pack-1.png", BASE)
        );
        assert!(pack.eth_address.is_none());
        assert_eq!(pack.created_at, Some(1_609_459_200_000));
        assert!(pack.updated_at.is_none());
    }

    // TR-U15: Curations share their base fields
    #[test]
    fn test_curation_translation() {
        let remote: RemoteCuration = serde_json::from_value(json!({
            "id": "cur-1", "status": "approved", "item_id": "item-1", "content_hash": "QmC",
            "created_at": "2021-01-01T00:00:00Z", "updated_at": "2021-01-01T00:00:02Z"
        }))
        .unwrap();
        match Curation::from_remote(remote, &urls()) {
            Curation::Item(curation) => {
                assert_eq!(curation.base.status, CurationStatus::Approved);
                assert_eq!(curation.item_id, "item-1");
                assert_eq!(curation.content_hash, "QmC");
                assert_eq!(curation.base.updated_at - curation.base.created_at, 2_000);
            }
            other => panic!("expected item curation, got {:?}", other),
        }
    }

    // TR-U16: Pool groups carry their window as epoch ms
    #[test]
    fn test_pool_group_translation() {
        let remote: RemotePoolGroup = serde_json::from_value(json!({
            "id": "g1", "name": "Summer", "is_active": true,
            "active_from": "2021-01-01T00:00:00Z", "active_until": "2021-01-02T00:00:00Z"
        }))
        .unwrap();
        let group = PoolGroup::from_remote(remote, &urls());
        assert_eq!(group.active_until - group.active_from, 86_400_000);
    }

    // TR-U17: Missing required wire fields fail to decode instead of defaulting
    #[test]
    fn test_missing_required_field_fails() {
        let mut wire = remote_item();
        wire.as_object_mut().unwrap().remove("eth_address");
        assert!(serde_json::from_value::<RemoteItem>(wire).is_err());
    }

    #[test]
    fn test_out_of_range_millis_collapse_to_epoch() {
        assert_eq!(datetime(i64::MAX), DateTime::<Utc>::default());
        assert_eq!(item().item_type, ItemType::Wearable);
    }
}
