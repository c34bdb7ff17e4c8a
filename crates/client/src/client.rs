//! Builder API client
//!
//! One method per remote operation. Every API call goes through the
//! authorized transport and is unwrapped from the `{ok, data, error}`
//! envelope; content downloads use the plain storage transport.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use builder_auth::Authorization;
use builder_common::{Config, StorageUrls};
use builder_domain::media::is_data_url;
use builder_domain::{
    Asset, AssetPack, Blob, Cheque, Collection, CollectionCuration, CurationStatus, ForumPost,
    Item, ItemApprovalData, ItemCuration, Manifest, Pool, PoolFilters, PoolGroup, PoolsPage,
    PreviewType, Project, PublicProject, PublicProjectType, Rarity, ThirdParty,
};

use crate::inflight::InflightRequests;
use crate::migrations::{ManifestMigrations, NoMigrations};
use crate::translate::{from_remote_all, FromRemote, ToRemote};
use crate::transport::{
    with_authorization, ApiRequest, FormPart, HttpTransport, RequestBody, Transport,
    TransportError,
};
use crate::wire::{
    ApiEnvelope, ErrorBody, RemoteAssetPack, RemoteCollection, RemoteCollectionCuration,
    RemoteItem, RemoteItemCuration, RemoteManifest, RemotePage, RemotePool, RemotePoolGroup,
    RemoteProject, RemotePublishRequest, RemotePublishResponse,
};
use crate::{BuilderError, Result};

/// Recorded camera shots uploaded alongside a pool preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaShots {
    pub north: Blob,
    pub east: Blob,
    pub south: Blob,
    pub west: Blob,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedCollection {
    pub collection: Collection,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThirdPartyPublication {
    pub collection: Collection,
    pub items: Vec<Item>,
    pub item_curations: Vec<ItemCuration>,
}

pub struct BuilderClient {
    api: Arc<dyn Transport>,
    storage: Arc<dyn Transport>,
    urls: StorageUrls,
    migrations: Arc<dyn ManifestMigrations>,
}

impl BuilderClient {
    /// Create a client for the configured server. API calls carry the headers
    /// `authorization` computes; content downloads are unauthenticated.
    pub fn new(config: &Config, authorization: Arc<dyn Authorization>) -> Self {
        let http = HttpTransport::new();
        tracing::info!(server_url = %config.server_url, "Builder client created");
        Self::with_transports(
            config.storage_urls(),
            Arc::new(with_authorization(http.clone(), authorization)),
            Arc::new(http),
        )
    }

    /// Create a client from environment configuration
    pub fn from_env(authorization: Arc<dyn Authorization>) -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::new(&config, authorization))
    }

    /// Create a client over explicit transports. `api` is expected to already
    /// carry authorization.
    pub fn with_transports(
        urls: StorageUrls,
        api: Arc<dyn Transport>,
        storage: Arc<dyn Transport>,
    ) -> Self {
        Self {
            api,
            storage,
            urls,
            migrations: Arc::new(NoMigrations::default()),
        }
    }

    pub fn with_migrations(mut self, migrations: Arc<dyn ManifestMigrations>) -> Self {
        self.migrations = migrations;
        self
    }

    pub fn urls(&self) -> &StorageUrls {
        &self.urls
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    async fn request(&self, method: Method, path: &str, body: RequestBody) -> Result<Value> {
        tracing::debug!(method = %method, path = %path, "Builder API request");

        let request = ApiRequest::new(method, self.urls.endpoint(path), path).with_body(body);
        let response = self.api.send(request).await.map_err(api_error)?;

        if response.body.is_empty() {
            return Ok(Value::Null);
        }

        let envelope: ApiEnvelope = serde_json::from_slice(&response.body)?;
        if !envelope.ok {
            return Err(BuilderError::Transport {
                status: Some(response.status),
                message: envelope
                    .error
                    .unwrap_or_else(|| "Unknown API error".to_string()),
            });
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T> {
        let data = self.request(method, path, body).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn request_unit(&self, method: Method, path: &str, body: RequestBody) -> Result<()> {
        self.request(method, path, body).await.map(|_| ())
    }

    // ------------------------------------------------------------------
    // Projects and pools
    // ------------------------------------------------------------------

    pub async fn deploy_to_pool(&self, project_id: &str, groups: Option<&[String]>) -> Result<()> {
        let body = match groups {
            Some(groups) => RequestBody::Json(json!({ "groups": groups })),
            None => RequestBody::Empty,
        };
        self.request_unit(Method::PUT, &format!("/projects/{}/pool", project_id), body)
            .await
    }

    pub async fn upload_media(
        &self,
        project_id: &str,
        preview: Blob,
        shots: MediaShots,
    ) -> Result<()> {
        let MediaShots {
            north,
            east,
            south,
            west,
        } = shots;
        let parts = vec![
            FormPart::new("preview", Arc::new(preview)),
            FormPart::new("north", Arc::new(north)),
            FormPart::new("east", Arc::new(east)),
            FormPart::new("south", Arc::new(south)),
            FormPart::new("west", Arc::new(west)),
        ];
        self.request_unit(
            Method::POST,
            &format!("/projects/{}/media", project_id),
            RequestBody::Multipart(parts),
        )
        .await
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>> {
        let page: RemotePage<RemoteProject> = self
            .request_as(Method::GET, "/projects", RequestBody::Empty)
            .await?;
        Ok(from_remote_all(page.items, &self.urls))
    }

    pub async fn fetch_public_project(
        &self,
        project_id: &str,
        project_type: PublicProjectType,
    ) -> Result<PublicProject> {
        let path = format!("/projects/{}/{}", project_id, project_type.as_str());
        let project = match project_type {
            PublicProjectType::Pool => {
                let remote: RemotePool =
                    self.request_as(Method::GET, &path, RequestBody::Empty).await?;
                PublicProject::Pool(Pool::from_remote(remote, &self.urls))
            }
            PublicProjectType::Public => {
                let remote: RemoteProject =
                    self.request_as(Method::GET, &path, RequestBody::Empty).await?;
                PublicProject::Project(Project::from_remote(remote, &self.urls))
            }
        };
        Ok(project)
    }

    pub async fn fetch_pools_page(&self, filters: &PoolFilters) -> Result<PoolsPage> {
        let query = query_pairs(filters)?;
        let page: RemotePage<RemotePool> = self
            .request_as(Method::GET, "/pools", RequestBody::Query(query))
            .await?;
        Ok(PoolsPage {
            items: from_remote_all(page.items, &self.urls),
            total: page.total,
        })
    }

    pub async fn fetch_pool_groups(&self, active_only: bool) -> Result<Vec<PoolGroup>> {
        let query = vec![("activeOnly".to_string(), active_only.to_string())];
        let groups: Vec<RemotePoolGroup> = self
            .request_as(Method::GET, "/pools/groups", RequestBody::Query(query))
            .await?;
        Ok(from_remote_all(groups, &self.urls))
    }

    pub async fn like_pool(&self, pool_id: &str, like: bool) -> Result<()> {
        let method = if like { Method::PUT } else { Method::DELETE };
        self.request_unit(method, &format!("/pools/{}/likes", pool_id), RequestBody::Empty)
            .await
    }

    /// Save the project together with its scene as a manifest at the current
    /// manifest version.
    pub async fn save_project(&self, project: &Project, scene: &Value) -> Result<()> {
        let manifest = RemoteManifest {
            version: self.migrations.current_version(),
            project: project.to_remote(&self.urls),
            scene: scene.clone(),
        };
        self.request_unit(
            Method::PUT,
            &format!("/projects/{}/manifest", project.id),
            RequestBody::Json(json!({ "manifest": manifest })),
        )
        .await
    }

    /// Upload the project thumbnail. Thumbnails that are not decodable data
    /// URLs are skipped.
    pub async fn save_project_thumbnail(&self, project: &Project) -> Result<()> {
        let Some(blob) = Blob::from_data_url(&project.thumbnail) else {
            tracing::warn!(project_id = %project.id, "Project thumbnail is not a data URL, skipping upload");
            return Ok(());
        };
        self.request_unit(
            Method::POST,
            &format!("/projects/{}/media", project.id),
            RequestBody::Multipart(vec![FormPart::new("thumbnail", Arc::new(blob))]),
        )
        .await
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        self.request_unit(Method::DELETE, &format!("/projects/{}", project_id), RequestBody::Empty)
            .await
    }

    /// Fetch a manifest and run it through the configured migrations.
    ///
    /// Projects without an owner address get the `legacy` sentinel before
    /// migrating.
    pub async fn fetch_manifest(&self, id: &str, preview_type: PreviewType) -> Result<Manifest> {
        let remote: RemoteManifest = self
            .request_as(
                Method::GET,
                &format!("/{}s/{}/manifest", preview_type.as_str(), id),
                RequestBody::Empty,
            )
            .await?;

        let mut manifest = Manifest::from_remote(remote, &self.urls);
        manifest.project.mark_legacy_if_unowned();

        Ok(self.migrations.migrate(manifest))
    }

    // ------------------------------------------------------------------
    // Asset packs
    // ------------------------------------------------------------------

    pub async fn save_asset_pack(&self, asset_pack: &AssetPack) -> Result<()> {
        let remote = asset_pack.to_remote(&self.urls);
        self.request_unit(
            Method::PUT,
            &format!("/assetPacks/{}", remote.id),
            RequestBody::Json(json!({ "assetPack": remote })),
        )
        .await
    }

    /// Upload asset files, one multipart field per content path
    pub async fn save_asset_contents(
        &self,
        asset: &Asset,
        contents: &BTreeMap<String, Arc<Blob>>,
    ) -> Result<()> {
        let parts = contents
            .iter()
            .map(|(path, blob)| FormPart::new(path.as_str(), blob.clone()))
            .collect();
        self.request_unit(
            Method::POST,
            &format!("/assetPacks/{}/assets/{}/files", asset.asset_pack_id, asset.id),
            RequestBody::Multipart(parts),
        )
        .await
    }

    /// Upload the asset pack thumbnail.
    ///
    /// Data URLs are decoded in place; any other URL is downloaded first.
    /// Fails with [`BuilderError::InvalidThumbnail`] when neither yields data.
    pub async fn save_asset_pack_thumbnail(&self, asset_pack: &AssetPack) -> Result<()> {
        let blob = if is_data_url(&asset_pack.thumbnail) {
            Blob::from_data_url(&asset_pack.thumbnail)
        } else {
            self.download(&asset_pack.thumbnail).await
        };

        let Some(blob) = blob else {
            tracing::warn!(asset_pack_id = %asset_pack.id, "Asset pack thumbnail could not be read");
            return Err(BuilderError::InvalidThumbnail);
        };

        self.request_unit(
            Method::POST,
            &format!("/assetPacks/{}/thumbnail", asset_pack.id),
            RequestBody::Multipart(vec![FormPart::new("thumbnail", Arc::new(blob))]),
        )
        .await
    }

    /// Fetch the default asset packs, followed by the packs owned by
    /// `address` when one is given. Both lists are requested concurrently.
    pub async fn fetch_asset_packs(&self, address: Option<&str>) -> Result<Vec<AssetPack>> {
        let by_owner = |owner: &str| {
            let query = vec![("owner".to_string(), owner.to_string())];
            self.request_as::<Vec<RemoteAssetPack>>(
                Method::GET,
                "/assetPacks",
                RequestBody::Query(query),
            )
        };

        let remotes = match address {
            Some(address) => {
                let (mut defaults, owned) =
                    futures::try_join!(by_owner("default"), by_owner(address))?;
                defaults.extend(owned);
                defaults
            }
            None => by_owner("default").await?,
        };

        Ok(from_remote_all(remotes, &self.urls))
    }

    pub async fn delete_asset_pack(&self, asset_pack: &AssetPack) -> Result<()> {
        self.request_unit(
            Method::DELETE,
            &format!("/assetPacks/{}", asset_pack.id),
            RequestBody::Empty,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    pub async fn fetch_items(&self, address: Option<&str>) -> Result<Vec<Item>> {
        let path = match address {
            Some(address) => format!("/{}/items", address),
            None => "/items".to_string(),
        };
        let items: Vec<RemoteItem> = self.request_as(Method::GET, &path, RequestBody::Empty).await?;
        Ok(from_remote_all(items, &self.urls))
    }

    pub async fn fetch_item(&self, item_id: &str) -> Result<Item> {
        let item: RemoteItem = self
            .request_as(Method::GET, &format!("/items/{}", item_id), RequestBody::Empty)
            .await?;
        Ok(Item::from_remote(item, &self.urls))
    }

    pub async fn fetch_collection_items(&self, collection_id: &str) -> Result<Vec<Item>> {
        let items: Vec<RemoteItem> = self
            .request_as(
                Method::GET,
                &format!("/collections/{}/items", collection_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(from_remote_all(items, &self.urls))
    }

    /// Save the item, then upload its contents.
    ///
    /// The upload only starts once the item exists on the server.
    pub async fn save_item(&self, item: &Item, contents: &BTreeMap<String, Arc<Blob>>) -> Result<()> {
        self.request_unit(
            Method::PUT,
            &format!("/items/{}", item.id),
            RequestBody::Json(json!({ "item": item.to_remote(&self.urls) })),
        )
        .await?;
        self.save_item_contents(item, contents).await
    }

    /// Upload item files. Each field is named by the content hash recorded
    /// for its path, or by the path itself when the item has none.
    pub async fn save_item_contents(
        &self,
        item: &Item,
        contents: &BTreeMap<String, Arc<Blob>>,
    ) -> Result<()> {
        if contents.is_empty() {
            return Ok(());
        }

        let parts = contents
            .iter()
            .map(|(path, blob)| FormPart::new(item.upload_field_name(path), blob.clone()))
            .collect();
        self.request_unit(
            Method::POST,
            &format!("/items/{}/files", item.id),
            RequestBody::Multipart(parts),
        )
        .await
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<()> {
        self.request_unit(
            Method::DELETE,
            &format!("/items/{}", item_id),
            RequestBody::Json(json!({})),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    pub async fn fetch_collections(&self, address: Option<&str>) -> Result<Vec<Collection>> {
        let path = match address {
            Some(address) => format!("/{}/collections", address),
            None => "/collections".to_string(),
        };
        let collections: Vec<RemoteCollection> =
            self.request_as(Method::GET, &path, RequestBody::Empty).await?;
        Ok(from_remote_all(collections, &self.urls))
    }

    pub async fn fetch_collection(&self, collection_id: &str) -> Result<Collection> {
        let collection: RemoteCollection = self
            .request_as(
                Method::GET,
                &format!("/collections/{}", collection_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(Collection::from_remote(collection, &self.urls))
    }

    pub async fn publish_standard_collection(&self, collection_id: &str) -> Result<PublishedCollection> {
        let response: RemotePublishResponse = self
            .request_as(
                Method::POST,
                &format!("/collections/{}/publish", collection_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(PublishedCollection {
            collection: Collection::from_remote(response.collection, &self.urls),
            items: from_remote_all(response.items, &self.urls),
        })
    }

    /// Publish a third-party collection with an off-chain cheque.
    ///
    /// The collection, items and item curations in the response are
    /// translated together.
    pub async fn publish_third_party_collection(
        &self,
        collection_id: &str,
        item_ids: &[String],
        cheque: &Cheque,
    ) -> Result<ThirdPartyPublication> {
        let body = serde_json::to_value(RemotePublishRequest { item_ids, cheque })?;
        let response: RemotePublishResponse = self
            .request_as(
                Method::POST,
                &format!("/collections/{}/publish", collection_id),
                RequestBody::Json(body),
            )
            .await?;
        Ok(ThirdPartyPublication {
            collection: Collection::from_remote(response.collection, &self.urls),
            items: from_remote_all(response.items, &self.urls),
            item_curations: from_remote_all(response.item_curations, &self.urls),
        })
    }

    pub async fn save_collection(&self, collection: &Collection, data: &str) -> Result<Collection> {
        let saved: RemoteCollection = self
            .request_as(
                Method::PUT,
                &format!("/collections/{}", collection.id),
                RequestBody::Json(json!({
                    "collection": collection.to_remote(&self.urls),
                    "data": data,
                })),
            )
            .await?;
        Ok(Collection::from_remote(saved, &self.urls))
    }

    pub async fn save_tos(&self, collection: &Collection, email: &str) -> Result<()> {
        self.request_unit(
            Method::POST,
            &format!("/collections/{}/tos", collection.id),
            RequestBody::Json(json!({
                "email": email,
                "collection_address": collection.contract_address,
            })),
        )
        .await
    }

    /// Lock the collection for publishing; returns the lock expiry in epoch ms
    pub async fn lock_collection(&self, collection: &Collection) -> Result<i64> {
        let lock: DateTime<Utc> = self
            .request_as(
                Method::POST,
                &format!("/collections/{}/lock", collection.id),
                RequestBody::Json(json!({ "collection_address": collection.id })),
            )
            .await?;
        Ok(lock.timestamp_millis())
    }

    pub async fn delete_collection(&self, collection_id: &str) -> Result<()> {
        self.request_unit(
            Method::DELETE,
            &format!("/collections/{}", collection_id),
            RequestBody::Json(json!({})),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Curations
    // ------------------------------------------------------------------

    pub async fn fetch_curations(&self) -> Result<Vec<CollectionCuration>> {
        let curations: Vec<RemoteCollectionCuration> = self
            .request_as(Method::GET, "/curations", RequestBody::Empty)
            .await?;
        Ok(from_remote_all(curations, &self.urls))
    }

    pub async fn fetch_item_curations(&self, collection_id: &str) -> Result<Vec<ItemCuration>> {
        let curations: Vec<RemoteItemCuration> = self
            .request_as(
                Method::GET,
                &format!("/collections/{}/itemCurations", collection_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(from_remote_all(curations, &self.urls))
    }

    /// Fetch the collection curation; `None` when the collection has none
    pub async fn fetch_curation(&self, collection_id: &str) -> Result<Option<CollectionCuration>> {
        let curation: Option<RemoteCollectionCuration> = self
            .request_as(
                Method::GET,
                &format!("/collections/{}/curation", collection_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(curation.map(|curation| CollectionCuration::from_remote(curation, &self.urls)))
    }

    pub async fn push_curation(&self, collection_id: &str) -> Result<()> {
        self.request_unit(
            Method::POST,
            &format!("/collections/{}/curation", collection_id),
            RequestBody::Empty,
        )
        .await
    }

    pub async fn push_item_curation(&self, item_id: &str) -> Result<ItemCuration> {
        let curation: RemoteItemCuration = self
            .request_as(
                Method::POST,
                &format!("/items/{}/curation", item_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(ItemCuration::from_remote(curation, &self.urls))
    }

    pub async fn update_curation_status(
        &self,
        collection_id: &str,
        status: CurationStatus,
    ) -> Result<()> {
        self.request_unit(
            Method::PATCH,
            &format!("/collections/{}/curation", collection_id),
            RequestBody::Json(json!({ "curation": { "status": status } })),
        )
        .await
    }

    pub async fn update_item_curation_status(
        &self,
        item_id: &str,
        status: CurationStatus,
    ) -> Result<ItemCuration> {
        let curation: RemoteItemCuration = self
            .request_as(
                Method::PATCH,
                &format!("/items/{}/curation", item_id),
                RequestBody::Json(json!({ "curation": { "status": status } })),
            )
            .await?;
        Ok(ItemCuration::from_remote(curation, &self.urls))
    }

    // ------------------------------------------------------------------
    // Committee, rarities and third parties
    // ------------------------------------------------------------------

    /// Addresses of the curation committee
    pub async fn fetch_committee(&self) -> Result<Vec<String>> {
        self.request_as(Method::GET, "/committee", RequestBody::Empty)
            .await
    }

    /// Open a review thread for the collection; returns the thread link
    pub async fn create_collection_forum_post(
        &self,
        collection: &Collection,
        post: &ForumPost,
    ) -> Result<String> {
        self.request_as(
            Method::POST,
            &format!("/collections/{}/post", collection.id),
            RequestBody::Json(json!({ "forumPost": post })),
        )
        .await
    }

    pub async fn fetch_rarities(&self) -> Result<Vec<Rarity>> {
        self.request_as(Method::GET, "/rarities", RequestBody::Empty)
            .await
    }

    pub async fn fetch_third_parties(&self, manager: Option<&str>) -> Result<Vec<ThirdParty>> {
        let query = manager
            .map(|manager| vec![("manager".to_string(), manager.to_string())])
            .unwrap_or_default();
        self.request_as(Method::GET, "/thirdParties", RequestBody::Query(query))
            .await
    }

    pub async fn fetch_third_party_available_slots(&self, third_party_id: &str) -> Result<u64> {
        self.request_as(
            Method::GET,
            &format!("/thirdParties/{}/slots", third_party_id),
            RequestBody::Empty,
        )
        .await
    }

    pub async fn fetch_approval_data(&self, collection_id: &str) -> Result<ItemApprovalData> {
        self.request_as(
            Method::GET,
            &format!("/collections/{}/approvalData", collection_id),
            RequestBody::Empty,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Content storage
    // ------------------------------------------------------------------

    /// Download one content file by hash, bypassing caches.
    ///
    /// On failure the error message is the response text.
    pub async fn fetch_content(&self, hash: &str) -> Result<Blob> {
        let path = format!("/storage/contents/{}", hash);
        tracing::debug!(hash = %hash, "Fetching content");

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        let request =
            ApiRequest::new(Method::GET, self.urls.contents(hash), path).with_headers(headers);

        let response = self.storage.send(request).await.map_err(|err| {
            let message = err.body_text().unwrap_or_else(|| err.message.clone());
            BuilderError::Transport {
                status: err.status,
                message,
            }
        })?;

        Ok(Blob::new(response.body, response.content_type))
    }

    /// Download several content files, keyed by name.
    ///
    /// Names sharing a hash share one download and receive the same blob.
    /// The first failure fails the whole batch.
    pub async fn fetch_contents(
        &self,
        contents: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, Arc<Blob>>> {
        let mut inflight = InflightRequests::new();
        let mut pending = Vec::with_capacity(contents.len());

        for (name, hash) in contents {
            let download = inflight.get_or_insert_with(hash.as_str(), || async move {
                self.fetch_content(hash).await.map(Arc::new)
            });
            pending.push(async move { download.await.map(|blob| (name.clone(), blob)) });
        }

        tracing::debug!(
            names = contents.len(),
            downloads = inflight.len(),
            "Fetching contents"
        );

        let fetched = try_join_all(pending).await?;
        Ok(fetched.into_iter().collect())
    }

    /// Download an arbitrary URL through the storage transport.
    async fn download(&self, url: &str) -> Option<Blob> {
        if url.trim().is_empty() {
            return None;
        }

        let request = ApiRequest::new(Method::GET, url, url);
        match self.storage.send(request).await {
            Ok(response) if !response.body.is_empty() => {
                Some(Blob::new(response.body, response.content_type))
            }
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "Download failed");
                None
            }
        }
    }
}

/// Rewrite a transport failure, preferring the server's `{error}` text.
fn api_error(err: TransportError) -> BuilderError {
    let server_message = err
        .body
        .as_deref()
        .and_then(|body| serde_json::from_slice::<ErrorBody>(body).ok())
        .map(|body| body.error);

    BuilderError::Transport {
        status: err.status,
        message: server_message.unwrap_or(err.message),
    }
}

/// Flatten a serialisable filter into query pairs, skipping nulls
fn query_pairs<T: Serialize>(value: &T) -> Result<Vec<(String, String)>> {
    let Value::Object(fields) = serde_json::to_value(value)? else {
        return Err(BuilderError::Decode(
            "query parameters must serialise to an object".to_string(),
        ));
    };

    Ok(fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}
