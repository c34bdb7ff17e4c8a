//! Storage and media URL derivation
//!
//! Content and asset pack storage URLs are pure functions of a content hash,
//! project media URLs are pure functions of a project id.

/// URL context for a Builder server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUrls {
    base: String,
}

impl StorageUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL for a service-relative path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `{base}/storage/contents/{hash}`
    pub fn contents(&self, hash: &str) -> String {
        format!("{}/storage/contents/{}", self.base, hash)
    }

    /// `{base}/storage/assetPacks/{hash}`
    pub fn asset_pack(&self, hash: &str) -> String {
        format!("{}/storage/assetPacks/{}", self.base, hash)
    }

    pub fn project_thumbnail(&self, project_id: &str) -> String {
        format!("{}/projects/{}/media/thumbnail.png", self.base, project_id)
    }

    pub fn project_preview(&self, project_id: &str) -> String {
        format!("{}/projects/{}/media/preview.png", self.base, project_id)
    }

    /// Strip the contents storage prefix from an absolute URL.
    ///
    /// Values that do not carry the prefix are returned unchanged. Only a
    /// leading prefix is stripped; a prefix later in the value is left alone.
    pub fn strip_contents_prefix<'a>(&self, url: &'a str) -> &'a str {
        let prefix = self.contents("");
        url.strip_prefix(prefix.as_str()).unwrap_or(url)
    }
}
