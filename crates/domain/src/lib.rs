//! Domain entities for the Builder client
//!
//! In-memory form of every record exchanged with the Builder server:
//! nested, camelCase when serialised, dates as epoch milliseconds, and
//! optional fields omitted entirely when absent.

pub mod asset;
pub mod collection;
pub mod curation;
pub mod item;
pub mod media;
pub mod project;
pub mod third_party;

pub use asset::{Asset, AssetPack, ModelMetrics};
pub use collection::{Collection, ForumPost};
pub use curation::{CollectionCuration, Curation, CurationBase, CurationStatus, ItemCuration};
pub use item::{Item, ItemApprovalData, ItemRarity, ItemType, Rarity};
pub use media::Blob;
pub use project::{
    Layout, Manifest, Pool, PoolFilters, PoolGroup, PoolStatistics, PoolsPage, PreviewType,
    Project, PublicProject, PublicProjectType, SortOrder, LEGACY_ETH_ADDRESS,
};
pub use third_party::{Cheque, ThirdParty};

/// Current time as epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
