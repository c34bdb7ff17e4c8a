//! Third-party collection registry records

use serde::{Deserialize, Serialize};

/// Off-chain authorization accompanying a third-party publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cheque {
    pub signature: String,
    pub qty: u64,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdParty {
    pub id: String,
    pub name: String,
    pub description: String,
    pub managers: Vec<String>,
    pub max_items: u64,
    pub total_items: u64,
}
