//! Builder command-line client
//!
//! Composition root: parses the command line, builds a `BuilderClient` from
//! the environment and prints each result as pretty JSON.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use builder_auth::{Authorization, BearerAuthorization, NoAuthorization};
use builder_client::BuilderClient;
use builder_common::Config;

#[derive(Parser, Debug)]
#[command(
    name = "builder",
    about = "Command-line client for the Builder API",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List your projects
    Projects,

    /// List items, optionally for one owner address
    Items(OwnerArgs),

    /// List collections, optionally for one owner address
    Collections(OwnerArgs),

    /// Show one collection with its items
    Collection { id: String },

    /// List collection curations
    Curations,

    /// List the default asset packs plus those of an owner
    #[command(name = "asset-packs")]
    AssetPacks(OwnerArgs),

    /// Download an item's contents into a directory
    Contents { item_id: String, dir: PathBuf },
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct OwnerArgs {
    /// Owner address
    #[arg(long)]
    pub owner: Option<String>,
}

/// Authorization for the configured token, or none
pub fn authorization(config: &Config) -> anyhow::Result<Arc<dyn Authorization>> {
    match config.auth_token.as_deref() {
        Some(token) => Ok(Arc::new(
            BearerAuthorization::new(token).context("Invalid BUILDER_AUTH_TOKEN")?,
        )),
        None => {
            tracing::info!("No BUILDER_AUTH_TOKEN set, sending unauthenticated requests");
            Ok(Arc::new(NoAuthorization))
        }
    }
}

/// Run one command and return its JSON output
pub async fn run(command: Commands, client: &BuilderClient) -> anyhow::Result<Value> {
    let output = match command {
        Commands::Projects => serde_json::to_value(client.fetch_projects().await?)?,
        Commands::Items(args) => {
            serde_json::to_value(client.fetch_items(args.owner.as_deref()).await?)?
        }
        Commands::Collections(args) => {
            serde_json::to_value(client.fetch_collections(args.owner.as_deref()).await?)?
        }
        Commands::Collection { id } => {
            let (collection, items) = tokio::try_join!(
                client.fetch_collection(&id),
                client.fetch_collection_items(&id)
            )?;
            serde_json::json!({ "collection": collection, "items": items })
        }
        Commands::Curations => serde_json::to_value(client.fetch_curations().await?)?,
        Commands::AssetPacks(args) => {
            serde_json::to_value(client.fetch_asset_packs(args.owner.as_deref()).await?)?
        }
        Commands::Contents { item_id, dir } => {
            let item = client.fetch_item(&item_id).await?;
            let written = download_contents(client, &item.contents, &dir).await?;
            serde_json::to_value(written)?
        }
    };
    Ok(output)
}

/// Fetch `contents` and write each file under `dir`; returns bytes written per path
pub async fn download_contents(
    client: &BuilderClient,
    contents: &BTreeMap<String, String>,
    dir: &Path,
) -> anyhow::Result<BTreeMap<String, usize>> {
    let targets = contents
        .keys()
        .map(|name| Ok((name.clone(), content_path(dir, name)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let blobs = client.fetch_contents(contents).await?;

    let mut written = BTreeMap::new();
    for (name, target) in targets {
        let Some(blob) = blobs.get(&name) else {
            continue;
        };
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&target, &blob.data)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;
        tracing::debug!(path = %target.display(), bytes = blob.len(), "Content written");
        written.insert(name, blob.len());
    }
    Ok(written)
}

/// Resolve a content path under `dir`, refusing paths that escape it
fn content_path(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if escapes || name.is_empty() {
        bail!("Refusing to write content outside the target directory: {}", name);
    }
    Ok(dir.join(relative))
}
