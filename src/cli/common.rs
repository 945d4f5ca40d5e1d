//! Common utilities shared across CLI commands.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use crate::config::ReelConfig;
use crate::debug;
use crate::probe::FsProbe;
use crate::resolver::{AssetResolver, Resolution};

/// Multi-threaded runtime for probing and sequencing.
pub fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

/// Resolver for the configured catalog, probing the local filesystem.
pub fn configured_resolver(config: &ReelConfig) -> Result<AssetResolver<FsProbe>> {
    let catalog = config
        .slideshow
        .load_catalog(config.get_root())
        .context("Failed to load photo catalog")?;
    if catalog.is_empty() {
        debug!("resolve"; "catalog is empty, only the wish slide will show");
    } else {
        debug!("resolve"; "{} candidates from {:?} catalog", catalog.len(), config.slideshow.catalog);
    }

    Ok(AssetResolver::new(catalog, FsProbe::new(config.get_root()))
        .with_timeout(config.slideshow.probe_timeout()))
}

/// Resolve once and clone the result out of the resolver.
pub async fn resolve_configured(config: &ReelConfig) -> Result<Resolution> {
    let resolver = configured_resolver(config)?;
    Ok(resolver.resolution().await.clone())
}
