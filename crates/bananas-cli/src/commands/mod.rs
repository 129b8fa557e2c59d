//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod dispatch;
pub mod export;
pub mod show;

use bananas_core::{Config, LocalStore, StoreRepository};
use tracing::info;

/// Open the grade repository described by the config.
pub fn open_repository(config: &Config) -> anyhow::Result<StoreRepository> {
    let store = LocalStore::load(&config.store.path)?;
    info!(
        "Opened local store {} ({} keys)",
        config.store.path.display(),
        store.len()
    );
    Ok(StoreRepository::with_key(store, config.store.grades_key.clone()))
}
