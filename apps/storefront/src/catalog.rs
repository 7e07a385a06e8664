//! Catalog loading: a JSON file from config, or the seed catalog compiled
//! into the binary.

use std::path::Path;

use tracing::info;

use satchel_core::Catalog;

use crate::error::AppResult;

const SEED_CATALOG: &str = include_str!("../data/catalog.json");

/// The built-in leather goods catalog.
pub fn seed_catalog() -> AppResult<Catalog> {
    Ok(Catalog::from_json(SEED_CATALOG)?)
}

/// Loads the catalog at `path`, or the seed catalog when `path` is `None`.
pub fn load_catalog(path: Option<&Path>) -> AppResult<Catalog> {
    let catalog = match path {
        Some(path) => {
            info!(?path, "Loading catalog from file");
            let contents = std::fs::read_to_string(path)?;
            Catalog::from_json(&contents)?
        }
        None => {
            info!("Using seed catalog");
            seed_catalog()?
        }
    };

    info!(
        products = catalog.products().len(),
        collections = catalog.collections().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}
