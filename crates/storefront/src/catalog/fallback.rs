//! Static product catalog shipped with the storefront.
//!
//! These are the cards shown before (or instead of) a backend product list:
//! when the backend is unreachable the grid keeps them as-is.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api::Product;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// Errors that can occur when loading the static catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load the catalog YAML at `path`.
///
/// A missing file is not an error: it is logged and yields no products.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    if !path.exists() {
        tracing::warn!("Catalog file does not exist: {:?}", path);
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(count = catalog.len(), "Loaded static catalog");
    Ok(catalog)
}

fn parse_catalog(content: &str) -> Result<Vec<Product>, serde_yaml::Error> {
    serde_yaml::from_str::<CatalogFile>(content).map(|file| file.products)
}
