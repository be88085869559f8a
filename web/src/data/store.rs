use serde::Deserialize;
use shared_types::{LocationRecord, RecordStore};
use thiserror::Error;

use crate::settings::LocatorSettings;

#[cfg(feature = "ssr")]
use std::sync::OnceLock;

#[cfg(feature = "ssr")]
static PAGE_DATA: OnceLock<PageData> = OnceLock::new();

/// Everything the locator page is rendered from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageData {
    pub store: RecordStore,
    pub settings: LocatorSettings,
}

#[derive(Debug, Deserialize)]
struct CenterFile {
    #[serde(default)]
    settings: LocatorSettings,
    centers: Vec<LocationRecord>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read center data from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse center data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("center data already initialized")]
    AlreadyInitialized,
}

pub fn parse_page_data(raw: &str, path: &str) -> Result<PageData, StoreError> {
    let file: CenterFile = serde_json::from_str(raw).map_err(|source| StoreError::Parse {
        path: path.to_string(),
        source,
    })?;

    Ok(PageData {
        store: RecordStore::new(file.centers),
        settings: file.settings,
    })
}

pub fn load_page_data(path: &str) -> Result<PageData, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_page_data(&raw, path)
}

#[cfg(feature = "ssr")]
pub fn init_store() -> Result<usize, StoreError> {
    let path = std::env::var("CENTERS_DATA").unwrap_or_else(|_| "data/centers.json".to_string());

    let data = load_page_data(&path)?;
    let count = data.store.len();
    PAGE_DATA
        .set(data)
        .map_err(|_| StoreError::AlreadyInitialized)?;

    tracing::info!(path = %path, centers = count, "center data loaded");
    Ok(count)
}

#[cfg(feature = "ssr")]
pub fn page_data() -> PageData {
    PAGE_DATA.get().cloned().unwrap_or_default()
}

#[cfg(not(feature = "ssr"))]
pub fn page_data() -> PageData {
    PageData::default()
}
