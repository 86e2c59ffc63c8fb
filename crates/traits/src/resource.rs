//! Template asset loading.
//!
//! The engine reads exactly one kind of resource itself: the pre-authored
//! template asset of each label kind. Everything else (records, lineage
//! data, output files) belongs to the caller.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),
}

/// Reference-counted asset bytes.
pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads template assets by identifier.
///
/// - `FilesystemResourceProvider` (in `labelgrid-resource`) reads a template directory.
/// - [`InMemoryResourceProvider`] serves embedded assets and test fixtures.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, asset: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, asset: &str) -> bool;

    /// Loads an asset and decodes it as UTF-8.
    fn load_text(&self, asset: &str) -> Result<String, ResourceError> {
        let data = self.load(asset)?;
        std::str::from_utf8(&data)
            .map(str::to_owned)
            .map_err(|e| ResourceError::InvalidFormat(format!("{} is not UTF-8: {}", asset, e)))
    }

    /// Name used in log lines.
    fn name(&self) -> &'static str;
}

/// Assets held in memory, keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    assets: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add`](Self::add) for setting up fixtures.
    pub fn with(self, asset: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut assets) = self.assets.write() {
            assets.insert(asset.into(), Arc::new(data.into()));
        }
        self
    }

    /// Adds or replaces an asset.
    pub fn add(&self, asset: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<(), ResourceError> {
        let asset = asset.into();
        let mut assets = self.assets.write().map_err(|_| ResourceError::LoadFailed {
            path: asset.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(asset, Arc::new(data.into()));
        Ok(())
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, asset: &str) -> Result<SharedResourceData, ResourceError> {
        let assets = self.assets.read().map_err(|_| ResourceError::LoadFailed {
            path: asset.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(asset)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(asset.to_string()))
    }

    fn exists(&self, asset: &str) -> bool {
        self.assets.read().is_ok_and(|a| a.contains_key(asset))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
