//! Strain lineage lookup.
//!
//! The lineage printed on a label is the canonical lineage of the product's
//! strain when the caller's store knows it, otherwise the record's own
//! lineage value. Lookups are synchronous and may fail; the engine treats a
//! failure exactly like "no match".

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for lineage lookups.
#[derive(Error, Debug, Clone)]
pub enum LookupError {
    #[error("Lineage store unavailable: {0}")]
    Unavailable(String),

    #[error("Lineage lookup for '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

/// What the store knows about one strain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrainInfo {
    /// Canonical lineage, e.g. `HYBRID/INDICA`.
    pub canonical_lineage: String,
}

impl StrainInfo {
    pub fn new(canonical_lineage: impl Into<String>) -> Self {
        Self {
            canonical_lineage: canonical_lineage.into(),
        }
    }
}

/// Resolves a strain name to its canonical lineage.
pub trait LineageLookup: Send + Sync + Debug {
    /// Returns `Ok(None)` when the strain is unknown.
    fn lookup(&self, strain: &str) -> Result<Option<StrainInfo>, LookupError>;

    /// Returns a human-readable name for this lookup (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A lookup that never matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLineageLookup;

impl LineageLookup for NoLineageLookup {
    fn lookup(&self, _strain: &str) -> Result<Option<StrainInfo>, LookupError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "NoLineageLookup"
    }
}

/// An in-memory strain table. Names match case-insensitively, ignoring
/// surrounding whitespace.
#[derive(Debug, Default)]
pub struct InMemoryLineageStore {
    strains: RwLock<HashMap<String, StrainInfo>>,
}

fn key(strain: &str) -> String {
    strain.trim().to_lowercase()
}

fn poisoned(operation: &str) -> LookupError {
    log::warn!("Strain table lock poisoned during {}", operation);
    LookupError::Unavailable("strain table lock poisoned".into())
}

impl InMemoryLineageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, strain: &str, lineage: &str) -> Self {
        if let Err(e) = self.insert(strain, lineage) {
            log::warn!("Dropping strain '{}': {}", strain, e);
        }
        self
    }

    pub fn insert(&self, strain: &str, lineage: &str) -> Result<(), LookupError> {
        let mut strains = self
            .strains
            .write()
            .map_err(|_| poisoned("insert"))?;
        strains.insert(key(strain), StrainInfo::new(lineage));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.strains.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for InMemoryLineageStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let strains = iter
            .into_iter()
            .map(|(k, v)| (key(k.as_ref()), StrainInfo::new(v.as_ref())))
            .collect();
        Self {
            strains: RwLock::new(strains),
        }
    }
}

impl LineageLookup for InMemoryLineageStore {
    fn lookup(&self, strain: &str) -> Result<Option<StrainInfo>, LookupError> {
        let strains = self
            .strains
            .read()
            .map_err(|_| poisoned("lookup"))?;
        Ok(strains.get(&key(strain)).cloned())
    }

    fn name(&self) -> &'static str {
        "InMemoryLineageStore"
    }
}
