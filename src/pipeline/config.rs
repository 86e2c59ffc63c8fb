//! Run configuration.

use labelgrid_core::ConfigurationError;
use labelgrid_core::label::DEFAULT_PRIMARY_TYPES;
use labelgrid_core::template::TemplateKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Record field used to detect duplicate records.
pub const DEFAULT_NAME_KEY: &str = "ProductName";

/// Settings of one labelling run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes:
///
/// ```json
/// { "kind": "mini", "scale": 0.9, "total_budget_ms": 30000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub kind: TemplateKind,
    /// Product types that print a lineage; all others print their brand.
    pub primary_categories: Vec<String>,
    pub name_key: String,
    /// Multiplier for every computed font size.
    pub scale: f32,
    /// Time allowed for the post-processing of one chunk.
    pub chunk_budget_ms: Option<u64>,
    /// Time after which no new chunk is started.
    pub total_budget_ms: Option<u64>,
    /// Template asset per kind, overriding the kind's default identifier.
    pub assets: HashMap<TemplateKind, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: TemplateKind::Horizontal,
            primary_categories: DEFAULT_PRIMARY_TYPES.iter().map(|t| t.to_string()).collect(),
            name_key: DEFAULT_NAME_KEY.to_string(),
            scale: 1.0,
            chunk_budget_ms: None,
            total_budget_ms: None,
            assets: HashMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The template asset identifier for the configured kind.
    pub fn asset(&self) -> &str {
        self.assets
            .get(&self.kind)
            .map(String::as_str)
            .unwrap_or(self.kind.spec().asset)
    }

    pub fn chunk_budget(&self) -> Option<Duration> {
        self.chunk_budget_ms.map(Duration::from_millis)
    }

    pub fn total_budget(&self) -> Option<Duration> {
        self.total_budget_ms.map(Duration::from_millis)
    }

    /// Rejects settings no run could use.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "scale".to_string(),
                message: format!("must be a positive number, got {}", self.scale),
            });
        }
        if self.name_key.trim().is_empty() {
            return Err(ConfigurationError::InvalidSetting {
                name: "name_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.asset().trim().is_empty() {
            return Err(ConfigurationError::InvalidSetting {
                name: "assets".to_string(),
                message: format!("empty asset identifier for {}", self.kind),
            });
        }
        Ok(())
    }
}
