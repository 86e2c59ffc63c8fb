// src/pipeline/builder.rs
use super::config::EngineConfig;
use super::controller::LabelPipeline;
use crate::error::PipelineError;
use labelgrid_core::label::{ComplianceTable, LabelContextBuilder, PrimaryCategories};
use labelgrid_core::layout::{SizingConfig, SpanMaterializer};
use labelgrid_core::template::{GridTemplateBuilder, TemplateKind};
use labelgrid_core::{ConfigurationError, LineageLookup, NoLineageLookup, ResourceProvider};
use labelgrid_resource::FilesystemResourceProvider;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A builder for creating a `LabelPipeline`.
pub struct PipelineBuilder {
    config: EngineConfig,
    provider: Option<Arc<dyn ResourceProvider>>,
    lineage: Arc<dyn LineageLookup>,
    compliance: ComplianceTable,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            provider: None,
            lineage: Arc::new(NoLineageLookup),
            compliance: ComplianceTable::default(),
        }
    }
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with default settings and no template source.
    pub fn new() -> Self { Default::default() }

    /// Replaces every setting with `config`.
    pub fn with_config(mut self, config: EngineConfig) -> Self { self.config = config; self }

    /// Loads settings from a JSON file. Keys missing from the file keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        self.config = EngineConfig::from_json(&source)?;
        Ok(self)
    }

    pub fn with_kind(mut self, kind: TemplateKind) -> Self { self.config.kind = kind; self }

    pub fn with_primary_categories<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.primary_categories = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name_key(mut self, key: impl Into<String>) -> Self { self.config.name_key = key.into(); self }

    pub fn with_scale(mut self, scale: f32) -> Self { self.config.scale = scale; self }

    /// Time allowed for one chunk's post-processing.
    pub fn with_chunk_budget(mut self, budget: Duration) -> Self {
        self.config.chunk_budget_ms = Some(budget.as_millis() as u64);
        self
    }

    /// Time after which no further chunk is started.
    pub fn with_total_budget(mut self, budget: Duration) -> Self {
        self.config.total_budget_ms = Some(budget.as_millis() as u64);
        self
    }

    /// Uses `asset` as the template of `kind`.
    pub fn with_asset(mut self, kind: TemplateKind, asset: impl Into<String>) -> Self {
        self.config.assets.insert(kind, asset.into());
        self
    }

    /// Loads template assets through `provider`.
    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Loads template assets from a directory.
    pub fn with_template_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        self.with_resource_provider(Arc::new(FilesystemResourceProvider::new(dir)))
    }

    pub fn with_lineage_lookup(mut self, lookup: Arc<dyn LineageLookup>) -> Self { self.lineage = lookup; self }

    pub fn with_compliance_table(mut self, table: ComplianceTable) -> Self { self.compliance = table; self }

    /// Validates the settings, loads and expands the template and creates
    /// the `LabelPipeline`. Every configuration problem surfaces here.
    pub fn build(self) -> Result<LabelPipeline, PipelineError> {
        self.config.validate()?;
        let provider = self.provider.ok_or_else(|| ConfigurationError::InvalidSetting {
            name: "templates".to_string(),
            message: "no template source configured. Use `with_template_dir` or `with_resource_provider`."
                .to_string(),
        })?;

        let kind = self.config.kind;
        let grid = GridTemplateBuilder::new(provider)
            .build_from(kind, self.config.asset())
            .map_err(ConfigurationError::from)?;
        log::info!("Prepared {} grid from '{}'", kind, self.config.asset());

        let contexts = LabelContextBuilder::new(kind)
            .with_primary_categories(PrimaryCategories::new(&self.config.primary_categories))
            .with_lineage_lookup(self.lineage)
            .with_compliance_table(self.compliance);
        let materializer = SpanMaterializer::new(kind, SizingConfig { scale: self.config.scale });

        Ok(LabelPipeline::new(self.config, grid, contexts, materializer))
    }
}
