// src/error.rs
use labelgrid_core::template::TemplateError;
use labelgrid_core::{ConfigurationError, RenderError};
use labelgrid_source::SourceError;
use thiserror::Error;

/// A comprehensive error type for a labelling run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Record source error: {0}")]
    Source(#[from] SourceError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<TemplateError> for PipelineError {
    fn from(e: TemplateError) -> Self {
        PipelineError::Configuration(ConfigurationError::Template(e))
    }
}
