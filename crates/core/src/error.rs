//! Errors that leave a pass or the engine.

use labelgrid_composer::ComposerError;
use labelgrid_doc::DocError;
use labelgrid_layout::LayoutError;
use labelgrid_template::TemplateError;
use labelgrid_traits::ResourceError;
use thiserror::Error;

/// A setup problem found before any chunk is rendered. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Invalid setting '{name}': {message}")]
    InvalidSetting { name: String, message: String },
}

/// A failure while rendering one chunk. The controller logs it and keeps
/// the best-effort page; it never escapes a run.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Document error: {0}")]
    Doc(#[from] DocError),
    #[error("Sizing error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Composition error: {0}")]
    Composer(#[from] ComposerError),
}
