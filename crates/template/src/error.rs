use labelgrid_doc::DocError;
use labelgrid_traits::ResourceError;
use thiserror::Error;

/// Errors raised while preparing a grid template. All of them mean the
/// engine is misconfigured and no page can be rendered.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template asset '{asset}' could not be loaded: {source}")]
    AssetMissing {
        asset: String,
        #[source]
        source: ResourceError,
    },

    #[error("Template asset '{asset}' is not a valid document: {source}")]
    InvalidAsset {
        asset: String,
        #[source]
        source: DocError,
    },

    #[error("Template asset '{0}' has no data cell (a cell referencing {{{{Label1.<Field>}}}})")]
    DataCellMissing(String),

    #[error("Document error: {0}")]
    Doc(#[from] DocError),
}
