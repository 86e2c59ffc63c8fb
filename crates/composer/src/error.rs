use labelgrid_doc::{DocError, NodeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("Document error: {0}")]
    Doc(#[from] DocError),

    #[error("Source node {0:?} does not exist")]
    MissingSource(NodeId),
}
