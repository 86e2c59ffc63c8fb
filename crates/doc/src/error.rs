use crate::arena::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("XML writing error: {0}")]
    XmlWrite(String),

    #[error("Unknown element <{0}>")]
    UnknownElement(String),

    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    #[error("Node {0:?} does not exist in this document")]
    NodeNotFound(NodeId),

    #[error("Node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("Invalid document structure: {0}")]
    Structure(String),
}
