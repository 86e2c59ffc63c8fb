//! # labelgrid-doc
//!
//! The in-memory document model shared by every stage of the label engine.
//!
//! A [`Document`] is an arena of [`Node`]s addressed by [`NodeId`], with
//! explicit parent/child edges. Nodes are never aliased between documents:
//! cloning a subtree always copies into fresh arena slots, and importing
//! from another document copies as well.
//!
//! Template assets and final documents use a small XML dialect, read with
//! `roxmltree` ([`Document::from_xml`]) and written with `quick-xml`
//! ([`Document::to_xml`]).

mod arena;
mod error;
mod node;
mod xml_read;
mod xml_write;

pub use arena::{Document, NodeId};
pub use error::DocError;
pub use node::{
    CellProps, GridProps, ImageData, Node, NodeKind, RowProps, TableProps, VerticalAlign,
};
