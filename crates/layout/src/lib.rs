//! The dynamic font-sizing pass.
//!
//! [`font_size`] maps content, field, kind and scale to a point size.
//! [`SpanMaterializer`] walks a populated grid and rewrites every marker
//! span into styled runs, paragraph by paragraph, until done or until the
//! chunk's [`Deadline`] passes.

use labelgrid_doc::DocError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Document error while materializing spans: {0}")]
    Doc(#[from] DocError),
    #[error("Paragraph {0} vanished during materialization")]
    MissingParagraph(usize),
}

pub mod config;
mod deadline;
mod materialize;
pub mod sizing;

pub use config::SizingConfig;
pub use deadline::Deadline;
pub use materialize::{CellCategories, SizingReport, SpanMaterializer};
pub use sizing::{SpanStyle, font_size, span_style};
