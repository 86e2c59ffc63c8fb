//! # labelgrid-core
//!
//! The integration core of the label engine.
//!
//! This crate ties the algorithm crates together and adds the passes that
//! guard a page before and after its content is rendered:
//! - **validate**: grid metadata checks, repair and blank rebuild
//! - **cleanup**: removal of leftover marker tokens, across run boundaries
//! - **error**: the configuration and render error taxonomy
//!
//! ## Design Principle
//!
//! Nothing here touches the filesystem or the clock. Template assets and
//! lineage data come in through the traits of `labelgrid-traits`.

// Re-export foundation crates
pub use labelgrid_doc as doc;
pub use labelgrid_style as style_types;
pub use labelgrid_traits as traits;
pub use labelgrid_types as types_base;

// Re-export algorithm crates
pub use labelgrid_composer as composer;
pub use labelgrid_label as label;
pub use labelgrid_layout as layout;
pub use labelgrid_markers as markers;
pub use labelgrid_template as template;

pub mod cleanup;
pub mod error;
pub mod validate;

pub use cleanup::cleanup_residue;
pub use error::{ConfigurationError, RenderError};
pub use validate::{StructuralCorruption, StructuralValidator, ValidationOutcome};

// Re-export commonly used types from foundation crates
pub use doc::{Document, NodeId, NodeKind};
pub use template::{Category, LabelContext, TemplateKind};
pub use types_base::{Color, Record, Size};

// Re-export platform abstraction traits
pub use traits::{
    InMemoryLineageStore, InMemoryResourceProvider, LineageLookup, LookupError,
    NoLineageLookup, ResourceError, ResourceProvider, StrainInfo,
};
