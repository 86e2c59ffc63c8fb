//! Template kinds and grid templates.
//!
//! ## Key Abstractions
//!
//! - **[`TemplateKind`]**: the closed set of label layouts, each dispatching to a static [`KindSpec`]
//! - **[`GridTemplateBuilder`]**: expands an authored single-cell template into a rows×cols grid
//! - **[`LabelContext`]**: the per-cell field values injected into a grid with [`inject_contexts`]

mod builder;
mod context;
mod error;
mod inject;
mod kind;

pub use builder::{GridTemplateBuilder, INDEX_TOKEN, bound_cells, is_data_cell};
pub use context::{Category, ContextValue, LabelContext, LabelField};
pub use error::TemplateError;
pub use inject::{InjectionStats, inject_contexts};
pub use kind::{FontRule, KindRules, KindSpec, SizeStep, TemplateKind};
