//! Label run orchestration.
//!
//! - [`PipelineBuilder`]: fluent builder that validates settings and prepares the grid
//! - [`LabelPipeline`]: de-duplicates, chunks and renders records page by page
//! - [`EngineConfig`]: serde-loadable run settings
//! - [`RunReport`]: what happened, chunk by chunk
//!
//! # Example
//!
//! ```ignore
//! use labelgrid::{PipelineBuilder, TemplateKind};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_template_dir("templates")
//!     .with_kind(TemplateKind::Mini)
//!     .build()?;
//!
//! let output = pipeline.run(records)?;
//! std::fs::write("labels.xml", output.document.to_xml()?)?;
//! ```

mod builder;
pub mod config;
mod controller;
pub mod report;

pub use builder::PipelineBuilder;
pub use config::EngineConfig;
pub use controller::{LabelPipeline, RunOutput, dedupe};
pub use report::{ChunkOutcome, ChunkReport, RunPhase, RunReport};
