//! # labelgrid
//!
//! Grid-based label sheet composition.
//!
//! Product records go in; a paginated document of rows×cols label grids
//! comes out. Each cell is bound to one record, its text tagged by field
//! with marker spans and sized to fit by the font-sizing pass.
//!
//! The heavy lifting lives in the member crates and is re-exported through
//! `labelgrid-core`. This crate adds the run orchestration
//! ([`PipelineBuilder`], [`LabelPipeline`]) and the command-line tool.

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{
    ChunkOutcome, ChunkReport, EngineConfig, LabelPipeline, PipelineBuilder, RunOutput, RunPhase,
    RunReport,
};

pub use labelgrid_core::{
    Category, ConfigurationError, Document, InMemoryLineageStore, InMemoryResourceProvider,
    LineageLookup, NodeKind, Record, RenderError, ResourceProvider, StrainInfo, TemplateKind,
};
pub use labelgrid_source::{DataSource, VecDataSource, parse_records};
