pub mod doc_assertions;
pub mod fixtures;

use labelgrid::{LabelPipeline, PipelineBuilder, PipelineError, TemplateKind};
use labelgrid_core::{Document, NodeId, NodeKind};
use std::path::PathBuf;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// The template assets shipped with the crate.
pub fn shipped_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// A builder for `kind` reading the shipped templates.
pub fn builder_for(kind: TemplateKind) -> PipelineBuilder {
    let _ = env_logger::builder().is_test(true).try_init();
    PipelineBuilder::new()
        .with_template_dir(shipped_templates())
        .with_kind(kind)
}

pub fn pipeline_for(kind: TemplateKind) -> Result<LabelPipeline, PipelineError> {
    builder_for(kind).build()
}

/// Page containers of a composed document, in order.
pub fn pages(doc: &Document) -> Vec<NodeId> {
    doc.children_where(doc.root(), |k| matches!(k, NodeKind::Page { .. }))
}

/// Plain text of every cell of one page, row-major.
pub fn cell_texts(doc: &Document, page: NodeId) -> Vec<String> {
    doc.find_all(page, NodeKind::is_cell)
        .into_iter()
        .map(|cell| doc.text_content(cell))
        .collect()
}

/// Cells of every page, flattened.
pub fn all_cell_texts(doc: &Document) -> Vec<String> {
    pages(doc).into_iter().flat_map(|p| cell_texts(doc, p)).collect()
}
