//! Expands an authored single-cell template into a full page grid.

use crate::error::TemplateError;
use crate::kind::{KindSpec, TemplateKind};
use labelgrid_doc::{Document, GridProps, NodeId, NodeKind, RowProps, TableProps};
use labelgrid_traits::ResourceProvider;
use labelgrid_types::CellIndex;
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// The index token of the authored data cell.
pub const INDEX_TOKEN: &str = "Label1";

static INDEX_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bLabel1\b").expect("BUG: invalid INDEX_TOKEN_RE regex literal"));

static BOUND_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{Label(\d+)\.").expect("BUG: invalid BOUND_CELL_RE regex literal")
});

/// True for text that places the authored cell's first label field.
pub fn is_data_cell(doc: &Document, cell: NodeId) -> bool {
    doc.text_content(cell).contains("{{Label1.")
}

/// The label cells of a prepared grid and the index each is bound to, in
/// document order. Cells outside the label grid, and grid cells whose
/// placeholders are gone, are not listed.
pub fn bound_cells(doc: &Document) -> Vec<(NodeId, CellIndex)> {
    doc.find_all(doc.root(), NodeKind::is_cell)
        .into_iter()
        .filter_map(|cell| {
            let text = doc.text_content(cell);
            let index = BOUND_CELL_RE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .and_then(|n| n.as_str().parse().ok())
                .and_then(CellIndex::new)?;
            Some((cell, index))
        })
        .collect()
}

/// Builds page grids from template assets.
#[derive(Debug, Clone)]
pub struct GridTemplateBuilder {
    provider: Arc<dyn ResourceProvider>,
}

impl GridTemplateBuilder {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self { provider }
    }

    /// Builds the grid for `kind` from its default asset.
    pub fn build(&self, kind: TemplateKind) -> Result<Document, TemplateError> {
        self.build_from(kind, kind.spec().asset)
    }

    /// Loads `asset`, finds its data cell and replaces the authored table with
    /// a rows×cols grid of clones, each bound to its own 1-based index.
    pub fn build_from(&self, kind: TemplateKind, asset: &str) -> Result<Document, TemplateError> {
        let source = self
            .provider
            .load_text(asset)
            .map_err(|source| TemplateError::AssetMissing {
                asset: asset.to_string(),
                source,
            })?;
        let mut doc = Document::from_xml(&source).map_err(|source| TemplateError::InvalidAsset {
            asset: asset.to_string(),
            source,
        })?;

        let root = doc.root();
        let data_cell = doc
            .find_all(root, NodeKind::is_cell)
            .into_iter()
            .find(|cell| is_data_cell(&doc, *cell))
            .ok_or_else(|| TemplateError::DataCellMissing(asset.to_string()))?;
        let old_table = doc
            .ancestor_where(data_cell, NodeKind::is_table)
            .ok_or_else(|| TemplateError::DataCellMissing(asset.to_string()))?;

        let spec = kind.spec();
        let table = expand_grid(&mut doc, old_table, data_cell, spec)?;
        doc.replace(old_table, table)?;

        log::debug!(
            "Built {} grid ({}x{}) from '{}' via {}",
            kind,
            spec.rows,
            spec.cols,
            asset,
            self.provider.name()
        );
        Ok(doc)
    }
}

fn expand_grid(
    doc: &mut Document,
    old_table: NodeId,
    data_cell: NodeId,
    spec: &KindSpec,
) -> Result<NodeId, TemplateError> {
    let cell_size = spec.cell_size();
    let mut props = match doc.kind(old_table) {
        Some(NodeKind::Table(props)) => props.clone(),
        _ => TableProps::default(),
    };
    props.width = Some(cell_size.width * spec.cols as f32);

    let table = doc.create(NodeKind::Table(props));
    doc.append(
        table,
        NodeKind::Grid(GridProps {
            columns: vec![cell_size.width; spec.cols],
        }),
    )?;

    for r in 0..spec.rows {
        let row = doc.append(
            table,
            NodeKind::Row(RowProps {
                height: Some(cell_size.height),
            }),
        )?;
        for c in 0..spec.cols {
            let slot = CellIndex::from_slot(r * spec.cols + c);
            let cell = doc.clone_subtree(data_cell)?;
            if let Some(NodeKind::Cell(cell_props)) = doc.kind_mut(cell) {
                cell_props.width = Some(cell_size.width);
            }
            bind_index(doc, cell, slot);
            doc.append_child(row, cell)?;
        }
    }
    Ok(table)
}

/// Rewrites the index token in every text node below `cell`.
fn bind_index(doc: &mut Document, cell: NodeId, slot: CellIndex) {
    let replacement = format!("Label{}", slot);
    for id in doc.descendants(cell) {
        if let Some(NodeKind::Text(text)) = doc.kind_mut(id)
            && INDEX_TOKEN_RE.is_match(text)
        {
            *text = INDEX_TOKEN_RE
                .replace_all(text, replacement.as_str())
                .into_owned();
        }
    }
}
