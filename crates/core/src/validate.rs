//! Grid metadata validation and repair.
//!
//! A table is readable when it has a grid with at least one column and
//! every row holds exactly that many cells. Pages whose tables are not
//! readable are repaired in place, or as a last resort replaced by a blank
//! grid of the kind's canonical geometry.

use labelgrid_doc::{
    CellProps, DocError, Document, GridProps, NodeId, NodeKind, RowProps, TableProps,
};
use labelgrid_style::ParagraphStyle;
use labelgrid_template::{KindSpec, TemplateKind};
use thiserror::Error;

/// Why a page's grid is not readable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralCorruption {
    #[error("document has no table")]
    NoTable,
    #[error("table {0} has no rows")]
    NoRows(usize),
    #[error("table {0} has no column metadata")]
    MissingGrid(usize),
    #[error("table {table} declares {expected} column(s) but row {row} has {found} cell(s)")]
    ColumnMismatch {
        table: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// What validation did to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Metadata was consistent.
    Intact,
    /// Metadata was rebuilt from the first row; content kept.
    Repaired,
    /// The grid was replaced by a blank one; content lost.
    Rebuilt,
}

#[derive(Debug, Clone, Copy)]
pub struct StructuralValidator {
    kind: TemplateKind,
}

impl StructuralValidator {
    pub fn new(kind: TemplateKind) -> Self {
        Self { kind }
    }

    /// Checks every table of `doc`.
    pub fn check(&self, doc: &Document) -> Result<(), StructuralCorruption> {
        let tables = doc.find_all(doc.root(), NodeKind::is_table);
        if tables.is_empty() {
            return Err(StructuralCorruption::NoTable);
        }
        for (t, table) in tables.into_iter().enumerate() {
            check_table(doc, table, t)?;
        }
        Ok(())
    }

    /// Makes `doc` readable, repairing it or rebuilding a blank grid.
    pub fn validate_and_repair(&self, doc: &mut Document) -> Result<ValidationOutcome, DocError> {
        let issue = match self.check(doc) {
            Ok(()) => return Ok(ValidationOutcome::Intact),
            Err(issue) => issue,
        };
        log::warn!("Grid structure is inconsistent ({}), repairing", issue);

        if issue != StructuralCorruption::NoTable {
            for table in doc.find_all(doc.root(), NodeKind::is_table) {
                self.repair_table(doc, table)?;
            }
            match self.check(doc) {
                Ok(()) => {
                    log::info!("Grid metadata repaired from first-row cell counts");
                    return Ok(ValidationOutcome::Repaired);
                }
                Err(still) => log::error!("Repair failed ({}), rebuilding a blank grid", still),
            }
        }

        self.rebuild_blank(doc)?;
        log::error!(
            "Replaced unreadable page with a blank {} grid; its content is lost",
            self.kind
        );
        Ok(ValidationOutcome::Rebuilt)
    }

    /// Derives the column count from the first row and rewrites the grid
    /// metadata to match. Rows are not touched.
    fn repair_table(&self, doc: &mut Document, table: NodeId) -> Result<(), DocError> {
        let rows = doc.children_where(table, NodeKind::is_row);
        let Some(first) = rows.first() else {
            return Ok(());
        };
        let first_cells = doc.children_where(*first, NodeKind::is_cell);
        if first_cells.is_empty() {
            return Ok(());
        }

        let fallback = column_fallback(doc, table, first_cells.len(), self.kind.spec());
        let columns: Vec<f32> = first_cells
            .iter()
            .map(|cell| match doc.kind(*cell) {
                Some(NodeKind::Cell(CellProps { width: Some(w), .. })) if *w > 0.0 => *w,
                _ => fallback,
            })
            .collect();

        for grid in doc.children_where(table, NodeKind::is_grid) {
            doc.detach(grid)?;
        }
        let total: f32 = columns.iter().sum();
        let grid = doc.create(NodeKind::Grid(GridProps { columns }));
        doc.insert_child(table, 0, grid)?;
        if let Some(NodeKind::Table(props)) = doc.kind_mut(table)
            && props.width.is_none()
        {
            props.width = Some(total);
        }
        Ok(())
    }

    /// Replaces the document's content with an empty rows×cols grid.
    fn rebuild_blank(&self, doc: &mut Document) -> Result<(), DocError> {
        let spec = self.kind.spec();
        let cell = spec.cell_size();

        let root = doc.root();
        doc.clear_children(root)?;
        let table = doc.append(
            root,
            NodeKind::Table(TableProps {
                width: Some(cell.width * spec.cols as f32),
                ..Default::default()
            }),
        )?;
        doc.append(
            table,
            NodeKind::Grid(GridProps {
                columns: vec![cell.width; spec.cols],
            }),
        )?;
        for _ in 0..spec.rows {
            let row = doc.append(
                table,
                NodeKind::Row(RowProps {
                    height: Some(cell.height),
                }),
            )?;
            for _ in 0..spec.cols {
                let c = doc.append(
                    row,
                    NodeKind::Cell(CellProps {
                        width: Some(cell.width),
                        ..Default::default()
                    }),
                )?;
                doc.append(c, NodeKind::Paragraph(ParagraphStyle::default()))?;
            }
        }
        Ok(())
    }
}

fn check_table(doc: &Document, table: NodeId, index: usize) -> Result<(), StructuralCorruption> {
    let rows = doc.children_where(table, NodeKind::is_row);
    if rows.is_empty() {
        return Err(StructuralCorruption::NoRows(index));
    }
    let columns = doc
        .children_where(table, NodeKind::is_grid)
        .first()
        .and_then(|grid| match doc.kind(*grid) {
            Some(NodeKind::Grid(props)) if !props.columns.is_empty() => Some(props.columns.len()),
            _ => None,
        })
        .ok_or(StructuralCorruption::MissingGrid(index))?;

    for (r, row) in rows.iter().enumerate() {
        let found = doc.children_where(*row, NodeKind::is_cell).len();
        if found != columns {
            return Err(StructuralCorruption::ColumnMismatch {
                table: index,
                row: r,
                expected: columns,
                found,
            });
        }
    }
    Ok(())
}

/// Column width for cells that carry none: an even share of the table
/// width, else the kind's cell width.
fn column_fallback(doc: &Document, table: NodeId, columns: usize, spec: &KindSpec) -> f32 {
    match doc.kind(table) {
        Some(NodeKind::Table(TableProps { width: Some(w), .. })) if *w > 0.0 => *w / columns as f32,
        _ => spec.cell_size().width,
    }
}
