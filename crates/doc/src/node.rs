use crate::arena::NodeId;
use labelgrid_style::{Border, ParagraphStyle, RunStyle};
use labelgrid_types::{Color, ResourceUri};
use std::sync::Arc;

// --- Property Structures ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProps {
    pub style_name: Option<String>,
    /// Total table width in points.
    pub width: Option<f32>,
    pub borders: Option<Border>,
    /// Inner cell padding in points.
    pub cell_margin: Option<f32>,
}

/// Column-width metadata of a table. A table is only readable by the
/// composition passes when this is present and agrees with its rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridProps {
    /// Column widths in points.
    pub columns: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowProps {
    /// Exact row height in points.
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellProps {
    /// Cell width in points.
    pub width: Option<f32>,
    pub shading: Option<Color>,
    pub borders: Option<Border>,
    pub v_align: Option<VerticalAlign>,
}

/// An inline graphic. Either references a resource by URI or carries its bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageData {
    pub src: Option<ResourceUri>,
    pub data: Option<Arc<Vec<u8>>>,
    pub content_type: Option<String>,
    /// Rendered width in points.
    pub width: f32,
    /// Rendered height in points.
    pub height: f32,
    pub alt: Option<String>,
}

// --- Main Node Enum ---

/// The payload of one arena node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The root of a document.
    Document,
    /// One rendered page of a composed document.
    Page { index: usize },
    /// A table; children are one `Grid` followed by `Row`s.
    Table(TableProps),
    /// Column metadata of the parent table.
    Grid(GridProps),
    Row(RowProps),
    Cell(CellProps),
    Paragraph(ParagraphStyle),
    Run(RunStyle),
    Text(String),
    /// An explicit line break within a paragraph.
    Break,
    /// An explicit tab within a paragraph.
    Tab,
    Image(ImageData),
    PageBreak,
}

impl NodeKind {
    /// Returns a string identifier for the node type; also its XML element name.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Page { .. } => "page",
            NodeKind::Table(_) => "table",
            NodeKind::Grid(_) => "grid",
            NodeKind::Row(_) => "row",
            NodeKind::Cell(_) => "cell",
            NodeKind::Paragraph(_) => "p",
            NodeKind::Run(_) => "r",
            NodeKind::Text(_) => "t",
            NodeKind::Break => "br",
            NodeKind::Tab => "tab",
            NodeKind::Image(_) => "img",
            NodeKind::PageBreak => "page-break",
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, NodeKind::Table(_))
    }

    pub fn is_row(&self) -> bool {
        matches!(self, NodeKind::Row(_))
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, NodeKind::Cell(_))
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, NodeKind::Paragraph(_))
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, NodeKind::Grid(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// One slot of the document arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
