//! Rewrites marker spans into sized, styled runs.
//!
//! Each paragraph is handled in two phases. The first flattens the
//! paragraph to text and tokenizes it without touching the tree; the second
//! replaces the paragraph's runs with the planned ones.

use crate::config::SizingConfig;
use crate::deadline::Deadline;
use crate::sizing::{SpanStyle, font_size, span_style};
use crate::LayoutError;
use labelgrid_doc::{Document, NodeId, NodeKind};
use labelgrid_markers::{MarkerField, Segment, tokenize};
use labelgrid_style::{RunStyle, TextAlign};
use labelgrid_template::{Category, TemplateKind};
use std::collections::HashMap;

/// Stands in for an inline image while a paragraph is flattened to text.
const OBJECT_CHAR: char = '\u{FFFC}';

/// What one sizing pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SizingReport {
    /// Paragraphs that held at least one span and were rewritten.
    pub paragraphs: usize,
    pub spans: usize,
    /// The deadline passed before every paragraph was visited.
    pub timed_out: bool,
    /// Paragraphs left unvisited because of the deadline.
    pub skipped_paragraphs: usize,
}

struct Flattened {
    text: String,
    images: Vec<NodeId>,
    base: RunStyle,
}

enum Piece {
    Text(String),
    Break,
    Tab,
    Image(NodeId),
}

struct PlannedRun {
    style: RunStyle,
    pieces: Vec<Piece>,
}

struct Plan {
    runs: Vec<PlannedRun>,
    align: Option<TextAlign>,
    line_spacing: Option<f32>,
    right_tab: bool,
    spans: usize,
}

/// The category of each bound label cell.
pub type CellCategories = HashMap<NodeId, Category>;

/// Resolves every marker span of a grid into styled runs.
#[derive(Debug, Clone, Copy)]
pub struct SpanMaterializer {
    kind: TemplateKind,
    config: SizingConfig,
}

impl SpanMaterializer {
    pub fn new(kind: TemplateKind, config: SizingConfig) -> Self {
        Self { kind, config }
    }

    /// Visits every paragraph of the document in order. Paragraphs inside a
    /// cell listed in `cells` use that cell's category; all others, such as
    /// header tables around the label grid, are sized as primary.
    ///
    /// The deadline is checked before each paragraph. Once it has passed the
    /// remaining paragraphs are left as they are and the report says so.
    pub fn apply(
        &self,
        doc: &mut Document,
        cells: &CellCategories,
        deadline: Deadline,
    ) -> Result<SizingReport, LayoutError> {
        let root = doc.root();
        let paragraphs = doc.find_all(root, NodeKind::is_paragraph);

        let mut report = SizingReport::default();
        for (visited, paragraph) in paragraphs.iter().enumerate() {
            if deadline.is_expired() {
                report.timed_out = true;
                report.skipped_paragraphs = paragraphs.len() - visited;
                log::warn!(
                    "Chunk budget exhausted, {} paragraph(s) left unsized",
                    report.skipped_paragraphs
                );
                break;
            }
            let category = doc
                .ancestor_where(*paragraph, NodeKind::is_cell)
                .and_then(|cell| cells.get(&cell))
                .copied()
                .unwrap_or_default();

            let spans = self.render_paragraph(doc, *paragraph, category)?;
            if spans > 0 {
                report.paragraphs += 1;
                report.spans += spans;
            }
        }
        log::debug!(
            "Sized {} span(s) in {} paragraph(s) for {}",
            report.spans,
            report.paragraphs,
            self.kind
        );
        Ok(report)
    }

    /// Rewrites one paragraph. Returns the number of spans found; a
    /// paragraph without spans is left untouched.
    pub fn render_paragraph(
        &self,
        doc: &mut Document,
        paragraph: NodeId,
        category: Category,
    ) -> Result<usize, LayoutError> {
        if !doc.kind(paragraph).is_some_and(NodeKind::is_paragraph) {
            return Err(LayoutError::MissingParagraph(paragraph.index()));
        }
        let flat = flatten(doc, paragraph);
        let Some(plan) = self.plan(&flat, category) else {
            return Ok(0);
        };
        apply_plan(doc, paragraph, plan, self.kind)
    }

    fn plan(&self, flat: &Flattened, category: Category) -> Option<Plan> {
        let segments = tokenize(&flat.text);
        if !segments.iter().any(|s| matches!(s, Segment::Span { .. })) {
            return None;
        }

        let scale = self.config.effective_scale();
        let mut images = flat.images.iter().copied();
        let mut plan = Plan {
            runs: Vec::with_capacity(segments.len()),
            align: None,
            line_spacing: None,
            right_tab: false,
            spans: 0,
        };
        let mut align_rank = None;
        let mut has_vendor = false;

        for segment in segments {
            match segment {
                Segment::Literal(text) => plan.runs.push(PlannedRun {
                    style: flat.base.clone(),
                    pieces: split_pieces(text, &mut images),
                }),
                Segment::Span { field, content } => {
                    plan.spans += 1;
                    let size = font_size(content, field, self.kind, scale);
                    let SpanStyle {
                        run,
                        align,
                        line_spacing,
                    } = span_style(field, category, self.kind, size);

                    let rank = align_priority(field);
                    if align.is_some() && align_rank.is_none_or(|r| rank > r) {
                        plan.align = align;
                        align_rank = Some(rank);
                    }
                    plan.line_spacing = plan.line_spacing.or(line_spacing);
                    has_vendor |= field == MarkerField::Vendor;

                    plan.runs.push(PlannedRun {
                        style: flat.base.merged(&run),
                        pieces: split_pieces(content, &mut images),
                    });
                }
            }
        }
        plan.right_tab = has_vendor && flat.text.contains('\t');
        plan.runs.retain(|r| !r.pieces.is_empty());
        Some(plan)
    }
}

/// When several spans share a paragraph, the highest-ranked one decides
/// its alignment.
fn align_priority(field: MarkerField) -> u8 {
    match field {
        MarkerField::Lineage => 3,
        MarkerField::ProductBrand => 2,
        MarkerField::Ratio => 1,
        _ => 0,
    }
}

fn flatten(doc: &Document, paragraph: NodeId) -> Flattened {
    let mut flat = Flattened {
        text: String::new(),
        images: Vec::new(),
        base: RunStyle::default(),
    };
    let mut base_found = false;

    for id in doc.descendants(paragraph).into_iter().skip(1) {
        match doc.kind(id) {
            Some(NodeKind::Run(style)) if !base_found => {
                flat.base = style.clone();
                base_found = true;
            }
            Some(NodeKind::Text(text)) => {
                flat.text.extend(text.chars().filter(|c| *c != OBJECT_CHAR));
            }
            Some(NodeKind::Break) => flat.text.push('\n'),
            Some(NodeKind::Tab) => flat.text.push('\t'),
            Some(NodeKind::Image(_)) => {
                flat.text.push(OBJECT_CHAR);
                flat.images.push(id);
            }
            _ => {}
        }
    }
    flat
}

/// Turns line and tab sentinels into explicit nodes.
fn split_pieces(text: &str, images: &mut impl Iterator<Item = NodeId>) -> Vec<Piece> {
    fn flush(buffer: &mut String, pieces: &mut Vec<Piece>) {
        if !buffer.is_empty() {
            pieces.push(Piece::Text(std::mem::take(buffer)));
        }
    }

    let mut pieces = Vec::new();
    let mut buffer = String::new();

    for c in text.chars() {
        match c {
            '\n' => {
                flush(&mut buffer, &mut pieces);
                pieces.push(Piece::Break);
            }
            '\t' => {
                flush(&mut buffer, &mut pieces);
                pieces.push(Piece::Tab);
            }
            '\r' => {}
            OBJECT_CHAR => {
                flush(&mut buffer, &mut pieces);
                if let Some(image) = images.next() {
                    pieces.push(Piece::Image(image));
                }
            }
            other => buffer.push(other),
        }
    }
    flush(&mut buffer, &mut pieces);
    pieces
}

fn apply_plan(
    doc: &mut Document,
    paragraph: NodeId,
    plan: Plan,
    kind: TemplateKind,
) -> Result<usize, LayoutError> {
    doc.clear_children(paragraph)?;
    for planned in plan.runs {
        let run = doc.append(paragraph, NodeKind::Run(planned.style))?;
        for piece in planned.pieces {
            match piece {
                Piece::Text(text) => {
                    doc.append(run, NodeKind::Text(text))?;
                }
                Piece::Break => {
                    doc.append(run, NodeKind::Break)?;
                }
                Piece::Tab => {
                    doc.append(run, NodeKind::Tab)?;
                }
                Piece::Image(image) => {
                    doc.detach(image)?;
                    doc.append_child(run, image)?;
                }
            }
        }
    }

    if let Some(NodeKind::Paragraph(style)) = doc.kind_mut(paragraph) {
        if plan.align.is_some() {
            style.align = plan.align;
        }
        if plan.line_spacing.is_some() {
            style.line_spacing = plan.line_spacing;
        }
        if plan.right_tab {
            style.add_right_tab(kind.spec().vendor_tab_stop());
        }
    }
    Ok(plan.spans)
}
