//! Final removal of marker residue.
//!
//! Authoring tools may split a token over several runs (`PRICE_ST` +
//! `ART`), so matching happens on a paragraph's joined text and removals
//! are mapped back onto the text nodes they overlap.

use labelgrid_doc::{Document, NodeId, NodeKind};
use labelgrid_markers::residue_ranges;
use std::ops::Range;

/// Removes every marker token and truncated fragment from `doc`. Returns
/// the number of residue pieces removed. Running it again removes nothing.
pub fn cleanup_residue(doc: &mut Document) -> usize {
    let root = doc.root();
    let mut removed = 0;
    for paragraph in doc.find_all(root, NodeKind::is_paragraph) {
        removed += clean_paragraph(doc, paragraph);
    }
    // Text outside paragraphs is never joined with anything.
    for text in doc.find_all(root, |k| k.as_text().is_some()) {
        if doc.ancestor_where(text, NodeKind::is_paragraph).is_none() {
            removed += clean_nodes(doc, &[text]);
        }
    }
    if removed > 0 {
        log::debug!("Removed {} piece(s) of marker residue", removed);
    }
    removed
}

fn clean_paragraph(doc: &mut Document, paragraph: NodeId) -> usize {
    let texts = doc.find_all(paragraph, |k| k.as_text().is_some());
    clean_nodes(doc, &texts)
}

/// Strips residue from the joined text of `texts` until none is left.
fn clean_nodes(doc: &mut Document, texts: &[NodeId]) -> usize {
    let mut removed = 0;
    loop {
        let mut joined = String::new();
        let mut spans = Vec::with_capacity(texts.len());
        for id in texts {
            let start = joined.len();
            if let Some(text) = doc.kind(*id).and_then(NodeKind::as_text) {
                joined.push_str(text);
            }
            spans.push(start..joined.len());
        }

        let ranges = residue_ranges(&joined);
        if ranges.is_empty() {
            return removed;
        }
        removed += ranges.len();

        for (id, span) in texts.iter().zip(spans) {
            let cuts = local_cuts(&ranges, &span);
            if cuts.is_empty() {
                continue;
            }
            if let Some(NodeKind::Text(text)) = doc.kind_mut(*id) {
                *text = without(text, &cuts);
            }
        }
    }
}

/// The parts of `ranges` that fall inside `span`, relative to its start.
fn local_cuts(ranges: &[Range<usize>], span: &Range<usize>) -> Vec<Range<usize>> {
    ranges
        .iter()
        .filter(|r| r.start < span.end && span.start < r.end)
        .map(|r| r.start.max(span.start) - span.start..r.end.min(span.end) - span.start)
        .collect()
}

fn without(text: &str, cuts: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut from = 0;
    for cut in cuts {
        out.push_str(&text[from..cut.start]);
        from = cut.end;
    }
    out.push_str(&text[from..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgrid_style::{ParagraphStyle, RunStyle};

    fn paragraph(doc: &mut Document, parts: &[&str]) -> NodeId {
        let root = doc.root();
        let p = doc.append(root, NodeKind::Paragraph(ParagraphStyle::default())).unwrap();
        for part in parts {
            let r = doc.append(p, NodeKind::Run(RunStyle::default())).unwrap();
            doc.append(r, NodeKind::Text(part.to_string())).unwrap();
        }
        p
    }

    #[test]
    fn test_removes_tokens_within_one_run() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &["$5PRICE_END and LINEAGE_STARTx"]);
        assert_eq!(cleanup_residue(&mut doc), 2);
        assert_eq!(doc.text_content(p), "$5 and x");
    }

    #[test]
    fn test_removes_tokens_split_across_runs() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &["Acme VENDOR_", "ST", "ART", " 3.5g DE", "SC_END"]);
        cleanup_residue(&mut doc);
        assert_eq!(doc.text_content(p), "Acme  3.5g ");
    }

    #[test]
    fn test_trailing_fragment_in_last_run() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &["INDICA ", "LINEAGE_STA"]);
        cleanup_residue(&mut doc);
        assert_eq!(doc.text_content(p), "INDICA ");
    }

    #[test]
    fn test_removes_tokens_missing_their_head() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &["HYBRID ", "EAGE", "_END", "\tAcme RICE_END _START"]);
        assert_eq!(cleanup_residue(&mut doc), 3);
        assert_eq!(doc.text_content(p), "HYBRID \tAcme  ");
        assert_eq!(cleanup_residue(&mut doc), 0);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &["x RATIO_ST", "RATIO_ENDART y"]);
        cleanup_residue(&mut doc);
        let once = doc.text_content(p);
        assert_eq!(cleanup_residue(&mut doc), 0);
        assert_eq!(doc.text_content(p), once);
        assert_eq!(once, "x  y");
    }

    #[test]
    fn test_clean_text_is_untouched() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &["Sativa dominant, ", "PRICES vary"]);
        assert_eq!(cleanup_residue(&mut doc), 0);
        assert_eq!(doc.text_content(p), "Sativa dominant, PRICES vary");
    }
}
