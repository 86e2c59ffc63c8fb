//! Fills `{{LabelN.<Field>}}` placeholders from label contexts.

use crate::context::{ContextValue, LabelContext, LabelField};
use labelgrid_doc::{DocError, Document, ImageData, NodeId, NodeKind};
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{Label(\d+)\.([A-Za-z_]+)\}\}").expect("BUG: invalid PLACEHOLDER_RE regex literal")
});

/// Counts of what one injection pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InjectionStats {
    pub placeholders: usize,
    /// Placeholders replaced with non-empty text.
    pub filled: usize,
    /// Placeholders replaced with nothing: no context for the slot, an
    /// unknown field, or an empty value.
    pub blanked: usize,
    pub graphics: usize,
}

enum Piece {
    Text(String),
    Image(ImageData),
}

/// Replaces every placeholder below the root. Placeholder `N` reads from
/// `contexts[N - 1]`; slots past the end of `contexts` become blank.
///
/// Each placeholder must sit inside a single text node.
pub fn inject_contexts(
    doc: &mut Document,
    contexts: &[LabelContext],
) -> Result<InjectionStats, DocError> {
    let mut stats = InjectionStats::default();
    let root = doc.root();
    let targets = doc.find_all(root, |k| k.as_text().is_some_and(|t| t.contains("{{")));

    for id in targets {
        let Some(text) = doc.kind(id).and_then(NodeKind::as_text).map(str::to_string) else {
            continue;
        };
        let pieces = substitute(&text, contexts, &mut stats);
        apply(doc, id, pieces)?;
    }
    Ok(stats)
}

fn substitute(text: &str, contexts: &[LabelContext], stats: &mut InjectionStats) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut buffer = String::new();
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let (Some(whole), Some(slot), Some(key)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        stats.placeholders += 1;
        buffer.push_str(&text[last..whole.start()]);
        last = whole.end();

        let value = slot
            .as_str()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| contexts.get(i))
            .zip(LabelField::from_key(key.as_str()))
            .and_then(|(ctx, field)| ctx.get(field));

        match value {
            Some(ContextValue::Text(s)) if !s.is_empty() => {
                buffer.push_str(s);
                stats.filled += 1;
            }
            Some(ContextValue::Graphic(image)) => {
                if !buffer.is_empty() {
                    pieces.push(Piece::Text(std::mem::take(&mut buffer)));
                }
                pieces.push(Piece::Image(image.clone()));
                stats.graphics += 1;
            }
            _ => {
                if LabelField::from_key(key.as_str()).is_none() {
                    log::debug!("Unknown placeholder field '{}' left blank", key.as_str());
                }
                stats.blanked += 1;
            }
        }
    }
    buffer.push_str(&text[last..]);
    if !buffer.is_empty() || pieces.is_empty() {
        pieces.push(Piece::Text(buffer));
    }
    pieces
}

fn apply(doc: &mut Document, id: NodeId, pieces: Vec<Piece>) -> Result<(), DocError> {
    if let [Piece::Text(text)] = pieces.as_slice() {
        if let Some(NodeKind::Text(current)) = doc.kind_mut(id) {
            current.clone_from(text);
        }
        return Ok(());
    }

    let Some(parent) = doc.parent(id) else {
        return Ok(());
    };
    let mut at = doc.child_index(parent, id).unwrap_or(0);
    doc.detach(id)?;
    for piece in pieces {
        let node = match piece {
            Piece::Text(text) => doc.create(NodeKind::Text(text)),
            Piece::Image(image) => doc.create(NodeKind::Image(image)),
        };
        doc.insert_child(parent, at, node)?;
        at += 1;
    }
    Ok(())
}
