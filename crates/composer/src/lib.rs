//! Composition utilities for assembling rendered pages into one document.
//!
//! Every rendered page is its own [`Document`]. The composer deep-copies the
//! content of each page into a fresh `Page` container of the final
//! document, so the result never shares arena slots with any page.

mod error;

pub use error::ComposerError;

use labelgrid_doc::{Document, NodeId, NodeKind};
use std::collections::HashMap;

/// State of copying nodes from one document into another.
struct NodeCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    id_map: HashMap<NodeId, NodeId>,
}

impl<'a> NodeCopier<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            id_map: HashMap::new(),
        }
    }

    /// Deep-copies the subtree at `source_id` and returns the detached copy.
    /// A node already copied by this copier maps to the same target node.
    fn copy_subtree(&mut self, source_id: NodeId) -> Result<NodeId, ComposerError> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }
        let source = self.source;
        let kind = source
            .kind(source_id)
            .ok_or(ComposerError::MissingSource(source_id))?
            .clone();
        let copy_root = self.target.create(kind);
        self.id_map.insert(source_id, copy_root);

        let mut stack = vec![(source_id, copy_root)];
        while let Some((src, dst)) = stack.pop() {
            for &child in source.children(src) {
                let kind = source
                    .kind(child)
                    .ok_or(ComposerError::MissingSource(child))?
                    .clone();
                let copy = self.target.append(dst, kind)?;
                self.id_map.insert(child, copy);
                stack.push((child, copy));
            }
        }
        Ok(copy_root)
    }
}

/// Builds a multi-page document one rendered page at a time.
#[derive(Debug, Default)]
pub struct DocumentComposer {
    doc: Document,
    pages: usize,
}

impl DocumentComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the content of `page` as the next page and returns the id of
    /// its container. Pages are numbered from 1. On failure the partial
    /// container is removed and the page number is not used.
    pub fn push_page(&mut self, page: &Document) -> Result<NodeId, ComposerError> {
        let index = self.pages + 1;
        let root = self.doc.root();
        let container = self.doc.append(root, NodeKind::Page { index })?;

        if let Err(e) = self.copy_page(page, container) {
            self.doc.detach(container)?;
            return Err(e);
        }

        self.pages = index;
        log::debug!("Composed page {}", index);
        Ok(container)
    }

    fn copy_page(&mut self, page: &Document, container: NodeId) -> Result<(), ComposerError> {
        let mut copier = NodeCopier::new(page, &mut self.doc);
        let mut copied = Vec::with_capacity(page.children(page.root()).len());
        for &child in page.children(page.root()) {
            copied.push(copier.copy_subtree(child)?);
        }
        for node in copied {
            self.doc.append_child(container, node)?;
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn finish(self) -> Document {
        log::info!("Final document has {} page(s)", self.pages);
        self.doc
    }
}

/// Concatenates `pages` in order into one document.
pub fn compose_pages<'a>(
    pages: impl IntoIterator<Item = &'a Document>,
) -> Result<Document, ComposerError> {
    let mut composer = DocumentComposer::new();
    for page in pages {
        composer.push_page(page)?;
    }
    Ok(composer.finish())
}
