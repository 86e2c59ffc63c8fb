use crate::error::DocError;
use crate::node::{Node, NodeKind};

/// The address of a node inside one [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An arena-allocated document tree.
///
/// Detached nodes stay in the arena until the document is dropped; they are
/// simply unreachable from the root. All traversal helpers start from a
/// given node and follow child edges only, so detached garbage never shows
/// up in queries that start at [`Document::root`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document containing only its root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node(&self, id: NodeId) -> Result<&Node, DocError> {
        self.nodes.get(id.0).ok_or(DocError::NodeNotFound(id))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    pub fn kind_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
        self.nodes.get_mut(id.0).map(|n| &mut n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Returns the children of a node, or an empty slice for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Total number of arena slots, including detached nodes.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a new detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocates a node and appends it to `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, DocError> {
        self.node(parent)?;
        let id = self.create(kind);
        self.link(parent, id, None);
        Ok(id)
    }

    /// Appends an existing detached node to `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocError> {
        self.check_attachable(parent, child)?;
        self.link(parent, child, None);
        Ok(())
    }

    /// Inserts an existing detached node at `index` among `parent`'s children.
    /// An index past the end appends.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), DocError> {
        self.check_attachable(parent, child)?;
        self.link(parent, child, Some(index));
        Ok(())
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), DocError> {
        self.node(parent)?;
        if self.node(child)?.parent.is_some() || child == self.root {
            return Err(DocError::AlreadyAttached(child));
        }
        // Attaching a node below itself would create a cycle.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DocError::Structure(format!(
                    "cannot attach {:?} below its own descendant {:?}",
                    child, parent
                )));
            }
            cursor = self.nodes[id.0].parent;
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        match index {
            Some(i) if i < children.len() => children.insert(i, child),
            _ => children.push(child),
        }
    }

    /// Removes a node (with its subtree) from its parent. The subtree stays
    /// allocated and can be re-attached.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DocError> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.nodes[id.0].parent = None;
        }
        Ok(())
    }

    /// Detaches every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) -> Result<(), DocError> {
        let node = self.nodes.get_mut(id.0).ok_or(DocError::NodeNotFound(id))?;
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        Ok(())
    }

    /// Puts the detached node `replacement` where `target` is, detaching `target`.
    pub fn replace(&mut self, target: NodeId, replacement: NodeId) -> Result<(), DocError> {
        let parent = self
            .node(target)?
            .parent
            .ok_or_else(|| DocError::Structure(format!("{:?} has no parent to replace it in", target)))?;
        let index = self.child_index(parent, target).unwrap_or(0);
        self.detach(target)?;
        self.insert_child(parent, index, replacement)
    }

    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// All nodes of the subtree rooted at `id`, in document (pre-)order, `id` included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.get(id).is_none() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Subtree nodes matching a predicate, in document order.
    pub fn find_all(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| pred(&self.nodes[n.0].kind))
            .collect()
    }

    pub fn find_first(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|n| pred(&self.nodes[n.0].kind))
    }

    /// Direct children matching a predicate.
    pub fn children_where(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| pred(&self.nodes[c.0].kind))
            .collect()
    }

    /// The closest ancestor (excluding `id`) matching a predicate.
    pub fn ancestor_where(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if pred(&self.nodes[current.0].kind) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Returns true when `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// The plain text of a subtree. Breaks become `\n`, tabs become `\t`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            match &self.nodes[node.0].kind {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Break => out.push('\n'),
                NodeKind::Tab => out.push('\t'),
                _ => {}
            }
        }
        out
    }

    /// Deep-copies the subtree at `source` into fresh arena slots.
    /// The copy is detached; no node is shared with the original.
    pub fn clone_subtree(&mut self, source: NodeId) -> Result<NodeId, DocError> {
        let kind = self.node(source)?.kind.clone();
        let copy_root = self.create(kind);
        let mut stack = vec![(source, copy_root)];
        while let Some((src, dst)) = stack.pop() {
            let children = self.nodes[src.0].children.clone();
            for child in children {
                let kind = self.nodes[child.0].kind.clone();
                let copy = self.create(kind);
                self.link(dst, copy, None);
                stack.push((child, copy));
            }
        }
        Ok(copy_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgrid_style::{ParagraphStyle, RunStyle};

    fn paragraph_with_text(doc: &mut Document, parent: NodeId, text: &str) -> NodeId {
        let p = doc.append(parent, NodeKind::Paragraph(ParagraphStyle::default())).unwrap();
        let r = doc.append(p, NodeKind::Run(RunStyle::default())).unwrap();
        doc.append(r, NodeKind::Text(text.to_string())).unwrap();
        p
    }

    #[test]
    fn test_append_and_traverse_in_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = paragraph_with_text(&mut doc, root, "first");
        let b = paragraph_with_text(&mut doc, root, "second");

        assert_eq!(doc.children(root), &[a, b]);
        assert_eq!(doc.text_content(root), "firstsecond");
        let paragraphs = doc.find_all(root, NodeKind::is_paragraph);
        assert_eq!(paragraphs, vec![a, b]);
    }

    #[test]
    fn test_clone_subtree_never_aliases() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = paragraph_with_text(&mut doc, root, "original");
        let copy = doc.clone_subtree(p).unwrap();

        assert!(doc.parent(copy).is_none());
        let original_ids = doc.descendants(p);
        let copy_ids = doc.descendants(copy);
        assert_eq!(original_ids.len(), copy_ids.len());
        assert!(copy_ids.iter().all(|id| !original_ids.contains(id)));

        let text = doc.find_first(copy, |k| k.as_text().is_some()).unwrap();
        *doc.kind_mut(text).unwrap() = NodeKind::Text("changed".into());
        assert_eq!(doc.text_content(p), "original");
        assert_eq!(doc.text_content(copy), "changed");
    }

    #[test]
    fn test_detach_and_reattach() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = paragraph_with_text(&mut doc, root, "a");
        let b = paragraph_with_text(&mut doc, root, "b");

        doc.detach(a).unwrap();
        assert!(!doc.is_attached(a));
        assert_eq!(doc.children(root), &[b]);

        doc.insert_child(root, 0, a).unwrap();
        assert_eq!(doc.children(root), &[a, b]);
        assert!(matches!(doc.append_child(root, a), Err(DocError::AlreadyAttached(_))));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = paragraph_with_text(&mut doc, root, "x");
        doc.detach(p).unwrap();
        let run = doc.children(p)[0];
        assert!(doc.append_child(run, p).is_err());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = paragraph_with_text(&mut doc, root, "a");
        let b = paragraph_with_text(&mut doc, root, "b");
        let c = doc.create(NodeKind::PageBreak);
        doc.replace(a, c).unwrap();
        assert_eq!(doc.children(root), &[c, b]);
    }

    #[test]
    fn test_text_content_renders_breaks_and_tabs() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = paragraph_with_text(&mut doc, root, "A");
        let run = doc.children(p)[0];
        doc.append(run, NodeKind::Tab).unwrap();
        doc.append(run, NodeKind::Text("B".into())).unwrap();
        doc.append(run, NodeKind::Break).unwrap();
        assert_eq!(doc.text_content(p), "A\tB\n");
    }
}
