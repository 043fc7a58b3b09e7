//! # Tree
//!
//! The document is a tree of elements and text leaves. Elements carry a tag
//! and an ordered child list, text nodes carry content and are never allowed
//! children. The [`Document`] owns every node in an arena keyed by stable
//! ids; commands and callers hold only handles, so a node may sit detached
//! (no parent) without leaving the arena.

mod stable_id;

use smallvec::SmallVec;
use stable_id::RawId;
// Re-export the public ids. RawId is NOT public!
pub use stable_id::{AnyId, ElementId, TextId};

/// Element kinds. [`Tag::Span`] is the wrapper kind used by span-wrapping
/// edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    Span,
    Div,
    Paragraph,
    Anchor,
}

#[derive(Clone, Debug)]
enum NodeKind {
    Element {
        tag: Tag,
        children: SmallVec<[AnyId; 4]>,
    },
    Text(String),
}

#[derive(Clone, Debug)]
struct NodeEntry {
    /// Only elements may hold children, so a parent link is always an
    /// element handle.
    parent: Option<ElementId>,
    kind: NodeKind,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found in this document")]
    NodeNotFound,
    #[error("node is not a child of the given parent")]
    NotAChild,
    #[error("can't append a node to itself or its own [grand]children")]
    WouldCycle,
    #[error("node is still attached to a parent")]
    StillAttached,
}

pub struct Document {
    nodes: hashbrown::HashMap<RawId, NodeEntry>,
    next_id: RawId,
}
impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: hashbrown::HashMap::new(),
            next_id: RawId::MIN,
        }
    }
}
impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> RawId {
        let id = self.next_id;
        // Sequential minting. A u64 does not run out within one process.
        self.next_id = self.next_id.checked_add(1).expect("document id space exhausted");
        id
    }

    /// Allocate a new, parentless element owned by this document.
    pub fn create_element(&mut self, tag: Tag) -> ElementId {
        let id = ElementId(self.mint());
        self.nodes.insert(
            id.0,
            NodeEntry {
                parent: None,
                kind: NodeKind::Element {
                    tag,
                    children: SmallVec::new(),
                },
            },
        );
        log::trace!("created {id} <{tag}>");
        id
    }
    /// Allocate a new, parentless text node owned by this document.
    pub fn create_text(&mut self, content: impl Into<String>) -> TextId {
        let id = TextId(self.mint());
        self.nodes.insert(
            id.0,
            NodeEntry {
                parent: None,
                kind: NodeKind::Text(content.into()),
            },
        );
        log::trace!("created {id}");
        id
    }

    #[must_use]
    pub fn contains(&self, id: impl Into<AnyId>) -> bool {
        self.nodes.contains_key(&id.into().raw())
    }
    #[must_use]
    pub fn tag_of(&self, id: ElementId) -> Option<Tag> {
        match &self.nodes.get(&id.0)?.kind {
            NodeKind::Element { tag, .. } => Some(*tag),
            // Element ids are only ever minted for element entries.
            NodeKind::Text(_) => unreachable!("element id resolved to a text entry"),
        }
    }
    #[must_use]
    pub fn text_of(&self, id: TextId) -> Option<&str> {
        match &self.nodes.get(&id.0)?.kind {
            NodeKind::Text(content) => Some(content),
            NodeKind::Element { .. } => unreachable!("text id resolved to an element entry"),
        }
    }
    /// The parent element, or None if the node is detached.
    pub fn parent_of(&self, id: impl Into<AnyId>) -> Result<Option<ElementId>, TreeError> {
        Ok(self.entry(id.into())?.parent)
    }
    pub fn child_count(&self, parent: ElementId) -> Result<usize, TreeError> {
        self.children_slice(parent)
            .map(<[AnyId]>::len)
            .ok_or(TreeError::NodeNotFound)
    }

    /// The first child of this node in document order, or None for leaves,
    /// childless elements, and stale handles.
    pub fn first_child(&self, id: impl Into<AnyId>) -> Option<AnyId> {
        match &self.nodes.get(&id.into().raw())?.kind {
            NodeKind::Element { children, .. } => children.first().copied(),
            NodeKind::Text(_) => None,
        }
    }
    /// The next sibling under the same parent, or None for a last child or a
    /// detached node.
    pub fn next_sibling(&self, id: impl Into<AnyId>) -> Option<AnyId> {
        let id = id.into();
        let parent = self.nodes.get(&id.raw())?.parent?;
        let children = self.children_slice(parent)?;
        // The position is always found, links are kept mutually consistent.
        let idx = children.iter().position(|child| *child == id)?;
        children.get(idx + 1).copied()
    }
    /// Lazily walk the children of `parent` in document order. The walk is
    /// restartable; call again for a fresh pass.
    pub fn children(&self, parent: ElementId) -> Children<'_> {
        Children {
            document: self,
            next: self.first_child(parent),
        }
    }

    /// Insert `child` as the last child of `parent`. An attached child is
    /// moved, detaching from its prior parent first.
    pub fn append_child(&mut self, parent: ElementId, child: impl Into<AnyId>) -> Result<(), TreeError> {
        let child = child.into();
        self.entry(child)?;
        // Walk up from the destination. Meeting the child means the parent
        // sits inside the child's own subtree (or is the child itself), and
        // the append would cut the subtree loose as an unrooted cycle.
        if let AnyId::Element(child_element) = child {
            let mut cursor = Some(parent);
            while let Some(cur) = cursor {
                if cur == child_element {
                    return Err(TreeError::WouldCycle);
                }
                cursor = self.entry(cur.into())?.parent;
            }
        } else {
            self.entry(parent.into())?;
        }

        self.detach(child);
        match &mut self.entry_mut(parent.into())?.kind {
            NodeKind::Element { children, .. } => children.push(child),
            NodeKind::Text(_) => unreachable!("element id resolved to a text entry"),
        }
        // Unwrap ok - existence checked at the top of the call.
        self.nodes.get_mut(&child.raw()).unwrap().parent = Some(parent);
        log::trace!("appended {child} under {parent}");
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays alive in the arena,
    /// parentless, until reattached or discarded.
    pub fn remove_child(&mut self, parent: ElementId, child: impl Into<AnyId>) -> Result<(), TreeError> {
        let child = child.into();
        self.entry(parent.into())?;
        if self.entry(child)?.parent != Some(parent) {
            return Err(TreeError::NotAChild);
        }
        self.detach(child);
        log::trace!("removed {child} from {parent}");
        Ok(())
    }

    /// Free a detached node and its whole subtree from the arena. All
    /// handles into the subtree become stale.
    pub fn discard(&mut self, node: impl Into<AnyId>) -> Result<(), TreeError> {
        let node = node.into();
        if self.entry(node)?.parent.is_some() {
            return Err(TreeError::StillAttached);
        }
        let mut stack: SmallVec<[AnyId; 8]> = smallvec::smallvec![node];
        while let Some(cur) = stack.pop() {
            // Unwrap ok - children of a live node are live.
            let entry = self.nodes.remove(&cur.raw()).unwrap();
            if let NodeKind::Element { children, .. } = entry.kind {
                stack.extend(children);
            }
        }
        log::trace!("discarded subtree at {node}");
        Ok(())
    }

    fn entry(&self, id: AnyId) -> Result<&NodeEntry, TreeError> {
        self.nodes.get(&id.raw()).ok_or(TreeError::NodeNotFound)
    }
    fn entry_mut(&mut self, id: AnyId) -> Result<&mut NodeEntry, TreeError> {
        self.nodes.get_mut(&id.raw()).ok_or(TreeError::NodeNotFound)
    }
    fn children_slice(&self, id: ElementId) -> Option<&[AnyId]> {
        match &self.nodes.get(&id.0)?.kind {
            NodeKind::Element { children, .. } => Some(children),
            NodeKind::Text(_) => unreachable!("element id resolved to a text entry"),
        }
    }
    /// Unlink from the current parent, if any.
    fn detach(&mut self, child: AnyId) {
        let Some(parent) = self.nodes.get(&child.raw()).and_then(|entry| entry.parent) else {
            return;
        };
        // Unwrap ok - a parent link always points at a live element entry.
        let NodeKind::Element { children, .. } = &mut self.nodes.get_mut(&parent.0).unwrap().kind
        else {
            unreachable!("parent link points at a text entry")
        };
        let idx = children
            .iter()
            .position(|c| *c == child)
            .expect("child missing from its parent's child list");
        children.remove(idx);
        self.nodes.get_mut(&child.raw()).unwrap().parent = None;
    }
}

/// See [`Document::children`].
pub struct Children<'doc> {
    document: &'doc Document,
    next: Option<AnyId>,
}
impl Iterator for Children<'_> {
    type Item = AnyId;
    fn next(&mut self) -> Option<AnyId> {
        let cur = self.next?;
        self.next = self.document.next_sibling(cur);
        Some(cur)
    }
}
