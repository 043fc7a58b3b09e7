//! Stable, typed handles into the document arena. Ids are minted by the
//! [`Document`](super::Document) and stay valid until the node is discarded,
//! no matter how the node moves around the tree.

// Private raw id type! (public to super)
pub(super) type RawId = std::num::NonZeroU64;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ElementId(pub(super) RawId);
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TextId(pub(super) RawId);

/// A handle to a node of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyId {
    Element(ElementId),
    Text(TextId),
}
impl std::hash::Hash for AnyId {
    // Forego including the variant in the hash, as an element and a text
    // node can never share a raw id within one document.
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw().hash(state);
    }
}
impl AnyId {
    pub(super) fn raw(self) -> RawId {
        match self {
            Self::Element(ElementId(id)) | Self::Text(TextId(id)) => id,
        }
    }
    #[must_use]
    pub fn element(self) -> Option<ElementId> {
        match self {
            Self::Element(id) => Some(id),
            Self::Text(_) => None,
        }
    }
    #[must_use]
    pub fn text(self) -> Option<TextId> {
        match self {
            Self::Text(id) => Some(id),
            Self::Element(_) => None,
        }
    }
}
impl From<ElementId> for AnyId {
    fn from(value: ElementId) -> Self {
        Self::Element(value)
    }
}
impl From<TextId> for AnyId {
    fn from(value: TextId) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element#{}", self.0)
    }
}
impl std::fmt::Display for TextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "text#{}", self.0)
    }
}
impl std::fmt::Display for AnyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element(id) => id.fmt(f),
            Self::Text(id) => id.fmt(f),
        }
    }
}
