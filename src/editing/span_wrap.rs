//! Wrap the contents of an element in a freshly created span.
//!
//! The span is created at apply time in the same document as the target,
//! takes every current child of the target in order, and becomes the
//! target's sole child. Unapply moves the children back in order and
//! discards the empty span, restoring the original structure exactly.

use smallvec::SmallVec;

use super::{CommandError, EditCommand};
use crate::tree::{AnyId, Document, ElementId, Tag};

pub struct WrapContentsInSpanCommand {
    target: ElementId,
    /// Present exactly while the wrap is applied. The span itself lives in
    /// the document arena; this is only its handle.
    wrapper: Option<ElementId>,
}

impl WrapContentsInSpanCommand {
    #[must_use]
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            wrapper: None,
        }
    }
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }
    /// The span holding the target's former children, while applied.
    #[must_use]
    pub fn wrapper(&self) -> Option<ElementId> {
        self.wrapper
    }
}

impl EditCommand for WrapContentsInSpanCommand {
    fn label(&self) -> &'static str {
        "wrap contents in span"
    }

    fn apply(&mut self, document: &mut Document) -> Result<(), CommandError> {
        // Applying twice would orphan the stored wrapper handle. Refuse.
        if self.wrapper.is_some() {
            return Err(CommandError::AlreadyApplied);
        }
        if !document.contains(self.target) {
            return Err(CommandError::InvalidTarget);
        }

        // Snapshot before mutating - the moves below reorder the child list
        // under our feet.
        let children: SmallVec<[AnyId; 8]> = document.children(self.target).collect();
        let span = document.create_element(Tag::Span);
        for child in children {
            document.append_child(span, child)?;
        }
        document.append_child(self.target, span)?;

        log::trace!("wrapped contents of {} in {span}", self.target);
        self.wrapper = Some(span);
        Ok(())
    }

    fn unapply(&mut self, document: &mut Document) -> Result<(), CommandError> {
        // Never applied, or already unapplied: nothing to reverse.
        let Some(span) = self.wrapper.take() else {
            return Ok(());
        };
        if !document.contains(self.target) {
            return Err(CommandError::InvalidTarget);
        }

        let children: SmallVec<[AnyId; 8]> = document.children(span).collect();
        for child in children {
            document.append_child(self.target, child)?;
        }
        document.remove_child(self.target, span)?;
        document.discard(span)?;

        log::trace!("unwrapped contents of {}", self.target);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // A div with n children, alternating text and paragraph nodes.
    fn doc_with_children(n: usize) -> (Document, ElementId, Vec<AnyId>) {
        let mut doc = Document::new();
        let target = doc.create_element(Tag::Div);
        let children: Vec<AnyId> = (0..n)
            .map(|i| {
                let child: AnyId = if i % 2 == 0 {
                    doc.create_text(format!("t{i}")).into()
                } else {
                    doc.create_element(Tag::Paragraph).into()
                };
                doc.append_child(target, child).unwrap();
                child
            })
            .collect();
        (doc, target, children)
    }

    #[test]
    fn wrap_groups_children_in_order() {
        let (mut doc, target, children) = doc_with_children(3);
        let mut command = WrapContentsInSpanCommand::new(target);
        command.apply(&mut doc).unwrap();

        let span = command.wrapper().unwrap();
        assert_eq!(doc.tag_of(span), Some(Tag::Span));
        // The span is the sole child of the target...
        assert_eq!(
            doc.children(target).collect::<Vec<_>>(),
            vec![AnyId::from(span)]
        );
        // ...and holds the original children, original order.
        assert_eq!(doc.children(span).collect::<Vec<_>>(), children);
    }

    #[test]
    fn round_trip_restores_structure() {
        let (mut doc, target, children) = doc_with_children(4);
        let mut command = WrapContentsInSpanCommand::new(target);
        command.apply(&mut doc).unwrap();
        let span = command.wrapper().unwrap();
        command.unapply(&mut doc).unwrap();

        assert_eq!(doc.children(target).collect::<Vec<_>>(), children);
        for child in &children {
            assert_eq!(doc.parent_of(*child), Ok(Some(target)));
        }
        // No residual wrapper anywhere.
        assert!(!doc.contains(span));
        assert_eq!(command.wrapper(), None);
    }

    #[test]
    fn wrap_empty_element() {
        let (mut doc, target, _) = doc_with_children(0);
        let mut command = WrapContentsInSpanCommand::new(target);
        command.apply(&mut doc).unwrap();

        let span = command.wrapper().unwrap();
        assert_eq!(doc.child_count(target), Ok(1));
        assert_eq!(doc.child_count(span), Ok(0));

        command.unapply(&mut doc).unwrap();
        assert_eq!(doc.child_count(target), Ok(0));
        assert!(!doc.contains(span));
    }

    #[test]
    fn unapply_without_apply_is_noop() {
        let (mut doc, target, children) = doc_with_children(2);
        let mut command = WrapContentsInSpanCommand::new(target);
        command.unapply(&mut doc).unwrap();
        // Twice in a row is equally harmless.
        command.unapply(&mut doc).unwrap();

        assert_eq!(doc.children(target).collect::<Vec<_>>(), children);
        assert_eq!(command.wrapper(), None);
    }

    #[test]
    fn double_apply_fails_fast() {
        let (mut doc, target, _) = doc_with_children(2);
        let mut command = WrapContentsInSpanCommand::new(target);
        command.apply(&mut doc).unwrap();
        let span = command.wrapper().unwrap();

        assert_eq!(command.apply(&mut doc), Err(CommandError::AlreadyApplied));
        // The stored wrapper and the tree survive the refused call.
        assert_eq!(command.wrapper(), Some(span));
        assert_eq!(
            doc.children(target).collect::<Vec<_>>(),
            vec![AnyId::from(span)]
        );
    }

    #[test]
    fn reapply_after_unapply() {
        let (mut doc, target, children) = doc_with_children(3);
        let mut command = WrapContentsInSpanCommand::new(target);
        command.apply(&mut doc).unwrap();
        command.unapply(&mut doc).unwrap();
        command.apply(&mut doc).unwrap();

        let span = command.wrapper().unwrap();
        assert_eq!(doc.children(span).collect::<Vec<_>>(), children);

        command.unapply(&mut doc).unwrap();
        assert_eq!(doc.children(target).collect::<Vec<_>>(), children);
    }

    #[test]
    fn stale_target_is_invalid() {
        let mut doc = Document::new();
        let target = doc.create_element(Tag::Div);
        doc.discard(target).unwrap();

        let mut command = WrapContentsInSpanCommand::new(target);
        assert_eq!(command.apply(&mut doc), Err(CommandError::InvalidTarget));
        assert_eq!(command.wrapper(), None);
    }
}
