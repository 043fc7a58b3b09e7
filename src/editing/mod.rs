//! # Editing
//!
//! Edit commands are the way the document tree is modified by an editor.
//! Every command is reversible: `apply` performs the edit and `unapply`
//! restores the exact prior structure, so a history can treat the pair as
//! redo/undo.

pub mod span_wrap;

pub use span_wrap::WrapContentsInSpanCommand;

use crate::tree::{Document, TreeError};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("target element is not part of the document")]
    InvalidTarget,
    #[error("command is already applied")]
    AlreadyApplied,
    #[error("tree mutation failed: {0}")]
    Tree(#[from] TreeError),
}

/// A single reversible structural edit over a [`Document`].
///
/// The command assumes exclusive access to the subtree it touches for the
/// duration of each call; both calls run to completion synchronously.
pub trait EditCommand {
    /// Short human-readable name, used by history logging.
    fn label(&self) -> &'static str {
        "edit"
    }
    /// Perform the edit. On error the tree keeps whatever steps already
    /// completed; there is no partial rollback within one call.
    fn apply(&mut self, document: &mut Document) -> Result<(), CommandError>;
    /// Reverse the edit. Must be an exact inverse of [`EditCommand::apply`].
    /// Reversing a command that is not applied is a no-op.
    fn unapply(&mut self, document: &mut Document) -> Result<(), CommandError>;
}

/// Several commands grouped into one, as far as a history can tell.
/// Applied front to back, unapplied back to front.
#[derive(Default)]
pub struct EditGroup {
    commands: Vec<Box<dyn EditCommand>>,
}
impl EditGroup {
    #[must_use]
    pub fn new(commands: Vec<Box<dyn EditCommand>>) -> Self {
        Self { commands }
    }
    pub fn push(&mut self, command: Box<dyn EditCommand>) {
        self.commands.push(command);
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
impl EditCommand for EditGroup {
    fn label(&self) -> &'static str {
        "edit group"
    }
    fn apply(&mut self, document: &mut Document) -> Result<(), CommandError> {
        for command in &mut self.commands {
            command.apply(document)?;
        }
        Ok(())
    }
    fn unapply(&mut self, document: &mut Document) -> Result<(), CommandError> {
        for command in self.commands.iter_mut().rev() {
            command.unapply(document)?;
        }
        Ok(())
    }
}
