//! # History
//!
//! A linear undo/redo stack over boxed edit commands. The history owns every
//! command it has recorded; undoing moves a command to the redo stack and
//! redoing moves it back, so a full cycle replays the same command objects
//! rather than reconstructing them.

use crate::editing::{CommandError, EditCommand};
use crate::tree::Document;

#[derive(Default)]
pub struct EditHistory {
    undo: Vec<Box<dyn EditCommand>>,
    redo: Vec<Box<dyn EditCommand>>,
}

impl EditHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Apply a fresh command and record it. A new edit invalidates any
    /// undone-but-not-redone commands.
    pub fn apply(
        &mut self,
        document: &mut Document,
        mut command: Box<dyn EditCommand>,
    ) -> Result<(), CommandError> {
        command.apply(document)?;
        log::trace!("applied '{}'", command.label());
        self.redo.clear();
        self.undo.push(command);
        Ok(())
    }

    /// Reverse the most recent command. `Ok(false)` when there is nothing
    /// to undo. On failure the command stays at the top of the undo stack.
    pub fn undo(&mut self, document: &mut Document) -> Result<bool, CommandError> {
        let Some(mut command) = self.undo.pop() else {
            return Ok(false);
        };
        match command.unapply(document) {
            Ok(()) => {
                log::trace!("undid '{}'", command.label());
                self.redo.push(command);
                Ok(true)
            }
            Err(e) => {
                self.undo.push(command);
                Err(e)
            }
        }
    }

    /// Replay the most recently undone command. `Ok(false)` when there is
    /// nothing to redo. On failure the command stays at the top of the redo
    /// stack.
    pub fn redo(&mut self, document: &mut Document) -> Result<bool, CommandError> {
        let Some(mut command) = self.redo.pop() else {
            return Ok(false);
        };
        match command.apply(document) {
            Ok(()) => {
                log::trace!("redid '{}'", command.label());
                self.undo.push(command);
                Ok(true)
            }
            Err(e) => {
                self.redo.push(command);
                Err(e)
            }
        }
    }
}
