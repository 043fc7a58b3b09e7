//! # dom-edit
//!
//! A headless editing core: a retained document tree of elements and text
//! leaves, reversible edit commands over that tree, and a linear undo/redo
//! history that hosts them.

pub mod editing;
pub mod history;
pub mod tree;
