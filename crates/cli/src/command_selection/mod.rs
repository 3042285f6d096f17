//! Interactive command selection and report rendering.
//!
//! This module provides the terminal side of cmd-tags: the numbered menus
//! used to pick a tag and then a command, and the styled output of list,
//! search, add and edit.
//!
//! # User Interface
//!
//! Menus are plain numbered lists read one line at a time, so they also work
//! over pipes:
//! - a number from the list selects that item
//! - an empty line, `q` or end of input cancels

// Export public items from submodules
pub mod input;
pub mod ui;

// Re-exports for convenience
pub use input::TerminalPresenter;
pub use ui::{write_added, write_edit_outcome, write_groups, write_menu};
