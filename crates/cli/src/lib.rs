//! cmd-tags CLI Library
//!
//! This crate provides the command-line interface for cmd-tags, a personal
//! command-snippet manager. It parses arguments, shows the numbered menus used
//! to pick a stored command, copies commands to the clipboard and renders
//! reports.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`command_selection`]: Numbered menus on the terminal and styled output
//! - [`clipboard`]: OSC 52 clipboard writer
//!
//! # Examples
//!
//! The CLI binary (`ct`) can be used in several ways:
//!
//! ```bash
//! # Store a command with a description
//! ct add git "git log --oneline --graph" "compact history"
//!
//! # Pick a tag, then a command, and copy it
//! ct copy
//!
//! # Copy the second command under `git` without any menu
//! ct copy git --index 2
//!
//! # Edit a command in $EDITOR
//! ct edit git
//!
//! # Find commands mentioning docker or compose
//! ct search docker compose
//!
//! # Show everything
//! ct list
//! ```

pub mod cli_args;
pub mod clipboard;
pub mod command_selection;
