//! cmd-tags Core Library
//!
//! This crate provides the core functionality for cmd-tags, a personal
//! command-snippet manager that stores shell commands under tags, with
//! optional descriptions, so they can be listed, searched, copied or edited
//! later.
//!
//! # Key Features
//!
//! - **Tagged Store**: Insertion-ordered tags, each holding a non-empty list of commands
//! - **Durable Persistence**: YAML commands file, bootstrapped on first run and replaced atomically
//! - **Selection**: Numbered-menu resolution of a tag and then one entry under it
//! - **Operations**: Add, copy, edit, remove, search and list
//! - **Error Handling**: Typed errors for every failure mode
//!
//! # Examples
//!
//! Loading the store and adding a command:
//!
//! ```no_run
//! use cmd_tags_core::file_handling::StoreFile;
//! use cmd_tags_core::operations;
//!
//! let store_file = StoreFile::new("/tmp/cmd-tags/commands.yml");
//! let mut store = store_file.load()?;
//! operations::add(&mut store, &store_file, "git", "git log --oneline", Some("show log"))?;
//! # Ok::<(), cmd_tags_core::error::Error>(())
//! ```

pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod file_handling;
pub mod operations;
pub mod search;
pub mod selection;
pub mod store;
