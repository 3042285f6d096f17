//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Every invocation names exactly one verb; running without one prints
//! usage and exits with a non-zero code.

use clap::{Parser, Subcommand};
use cmd_tags_core::file_handling::LockMode;

/// Command-line arguments for the `ct` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use cmd_tags_cli::cli_args::{Args, Verb};
///
/// let args = Args::parse_from(["ct", "list"]);
/// assert_eq!(args.verb, Verb::List { tag: None });
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(
    term_width = 0, // Just to make testing across clap features easier
    version,
    about = "Store shell commands under tags, then list, search, copy or edit them.",
    arg_required_else_help = true,
    subcommand_required = true
)]
pub struct Args {
    /// Path to the commands file.
    ///
    /// If not provided, uses `store_path` from the settings file, and
    /// otherwise `~/.cmd-tags/commands.yml`.
    #[arg(long, short = 's', global = true)]
    pub store_path: Option<String>,

    /// Path to the settings file.
    ///
    /// If not provided, defaults to `~/.cmd-tags/config.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    /// Editor command used by `edit`, e.g. `vim` or `code --wait`.
    ///
    /// If not provided, uses `editor` from the settings file, then `$VISUAL`,
    /// then `$EDITOR`, then `vi`.
    #[arg(long, short = 'e', global = true)]
    pub editor: Option<String>,

    #[command(subcommand)]
    pub verb: Verb,
}

/// Which stored command a verb acts on.
///
/// Without a tag the user picks one from a numbered list. Without an index
/// the user picks a command under the tag the same way.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Tag to pick the command from.
    pub tag: Option<String>,

    /// 1-based position of the command under the tag.
    #[arg(long, short = 'i')]
    pub index: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Add a command under a tag, creating the tag if needed.
    #[command(visible_alias = "a")]
    Add {
        tag: String,
        command: String,
        description: Option<String>,
    },

    /// Copy a stored command to the clipboard.
    #[command(visible_alias = "c")]
    Copy(Target),

    /// Edit a stored command in your editor.
    #[command(visible_alias = "e")]
    Edit(Target),

    /// Remove a stored command. A tag without commands is removed too.
    #[command(visible_alias = "rm")]
    Remove(Target),

    /// Search commands and descriptions, ignoring case.
    #[command(visible_alias = "s")]
    Search {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Only show commands matching every term.
        #[arg(long, short = 'a')]
        all: bool,

        /// Match terms fuzzily instead of as substrings.
        #[arg(long, short = 'f')]
        fuzzy: bool,
    },

    /// List all stored commands, or those under one tag.
    #[command(visible_alias = "l", alias = "ls")]
    List { tag: Option<String> },
}

impl Verb {
    /// Verbs that never save the store share the lock with each other.
    #[must_use]
    pub fn lock_mode(&self) -> LockMode {
        match self {
            Verb::Copy(_) | Verb::Search { .. } | Verb::List { .. } => LockMode::Shared,
            Verb::Add { .. } | Verb::Edit(_) | Verb::Remove(_) => LockMode::Exclusive,
        }
    }
}
