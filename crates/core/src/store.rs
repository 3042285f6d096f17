//! In-memory model of the tagged command store.
//!
//! A [`Store`] maps each tag to a non-empty, insertion-ordered list of
//! [`CommandEntry`] values. Tag order is the order tags were first added (or
//! the order they appear in the commands file), which is also the order used
//! for every numbered menu and report.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Accepts both the structured form and the bare-string entries written by
/// older versions of the tool (`tag: ["git status"]`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Bare(String),
    Full {
        command: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<RawEntry> for CommandEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Bare(command) => CommandEntry::new(command, None),
            RawEntry::Full {
                command,
                description,
            } => CommandEntry::new(command, description),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RawEntry")]
pub struct CommandEntry {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandEntry {
    /// Creates an entry, treating a blank description as absent.
    pub fn new(command: String, description: Option<String>) -> Self {
        Self {
            command,
            description: description.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl Display for CommandEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.command)?;

        if let Some(desc) = &self.description {
            write!(formatter, " ({desc})")?;
        }

        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Store {
    tags: IndexMap<String, Vec<CommandEntry>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Number of entries across all tags.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.tags.values().map(Vec::len).sum()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    #[must_use]
    pub fn entries(&self, tag: &str) -> Option<&[CommandEntry]> {
        self.tags.get(tag).map(Vec::as_slice)
    }

    /// Iterates tags with their entries in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CommandEntry])> {
        self.tags
            .iter()
            .map(|(tag, entries)| (tag.as_str(), entries.as_slice()))
    }

    /// Appends an entry under `tag`, creating the tag if needed. Returns the
    /// 0-based index of the new entry.
    pub fn push(&mut self, tag: &str, entry: CommandEntry) -> usize {
        let entries = self.tags.entry(tag.to_string()).or_default();
        entries.push(entry);
        entries.len() - 1
    }

    /// Replaces the command text of one entry, leaving its description alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TagNotFound`] for an unknown tag and
    /// [`Error::InvalidSelection`] for an index past the end.
    pub fn replace_command(&mut self, tag: &str, index: usize, command: String) -> Result<()> {
        let entries = self
            .tags
            .get_mut(tag)
            .ok_or_else(|| Error::TagNotFound(tag.to_string()))?;
        let count = entries.len();
        let entry = entries
            .get_mut(index)
            .ok_or_else(|| Error::invalid_selection(&(index + 1).to_string(), count))?;

        entry.command = command;
        Ok(())
    }

    /// Removes one entry. A tag left without entries is removed as well, and
    /// the remaining tags keep their order.
    ///
    /// # Errors
    ///
    /// Same as [`Store::replace_command`].
    pub fn remove(&mut self, tag: &str, index: usize) -> Result<CommandEntry> {
        let entries = self
            .tags
            .get_mut(tag)
            .ok_or_else(|| Error::TagNotFound(tag.to_string()))?;

        if index >= entries.len() {
            return Err(Error::invalid_selection(
                &(index + 1).to_string(),
                entries.len(),
            ));
        }

        let removed = entries.remove(index);

        if entries.is_empty() {
            self.tags.shift_remove(tag);
        }

        Ok(removed)
    }

    /// Drops tags without entries, returning how many were dropped.
    pub(crate) fn prune_empty_tags(&mut self) -> usize {
        let before = self.tags.len();
        self.tags.retain(|_, entries| !entries.is_empty());
        before - self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(command: &str) -> CommandEntry {
        CommandEntry::new(command.to_string(), None)
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut store = Store::new();
        assert_eq!(store.push("git", entry("git status")), 0);
        assert_eq!(store.push("git", entry("git log")), 1);
        assert_eq!(store.push("docker", entry("docker ps")), 0);

        let git = store.entries("git").unwrap();
        assert_eq!(git[0].command, "git status");
        assert_eq!(git[1].command, "git log");
        assert_eq!(store.len(), 2);
        assert_eq!(store.command_count(), 3);
    }

    #[test]
    fn test_push_allows_duplicates() {
        let mut store = Store::new();
        store.push("git", entry("git status"));
        store.push("git", entry("git status"));
        assert_eq!(store.entries("git").unwrap().len(), 2);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let mut store = Store::new();
        store.push("Git", entry("git status"));
        assert!(store.contains_tag("Git"));
        assert!(!store.contains_tag("git"));
    }

    #[test]
    fn test_blank_description_is_absent() {
        let entry = CommandEntry::new("ls".to_string(), Some("  ".to_string()));
        assert_eq!(entry.description, None);
    }

    #[test]
    fn test_entry_display() {
        let with_desc = CommandEntry::new("git log".to_string(), Some("show log".to_string()));
        assert_eq!(format!("{with_desc}"), "git log (show log)");
        assert_eq!(format!("{}", entry("git status")), "git status");
    }

    #[test]
    fn test_replace_command_keeps_description() {
        let mut store = Store::new();
        store.push(
            "git",
            CommandEntry::new("git log".to_string(), Some("show log".to_string())),
        );
        store
            .replace_command("git", 0, "git log --oneline".to_string())
            .unwrap();

        let edited = &store.entries("git").unwrap()[0];
        assert_eq!(edited.command, "git log --oneline");
        assert_eq!(edited.description.as_deref(), Some("show log"));
    }

    #[test]
    fn test_replace_command_out_of_range() {
        let mut store = Store::new();
        store.push("git", entry("git status"));
        let result = store.replace_command("git", 1, "x".to_string());
        assert!(matches!(
            result,
            Err(Error::InvalidSelection { count: 1, .. })
        ));
    }

    #[test]
    fn test_remove_last_entry_removes_tag_and_keeps_order() {
        let mut store = Store::new();
        store.push("a", entry("one"));
        store.push("b", entry("two"));
        store.push("c", entry("three"));

        let removed = store.remove("b", 0).unwrap();
        assert_eq!(removed.command, "two");
        assert_eq!(store.tags().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_unknown_tag() {
        let mut store = Store::new();
        assert!(matches!(store.remove("nope", 0), Err(Error::TagNotFound(_))));
    }

    #[test]
    fn test_deserialize_bare_and_full_entries() {
        let yaml = r#"
git:
  - git status
  - command: git log
    description: show log
"#;
        let store: Store = serde_yaml::from_str(yaml).unwrap();
        let git = store.entries("git").unwrap();
        assert_eq!(git[0], entry("git status"));
        assert_eq!(git[1].description.as_deref(), Some("show log"));
    }

    #[test]
    fn test_prune_empty_tags() {
        let mut store: Store = serde_yaml::from_str("a: []\nb: [ls]\n").unwrap();
        assert_eq!(store.prune_empty_tags(), 1);
        assert_eq!(store.tags().collect::<Vec<_>>(), vec!["b"]);
    }
}
