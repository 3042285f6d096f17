//! The verbs of the tool, built on [`Store`], [`StoreFile`] and the selector.
//!
//! Mutating operations save the store before returning, so a successful
//! result means the change is on disk. Any error leaves both the in-memory
//! store and the commands file as they were.

use log::info;

use crate::clipboard::Clipboard;
use crate::editor::TextEditor;
use crate::error::{Error, Result};
use crate::file_handling::StoreFile;
use crate::search::{self, SearchOptions, TagGroup};
use crate::selection::{select_entry, ChoicePresenter};
use crate::store::{CommandEntry, Store};

/// Result of a completed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated {
        tag: String,
        previous: String,
        command: String,
    },
    Unchanged {
        tag: String,
        command: String,
    },
}

/// Appends a command under `tag`, creating the tag if it is new.
///
/// # Errors
///
/// Returns an error if the store cannot be saved, in which case the entry is
/// not kept in memory either.
pub fn add<'a>(
    store: &'a mut Store,
    store_file: &StoreFile,
    tag: &str,
    command: &str,
    description: Option<&str>,
) -> Result<&'a CommandEntry> {
    let entry = CommandEntry::new(command.to_string(), description.map(ToString::to_string));

    let mut updated = store.clone();
    let index = updated.push(tag, entry);
    store_file.save(&updated)?;
    *store = updated;

    info!("Added command {} under `{tag}`", index + 1);

    store
        .entries(tag)
        .and_then(|entries| entries.get(index))
        .ok_or_else(|| Error::TagNotFound(tag.to_string()))
}

/// Copies the selected command to the clipboard and returns it.
///
/// # Errors
///
/// Selection errors, or [`Error::Clipboard`] if the clipboard rejected it.
pub fn copy(
    store: &Store,
    tag: Option<&str>,
    position: Option<usize>,
    presenter: &mut dyn ChoicePresenter,
    clipboard: &mut dyn Clipboard,
) -> Result<String> {
    let selection = select_entry(store, tag, position, presenter)?;
    clipboard.set_text(&selection.entry.command)?;

    info!(
        "Copied command {} of `{}`",
        selection.index + 1,
        selection.tag
    );
    Ok(selection.entry.command.clone())
}

/// Lets the user rewrite the selected command in an editor and saves it in
/// the same position.
///
/// The edited text is trimmed. An editor failure or a blank result aborts
/// without touching the store.
///
/// # Errors
///
/// Selection errors, [`Error::EditorAborted`], or a save failure.
pub fn edit(
    store: &mut Store,
    store_file: &StoreFile,
    tag: Option<&str>,
    position: Option<usize>,
    presenter: &mut dyn ChoicePresenter,
    editor: &mut dyn TextEditor,
) -> Result<EditOutcome> {
    let (tag, index, previous) = {
        let selection = select_entry(store, tag, position, presenter)?;
        (
            selection.tag.to_string(),
            selection.index,
            selection.entry.command.clone(),
        )
    };

    let edited = editor.edit_text(&previous)?;
    let command = edited.trim().to_string();

    if command.is_empty() {
        return Err(Error::EditorAborted("the edited command is empty".to_string()));
    }

    if command == previous {
        return Ok(EditOutcome::Unchanged { tag, command });
    }

    let mut updated = store.clone();
    updated.replace_command(&tag, index, command.clone())?;
    store_file.save(&updated)?;
    *store = updated;

    info!("Edited command {} of `{tag}`", index + 1);

    Ok(EditOutcome::Updated {
        tag,
        previous,
        command,
    })
}

/// Removes the selected command, dropping its tag if it was the last one.
///
/// # Errors
///
/// Selection errors or a save failure.
pub fn remove(
    store: &mut Store,
    store_file: &StoreFile,
    tag: Option<&str>,
    position: Option<usize>,
    presenter: &mut dyn ChoicePresenter,
) -> Result<(String, CommandEntry)> {
    let (tag, index) = {
        let selection = select_entry(store, tag, position, presenter)?;
        (selection.tag.to_string(), selection.index)
    };

    let mut updated = store.clone();
    let removed = updated.remove(&tag, index)?;
    store_file.save(&updated)?;
    *store = updated;

    info!("Removed command {} of `{tag}`", index + 1);

    Ok((tag, removed))
}

/// Finds commands matching `terms`. See [`search::find`].
#[must_use]
pub fn search<'a>(store: &'a Store, terms: &[String], options: SearchOptions) -> Vec<TagGroup<'a>> {
    search::find(store, terms, options)
}

/// Walks the store lazily, one group per tag, optionally limited to one tag.
///
/// # Errors
///
/// [`Error::EmptyStore`] if there is nothing to list, [`Error::TagNotFound`]
/// for an unknown tag.
pub fn list<'a>(
    store: &'a Store,
    tag: Option<&'a str>,
) -> Result<impl Iterator<Item = TagGroup<'a>>> {
    if store.is_empty() {
        return Err(Error::EmptyStore);
    }

    if let Some(tag) = tag {
        if !store.contains_tag(tag) {
            return Err(Error::TagNotFound(tag.to_string()));
        }
    }

    Ok(store
        .iter()
        .filter(move |(name, _)| tag.map_or(true, |tag| tag == *name))
        .map(|(tag, entries)| TagGroup {
            tag,
            entries: entries.iter().enumerate().collect(),
        }))
}
