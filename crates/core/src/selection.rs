//! Resolving a tag, and then one entry under it, from partial user input.
//!
//! Menus are shown through a [`ChoicePresenter`], which only renders labels and
//! hands back whatever the user typed. Parsing and range checking happen here
//! so that every caller (copy, edit, remove) resolves input the same way.

use log::debug;

use crate::error::{Error, Result};
use crate::store::{CommandEntry, Store};

/// Answers that abandon a menu without picking anything.
const CANCEL_ANSWERS: [&str; 2] = ["", "q"];

/// Renders a numbered menu and reads the user's raw answer.
pub trait ChoicePresenter {
    /// Shows `labels` numbered from 1 under `heading` and returns the answer
    /// exactly as entered.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written to or read from.
    fn present_choices(&mut self, heading: &str, labels: &[String]) -> Result<String>;
}

/// An entry picked by the selector, with its 0-based position under its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub tag: &'a str,
    pub index: usize,
    pub entry: &'a CommandEntry,
}

/// Turns a raw menu answer into a 0-based index into `count` choices.
///
/// # Errors
///
/// [`Error::SelectionCancelled`] for an empty answer or `q`,
/// [`Error::InvalidSelection`] for anything that is not a number from 1 to
/// `count`.
pub fn parse_choice(answer: &str, count: usize) -> Result<usize> {
    let answer = answer.trim();

    if CANCEL_ANSWERS.contains(&answer.to_lowercase().as_str()) {
        return Err(Error::SelectionCancelled);
    }

    match answer.parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Ok(choice - 1),
        _ => Err(Error::invalid_selection(answer, count)),
    }
}

/// Converts an explicit 1-based position into a 0-based index.
fn checked_position(position: usize, count: usize) -> Result<usize> {
    if (1..=count).contains(&position) {
        Ok(position - 1)
    } else {
        Err(Error::invalid_selection(&position.to_string(), count))
    }
}

/// Resolves the tag to work with.
///
/// A requested tag must exist. Without one, the only tag is used directly and
/// otherwise the user picks from all tags in store order.
///
/// # Errors
///
/// [`Error::EmptyStore`], [`Error::TagNotFound`], or any error from
/// [`parse_choice`] or the presenter.
pub fn resolve_tag<'a>(
    store: &'a Store,
    requested_tag: Option<&str>,
    presenter: &mut dyn ChoicePresenter,
) -> Result<&'a str> {
    if let Some(requested_tag) = requested_tag {
        return store
            .tags()
            .find(|tag| *tag == requested_tag)
            .ok_or_else(|| Error::TagNotFound(requested_tag.to_string()));
    }

    let tags: Vec<&str> = store.tags().collect();

    match tags.as_slice() {
        [] => Err(Error::EmptyStore),
        [only] => {
            debug!("Only one tag, selecting `{only}`");
            Ok(*only)
        }
        _ => {
            let labels: Vec<String> = tags.iter().map(ToString::to_string).collect();
            let answer = presenter.present_choices("Select a tag:", &labels)?;
            let index = parse_choice(&answer, tags.len())?;
            Ok(tags[index])
        }
    }
}

/// Resolves one entry under an already resolved tag.
///
/// `position` is an explicit 1-based choice that skips the menu. A tag with a
/// single entry also skips the menu.
///
/// # Errors
///
/// [`Error::TagNotFound`], or any error from [`parse_choice`] or the presenter.
pub fn resolve_entry<'a>(
    store: &'a Store,
    tag: &'a str,
    position: Option<usize>,
    presenter: &mut dyn ChoicePresenter,
) -> Result<Selection<'a>> {
    let entries = store
        .entries(tag)
        .ok_or_else(|| Error::TagNotFound(tag.to_string()))?;

    let index = match (position, entries.len()) {
        (Some(position), count) => checked_position(position, count)?,
        (None, 1) => 0,
        (None, count) => {
            let labels: Vec<String> = entries.iter().map(ToString::to_string).collect();
            let heading = format!("Select a command from `{tag}`:");
            let answer = presenter.present_choices(&heading, &labels)?;
            parse_choice(&answer, count)?
        }
    };

    debug!("Selected entry {} of `{tag}`", index + 1);

    Ok(Selection {
        tag,
        index,
        entry: &entries[index],
    })
}

/// The tag-then-entry resolution shared by every verb that targets one entry.
///
/// # Errors
///
/// See [`resolve_tag`] and [`resolve_entry`].
pub fn select_entry<'a>(
    store: &'a Store,
    requested_tag: Option<&str>,
    position: Option<usize>,
    presenter: &mut dyn ChoicePresenter,
) -> Result<Selection<'a>> {
    let tag = resolve_tag(store, requested_tag, presenter)?;
    resolve_entry(store, tag, position, presenter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        answers: VecDeque<String>,
        shown: Vec<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(ToString::to_string).collect(),
                shown: Vec::new(),
            }
        }
    }

    impl ChoicePresenter for Scripted {
        fn present_choices(&mut self, _heading: &str, labels: &[String]) -> Result<String> {
            self.shown.push(labels.to_vec());
            Ok(self.answers.pop_front().expect("unexpected prompt"))
        }
    }

    fn sample_store() -> Store {
        let mut store = Store::new();
        store.push("git", CommandEntry::new("git status".to_string(), None));
        store.push(
            "git",
            CommandEntry::new("git log".to_string(), Some("history".to_string())),
        );
        store.push("docker", CommandEntry::new("docker ps".to_string(), None));
        store
    }

    #[test]
    fn test_parse_choice_in_range() {
        assert_eq!(parse_choice("1", 3).unwrap(), 0);
        assert_eq!(parse_choice(" 3\n", 3).unwrap(), 2);
    }

    #[test]
    fn test_parse_choice_out_of_range() {
        assert!(matches!(
            parse_choice("0", 3),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(matches!(
            parse_choice("4", 3),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(matches!(
            parse_choice("-1", 3),
            Err(Error::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_parse_choice_non_numeric() {
        assert!(matches!(
            parse_choice("git", 3),
            Err(Error::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_parse_choice_cancel() {
        assert!(matches!(parse_choice("", 3), Err(Error::SelectionCancelled)));
        assert!(matches!(parse_choice("Q", 3), Err(Error::SelectionCancelled)));
    }

    #[test]
    fn test_resolve_tag_requested_present() {
        let store = sample_store();
        let mut presenter = Scripted::new(&[]);
        assert_eq!(
            resolve_tag(&store, Some("docker"), &mut presenter).unwrap(),
            "docker"
        );
        assert!(presenter.shown.is_empty());
    }

    #[test]
    fn test_resolve_tag_requested_absent() {
        let store = sample_store();
        let mut presenter = Scripted::new(&[]);
        assert!(matches!(
            resolve_tag(&store, Some("missing"), &mut presenter),
            Err(Error::TagNotFound(tag)) if tag == "missing"
        ));
    }

    #[test]
    fn test_resolve_tag_menu_in_store_order() {
        let store = sample_store();
        let mut presenter = Scripted::new(&["2"]);
        assert_eq!(resolve_tag(&store, None, &mut presenter).unwrap(), "docker");
        assert_eq!(presenter.shown, vec![vec!["git", "docker"]]);
    }

    #[test]
    fn test_resolve_tag_empty_store() {
        let store = Store::new();
        let mut presenter = Scripted::new(&[]);
        assert!(matches!(
            resolve_tag(&store, None, &mut presenter),
            Err(Error::EmptyStore)
        ));
    }

    #[test]
    fn test_resolve_tag_single_tag_skips_menu() {
        let mut store = Store::new();
        store.push("k8s", CommandEntry::new("kubectl get pods".to_string(), None));
        let mut presenter = Scripted::new(&[]);
        assert_eq!(resolve_tag(&store, None, &mut presenter).unwrap(), "k8s");
    }

    #[test]
    fn test_resolve_entry_menu() {
        let store = sample_store();
        let mut presenter = Scripted::new(&["2"]);
        let selection = resolve_entry(&store, "git", None, &mut presenter).unwrap();
        assert_eq!(selection.index, 1);
        assert_eq!(selection.entry.command, "git log");
        assert_eq!(presenter.shown, vec![vec!["git status", "git log (history)"]]);
    }

    #[test]
    fn test_resolve_entry_rejects_zero_and_past_end() {
        let store = sample_store();
        for answer in ["0", "3"] {
            let mut presenter = Scripted::new(&[answer]);
            assert!(matches!(
                resolve_entry(&store, "git", None, &mut presenter),
                Err(Error::InvalidSelection { count: 2, .. })
            ));
        }
    }

    #[test]
    fn test_resolve_entry_explicit_position() {
        let store = sample_store();
        let mut presenter = Scripted::new(&[]);
        let selection = resolve_entry(&store, "git", Some(1), &mut presenter).unwrap();
        assert_eq!(selection.entry.command, "git status");

        assert!(matches!(
            resolve_entry(&store, "git", Some(5), &mut presenter),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(presenter.shown.is_empty());
    }

    #[test]
    fn test_select_entry_two_step() {
        let store = sample_store();
        let mut presenter = Scripted::new(&["1", "2"]);
        let selection = select_entry(&store, None, None, &mut presenter).unwrap();
        assert_eq!(selection.tag, "git");
        assert_eq!(selection.index, 1);
        assert_eq!(presenter.shown.len(), 2);
    }

    #[test]
    fn test_select_entry_cancelled_at_tag() {
        let store = sample_store();
        let mut presenter = Scripted::new(&["q"]);
        assert!(matches!(
            select_entry(&store, None, None, &mut presenter),
            Err(Error::SelectionCancelled)
        ));
    }
}
