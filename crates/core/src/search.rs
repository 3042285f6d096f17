//! Matching stored commands against search terms.
//!
//! By default a term matches an entry when the command text or description
//! contains it, ignoring case, and an entry matches when any term does.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::store::{CommandEntry, Store};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Require every term to match instead of any.
    pub match_all: bool,
    /// Score terms with the skim fuzzy matcher instead of substring matching.
    pub fuzzy: bool,
}

/// Entries under one tag, each with its 0-based position in that tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup<'a> {
    pub tag: &'a str,
    pub entries: Vec<(usize, &'a CommandEntry)>,
}

struct Matcher {
    terms: Vec<String>,
    options: SearchOptions,
    fuzzy: SkimMatcherV2,
}

impl Matcher {
    fn new(terms: &[String], options: SearchOptions) -> Self {
        Self {
            terms: terms
                .iter()
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty())
                .collect(),
            options,
            fuzzy: SkimMatcherV2::default().ignore_case(),
        }
    }

    fn field_matches(&self, field: &str, term: &str) -> bool {
        if self.options.fuzzy {
            self.fuzzy.fuzzy_match(field, term).is_some()
        } else {
            field.to_lowercase().contains(term)
        }
    }

    fn term_matches(&self, entry: &CommandEntry, term: &str) -> bool {
        self.field_matches(&entry.command, term)
            || entry
                .description
                .as_deref()
                .is_some_and(|description| self.field_matches(description, term))
    }

    fn matches(&self, entry: &CommandEntry) -> bool {
        if self.terms.is_empty() {
            return false;
        }

        if self.options.match_all {
            self.terms.iter().all(|term| self.term_matches(entry, term))
        } else {
            self.terms.iter().any(|term| self.term_matches(entry, term))
        }
    }
}

/// Finds matching entries, grouped by tag in store order. Tags without a
/// match are left out; an empty term list matches nothing.
#[must_use]
pub fn find<'a>(store: &'a Store, terms: &[String], options: SearchOptions) -> Vec<TagGroup<'a>> {
    let matcher = Matcher::new(terms, options);

    store
        .iter()
        .filter_map(|(tag, entries)| {
            let matched: Vec<(usize, &CommandEntry)> = entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| matcher.matches(entry))
                .collect();

            if matched.is_empty() {
                None
            } else {
                Some(TagGroup {
                    tag,
                    entries: matched,
                })
            }
        })
        .collect()
}
