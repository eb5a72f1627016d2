//! Regex search over note titles and cell text.
//!
//! The query is a regular expression matched case-insensitively anywhere in
//! the title or in any cell's `data`. There is no ranking: results keep
//! notebook order, then note order inside each notebook.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Note, Notebook};
use crate::store::{Library, LibraryStore, NotebookScope};
use regex::{Regex, RegexBuilder};

/// A compiled, case-insensitive note predicate.
#[derive(Debug, Clone)]
pub struct NoteFilter {
    pattern: Regex,
}

impl NoteFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    /// True when the title or any cell matches. Stops at the first matching cell.
    pub fn matches(&self, note: &Note) -> bool {
        self.pattern.is_match(&note.title)
            || note.cells.iter().any(|cell| self.pattern.is_match(&cell.data))
    }
}

/// Notes of the notebooks allowed by `scope` that match `filter`.
pub fn search_notebooks<'a>(
    notebooks: &'a [Notebook],
    filter: &'a NoteFilter,
    scope: &'a NotebookScope,
) -> impl Iterator<Item = &'a Note> + 'a {
    notebooks
        .iter()
        .filter(move |nb| scope.allows(&nb.uuid))
        .flat_map(|nb| nb.notes.iter())
        .filter(move |note| filter.matches(note))
}

/// Runs a search. Queries shorter than `min_chars` are refused before the
/// store is touched.
pub fn run<S: LibraryStore>(
    store: &S,
    query: &str,
    min_chars: usize,
    scope: &NotebookScope,
) -> Result<CmdResult> {
    if query.chars().count() < min_chars {
        let mut result = CmdResult {
            query_too_short: Some(min_chars),
            ..Default::default()
        };
        result.add_message(CmdMessage::warning(format!(
            "The query needs to be at least {} characters long",
            min_chars
        )));
        return Ok(result);
    }

    let filter = NoteFilter::new(query)?;
    let library = Library::load(store, scope)?;
    let hits: Vec<Note> = search_notebooks(&library.notebooks, &filter, scope)
        .cloned()
        .collect();
    log::debug!("query {:?} matched {} notes", query, hits.len());

    let mut result = CmdResult::default();
    if hits.is_empty() {
        result.add_message(CmdMessage::info("Nothing found"));
    }
    Ok(result.with_listed_notes(hits))
}
