//! # Storage Layer
//!
//! Read-only access to a Quiver library through the [`LibraryStore`] trait.
//!
//! ## Implementations
//!
//! - [`fs::FsLibrary`]: the on-disk `.qvlibrary` directory
//! - `memory::MemoryLibrary`: in-memory notebooks for tests
//!
//! ## Library Format
//!
//! ```text
//! Quiver.qvlibrary/
//! ├── <notebook-uuid>.qvnotebook/
//! │   ├── meta.json              # {uuid, name}
//! │   └── <note-uuid>.qvnote/
//! │       ├── meta.json          # {uuid, title, tags}
//! │       ├── content.json       # {cells: [{type, data, diagramType?}]}
//! │       └── resources/         # optional attachments
//! ```
//!
//! The store hands out notebook metadata separately from notes so that
//! notebooks excluded by a [`NotebookScope`] are never read past their
//! `meta.json`. [`Library::load`] then materializes the scoped tree once; the
//! result is a plain owned value and may be traversed any number of times.

use crate::error::Result;
use crate::model::{Note, Notebook, NotebookMeta};

pub mod fs;
#[cfg(any(test, feature = "test_utils"))]
pub mod memory;

pub trait LibraryStore {
    /// Notebook metadata, in stable (directory name) order.
    fn notebooks(&self) -> Result<Vec<NotebookMeta>>;

    /// Fully populated notes of one notebook, in stable (directory name) order.
    fn notes(&self, notebook: &NotebookMeta) -> Result<Vec<Note>>;
}

/// Restricts an operation to a subset of notebooks, by uuid.
///
/// Exclusion always wins: a notebook listed in both sets is dropped. An empty
/// `include` list means every notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookScope {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl NotebookScope {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn including(mut self, uuids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include.extend(uuids.into_iter().map(Into::into));
        self
    }

    pub fn excluding(mut self, uuids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(uuids.into_iter().map(Into::into));
        self
    }

    pub fn allows(&self, uuid: &str) -> bool {
        if self.exclude.iter().any(|u| u == uuid) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|u| u == uuid)
    }
}

/// A fully loaded snapshot of (part of) a library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    pub notebooks: Vec<Notebook>,
}

impl Library {
    pub fn load<S: LibraryStore>(store: &S, scope: &NotebookScope) -> Result<Self> {
        let mut notebooks = Vec::new();
        for meta in store.notebooks()? {
            if !scope.allows(&meta.uuid) {
                log::debug!("skipping notebook {} ({})", meta.name, meta.uuid);
                continue;
            }
            log::debug!("loading notebook {} ({})", meta.name, meta.uuid);
            let notes = store.notes(&meta)?;
            notebooks.push(Notebook::new(meta, notes));
        }
        Ok(Self { notebooks })
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notebooks.iter().flat_map(|nb| nb.notes.iter())
    }

    pub fn note_count(&self) -> usize {
        self.notebooks.iter().map(|nb| nb.notes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryLibrary;
    use super::*;
    use crate::model::Cell;

    fn store() -> MemoryLibrary {
        let mut store = MemoryLibrary::new();
        store.add_notebook("NB-WORK", "Work");
        store.add_note("NB-WORK", "N1", "Sprint Plan", vec![Cell::text("goals")]);
        store.add_note("NB-WORK", "N2", "Retro", vec![]);
        store.add_notebook("NB-HOME", "Personal");
        store.add_note("NB-HOME", "N3", "Groceries", vec![]);
        store
    }

    #[test]
    fn scope_exclusion_wins_over_inclusion() {
        let scope = NotebookScope::all()
            .including(["A", "B"])
            .excluding(["B"]);
        assert!(scope.allows("A"));
        assert!(!scope.allows("B"));
        assert!(!scope.allows("C"));
    }

    #[test]
    fn empty_scope_allows_everything() {
        assert!(NotebookScope::all().allows("anything"));
    }

    #[test]
    fn load_keeps_store_order_and_back_references() {
        let lib = Library::load(&store(), &NotebookScope::all()).unwrap();
        let names: Vec<_> = lib.notebooks.iter().map(|nb| nb.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Personal"]);
        assert_eq!(lib.note_count(), 3);
        let groceries = lib.notes().find(|n| n.title == "Groceries").unwrap();
        assert_eq!(groceries.notebook, "Personal");
        assert_eq!(groceries.notebook_uuid, "NB-HOME");
    }

    #[test]
    fn load_does_not_read_excluded_notebooks() {
        let mut store = store();
        store.poison_notes("NB-WORK");
        let lib = Library::load(&store, &NotebookScope::all().excluding(["NB-WORK"])).unwrap();
        assert_eq!(lib.notebooks.len(), 1);
        assert!(Library::load(&store, &NotebookScope::all()).is_err());
    }

    #[test]
    fn loaded_library_is_reiterable() {
        let lib = Library::load(&store(), &NotebookScope::all()).unwrap();
        let first: Vec<_> = lib.notes().map(|n| n.uuid.clone()).collect();
        let second: Vec<_> = lib.notes().map(|n| n.uuid.clone()).collect();
        assert_eq!(first, second);
    }
}
