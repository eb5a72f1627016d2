use super::LibraryStore;
use crate::error::{QvError, Result};
use crate::model::{Cell, Note, NotebookMeta};
use std::collections::HashSet;

/// In-memory library used by tests. Notebooks and notes keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryLibrary {
    notebooks: Vec<(NotebookMeta, Vec<Note>)>,
    poisoned: HashSet<String>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notebook(&mut self, uuid: &str, name: &str) {
        let meta = NotebookMeta {
            uuid: uuid.to_string(),
            name: name.to_string(),
        };
        self.notebooks.push((meta, Vec::new()));
    }

    /// Adds a note to an existing notebook. Panics if the notebook is unknown.
    pub fn add_note(&mut self, notebook_uuid: &str, uuid: &str, title: &str, cells: Vec<Cell>) {
        let (meta, notes) = self
            .notebooks
            .iter_mut()
            .find(|(meta, _)| meta.uuid == notebook_uuid)
            .expect("notebook must be added before its notes");
        notes.push(Note {
            uuid: uuid.to_string(),
            title: title.to_string(),
            notebook: meta.name.clone(),
            notebook_uuid: meta.uuid.clone(),
            tags: Vec::new(),
            cells,
            resources: None,
        });
    }

    /// Makes reading the notes of `notebook_uuid` fail.
    pub fn poison_notes(&mut self, notebook_uuid: &str) {
        self.poisoned.insert(notebook_uuid.to_string());
    }
}

impl LibraryStore for MemoryLibrary {
    fn notebooks(&self) -> Result<Vec<NotebookMeta>> {
        Ok(self.notebooks.iter().map(|(meta, _)| meta.clone()).collect())
    }

    fn notes(&self, notebook: &NotebookMeta) -> Result<Vec<Note>> {
        if self.poisoned.contains(&notebook.uuid) {
            return Err(QvError::malformed(
                format!("memory://{}", notebook.uuid),
                "poisoned",
            ));
        }
        Ok(self
            .notebooks
            .iter()
            .find(|(meta, _)| meta.uuid == notebook.uuid)
            .map(|(_, notes)| notes.clone())
            .unwrap_or_default())
    }
}
