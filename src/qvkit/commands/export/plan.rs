use super::sanitize::{file_stem, NameAllocator};
use super::{INDEX_FILE, SHARED_RESOURCES_DIR};
use crate::store::Library;
use std::collections::HashMap;

/// Every output name of one export run, decided before anything is written.
///
/// Notebook directories are unique under the destination root and note files
/// are unique inside their notebook directory. Link rewriting reads from the
/// plan, so links always point at the final (possibly suffixed) names.
#[derive(Debug, Default)]
pub struct ExportPlan {
    notebooks: Vec<NotebookPlan>,
    /// Upper-cased note uuid -> (notebook position, note position).
    locations: HashMap<String, (usize, usize)>,
}

#[derive(Debug)]
struct NotebookPlan {
    dir_name: String,
    note_files: Vec<String>,
}

impl ExportPlan {
    pub fn new(library: &Library, with_index: bool) -> Self {
        let mut root_names = NameAllocator::new();
        root_names.reserve(SHARED_RESOURCES_DIR);
        if with_index {
            root_names.reserve(INDEX_FILE);
        }

        let mut plan = Self::default();
        for (nb_pos, notebook) in library.notebooks.iter().enumerate() {
            let dir_name = root_names.claim(&file_stem(&notebook.name), "");

            let mut note_names = NameAllocator::new();
            if with_index {
                note_names.reserve(INDEX_FILE);
            }
            let mut note_files = Vec::with_capacity(notebook.notes.len());
            for (note_pos, note) in notebook.notes.iter().enumerate() {
                note_files.push(note_names.claim(&file_stem(&note.title), ".md"));
                plan.locations
                    .insert(note.uuid.to_uppercase(), (nb_pos, note_pos));
            }

            plan.notebooks.push(NotebookPlan {
                dir_name,
                note_files,
            });
        }
        plan
    }

    pub fn notebook_dir(&self, notebook: usize) -> &str {
        &self.notebooks[notebook].dir_name
    }

    pub fn note_file(&self, notebook: usize, note: usize) -> &str {
        &self.notebooks[notebook].note_files[note]
    }

    /// Relative link from a note in notebook `from` to the note `uuid`.
    ///
    /// Same notebook: the bare file name. Elsewhere: `../<dir>/<file>`.
    /// `None` when the uuid is not part of this export.
    pub fn link_target(&self, from: usize, uuid: &str) -> Option<String> {
        let &(nb, note) = self.locations.get(&uuid.to_uppercase())?;
        let file = self.note_file(nb, note);
        if nb == from {
            Some(file.to_string())
        } else {
            Some(format!("../{}/{}", self.notebook_dir(nb), file))
        }
    }
}
