use super::LibraryStore;
use crate::error::{QvError, Result};
use crate::model::{Note, NoteContent, NoteMeta, NotebookMeta};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const NOTEBOOK_EXT: &str = ".qvnotebook";
const META_FILE: &str = "meta.json";
const CONTENT_FILE: &str = "content.json";
const RESOURCES_DIR: &str = "resources";

/// A Quiver library on disk (`*.qvlibrary`).
#[derive(Debug, Clone)]
pub struct FsLibrary {
    root: PathBuf,
}

impl FsLibrary {
    /// Opens the library at `root`, which must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(QvError::LibraryNotFound(root));
        }
        Ok(Self { root })
    }

    fn notebook_dir(&self, notebook: &NotebookMeta) -> PathBuf {
        self.root.join(format!("{}{}", notebook.uuid, NOTEBOOK_EXT))
    }

    fn load_note(&self, notebook: &NotebookMeta, note_dir: &Path) -> Result<Note> {
        let meta: NoteMeta = read_json(&note_dir.join(META_FILE))?;
        let content: NoteContent = read_json(&note_dir.join(CONTENT_FILE))?;
        let note = Note::from_parts(notebook, meta, content);

        let resources = note_dir.join(RESOURCES_DIR);
        if resources.is_dir() {
            Ok(note.with_resources(resources))
        } else {
            if resources.exists() {
                log::warn!("ignoring {}: not a directory", resources.display());
            }
            Ok(note)
        }
    }
}

impl LibraryStore for FsLibrary {
    fn notebooks(&self) -> Result<Vec<NotebookMeta>> {
        let mut notebooks = Vec::new();
        for name in sorted_entries(&self.root)? {
            if !name.ends_with(NOTEBOOK_EXT) {
                continue;
            }
            let meta: NotebookMeta = read_json(&self.root.join(&name).join(META_FILE))?;
            notebooks.push(meta);
        }
        Ok(notebooks)
    }

    fn notes(&self, notebook: &NotebookMeta) -> Result<Vec<Note>> {
        let dir = self.notebook_dir(notebook);
        let mut notes = Vec::new();
        for name in sorted_entries(&dir)? {
            let path = dir.join(&name);
            if path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            if !path.is_dir() {
                log::debug!("ignoring stray file {}", path.display());
                continue;
            }
            let note = self.load_note(notebook, &path)?;
            log::debug!("loaded note {} ({})", note.title, note.uuid);
            notes.push(note);
        }
        Ok(notes)
    }
}

/// Entry names of `dir`, sorted lexicographically.
fn sorted_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(QvError::malformed(path, "file is missing"));
        }
        Err(e) => return Err(QvError::Io(e)),
    };
    serde_json::from_str(&content).map_err(|e| QvError::malformed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellKind;
    use crate::test_utils::LibraryFixture;

    #[test]
    fn open_missing_library_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsLibrary::open(dir.path().join("missing.qvlibrary")).unwrap_err();
        assert!(matches!(err, QvError::LibraryNotFound(_)));
    }

    #[test]
    fn open_file_instead_of_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            FsLibrary::open(&file),
            Err(QvError::LibraryNotFound(_))
        ));
    }

    #[test]
    fn notebooks_are_sorted_by_directory_name() {
        let fx = LibraryFixture::new();
        fx.notebook("BBBB", "Second");
        fx.notebook("AAAA", "First");
        std::fs::create_dir(fx.root().join("not-a-notebook")).unwrap();

        let lib = FsLibrary::open(fx.root()).unwrap();
        let names: Vec<_> = lib.notebooks().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn notes_merge_meta_content_and_resources() {
        let fx = LibraryFixture::new();
        let nb = fx.notebook("NB", "Work");
        let with_res = fx
            .note(&nb, "Plan")
            .tags(&["alpha"])
            .text("hello")
            .resource("img", b"data")
            .write();
        let plain = fx.note(&nb, "Plain").code("ls", Some("bash")).write();

        let lib = FsLibrary::open(fx.root()).unwrap();
        let meta = lib.notebooks().unwrap().remove(0);
        let notes = lib.notes(&meta).unwrap();
        assert_eq!(notes.len(), 2);

        let plan = notes.iter().find(|n| n.uuid == with_res).unwrap();
        assert_eq!(plan.notebook, "Work");
        assert_eq!(plan.notebook_uuid, "NB");
        assert_eq!(plan.tags, vec!["alpha"]);
        assert_eq!(plan.cells[0].data, "hello");
        assert!(plan.resources.as_ref().unwrap().ends_with("resources"));

        let plain = notes.iter().find(|n| n.uuid == plain).unwrap();
        assert_eq!(plain.cells[0].kind, CellKind::Code);
        assert!(plain.resources.is_none());
    }

    #[test]
    fn resources_file_is_not_a_resources_dir() {
        let fx = LibraryFixture::new();
        let nb = fx.notebook("NB", "Work");
        let odd = fx.note(&nb, "Odd").uuid("ODD-NOTE").write();
        std::fs::write(fx.note_dir(&nb, &odd).join("resources"), "not a dir").unwrap();

        let lib = FsLibrary::open(fx.root()).unwrap();
        let meta = lib.notebooks().unwrap().remove(0);
        let notes = lib.notes(&meta).unwrap();

        assert_eq!(notes[0].uuid, "ODD-NOTE");
        assert!(notes[0].resources.is_none());
    }

    #[test]
    fn stray_files_in_notebook_are_ignored() {
        let fx = LibraryFixture::new();
        let nb = fx.notebook("NB", "Work");
        fx.note(&nb, "Only").write();
        std::fs::write(fx.notebook_dir(&nb).join(".DS_Store"), "x").unwrap();

        let lib = FsLibrary::open(fx.root()).unwrap();
        let meta = lib.notebooks().unwrap().remove(0);
        assert_eq!(lib.notes(&meta).unwrap().len(), 1);
    }

    #[test]
    fn malformed_note_names_the_file() {
        let fx = LibraryFixture::new();
        let nb = fx.notebook("NB", "Work");
        let uuid = fx.note(&nb, "Broken").write();
        let meta_path = fx.note_dir(&nb, &uuid).join("meta.json");
        std::fs::write(&meta_path, "{ not json").unwrap();

        let lib = FsLibrary::open(fx.root()).unwrap();
        let meta = lib.notebooks().unwrap().remove(0);
        match lib.notes(&meta).unwrap_err() {
            QvError::MalformedMetadata { path, .. } => assert_eq!(path, meta_path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_content_file_is_malformed() {
        let fx = LibraryFixture::new();
        let nb = fx.notebook("NB", "Work");
        let uuid = fx.note(&nb, "Half").write();
        std::fs::remove_file(fx.note_dir(&nb, &uuid).join("content.json")).unwrap();

        let lib = FsLibrary::open(fx.root()).unwrap();
        let meta = lib.notebooks().unwrap().remove(0);
        let err = lib.notes(&meta).unwrap_err();
        assert!(err.to_string().contains("content.json"));
    }

    #[test]
    fn notebook_without_name_is_malformed() {
        let fx = LibraryFixture::new();
        let dir = fx.root().join("X.qvnotebook");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("meta.json"), r#"{"uuid": "X"}"#).unwrap();

        let lib = FsLibrary::open(fx.root()).unwrap();
        assert!(matches!(
            lib.notebooks(),
            Err(QvError::MalformedMetadata { .. })
        ));
    }
}
