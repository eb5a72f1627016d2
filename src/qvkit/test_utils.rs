use crate::store::fs::NOTEBOOK_EXT;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a throwaway on-disk Quiver library.
pub struct LibraryFixture {
    // Kept so the directory outlives the fixture's users.
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for LibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryFixture {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("Quiver.qvlibrary");
        fs::create_dir(&root).expect("failed to create library root");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A scratch directory next to the library, e.g. for export output.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self._temp_dir.path().join(name)
    }

    pub fn notebook_dir(&self, uuid: &str) -> PathBuf {
        self.root.join(format!("{}{}", uuid, NOTEBOOK_EXT))
    }

    pub fn note_dir(&self, notebook: &str, note: &str) -> PathBuf {
        self.notebook_dir(notebook).join(format!("{}.qvnote", note))
    }

    /// Writes a notebook and returns its uuid.
    pub fn notebook(&self, uuid: &str, name: &str) -> String {
        let dir = self.notebook_dir(uuid);
        fs::create_dir_all(&dir).unwrap();
        write_json(&dir.join("meta.json"), &json!({ "uuid": uuid, "name": name }));
        uuid.to_string()
    }

    pub fn note<'a>(&'a self, notebook: &str, title: &str) -> NoteBuilder<'a> {
        NoteBuilder {
            fixture: self,
            notebook: notebook.to_string(),
            uuid: new_uuid(),
            title: title.to_string(),
            tags: Vec::new(),
            cells: Vec::new(),
            resources: Vec::new(),
        }
    }
}

pub struct NoteBuilder<'a> {
    fixture: &'a LibraryFixture,
    notebook: String,
    uuid: String,
    title: String,
    tags: Vec<String>,
    cells: Vec<Value>,
    resources: Vec<(String, Vec<u8>)>,
}

impl NoteBuilder<'_> {
    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = uuid.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn text(mut self, data: &str) -> Self {
        self.cells.push(json!({ "type": "text", "data": data }));
        self
    }

    pub fn code(mut self, data: &str, language: Option<&str>) -> Self {
        let mut cell = json!({ "type": "code", "data": data });
        if let Some(language) = language {
            cell["language"] = json!(language);
        }
        self.cells.push(cell);
        self
    }

    pub fn diagram(mut self, data: &str, diagram_type: &str) -> Self {
        self.cells.push(json!({
            "type": "diagram",
            "diagramType": diagram_type,
            "data": data,
        }));
        self
    }

    pub fn resource(mut self, name: &str, bytes: &[u8]) -> Self {
        self.resources.push((name.to_string(), bytes.to_vec()));
        self
    }

    /// Writes the note and returns its uuid.
    pub fn write(self) -> String {
        let dir = self.fixture.note_dir(&self.notebook, &self.uuid);
        fs::create_dir_all(&dir).unwrap();
        write_json(
            &dir.join("meta.json"),
            &json!({ "uuid": self.uuid, "title": self.title, "tags": self.tags }),
        );
        write_json(
            &dir.join("content.json"),
            &json!({ "title": self.title, "cells": self.cells }),
        );
        if !self.resources.is_empty() {
            let res_dir = dir.join("resources");
            fs::create_dir_all(&res_dir).unwrap();
            for (name, bytes) in &self.resources {
                fs::write(res_dir.join(name), bytes).unwrap();
            }
        }
        self.uuid
    }
}

/// Uppercase v4 uuid, the shape Quiver uses for note ids.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string().to_uppercase()
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
