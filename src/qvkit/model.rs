//! Core data types for a loaded Quiver library.
//!
//! The on-disk records (`meta.json`, `content.json`) are deserialized into the
//! `*Meta` / [`NoteContent`] shapes and merged into [`Note`] by the store. Unknown
//! JSON fields are ignored; missing required ones are reported as malformed
//! metadata by the loader.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Notebook metadata as stored in `<uuid>.qvnotebook/meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMeta {
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub uuid: String,
    pub name: String,
    pub notes: Vec<Note>,
}

impl Notebook {
    pub fn new(meta: NotebookMeta, notes: Vec<Note>) -> Self {
        Self {
            uuid: meta.uuid,
            name: meta.name,
            notes,
        }
    }
}

/// Note metadata as stored in `<note>/meta.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteMeta {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Note body as stored in `<note>/content.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteContent {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub uuid: String,
    pub title: String,
    /// Name of the owning notebook.
    pub notebook: String,
    pub notebook_uuid: String,
    pub tags: Vec<String>,
    pub cells: Vec<Cell>,
    /// The note's `resources` directory, when it has one.
    pub resources: Option<PathBuf>,
}

impl Note {
    pub fn from_parts(notebook: &NotebookMeta, meta: NoteMeta, content: NoteContent) -> Self {
        Self {
            uuid: meta.uuid,
            title: meta.title,
            notebook: notebook.name.clone(),
            notebook_uuid: notebook.uuid.clone(),
            tags: meta.tags,
            cells: content.cells,
            resources: None,
        }
    }

    pub fn with_resources(mut self, dir: PathBuf) -> Self {
        self.resources = Some(dir);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellKind,
    #[serde(default)]
    pub data: String,
    #[serde(
        rename = "diagramType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub diagram_type: Option<DiagramType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Cell {
    pub fn new(kind: CellKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            diagram_type: None,
            language: None,
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        Self::new(CellKind::Text, data)
    }

    pub fn code(data: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            language: language.map(str::to_string),
            ..Self::new(CellKind::Code, data)
        }
    }

    pub fn diagram(data: impl Into<String>, diagram_type: DiagramType) -> Self {
        Self {
            diagram_type: Some(diagram_type),
            ..Self::new(CellKind::Diagram, data)
        }
    }
}

/// Cell type. Types this tool has no special handling for are kept as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellKind {
    Text,
    Markdown,
    Code,
    Latex,
    Diagram,
    Unknown(String),
}

impl From<String> for CellKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => CellKind::Text,
            "markdown" => CellKind::Markdown,
            "code" => CellKind::Code,
            "latex" => CellKind::Latex,
            "diagram" => CellKind::Diagram,
            _ => CellKind::Unknown(s),
        }
    }
}

impl From<CellKind> for String {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Text => "text".to_string(),
            CellKind::Markdown => "markdown".to_string(),
            CellKind::Code => "code".to_string(),
            CellKind::Latex => "latex".to_string(),
            CellKind::Diagram => "diagram".to_string(),
            CellKind::Unknown(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiagramType {
    Sequence,
    Flow,
    Unknown(String),
}

impl From<String> for DiagramType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sequence" => DiagramType::Sequence,
            "flow" => DiagramType::Flow,
            _ => DiagramType::Unknown(s),
        }
    }
}

impl From<DiagramType> for String {
    fn from(kind: DiagramType) -> Self {
        match kind {
            DiagramType::Sequence => "sequence".to_string(),
            DiagramType::Flow => "flow".to_string(),
            DiagramType::Unknown(s) => s,
        }
    }
}
