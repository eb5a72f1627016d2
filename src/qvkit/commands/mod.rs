//! # Command Layer
//!
//! The business logic of qvkit. Each command lives in its own submodule, takes
//! plain Rust values and returns a structured [`CmdResult`].
//!
//! Commands never print, never exit the process and never look at the
//! terminal. Anything the user should be told travels back as a
//! [`CmdMessage`]; the CLI decides how to show it.
//!
//! ## Command Modules
//!
//! - [`list`]: List notebooks
//! - [`search`]: Regex search over titles and cells
//! - [`export`]: Markdown export of the whole library
//! - [`config`]: Show and change settings

use crate::config::QvConfig;
use crate::model::Note;
use serde::Serialize;
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod list;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A notebook as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookSummary {
    pub uuid: String,
    pub name: String,
    pub note_count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_notebooks: Vec<NotebookSummary>,
    pub listed_notes: Vec<Note>,
    /// Files written by an export, in write order.
    pub exported_paths: Vec<PathBuf>,
    /// Set when a search was refused; carries the minimum query length.
    pub query_too_short: Option<usize>,
    pub config: Option<QvConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_notebooks(mut self, notebooks: Vec<NotebookSummary>) -> Self {
        self.listed_notebooks = notebooks;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_config(mut self, config: QvConfig) -> Self {
        self.config = Some(config);
        self
    }
}
