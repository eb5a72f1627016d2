//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It dispatches to the command functions, fills in settings from
//! [`QvConfig`] and returns `Result<CmdResult>`. No printing, no exit codes.
//!
//! `QuiverApi<S: LibraryStore>` is generic over the storage backend:
//! - Production: `QuiverApi<FsLibrary>`
//! - Testing: `QuiverApi<MemoryLibrary>`
//!
//! Tests here only check dispatch; command behaviour is tested next to each
//! command.

use crate::commands;
use crate::config::QvConfig;
use crate::error::Result;
use crate::store::{LibraryStore, NotebookScope};
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::links::LinkPolicy;
pub use crate::commands::export::ExportOptions;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NotebookSummary};

pub struct QuiverApi<S: LibraryStore> {
    store: S,
    config: QvConfig,
}

impl<S: LibraryStore> QuiverApi<S> {
    pub fn new(store: S, config: QvConfig) -> Self {
        Self { store, config }
    }

    pub fn list_notebooks(
        &self,
        pattern: Option<&str>,
        scope: &NotebookScope,
    ) -> Result<CmdResult> {
        commands::list::run(&self.store, pattern, scope)
    }

    pub fn search(&self, query: &str, scope: &NotebookScope) -> Result<CmdResult> {
        commands::search::run(&self.store, query, self.config.min_query_chars, scope)
    }

    /// Exports to `dest`. `vendor_dir` in `options` is taken from the config.
    pub fn export(
        &self,
        dest: &Path,
        options: ExportOptions,
        scope: &NotebookScope,
    ) -> Result<CmdResult> {
        let options = ExportOptions {
            vendor_dir: self.config.vendor_dir.clone(),
            ..options
        };
        commands::export::run(&self.store, dest, scope, &options)
    }
}
