//! Markdown export of a loaded library.
//!
//! Output layout:
//!
//! ```text
//! <dest>/
//! ├── index.md                 # with --index
//! ├── .resources/vendor/       # diagram scripts
//! └── <Notebook_Name>/
//!     ├── index.md             # with --index
//!     ├── <Note_Title>.md
//!     └── resources/           # attachments of every note in the notebook
//! ```
//!
//! All output names are decided up front by [`plan::ExportPlan`]; the write
//! phase only follows the plan.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::QvConfig;
use crate::error::{QvError, Result};
use crate::model::Note;
use crate::store::{Library, LibraryStore, NotebookScope};
use std::fs;
use std::path::{Path, PathBuf};

pub mod index;
pub mod links;
pub mod plan;
pub mod render;
pub mod resources;
pub mod sanitize;

use index::IndexEntry;
use links::{LinkPolicy, Rewriter};
use plan::ExportPlan;
use resources::StagedResources;

pub const INDEX_FILE: &str = "index.md";
pub const SHARED_RESOURCES_DIR: &str = ".resources";
const VENDOR_DIR: &str = "vendor";
const NOTE_RESOURCES_DIR: &str = "resources";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write per-notebook and root `index.md` files.
    pub index: bool,
    /// Remove the destination before writing.
    pub clean: bool,
    pub link_policy: LinkPolicy,
    /// Diagram scripts copied to `.resources/vendor`.
    pub vendor_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            index: false,
            clean: false,
            link_policy: LinkPolicy::default(),
            vendor_dir: QvConfig::default().vendor_dir,
        }
    }
}

pub fn run<S: LibraryStore>(
    store: &S,
    dest: &Path,
    scope: &NotebookScope,
    options: &ExportOptions,
) -> Result<CmdResult> {
    let library = Library::load(store, scope)?;
    export_library(&library, dest, options)
}

pub fn export_library(library: &Library, dest: &Path, options: &ExportOptions) -> Result<CmdResult> {
    let plan = ExportPlan::new(library, options.index);
    if options.link_policy == LinkPolicy::Strict {
        check_links(library, &plan)?;
    }
    if options.clean {
        clean_destination(dest)?;
    }

    let mut result = CmdResult::default();
    let shared = dest.join(SHARED_RESOURCES_DIR);
    create_dir(&shared)?;
    stage_vendor(&options.vendor_dir, &shared.join(VENDOR_DIR), &mut result)?;

    let mut notebook_entries = Vec::with_capacity(library.notebooks.len());
    for (nb_pos, notebook) in library.notebooks.iter().enumerate() {
        let dir_name = plan.notebook_dir(nb_pos);
        let nb_dir = dest.join(dir_name);
        create_dir(&nb_dir)?;
        log::debug!("exporting notebook {} to {}", notebook.name, nb_dir.display());

        let mut note_entries = Vec::with_capacity(notebook.notes.len());
        for (note_pos, note) in notebook.notes.iter().enumerate() {
            let file_name = plan.note_file(nb_pos, note_pos);
            let markdown = export_note(note, &plan, nb_pos, &nb_dir, options, &mut result)?;
            let path = nb_dir.join(file_name);
            write_file(&path, &markdown)?;
            log::debug!("wrote {}", path.display());
            result.exported_paths.push(path);
            note_entries.push(IndexEntry::new(&note.title, file_name));
        }

        if options.index {
            write_file(&nb_dir.join(INDEX_FILE), &index::notebook_index(&note_entries))?;
            notebook_entries.push(IndexEntry::new(
                &notebook.name,
                format!("{}/{}", dir_name, INDEX_FILE),
            ));
        }
    }

    if options.index {
        write_file(&dest.join(INDEX_FILE), &index::root_index(&notebook_entries))?;
    }

    log::info!(
        "exported {} notes from {} notebooks to {}",
        result.exported_paths.len(),
        library.notebooks.len(),
        dest.display()
    );
    result.add_message(CmdMessage::success(format!(
        "Exported {} notes from {} notebooks to {}",
        result.exported_paths.len(),
        library.notebooks.len(),
        dest.display()
    )));
    Ok(result)
}

/// Stages resources, rewrites every cell and renders one note.
fn export_note(
    note: &Note,
    plan: &ExportPlan,
    nb_pos: usize,
    nb_dir: &Path,
    options: &ExportOptions,
    result: &mut CmdResult,
) -> Result<String> {
    let staged = match &note.resources {
        Some(src) => resources::stage(src, &nb_dir.join(NOTE_RESOURCES_DIR))?,
        None => StagedResources::default(),
    };
    for path in &staged.unknown {
        result.add_message(CmdMessage::warning(format!(
            "Unknown type of resource {} in \"{}\"; copied as is",
            path.display(),
            note.title
        )));
    }

    let rewriter = Rewriter::new(plan, nb_pos, &staged.renamed);
    let mut texts = Vec::with_capacity(note.cells.len());
    for cell in &note.cells {
        let rewritten = rewriter.rewrite(&cell.data);
        for uuid in rewritten.unresolved {
            if options.link_policy == LinkPolicy::Strict {
                return Err(QvError::UnresolvedReference {
                    uuid,
                    note: note.title.clone(),
                });
            }
            log::warn!("note {} links to unknown note {}", note.uuid, uuid);
            result.add_message(CmdMessage::warning(format!(
                "\"{}\" links to note {}, which is not exported",
                note.title, uuid
            )));
        }
        texts.push(rewritten.text);
    }
    Ok(render::render_note(note, &texts, options.index))
}

/// Fails on the first note link that points outside the export.
fn check_links(library: &Library, plan: &ExportPlan) -> Result<()> {
    for (nb_pos, notebook) in library.notebooks.iter().enumerate() {
        let rewriter = Rewriter::new(plan, nb_pos, &[]);
        for note in &notebook.notes {
            for cell in &note.cells {
                if let Some(uuid) = rewriter.rewrite(&cell.data).unresolved.into_iter().next() {
                    return Err(QvError::UnresolvedReference {
                        uuid,
                        note: note.title.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Removes `dest` if it is empty or holds a previous export.
fn clean_destination(dest: &Path) -> Result<()> {
    if !dest.exists() {
        return Ok(());
    }
    let previous_export = dest.join(SHARED_RESOURCES_DIR).is_dir();
    let empty = fs::read_dir(dest)?.next().is_none();
    if !previous_export && !empty {
        return Err(QvError::RefuseClean(dest.to_path_buf()));
    }
    log::debug!("removing {}", dest.display());
    fs::remove_dir_all(dest).map_err(QvError::write(dest))
}

fn stage_vendor(src: &Path, dest: &Path, result: &mut CmdResult) -> Result<()> {
    if !src.is_dir() {
        log::warn!("vendor directory {} not found", src.display());
        result.add_message(CmdMessage::warning(format!(
            "Diagram scripts not found at {}; diagrams will not render",
            src.display()
        )));
        return Ok(());
    }
    let copied = resources::copy_dir(src, dest)?;
    log::debug!("copied {} vendor files", copied.len());
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(QvError::write(path))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(QvError::write(path))
}
