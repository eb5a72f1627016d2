use crate::commands::{CmdMessage, CmdResult, NotebookSummary};
use crate::error::Result;
use crate::store::{LibraryStore, NotebookScope};
use regex::Regex;

/// Lists the notebooks in `scope`, optionally only those whose name matches
/// `pattern` at its start.
pub fn run<S: LibraryStore>(
    store: &S,
    pattern: Option<&str>,
    scope: &NotebookScope,
) -> Result<CmdResult> {
    let name_filter = pattern
        .map(|p| Regex::new(&format!("^(?:{})", p)))
        .transpose()?;

    let mut listed = Vec::new();
    for meta in store.notebooks()? {
        if !scope.allows(&meta.uuid) {
            continue;
        }
        if let Some(re) = &name_filter {
            if !re.is_match(&meta.name) {
                continue;
            }
        }
        let note_count = store.notes(&meta)?.len();
        listed.push(NotebookSummary {
            uuid: meta.uuid,
            name: meta.name,
            note_count,
        });
    }

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No notebooks found."));
    }
    Ok(result.with_listed_notebooks(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QvError;
    use crate::store::memory::MemoryLibrary;

    fn store() -> MemoryLibrary {
        let mut store = MemoryLibrary::new();
        store.add_notebook("NB-1", "Work");
        store.add_note("NB-1", "N1", "Sprint Plan", vec![]);
        store.add_note("NB-1", "N2", "Retro", vec![]);
        store.add_notebook("NB-2", "Personal");
        store.add_notebook("NB-3", "Workouts");
        store
    }

    #[test]
    fn lists_all_notebooks_with_counts() {
        let res = run(&store(), None, &NotebookScope::all()).unwrap();
        assert_eq!(res.listed_notebooks.len(), 3);
        assert_eq!(res.listed_notebooks[0].note_count, 2);
        assert_eq!(res.listed_notebooks[1].note_count, 0);
        assert!(res.messages.is_empty());
    }

    #[test]
    fn pattern_is_anchored_at_name_start() {
        let res = run(&store(), Some("Work"), &NotebookScope::all()).unwrap();
        let names: Vec<_> = res.listed_notebooks.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Workouts"]);

        let res = run(&store(), Some("outs"), &NotebookScope::all()).unwrap();
        assert!(res.listed_notebooks.is_empty());
        assert!(res.messages[0].content.contains("No notebooks"));
    }

    #[test]
    fn respects_scope() {
        let scope = NotebookScope::all().excluding(["NB-1"]);
        let res = run(&store(), None, &scope).unwrap();
        assert!(res.listed_notebooks.iter().all(|n| n.uuid != "NB-1"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = run(&store(), Some("(unclosed"), &NotebookScope::all()).unwrap_err();
        assert!(matches!(err, QvError::InvalidPattern(_)));
    }
}
