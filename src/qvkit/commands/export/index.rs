//! Index pages: one per notebook directory plus one at the export root.

use super::INDEX_FILE;

/// A link entry on an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub target: String,
}

impl IndexEntry {
    pub fn new(title: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target: target.into(),
        }
    }
}

/// The `index.md` of one notebook directory.
///
/// Notes are sorted case-insensitively by title and grouped under a `##`
/// heading per lowercased first character.
pub fn notebook_index(entries: &[IndexEntry]) -> String {
    let mut out = format!("[Notebooks](../{INDEX_FILE})\n\n# Index\n\n---\n");

    let mut bucket: Option<String> = None;
    for entry in sorted(entries) {
        let heading = bucket_of(&entry.title);
        if bucket.as_deref() != Some(heading.as_str()) {
            out.push_str(&format!("## {heading}\n"));
            bucket = Some(heading);
        }
        out.push_str(&format!("- {}\n", link(entry)));
    }
    out
}

/// The top-level `index.md` linking every notebook's index.
pub fn root_index(entries: &[IndexEntry]) -> String {
    let mut out = String::from("# Notebooks\n\n");
    for entry in sorted(entries) {
        out.push_str(&format!("- {}\n", link(entry)));
    }
    out
}

fn sorted(entries: &[IndexEntry]) -> Vec<&IndexEntry> {
    let mut sorted: Vec<&IndexEntry> = entries.iter().collect();
    sorted.sort_by_cached_key(|e| (e.title.to_lowercase(), e.target.clone()));
    sorted
}

fn bucket_of(title: &str) -> String {
    title
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

fn link(entry: &IndexEntry) -> String {
    let title = entry.title.replace('[', "\\[").replace(']', "\\]");
    format!("[{}]({})", title, entry.target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notebook_index_groups_by_first_letter() {
        let entries = vec![
            IndexEntry::new("beta", "beta.md"),
            IndexEntry::new("Alpha", "Alpha.md"),
            IndexEntry::new("apple", "apple.md"),
        ];
        assert_eq!(
            notebook_index(&entries),
            "[Notebooks](../index.md)\n\n# Index\n\n---\n\
             ## a\n- [Alpha](Alpha.md)\n- [apple](apple.md)\n\
             ## b\n- [beta](beta.md)\n"
        );
    }

    #[test]
    fn empty_notebook_index_has_only_the_header() {
        assert_eq!(
            notebook_index(&[]),
            "[Notebooks](../index.md)\n\n# Index\n\n---\n"
        );
    }

    #[test]
    fn brackets_in_titles_are_escaped() {
        let out = notebook_index(&[IndexEntry::new("[draft] plan", "draft_plan.md")]);
        assert!(out.contains("- [\\[draft\\] plan](draft_plan.md)\n"));
    }

    #[test]
    fn root_index_sorts_notebooks() {
        let entries = vec![
            IndexEntry::new("Work", "Work/index.md"),
            IndexEntry::new("archive", "archive/index.md"),
        ];
        assert_eq!(
            root_index(&entries),
            "# Notebooks\n\n- [archive](archive/index.md)\n- [Work](Work/index.md)\n"
        );
    }
}
