//! # Rendering
//!
//! Turns `CmdResult` data into terminal text, JSON or launcher XML.
//!
//! Column widths are computed here with `unicode-width`; templates only place
//! the pre-computed strings and pick styles by name. Every public function
//! has an `_internal` twin taking an explicit `use_color` so tests can render
//! without ANSI codes.

use super::styles;
use super::templates::{
    ALFRED_TEMPLATE, CONFIG_TEMPLATE, MESSAGES_TEMPLATE, NOTEBOOKS_TEMPLATE, NOTES_TEMPLATE,
};
use console::Term;
use minijinja::{Environment, Error, Value};
use qvkit::api::{CmdMessage, NotebookSummary};
use qvkit::config::{QvConfig, KEYS};
use qvkit::model::Note;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const ALFRED_NAME: &str = "alfred.xml";

#[derive(Serialize)]
struct NotebookLine {
    uuid: String,
    name: String,
    padding: String,
    note_count: usize,
    noun: &'static str,
}

#[derive(Serialize)]
struct NoteLine {
    uuid: String,
    title: String,
    padding: String,
    notebook: String,
}

/// A search hit as emitted in JSON.
#[derive(Serialize)]
struct NoteRecord<'a> {
    uuid: &'a str,
    title: &'a str,
    notebook: &'a str,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

fn use_color() -> bool {
    Term::stdout().features().colors_supported()
}

fn environment(use_color: bool) -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        styles::apply(&name, &value.to_string(), use_color)
    });
    env.add_template("notebooks", NOTEBOOKS_TEMPLATE)?;
    env.add_template("notes", NOTES_TEMPLATE)?;
    env.add_template("messages", MESSAGES_TEMPLATE)?;
    env.add_template("config", CONFIG_TEMPLATE)?;
    env.add_template(ALFRED_NAME, ALFRED_TEMPLATE)?;
    Ok(env)
}

fn render<S: Serialize>(name: &str, ctx: S, use_color: bool) -> String {
    environment(use_color)
        .and_then(|env| env.get_template(name)?.render(ctx))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Spaces that pad `text` to `width` columns.
fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

pub fn render_notebook_list(notebooks: &[NotebookSummary]) -> String {
    render_notebook_list_internal(notebooks, use_color())
}

fn render_notebook_list_internal(notebooks: &[NotebookSummary], use_color: bool) -> String {
    let width = notebooks.iter().map(|nb| nb.name.width()).max().unwrap_or(0);
    let lines: Vec<NotebookLine> = notebooks
        .iter()
        .map(|nb| NotebookLine {
            uuid: nb.uuid.clone(),
            name: nb.name.clone(),
            padding: padding(&nb.name, width),
            note_count: nb.note_count,
            noun: if nb.note_count == 1 { "note" } else { "notes" },
        })
        .collect();
    render(
        "notebooks",
        minijinja::context! { notebooks => lines },
        use_color,
    )
}

pub fn render_note_list(notes: &[Note]) -> String {
    render_note_list_internal(notes, use_color())
}

fn render_note_list_internal(notes: &[Note], use_color: bool) -> String {
    let width = notes.iter().map(|n| n.title.width()).max().unwrap_or(0);
    let lines: Vec<NoteLine> = notes
        .iter()
        .map(|n| NoteLine {
            uuid: n.uuid.clone(),
            title: n.title.clone(),
            padding: padding(&n.title, width),
            notebook: n.notebook.clone(),
        })
        .collect();
    render("notes", minijinja::context! { notes => lines }, use_color)
}

/// Search hits as a JSON array of `{uuid, title, notebook}`.
pub fn render_notes_json(notes: &[Note]) -> Result<String, serde_json::Error> {
    let records: Vec<NoteRecord> = notes
        .iter()
        .map(|n| NoteRecord {
            uuid: &n.uuid,
            title: &n.title,
            notebook: &n.notebook,
        })
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Launcher XML. `too_short` carries the minimum query length when the query
/// was refused.
pub fn render_alfred(notes: &[Note], too_short: Option<usize>) -> String {
    let records: Vec<NoteRecord> = notes
        .iter()
        .map(|n| NoteRecord {
            uuid: &n.uuid,
            title: &n.title,
            notebook: &n.notebook,
        })
        .collect();
    render(
        ALFRED_NAME,
        minijinja::context! { notes => records, min_chars => too_short },
        false,
    )
}

pub fn render_config(config: &QvConfig) -> String {
    render_config_internal(config, use_color())
}

fn render_config_internal(config: &QvConfig, use_color: bool) -> String {
    let entries: Vec<ConfigEntry> = KEYS
        .iter()
        .map(|&key| ConfigEntry {
            key,
            value: config.get(key).unwrap_or_default(),
        })
        .collect();
    render("config", minijinja::context! { entries }, use_color)
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, use_color())
}

fn render_messages_internal(messages: &[CmdMessage], use_color: bool) -> String {
    render("messages", minijinja::context! { messages }, use_color)
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

/// Messages on stderr, for output modes where stdout must stay parseable.
pub fn eprint_messages(messages: &[CmdMessage]) {
    eprint!("{}", render_messages_internal(messages, false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvkit::model::Cell;

    fn note(uuid: &str, title: &str, notebook: &str) -> Note {
        Note {
            uuid: uuid.into(),
            title: title.into(),
            notebook: notebook.into(),
            notebook_uuid: "NB".into(),
            tags: vec![],
            cells: vec![Cell::text("body")],
            resources: None,
        }
    }

    #[test]
    fn notebook_list_aligns_counts() {
        let notebooks = vec![
            NotebookSummary {
                uuid: "U1".into(),
                name: "Work".into(),
                note_count: 2,
            },
            NotebookSummary {
                uuid: "U2".into(),
                name: "Personal".into(),
                note_count: 1,
            },
        ];
        let out = render_notebook_list_internal(&notebooks, false);
        assert_eq!(out, "U1  Work      2 notes\nU2  Personal  1 note\n");
    }

    #[test]
    fn empty_lists_render_nothing() {
        assert_eq!(render_notebook_list_internal(&[], false), "");
        assert_eq!(render_note_list_internal(&[], false), "");
    }

    #[test]
    fn note_list_shows_title_notebook_and_uuid() {
        let notes = vec![note("N1", "Sprint Plan", "Work"), note("N2", "Retro", "Work")];
        let out = render_note_list_internal(&notes, false);
        assert_eq!(out, "Sprint Plan  Work  N1\nRetro        Work  N2\n");
    }

    #[test]
    fn json_has_uuid_title_notebook() {
        let out = render_notes_json(&[note("N1", "Sprint Plan", "Work")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{ "uuid": "N1", "title": "Sprint Plan", "notebook": "Work" }])
        );
    }

    #[test]
    fn alfred_lists_items() {
        let out = render_alfred(&[note("N1", "Sprint Plan", "Work")], None);
        assert_eq!(
            out,
            "<?xml version=\"1.0\"?><items>\
             <item valid=\"YES\" arg=\"quiver:///notes/N1\" type=\"file\">\
             <title>Sprint Plan</title><subtitle>N1</subtitle></item></items>"
        );
    }

    #[test]
    fn alfred_escapes_titles() {
        let out = render_alfred(&[note("N1", "Q&A <draft>", "Work")], None);
        assert!(out.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
    }

    #[test]
    fn alfred_reports_short_query() {
        let out = render_alfred(&[], Some(2));
        assert_eq!(
            out,
            "<?xml version=\"1.0\"?><items><item valid=\"no\"><title>Query too short</title>\
             <subtitle>The query needs to be at least 2 characters long</subtitle></item></items>"
        );
    }

    #[test]
    fn alfred_without_hits_is_empty_items() {
        assert_eq!(
            render_alfred(&[], None),
            "<?xml version=\"1.0\"?><items></items>"
        );
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config_internal(&QvConfig::default(), false);
        assert!(out.contains("library_path = (unset)\n"));
        assert!(out.contains("min_query_chars = 2\n"));
        assert!(out.contains("vendor_dir = /Applications/Quiver.app"));
    }

    #[test]
    fn messages_render_one_per_line() {
        let messages = vec![
            CmdMessage::info("Nothing found"),
            CmdMessage::warning("careful"),
        ];
        assert_eq!(
            render_messages_internal(&messages, false),
            "Nothing found\ncareful\n"
        );
    }
}
