//! Markdown rendering of a single note.
//!
//! Cell text arrives already rewritten (see `links`); this module only lays
//! it out. Diagram cells are emitted as HTML blocks driven by the vendor
//! scripts staged under `<dest>/.resources/vendor`.

use crate::model::{CellKind, DiagramType, Note};

const DIAGRAM_SCRIPTS: &str = r#"
<div>
    <script src="http://code.jquery.com/jquery-1.4.2.min.js"></script>
    <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>

    <script src="../.resources/vendor/raphael-min.js"></script>
    <script src="../.resources/vendor/underscore-min.js"></script>
    <script src="../.resources/vendor/sequence-diagram-min.js"></script>
    <script src="../.resources/vendor/flowchart.min.js"></script>
</div>
"#;

const SEQUENCE_ACTIVATION: &str = r#"
<div>
    <script>
        $(".sequence").sequenceDiagram({theme: 'simple'});
    </script>
</div>
"#;

/// Renders `note` with its rewritten cell texts (one per cell, same order).
pub fn render_note(note: &Note, cell_texts: &[String], with_index: bool) -> String {
    let mut out = String::new();
    if with_index {
        out.push_str("[Index](index.md)\n\n");
    }
    out.push_str(&format!("# {}\n\n", note.title));
    if !note.tags.is_empty() {
        out.push_str(&tag_line(&note.tags));
        out.push_str("\n\n");
    }

    let mut scripts_included = false;
    let mut flow_count = 0;
    for (cell, text) in note.cells.iter().zip(cell_texts) {
        let mut body = text.clone();
        body.push('\n');

        match (&cell.kind, &cell.diagram_type) {
            (CellKind::Code, _) => {
                let lang = cell.language.as_deref().unwrap_or("");
                out.push_str(&format!("```{lang}\n{body}```\n"));
            }
            (CellKind::Diagram, Some(DiagramType::Sequence)) => {
                include_scripts(&mut out, &mut scripts_included);
                out.push_str(&format!("\n<div class=\"sequence\">{body}</div>\n"));
            }
            (CellKind::Diagram, Some(DiagramType::Flow)) => {
                include_scripts(&mut out, &mut scripts_included);
                flow_count += 1;
                out.push_str(&flow_block(&body, flow_count));
            }
            _ => out.push_str(&body),
        }
    }

    if scripts_included {
        out.push_str(SEQUENCE_ACTIVATION);
    }
    out
}

/// ``tags: [`a`, `b`]``
pub fn tag_line(tags: &[String]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| format!("`{t}`")).collect();
    format!("tags: [{}]", quoted.join(", "))
}

fn include_scripts(out: &mut String, included: &mut bool) {
    if !*included {
        out.push_str(DIAGRAM_SCRIPTS);
        *included = true;
    }
}

/// Flow source plus the script that draws it. Each flow in a note gets its
/// own element ids.
fn flow_block(body: &str, n: usize) -> String {
    format!(
        r#"
<div id="flowtext-{n}">{text}</div>

<div id="flow-{n}"></div>

<div>
    <script>
        var diagram = flowchart.parse(document.getElementById('flowtext-{n}').innerText);
        diagram.drawSVG('flow-{n}');
    </script>
</div>
"#,
        text = body.replace('\n', "<br>"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn note(tags: &[&str], cells: Vec<Cell>) -> Note {
        Note {
            uuid: "U".into(),
            title: "Sprint Plan".into(),
            notebook: "Work".into(),
            notebook_uuid: "NB".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            cells,
            resources: None,
        }
    }

    fn render(note: &Note, with_index: bool) -> String {
        let texts: Vec<String> = note.cells.iter().map(|c| c.data.clone()).collect();
        render_note(note, &texts, with_index)
    }

    #[test]
    fn plain_cells_are_concatenated_with_newlines() {
        let n = note(&[], vec![Cell::text("first"), Cell::new(CellKind::Markdown, "second")]);
        let out = render(&n, false);
        let header = "# Sprint Plan\n\n";
        assert!(out.starts_with(header));
        assert_eq!(&out[header.len()..], "first\nsecond\n");
    }

    #[test]
    fn tags_follow_the_title() {
        let n = note(&["alpha", "beta"], vec![]);
        assert_eq!(
            render(&n, false),
            "# Sprint Plan\n\ntags: [`alpha`, `beta`]\n\n"
        );
    }

    #[test]
    fn index_backlink_comes_first() {
        let out = render(&note(&[], vec![]), true);
        assert!(out.starts_with("[Index](index.md)\n\n# Sprint Plan"));
    }

    #[test]
    fn code_cells_are_fenced_with_language() {
        let n = note(
            &[],
            vec![Cell::code("ls -la", Some("bash")), Cell::code("x", None)],
        );
        let out = render(&n, false);
        assert!(out.contains("```bash\nls -la\n```\n"));
        assert!(out.contains("```\nx\n```\n"));
    }

    #[test]
    fn diagram_scripts_are_included_once() {
        let n = note(
            &[],
            vec![
                Cell::diagram("A->B: hi", DiagramType::Sequence),
                Cell::diagram("B->A: bye", DiagramType::Sequence),
            ],
        );
        let out = render(&n, false);
        assert_eq!(out.matches("sequence-diagram-min.js").count(), 1);
        assert_eq!(out.matches("<div class=\"sequence\">").count(), 2);
        assert!(out.ends_with(SEQUENCE_ACTIVATION));
    }

    #[test]
    fn flow_diagrams_use_line_breaks_and_distinct_ids() {
        let n = note(
            &[],
            vec![
                Cell::diagram("st=>start\ne=>end", DiagramType::Flow),
                Cell::diagram("st=>start", DiagramType::Flow),
            ],
        );
        let out = render(&n, false);
        assert!(out.contains("<div id=\"flowtext-1\">st=>start<br>e=>end<br></div>"));
        assert!(out.contains("drawSVG('flow-2')"));
        assert_eq!(out.matches("flowchart.min.js").count(), 1);
    }

    #[test]
    fn notes_without_diagrams_have_no_scripts() {
        let out = render(&note(&[], vec![Cell::text("x")]), false);
        assert!(!out.contains("<script"));
    }

    #[test]
    fn unknown_diagram_types_render_as_text() {
        let n = note(
            &[],
            vec![Cell::diagram("graph", DiagramType::Unknown("gantt".into()))],
        );
        assert_eq!(render(&n, false), "# Sprint Plan\n\ngraph\n");
    }
}
