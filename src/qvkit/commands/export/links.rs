use super::plan::ExportPlan;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const IMAGE_URL: &str = "quiver-image-url";
const FILE_URL: &str = "quiver-file-url";
const LOCAL_RESOURCES: &str = "resources";

/// `![IMAGE](<link> =<w>x<h>)` size annotations.
static IMAGE_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!\[IMAGE\]\(.*)( =\d*x\d*)\)").expect("valid image size regex"));

/// Note-to-note links carrying a version-4 uuid.
static NOTE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)quiver-note-url/([a-f0-9]{8}-?[a-f0-9]{4}-?4[a-f0-9]{3}-?[89ab][a-f0-9]{3}-?[a-f0-9]{12})",
    )
    .expect("valid note link regex")
});

/// What to do with a note link whose target is not in the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Rewrite to `#unresolved-note-<uuid>` and report a warning.
    #[default]
    Placeholder,
    /// Abort the export.
    Strict,
}

pub fn unresolved_placeholder(uuid: &str) -> String {
    format!("#unresolved-note-{}", uuid)
}

/// Rewrites cell text of notes in one notebook.
pub struct Rewriter<'a> {
    plan: &'a ExportPlan,
    notebook: usize,
    renamed: &'a [(String, String)],
}

/// Rewritten text plus the uuids of links that could not be resolved.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    pub unresolved: Vec<String>,
}

impl<'a> Rewriter<'a> {
    /// `renamed` holds `(old, new)` resource file names of the current note.
    pub fn new(plan: &'a ExportPlan, notebook: usize, renamed: &'a [(String, String)]) -> Self {
        Self {
            plan,
            notebook,
            renamed,
        }
    }

    pub fn rewrite(&self, data: &str) -> Rewritten {
        let mut text = data.replace(IMAGE_URL, LOCAL_RESOURCES);
        text = strip_image_sizes(&text);
        for (old, new) in self.renamed {
            text = text.replace(old.as_str(), new);
        }
        text = text.replace(FILE_URL, LOCAL_RESOURCES);

        let mut unresolved = Vec::new();
        let text = NOTE_LINK
            .replace_all(&text, |caps: &Captures| {
                let uuid = &caps[1];
                match self.plan.link_target(self.notebook, uuid) {
                    Some(target) => target,
                    None => {
                        unresolved.push(uuid.to_string());
                        unresolved_placeholder(uuid)
                    }
                }
            })
            .into_owned();

        Rewritten { text, unresolved }
    }
}

/// Removes size annotations from image links, repeating until none are left
/// so stacked annotations (`=1x1 =2x2`) are removed too.
pub fn strip_image_sizes(text: &str) -> String {
    let mut out = text.to_string();
    while IMAGE_SIZE.is_match(&out) {
        out = IMAGE_SIZE.replace_all(&out, "${1})").into_owned();
    }
    out
}
