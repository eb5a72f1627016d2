//! Named console styles.
//!
//! Templates refer to styles by semantic name through the `style` filter
//! (`{{ note.title | style("title") }}`); the actual colors live here only.
//! Message levels double as style names.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const UUID: &str = "uuid";
    pub const COUNT: &str = "count";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
}

/// Prepended to text rendered with an unknown style name, so typos in
/// templates show up.
const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub static STYLES: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        (names::TITLE, Style::new().bold()),
        (names::MUTED, Style::new().dim()),
        (names::UUID, Style::new().color256(245)),
        (names::COUNT, Style::new().cyan()),
        (names::INFO, Style::new().dim()),
        (names::SUCCESS, Style::new().green()),
        (names::WARNING, Style::new().yellow()),
    ])
});

pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match STYLES.get(name) {
        Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
        Some(_) => text.to_string(),
        None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
    }
}
