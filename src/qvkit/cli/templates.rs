//! Template sources, kept as standalone files and embedded at compile time.
//!
//! Templates use explicit line breaks (`{{ "\n" }}`) with whitespace-trimming
//! tags everywhere else, so the output shape is visible in one place. Layout
//! math (column padding) is done in Rust and passed in as plain strings.

pub const NOTEBOOKS_TEMPLATE: &str = include_str!("templates/notebooks.tmp");
pub const NOTES_TEMPLATE: &str = include_str!("templates/notes.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
/// Registered under a `.xml` name so minijinja escapes every value.
pub const ALFRED_TEMPLATE: &str = include_str!("templates/alfred.xml.tmp");
