//! # CLI
//!
//! One UI client for qvkit. This is the only place that knows about terminal
//! I/O, logging setup and exit codes.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context setup and per-command handlers
//! - `render`: minijinja-based output (text, JSON, launcher XML)
//! - `styles`: named console styles used by the templates
//! - `templates`: embedded template sources

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
