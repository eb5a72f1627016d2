//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Sets up logging
//! - Resolves where the config and the library live
//! - Formats output for human (or launcher) consumption
//!
//! ## Structure
//!
//! - `run()`: parse, set up logging, dispatch (called by `main.rs`)
//! - `init_context()`: resolves the library and builds the `QuiverApi`
//! - `handle_*()`: per-command handlers that call the API and print results
//!
//! `config` is handled before the library is opened so that it works when no
//! library is configured yet.

use super::render::{
    eprint_messages, print_messages, render_alfred, render_config, render_note_list,
    render_notebook_list, render_notes_json,
};
use super::setup::{Cli, Commands, OutputFormat, ScopeArgs};
use clap::Parser;
use directories::ProjectDirs;
use qvkit::api::{ConfigAction, ExportOptions, LinkPolicy, QuiverApi};
use qvkit::commands;
use qvkit::config::QvConfig;
use qvkit::error::{QvError, Result};
use qvkit::store::fs::FsLibrary;
use std::path::{Path, PathBuf};

const CONFIG_DIR_ENV: &str = "QVKIT_CONFIG_DIR";

struct AppContext {
    api: QuiverApi<FsLibrary>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = config_dir()?;
    log::debug!("config dir: {}", config_dir.display());

    match cli.command {
        Commands::Config { key, value } => handle_config(&config_dir, key, value),
        Commands::List { pattern, scope } => {
            let ctx = init_context(cli.library, &config_dir)?;
            handle_list(&ctx, pattern, &scope)
        }
        Commands::Search {
            query,
            scope,
            format,
        } => {
            let ctx = init_context(cli.library, &config_dir)?;
            handle_search(&ctx, &query, &scope, format)
        }
        Commands::Export {
            dest,
            index,
            clean,
            strict_links,
            scope,
        } => {
            let ctx = init_context(cli.library, &config_dir)?;
            let options = ExportOptions {
                index,
                clean,
                link_policy: if strict_links {
                    LinkPolicy::Strict
                } else {
                    LinkPolicy::Placeholder
                },
                ..Default::default()
            };
            handle_export(&ctx, &dest, options, &scope)
        }
    }
}

/// `warn` by default, `debug` with `--verbose`. `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("net", "qvkit", "qvkit")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| QvError::Config("Could not determine config directory".into()))
}

/// `--library` (or `QVKIT_LIBRARY`, via clap) wins over the config file.
fn resolve_library(flag: Option<PathBuf>, config: &QvConfig) -> Result<PathBuf> {
    flag.or_else(|| config.library_path.clone())
        .ok_or(QvError::NoLibraryConfigured)
}

fn init_context(library: Option<PathBuf>, config_dir: &Path) -> Result<AppContext> {
    let config = QvConfig::load(config_dir)?;
    let root = resolve_library(library, &config)?;
    log::debug!("library: {}", root.display());
    let store = FsLibrary::open(root)?;
    Ok(AppContext {
        api: QuiverApi::new(store, config),
    })
}

fn handle_list(ctx: &AppContext, pattern: Option<String>, scope: &ScopeArgs) -> Result<()> {
    let result = ctx
        .api
        .list_notebooks(pattern.as_deref(), &scope.scope())?;
    print!("{}", render_notebook_list(&result.listed_notebooks));
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(
    ctx: &AppContext,
    query: &str,
    scope: &ScopeArgs,
    format: OutputFormat,
) -> Result<()> {
    let result = ctx.api.search(query, &scope.scope())?;
    match format {
        OutputFormat::Text => {
            print!("{}", render_note_list(&result.listed_notes));
            print_messages(&result.messages);
        }
        OutputFormat::Json => {
            println!("{}", render_notes_json(&result.listed_notes)?);
            eprint_messages(&result.messages);
        }
        OutputFormat::Alfred => {
            println!(
                "{}",
                render_alfred(&result.listed_notes, result.query_too_short)
            );
        }
    }
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    dest: &Path,
    options: ExportOptions,
    scope: &ScopeArgs,
) -> Result<()> {
    let result = ctx.api.export(dest, options, &scope.scope())?;
    for path in &result.exported_paths {
        log::debug!("exported {}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = commands::config::run(config_dir, action)?;
    if let Some(config) = &result.config {
        print!("{}", render_config(config));
    }
    print_messages(&result.messages);
    Ok(())
}
