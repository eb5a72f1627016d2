use clap::{Args, Parser, Subcommand, ValueEnum};
use qvkit::store::NotebookScope;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "qvkit", bin_name = "qvkit", version = get_version())]
#[command(about = "Search and export Quiver note libraries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiver library path (*.qvlibrary)
    #[arg(
        short = 'L',
        long,
        env = "QVKIT_LIBRARY",
        global = true,
        value_name = "PATH"
    )]
    pub library: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Notebook selection shared by the library-reading commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Only these notebooks (uuids, space separated)
    #[arg(short = 'n', long = "notebooks", value_name = "UUID", num_args = 1..)]
    pub include: Vec<String>,

    /// Skip these notebooks (uuids, space separated)
    #[arg(short = 'e', long = "exclude", value_name = "UUID", num_args = 1..)]
    pub exclude: Vec<String>,
}

impl ScopeArgs {
    pub fn scope(&self) -> NotebookScope {
        NotebookScope::all()
            .including(self.include.iter().cloned())
            .excluding(self.exclude.iter().cloned())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    /// Launcher (Alfred) script-filter XML
    Alfred,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notebooks
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only notebooks whose name matches this regex at its start
        pattern: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Search notes by title and content (regex, case-insensitive)
    #[command(alias = "s", display_order = 2)]
    Search {
        query: String,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Export notes to a tree of Markdown files
    #[command(alias = "x", display_order = 3)]
    Export {
        /// Destination directory
        dest: PathBuf,

        /// Create an index for each notebook and one for the library
        #[arg(short, long)]
        index: bool,

        /// Remove a previous export at the destination first
        #[arg(long)]
        clean: bool,

        /// Fail on links to notes that are not exported
        #[arg(long)]
        strict_links: bool,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Get or set configuration
    #[command(display_order = 4)]
    Config {
        /// Configuration key (library_path, min_query_chars, vendor_dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("qvkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn search_takes_scope_and_format() {
        let cli = parse(&["search", "plan", "-n", "A", "B", "-e", "C", "-f", "alfred"]);
        match cli.command {
            Commands::Search {
                query,
                scope,
                format,
            } => {
                assert_eq!(query, "plan");
                assert_eq!(scope.include, vec!["A", "B"]);
                assert_eq!(scope.exclude, vec!["C"]);
                assert_eq!(format, OutputFormat::Alfred);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn export_flags_and_alias() {
        let cli = parse(&["x", "out", "-i", "--clean", "--strict-links"]);
        match cli.command {
            Commands::Export {
                dest,
                index,
                clean,
                strict_links,
                ..
            } => {
                assert_eq!(dest, PathBuf::from("out"));
                assert!(index && clean && strict_links);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["ls", "-L", "/tmp/lib.qvlibrary", "-v"]);
        assert_eq!(cli.library, Some(PathBuf::from("/tmp/lib.qvlibrary")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List { pattern: None, .. }));
    }

    #[test]
    fn scope_args_build_notebook_scope() {
        let args = ScopeArgs {
            include: vec!["A".into()],
            exclude: vec!["A".into()],
        };
        assert!(!args.scope().allows("A"));
    }
}
