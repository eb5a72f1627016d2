//! # Configuration
//!
//! Settings live in `config.json` inside the platform config directory
//! (see `cli::commands` for how the directory is resolved). A missing file
//! means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `library_path` | unset | Library root used when `--library` is not given |
//! | `min_query_chars` | `2` | Shortest query `search` accepts |
//! | `vendor_dir` | Quiver.app's bundled `vendor` dir | Diagram scripts copied on export |

use crate::error::{QvError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MIN_QUERY_CHARS: usize = 2;
const DEFAULT_VENDOR_DIR: &str = "/Applications/Quiver.app/Contents/Resources/dist/vendor";

pub const KEYS: &[&str] = &["library_path", "min_query_chars", "vendor_dir"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QvConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,

    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: PathBuf,
}

fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}

fn default_vendor_dir() -> PathBuf {
    PathBuf::from(DEFAULT_VENDOR_DIR)
}

impl Default for QvConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            vendor_dir: default_vendor_dir(),
        }
    }
}

impl QvConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: QvConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir).map_err(QvError::write(config_dir))?;

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(QvError::write(&config_path))?;
        Ok(())
    }

    /// Current value of `key` rendered as text; `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "library_path" => Some(
                self.library_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "min_query_chars" => Some(self.min_query_chars.to_string()),
            "vendor_dir" => Some(self.vendor_dir.display().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "library_path" => {
                self.library_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "min_query_chars" => {
                self.min_query_chars = value.parse().map_err(|_| {
                    QvError::Config(format!("min_query_chars must be a number, got {value:?}"))
                })?;
            }
            "vendor_dir" => self.vendor_dir = PathBuf::from(value),
            other => return Err(QvError::Config(format!("Unknown config key: {other}"))),
        }
        Ok(())
    }
}
