//! Configuration loading and parsing.
//!
//! Parses `ignore-writer.toml` (or an override path provided by the binary).
//! Two tables are recognized:
//! - `[edit] comment_prefix = "<str>"`: marker exempting lines from duplicate
//!   suppression, default `#`. An empty value is rejected in favor of the
//!   default since it would exempt every line.
//! - `[file] default_path = "<path>"`: file edited when the CLI is given no
//!   `--file`, default `.gitignore`.
//!
//! Unknown fields are ignored. A missing or unparsable file yields defaults.

use anyhow::Result;
use core_lines::{DEFAULT_COMMENT_PREFIX, EditOptions};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "ignore-writer.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct EditConfig {
    #[serde(default = "EditConfig::default_comment_prefix")]
    pub comment_prefix: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            comment_prefix: Self::default_comment_prefix(),
        }
    }
}

impl EditConfig {
    fn default_comment_prefix() -> String {
        DEFAULT_COMMENT_PREFIX.to_string()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileConfig {
    #[serde(default = "FileConfig::default_path")]
    pub default_path: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_path: Self::default_path(),
        }
    }
}

impl FileConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(".gitignore")
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub edit: EditConfig,
    #[serde(default)]
    pub file: FileConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ignore-writer").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", file = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(mut file) => {
            if file.edit.comment_prefix.is_empty() {
                warn!(target: "config", "empty_comment_prefix_replaced");
                file.edit.comment_prefix = EditConfig::default_comment_prefix();
            }
            debug!(
                target: "config",
                file = %path.display(),
                comment_prefix = file.edit.comment_prefix.as_str(),
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", file = %path.display(), error = %e, "config_parse_error");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Library options derived from the `[edit]` table.
    pub fn edit_options(&self) -> EditOptions {
        EditOptions {
            comment_prefix: self.file.edit.comment_prefix.clone(),
        }
    }

    pub fn default_path(&self) -> &std::path::Path {
        &self.file.file.default_path
    }
}
