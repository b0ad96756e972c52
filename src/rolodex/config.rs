//! # Configuration
//!
//! Rolodex configuration is managed by [`confique`], which handles layered
//! loading from a TOML file, environment variables and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `ROLODEX_DATA_FILE`, `ROLODEX_MAX_TYPOS`, etc.
//! 2. **Config file**: `rolodex.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `records.json` | Backend data file, relative to the data dir |
//! | `name_fields` | `["first_name", "last_name"]` | Fields the search looks at |
//! | `max_typos` | `2` | Upper bound on edits per search token |
//! | `required_fields` | `["first_name"]` | Fields the backend refuses blank |
//! | `token_env` | `ROLODEX_TOKEN` | Env var holding the bearer token |
//! | `log_level` | `warn` | Default tracing filter when `RUST_LOG` is unset |

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "rolodex.toml";

/// Configuration for rolodex, stored in `rolodex.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RolodexConfig {
    /// Backend data file. Relative paths are resolved against the data dir.
    #[config(env = "ROLODEX_DATA_FILE", default = "records.json")]
    pub data_file: String,

    /// Record fields searched by name.
    #[config(default = ["first_name", "last_name"])]
    pub name_fields: Vec<String>,

    /// Maximum edits tolerated per search token.
    #[config(env = "ROLODEX_MAX_TYPOS", default = 2)]
    pub max_typos: usize,

    /// Fields the bundled backends reject when blank.
    #[config(default = ["first_name"])]
    pub required_fields: Vec<String>,

    /// Environment variable the bearer token is read from.
    #[config(env = "ROLODEX_TOKEN_ENV", default = "ROLODEX_TOKEN")]
    pub token_env: String,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[config(env = "ROLODEX_LOG", default = "warn")]
    pub log_level: String,
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            data_file: "records.json".to_string(),
            name_fields: vec!["first_name".to_string(), "last_name".to_string()],
            max_typos: 2,
            required_fields: vec!["first_name".to_string()],
            token_env: "ROLODEX_TOKEN".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl RolodexConfig {
    /// Loads env, then `rolodex.toml` in `config_dir` (if present), then defaults.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        let config = RolodexConfig::builder().env().file(path).load()?;
        Ok(config)
    }

    /// The data file resolved against `data_dir`.
    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        let path = PathBuf::from(&self.data_file);
        if path.is_absolute() {
            path
        } else {
            data_dir.join(path)
        }
    }
}
