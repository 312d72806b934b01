//! Configuration management

use crate::error::{ImportError, Result};
use crate::messages::{Message, MsgText};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const INDEX_FILE: &str = "dayone_index.json";
pub const DEFAULT_JOURNAL: &str = "default";

/// Directory holding the configuration and the Day One index.
/// `DAYONE_IMPORT_HOME` wins over the platform config directory.
pub fn config_dir() -> PathBuf {
    if let Ok(home) = std::env::var("DAYONE_IMPORT_HOME") {
        return PathBuf::from(home);
    }

    dirs::config_dir()
        .map(|dir| dir.join("dayone-import"))
        .unwrap_or_else(|| PathBuf::from(".dayone-import"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_journal: String,
    pub created: DateTime<Utc>,
    pub journals: BTreeMap<String, PathBuf>,
}

impl Config {
    /// Create a config with a single journal
    pub fn new(journal_name: &str, journal_path: PathBuf) -> Self {
        let mut journals = BTreeMap::new();
        journals.insert(journal_name.to_string(), journal_path);

        Config {
            default_journal: journal_name.to_string(),
            created: Utc::now(),
            journals,
        }
    }

    /// Load config from config.toml in the given directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Message::error(MsgText::ConfigNotFound)
                    .with_param("path", config_path.display())
                    .into()
            } else {
                ImportError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to config.toml in the given directory
    pub fn save_to_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Journal name to use: the requested one, or the configured default
    pub fn journal_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_journal)
    }

    /// Path of a configured journal
    pub fn journal_path(&self, name: &str) -> Result<&Path> {
        self.journals.get(name).map(PathBuf::as_path).ok_or_else(|| {
            Message::error(MsgText::JournalNotFound)
                .with_param("journal_name", name)
                .into()
        })
    }
}
