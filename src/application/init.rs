//! Initialize configuration use case

use crate::error::Result;
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::Config;
use crate::messages::{print_msg, Message, MsgText};
use std::path::{Path, PathBuf};

/// Write a fresh configuration with one journal into `config_dir`.
/// The journal file defaults to `journal.txt` inside `config_dir`.
pub fn init(config_dir: &Path, journal_name: &str, journal_path: Option<PathBuf>) -> Result<Config> {
    let config_path = config_dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(Message::error(MsgText::ConfigExists)
            .with_param("path", config_path.display())
            .into());
    }

    let journal_path = journal_path.unwrap_or_else(|| config_dir.join("journal.txt"));
    let config = Config::new(journal_name, journal_path);
    config.save_to_dir(config_dir)?;

    print_msg(
        &Message::normal(MsgText::ConfigInitialized)
            .with_param("path", config_path.display())
            .with_param("journal_name", journal_name)
            .with_param("journal_path", config.journals[journal_name].display()),
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config() {
        let temp = TempDir::new().unwrap();
        let config = init(temp.path(), "work", None).unwrap();

        assert_eq!(config.default_journal, "work");
        assert_eq!(config.journals["work"], temp.path().join("journal.txt"));
        assert!(temp.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), "default", None).unwrap();

        let err = init(temp.path(), "default", None).unwrap_err();
        assert_eq!(err.kind(), Some(MsgText::ConfigExists));
    }
}
