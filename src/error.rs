//! Error types for dayone-import

use crate::messages::{Message, MsgText};
use thiserror::Error;

/// Main error type for dayone-import
#[derive(Debug, Error)]
pub enum ImportError {
    /// A fatal condition with a user-facing message
    #[error("{0}")]
    Fatal(Message),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<Message> for ImportError {
    fn from(message: Message) -> Self {
        ImportError::Fatal(message)
    }
}

impl ImportError {
    /// The message kind, if this is a fatal catalog error
    pub fn kind(&self) -> Option<MsgText> {
        match self {
            ImportError::Fatal(message) => Some(message.text),
            _ => None,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            Some(MsgText::ConfigNotFound) => 2,
            Some(MsgText::NoInputPath)
            | Some(MsgText::DoesNotExist)
            | Some(MsgText::IndexFileMissing)
            | Some(MsgText::IndexFileNotFound) => 3,
            Some(MsgText::InvalidJson)
            | Some(MsgText::InvalidExport)
            | Some(MsgText::MalformedEntry)
            | Some(MsgText::InvalidTimeZone)
            | Some(MsgText::IndexMalformed) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self.kind() {
            Some(MsgText::ConfigNotFound) => format!(
                "{}\n\n\
                Suggestions:\n\
                • Run 'dayone-import init' to create a configuration\n\
                • Set DAYONE_IMPORT_HOME to the directory holding config.toml",
                self
            ),
            Some(MsgText::JournalNotFound) => format!(
                "{}\n\n\
                Suggestions:\n\
                • Check the journal name passed with --journal\n\
                • Add the journal under [journals] in config.toml",
                self
            ),
            Some(MsgText::IndexMalformed) => format!(
                "{}\n\n\
                Suggestions:\n\
                • Run 'dayone-import index --clear' to start a fresh index\n\
                • Rebuild it with 'dayone-import index path/to/dayone.json'",
                self
            ),
            Some(MsgText::NoInputPath) | Some(MsgText::IndexFileMissing) => format!(
                "{}\n\n\
                Example:\n\
                dayone-import import path/to/Journal.json",
                self
            ),
            _ => self.to_string(),
        }
    }
}

/// Result type using ImportError
pub type Result<T> = std::result::Result<T, ImportError>;
