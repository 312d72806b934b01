//! Infrastructure layer - External I/O and persistence

pub mod atomic_write;
pub mod config;
pub mod dayone_index;
pub mod export;
pub mod journal_file;
pub mod prompt;

pub use config::{config_dir, Config};
pub use dayone_index::{DayOneIndex, IndexMode};
pub use export::{DayOneExport, MediaCheck};
pub use journal_file::PlainTextJournal;
pub use prompt::{AssumeYes, Confirm, TerminalConfirm};
