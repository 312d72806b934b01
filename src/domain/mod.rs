//! Domain layer - Business logic and domain models

pub mod converter;
pub mod dayone;
pub mod journal;
pub mod link_index;

pub use converter::convert;
pub use dayone::{source_journal_name, MediaKind, MediaRef, RawDayOneEntry};
pub use journal::{Journal, JournalEntry};
pub use link_index::{resolve_links, IndexedEntry, LinkIndex, MergeOutcome};
