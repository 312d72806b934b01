//! dayone-import - Day One JSON import for plain-text journals
//!
//! Converts Day One exports into plain-text journal entries and keeps an
//! index of imported Day One entries so links between them survive the
//! move, even across journals.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod messages;

pub use error::ImportError;
