//! Application layer - Use cases and orchestration

pub mod build_index;
pub mod import_dayone;
pub mod init;

pub use build_index::{build_index, clear_index};
pub use import_dayone::{ImportOutcome, ImportService};
pub use init::init;
