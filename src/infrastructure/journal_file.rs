//! Plain-text journal stored in a single file

use crate::domain::journal::{merge_entries, parse_entries, render_entries};
use crate::domain::{Journal, JournalEntry};
use crate::error::Result;
use crate::infrastructure::atomic_write::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed implementation of Journal
#[derive(Debug, Clone)]
pub struct PlainTextJournal {
    name: String,
    path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl PlainTextJournal {
    /// Open a journal file. A missing file is an empty journal.
    pub fn open(name: &str, path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            parse_entries(&fs::read_to_string(path)?)
        } else {
            Vec::new()
        };

        debug!(journal = name, path = %path.display(), entries = entries.len(), "opened journal");

        Ok(PlainTextJournal {
            name: name.to_string(),
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

}

impl Journal for PlainTextJournal {
    fn name(&self) -> &str {
        &self.name
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn import(&mut self, text: &str) {
        let incoming = parse_entries(text);
        debug!(journal = %self.name, parsed = incoming.len(), "importing entries");
        merge_entries(&mut self.entries, incoming);
    }

    fn write(&self) -> Result<()> {
        write_atomic(&self.path, render_entries(&self.entries))?;
        debug!(journal = %self.name, entries = self.entries.len(), "wrote journal");
        Ok(())
    }
}
