//! Persistent Day One link index
//!
//! The index lives in `dayone_index.json` next to the configuration:
//!
//! ```json
//! {
//!   "last_modified": "2024-01-01T10:00:00+00:00",
//!   "entries": {
//!     "<uuid>": {
//!       "date": "2023-05-04T10:00:00-04:00",
//!       "journal_name": "work",
//!       "original_journal_name": "Work"
//!     }
//!   }
//! }
//! ```
//!
//! The file is replaced (temp file plus rename) after every change, so an
//! interrupted write never leaves a truncated index. There is no locking; two
//! processes updating the index at once can lose each other's writes.

use crate::domain::{
    resolve_links, source_journal_name, IndexedEntry, LinkIndex, MergeOutcome, RawDayOneEntry,
};
use crate::error::{ImportError, Result};
use crate::infrastructure::atomic_write::write_atomic;
use crate::messages::{print_msg, Message, MsgText};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// How the index is being used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMode {
    /// Read during an import to resolve links
    Use,
    /// Being built or cleared explicitly
    Build,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexFile {
    last_modified: DateTime<Utc>,
    entries: BTreeMap<String, IndexRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexRecord {
    date: DateTime<FixedOffset>,
    journal_name: String,
    original_journal_name: String,
}

/// The link index together with its backing file
#[derive(Debug)]
pub struct DayOneIndex {
    path: PathBuf,
    mode: IndexMode,
    index: LinkIndex,
    warned_unusable: Cell<bool>,
}

impl DayOneIndex {
    /// Open the index stored at `path`.
    ///
    /// A missing or empty file gives an empty index (with a warning when
    /// the index is about to be used). Unparseable content is an error.
    pub fn open(path: PathBuf, mode: IndexMode) -> Result<Self> {
        let index = load(&path)?;
        debug!(path = %path.display(), entries = index.len(), "loaded Day One index");

        let dayone_index = DayOneIndex {
            path,
            mode,
            index,
            warned_unusable: Cell::new(false),
        };

        if mode == IndexMode::Use && !dayone_index.is_usable() {
            print_msg(&Message::warning(MsgText::IndexNotFound));
        }

        Ok(dayone_index)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.index.last_modified()
    }

    /// The backing file exists and holds at least one entry
    pub fn is_usable(&self) -> bool {
        self.path.exists() && !self.index.is_empty()
    }

    /// Usable, but last changed before `time`
    pub fn is_stale(&self, time: SystemTime) -> bool {
        self.is_usable() && self.index.is_older_than(DateTime::<Utc>::from(time))
    }

    /// Look up an entry. Using an unusable index warns (once) and finds nothing.
    pub fn lookup(&self, uuid: &str) -> Option<&IndexedEntry> {
        if self.mode == IndexMode::Use && !self.is_usable() {
            if !self.warned_unusable.replace(true) {
                print_msg(&Message::warning(MsgText::IndexNotUsable));
            }
            return None;
        }
        self.index.get(uuid)
    }

    /// Add the entries of one export. Entries without a uuid, or whose uuid
    /// is already indexed, are skipped. The file is only rewritten when
    /// something was added.
    pub fn add_entries(
        &mut self,
        entries: &[RawDayOneEntry],
        journal_name: &str,
        export_source: &Path,
    ) -> Result<MergeOutcome> {
        let original_journal_name = source_journal_name(export_source)?;

        let mut incoming = Vec::new();
        for entry in entries {
            let Some(uuid) = &entry.uuid else {
                continue;
            };
            if self.index.get(uuid).is_some() {
                continue;
            }
            incoming.push(IndexedEntry::new(
                uuid.clone(),
                entry.localized_creation_date()?,
                journal_name.to_string(),
                original_journal_name.clone(),
            ));
        }

        let outcome = self.index.merge(incoming, Utc::now());
        if outcome.changed() {
            self.save()?;
        }

        info!(?outcome, total = self.index.len(), "merged Day One export into index");
        Ok(outcome)
    }

    /// Replace whatever is stored at `path` with an empty index. The old
    /// file is never read, so a malformed index can still be reset.
    pub fn reset(path: PathBuf) -> Result<Self> {
        let mut dayone_index = DayOneIndex {
            path,
            mode: IndexMode::Build,
            index: LinkIndex::new(),
            warned_unusable: Cell::new(false),
        };
        dayone_index.clear()?;
        Ok(dayone_index)
    }

    /// Drop every entry and persist the empty index
    pub fn clear(&mut self) -> Result<()> {
        self.index.clear(Utc::now());
        self.save()
    }

    /// Rewrite known `dayone2://view` links into cross-journal references
    pub fn resolve_links(&self, text: &str) -> String {
        resolve_links(text, |uuid| self.lookup(uuid).cloned())
    }

    fn save(&self) -> Result<()> {
        let file = IndexFile {
            last_modified: self.index.last_modified().unwrap_or_else(Utc::now),
            entries: self
                .index
                .entries()
                .map(|entry| {
                    (
                        entry.uuid.clone(),
                        IndexRecord {
                            date: entry.date,
                            journal_name: entry.journal_name.clone(),
                            original_journal_name: entry.original_journal_name.clone(),
                        },
                    )
                })
                .collect(),
        };

        let contents = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path, contents)?;
        debug!(path = %self.path.display(), entries = self.index.len(), "saved Day One index");

        Ok(())
    }
}

fn load(path: &Path) -> Result<LinkIndex> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LinkIndex::new()),
        Err(e) => return Err(malformed(path, e)),
    };

    if contents.trim().is_empty() {
        return Ok(LinkIndex::new());
    }

    let file: IndexFile = serde_json::from_str(&contents).map_err(|e| malformed(path, e))?;

    let entries = file.entries.into_iter().map(|(uuid, record)| {
        IndexedEntry::new(
            uuid,
            record.date,
            record.journal_name,
            record.original_journal_name,
        )
    });

    Ok(LinkIndex::from_parts(entries, Some(file.last_modified)))
}

fn malformed(path: &Path, error: impl std::fmt::Display) -> ImportError {
    Message::error(MsgText::IndexMalformed)
        .with_param("path", path.display())
        .with_param("error", error)
        .into()
}
