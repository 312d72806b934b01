//! Day One entry index used to resolve links between entries
//!
//! Day One exports reference other entries with `dayone2://view?Id=<uuid>`
//! links. The index remembers, per uuid, which journal the entry was
//! imported into and when it was written, so those links can be rewritten
//! into cross-journal references.

use chrono::{DateTime, FixedOffset, Utc};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn link_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(dayone2://view\?Id=([^)\s]+)\)").unwrap())
}

/// What the index knows about one Day One entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntry {
    pub uuid: String,
    pub date: DateTime<FixedOffset>,
    pub journal_name: String,
    pub original_journal_name: String,
}

impl IndexedEntry {
    pub fn new(
        uuid: String,
        date: DateTime<FixedOffset>,
        journal_name: String,
        original_journal_name: String,
    ) -> Self {
        IndexedEntry {
            uuid,
            date,
            journal_name,
            original_journal_name,
        }
    }

    /// `[[journal/YYYY/MM/DD|display]]`
    pub fn cross_reference(&self, display: &str) -> String {
        format!(
            "[[{}/{}|{}]]",
            self.journal_name,
            self.date.format("%Y/%m/%d"),
            display
        )
    }
}

/// Result of merging entries into the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Nothing new; the index was left untouched
    UpToDate,
    /// The index was empty and now holds this many entries
    Created(usize),
    /// This many entries were added to a non-empty index
    Updated(usize),
}

impl MergeOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, MergeOutcome::UpToDate)
    }
}

/// Uuid-keyed entry map plus the time it last changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIndex {
    entries: BTreeMap<String, IndexedEntry>,
    last_modified: Option<DateTime<Utc>>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        entries: impl IntoIterator<Item = IndexedEntry>,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        LinkIndex {
            entries: entries
                .into_iter()
                .map(|entry| (entry.uuid.clone(), entry))
                .collect(),
            last_modified,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, uuid: &str) -> Option<&IndexedEntry> {
        self.entries.get(uuid)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexedEntry> {
        self.entries.values()
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Add entries whose uuid is not yet indexed. Existing entries are never
    /// overwritten, and `last_modified` only moves when something was added.
    pub fn merge(
        &mut self,
        incoming: impl IntoIterator<Item = IndexedEntry>,
        now: DateTime<Utc>,
    ) -> MergeOutcome {
        let was_empty = self.entries.is_empty();
        let mut added = 0;

        for entry in incoming {
            if self.entries.contains_key(&entry.uuid) {
                continue;
            }
            self.entries.insert(entry.uuid.clone(), entry);
            added += 1;
        }

        if added == 0 {
            return MergeOutcome::UpToDate;
        }

        self.last_modified = Some(now);
        if was_empty {
            MergeOutcome::Created(added)
        } else {
            MergeOutcome::Updated(added)
        }
    }

    pub fn clear(&mut self, now: DateTime<Utc>) {
        self.entries.clear();
        self.last_modified = Some(now);
    }

    /// Whether the index predates `time`
    pub fn is_older_than(&self, time: DateTime<Utc>) -> bool {
        match self.last_modified {
            Some(last_modified) => last_modified < time,
            None => true,
        }
    }
}

/// Rewrite `[text](dayone2://view?Id=<uuid>)` links whose uuid `lookup`
/// knows into cross-journal references. Unknown links are left as they are.
pub fn resolve_links<F>(text: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<IndexedEntry>,
{
    link_regex()
        .replace_all(text, |caps: &Captures| match lookup(&caps[2]) {
            Some(entry) => entry.cross_reference(&caps[1]),
            None => caps[0].to_string(),
        })
        .into_owned()
}
