//! Plain-text journal entries

use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::OnceLock;

fn header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?m)^\[(\d{4}-\d{2}-\d{2}) (\d{1,2}):(\d{2}):(\d{2})(?: ?([AaPp][Mm]))?\] ?")
            .unwrap()
    })
}

/// A journal that imported entries are appended to
pub trait Journal {
    /// Name of the journal in the configuration
    fn name(&self) -> &str;

    /// Number of entries currently held
    fn entry_count(&self) -> usize;

    /// Parse plain-text entries and merge them into the journal
    fn import(&mut self, text: &str);

    /// Persist the journal to its backing store
    fn write(&self) -> Result<()>;
}

/// One journal entry: a timestamp and everything after the header bracket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JournalEntry {
    pub date: NaiveDateTime,
    pub body: String,
}

impl JournalEntry {
    pub fn new(date: NaiveDateTime, body: impl Into<String>) -> Self {
        JournalEntry {
            date,
            body: body.into(),
        }
    }

    /// Title line, i.e. the text on the header line
    pub fn title(&self) -> &str {
        self.body.lines().next().unwrap_or("")
    }

    pub fn render(&self) -> String {
        let date = self.date.format("%Y-%m-%d %I:%M:%S %p");
        if self.body.is_empty() || self.body.starts_with('\n') {
            format!("[{}]{}", date, self.body)
        } else {
            format!("[{}] {}", date, self.body)
        }
    }
}

/// Split text into entries at each `[YYYY-MM-DD HH:MM:SS AM/PM]` header.
/// Text before the first header is not an entry and is dropped.
pub fn parse_entries(text: &str) -> Vec<JournalEntry> {
    let headers: Vec<(usize, usize, NaiveDateTime)> = header_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            parse_header(&caps).map(|date| (whole.start(), whole.end(), date))
        })
        .collect();

    headers
        .iter()
        .enumerate()
        .map(|(i, (_, body_start, date))| {
            let body_end = headers.get(i + 1).map_or(text.len(), |next| next.0);
            JournalEntry::new(*date, text[*body_start..body_end].trim_end())
        })
        .collect()
}

/// Hours are read as written; the AM/PM marker only applies to 1..=12
fn parse_header(caps: &Captures) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let mut hour: u32 = caps[2].parse().ok()?;
    let minute: u32 = caps[3].parse().ok()?;
    let second: u32 = caps[4].parse().ok()?;

    if let Some(meridiem) = caps.get(5) {
        let pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        hour = match (hour, pm) {
            (12, false) => 0,
            (1..=11, true) => hour + 12,
            _ => hour,
        };
    }

    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}

/// Merge `incoming` into `existing`: identical entries collapse into one
/// and the result is ordered by date (stable for equal dates).
pub fn merge_entries(existing: &mut Vec<JournalEntry>, incoming: Vec<JournalEntry>) {
    let mut seen: HashSet<JournalEntry> = HashSet::new();
    let combined = std::mem::take(existing);

    for entry in combined.into_iter().chain(incoming) {
        if seen.insert(entry.clone()) {
            existing.push(entry);
        }
    }

    existing.sort_by_key(|entry| entry.date);
}

/// Serialize entries back to journal text
pub fn render_entries(entries: &[JournalEntry]) -> String {
    let mut output = entries
        .iter()
        .map(JournalEntry::render)
        .collect::<Vec<_>>()
        .join("\n\n");
    if !output.is_empty() {
        output.push('\n');
    }
    output
}
