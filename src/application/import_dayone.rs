//! Day One JSON import use case
//!
//! Every entry is converted before the journal is touched, and the journal
//! is written in one step, so a failure part-way leaves it unchanged.

use crate::domain::{convert, Journal};
use crate::error::Result;
use crate::infrastructure::{Confirm, DayOneExport, DayOneIndex, IndexMode};
use crate::messages::{print_msg, Message, MsgStyle, MsgText};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How an import ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Entries were added to the journal (after the journal's own merging)
    Imported(usize),
    /// The user declined to continue; nothing was written
    Aborted,
}

/// Service importing Day One exports into a journal
pub struct ImportService<'a> {
    index_path: PathBuf,
    confirm: &'a mut dyn Confirm,
}

impl<'a> ImportService<'a> {
    /// Create an import service resolving links through the index at `index_path`.
    pub fn new(index_path: PathBuf, confirm: &'a mut dyn Confirm) -> Self {
        Self {
            index_path,
            confirm,
        }
    }

    /// Import the export at `input` into `journal`.
    pub fn execute(
        &mut self,
        journal: &mut dyn Journal,
        input: Option<&Path>,
    ) -> Result<ImportOutcome> {
        let input = input.ok_or_else(|| Message::error(MsgText::NoInputPath))?;
        let export = DayOneExport::load(input, MsgText::DoesNotExist)?;

        self.report_media(&export);

        let index = DayOneIndex::open(self.index_path.clone(), IndexMode::Use)?;
        if index.is_stale(export.created()?) {
            print_msg(&Message::warning(MsgText::IndexOutdated));
            let question = Message::new(MsgText::Continue, MsgStyle::Prompt);
            if !self.confirm.confirm(&question, false) {
                print_msg(&Message::warning(MsgText::ImportAborted));
                return Ok(ImportOutcome::Aborted);
            }
        }

        let total = export.entries.len();
        let mut converted = Vec::with_capacity(total);
        for (i, entry) in export.entries.iter().enumerate() {
            debug!("Processing Day One entry {} of {}", i + 1, total);
            let text = convert(entry, export.media_base())?;
            converted.push(index.resolve_links(&text));
        }

        let old_count = journal.entry_count();
        journal.import(&converted.join("\n\n"));
        journal.write()?;
        let added = journal.entry_count().saturating_sub(old_count);

        info!(processed = total, added, journal = journal.name(), "imported Day One export");
        print_msg(
            &Message::normal(MsgText::ImportSummary)
                .with_param("count", added)
                .with_param("journal_name", journal.name()),
        );

        Ok(ImportOutcome::Imported(added))
    }

    /// Warn about each missing media file and report how many were found
    fn report_media(&self, export: &DayOneExport) {
        let check = export.check_media();

        for path in &check.missing {
            print_msg(
                &Message::warning(MsgText::MediaNotFound).with_param("path", path.display()),
            );
        }

        if check.found > 0 {
            print_msg(
                &Message::normal(MsgText::MediaProcessed).with_param("count", check.found),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::parse_entries;
    use crate::domain::JournalEntry;
    use crate::infrastructure::AssumeYes;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    /// In-memory journal recording whether it was written
    #[derive(Default)]
    struct MemoryJournal {
        entries: Vec<JournalEntry>,
        writes: Cell<usize>,
    }

    impl Journal for MemoryJournal {
        fn name(&self) -> &str {
            "memory"
        }

        fn entry_count(&self) -> usize {
            self.entries.len()
        }

        fn import(&mut self, text: &str) {
            self.entries.extend(parse_entries(text));
        }

        fn write(&self) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&mut self, _message: &Message, _default: bool) -> bool {
            false
        }
    }

    const EXPORT: &str = r#"{"entries": [
        {"uuid": "U1", "creationDate": "2023-05-04T14:00:00Z", "timeZone": "America/New_York",
         "tags": ["Work"], "text": "Standup"},
        {"uuid": "U2", "creationDate": "2023-05-05T09:00:00Z",
         "text": "Follow-up to [standup](dayone2://view?Id=U1)"}
    ]}"#;

    fn write_export(dir: &Path) -> PathBuf {
        let path = dir.join("Work.json");
        fs::write(&path, EXPORT).unwrap();
        path
    }

    #[test]
    fn test_import_requires_input() {
        let temp = TempDir::new().unwrap();
        let mut confirm = AssumeYes;
        let mut service = ImportService::new(temp.path().join("index.json"), &mut confirm);
        let mut journal = MemoryJournal::default();

        let err = service.execute(&mut journal, None).unwrap_err();
        assert_eq!(err.kind(), Some(MsgText::NoInputPath));
        assert_eq!(journal.writes.get(), 0);
    }

    #[test]
    fn test_import_without_index() {
        let temp = TempDir::new().unwrap();
        let export = write_export(temp.path());
        let mut confirm = AssumeYes;
        let mut service = ImportService::new(temp.path().join("index.json"), &mut confirm);
        let mut journal = MemoryJournal::default();

        let outcome = service.execute(&mut journal, Some(&export)).unwrap();

        assert_eq!(outcome, ImportOutcome::Imported(2));
        assert_eq!(journal.writes.get(), 1);
        assert_eq!(journal.entries[0].title(), "#work");
        assert!(journal.entries[1]
            .body
            .contains("[standup](dayone2://view?Id=U1)"));
    }

    #[test]
    fn test_import_resolves_links_through_index() {
        let temp = TempDir::new().unwrap();
        let export = write_export(temp.path());
        let index_path = temp.path().join("index.json");

        let mut index = DayOneIndex::open(index_path.clone(), IndexMode::Build).unwrap();
        let entries = DayOneExport::load(&export, MsgText::DoesNotExist).unwrap().entries;
        index.add_entries(&entries, "work", &export).unwrap();

        let mut confirm = AssumeYes;
        let mut service = ImportService::new(index_path, &mut confirm);
        let mut journal = MemoryJournal::default();
        service.execute(&mut journal, Some(&export)).unwrap();

        assert!(journal.entries[1]
            .body
            .contains("Follow-up to [[work/2023/05/04|standup]]"));
    }

    #[test]
    fn test_stale_index_declined_aborts() {
        let temp = TempDir::new().unwrap();
        let index_path = temp.path().join("index.json");
        fs::write(
            &index_path,
            r#"{"last_modified": "2000-01-01T00:00:00Z",
                "entries": {"OLD": {"date": "1999-12-31T10:00:00+00:00",
                                    "journal_name": "old",
                                    "original_journal_name": "Old"}}}"#,
        )
        .unwrap();
        let export = write_export(temp.path());

        let mut confirm = Decline;
        let mut service = ImportService::new(index_path, &mut confirm);
        let mut journal = MemoryJournal::default();

        let outcome = service.execute(&mut journal, Some(&export)).unwrap();
        assert_eq!(outcome, ImportOutcome::Aborted);
        assert_eq!(journal.entry_count(), 0);
        assert_eq!(journal.writes.get(), 0);
    }

    #[test]
    fn test_stale_index_accepted_continues() {
        let temp = TempDir::new().unwrap();
        let index_path = temp.path().join("index.json");
        fs::write(
            &index_path,
            r#"{"last_modified": "2000-01-01T00:00:00Z",
                "entries": {"U1": {"date": "2023-05-04T10:00:00-04:00",
                                   "journal_name": "archive",
                                   "original_journal_name": "Archive"}}}"#,
        )
        .unwrap();
        let export = write_export(temp.path());

        let mut confirm = AssumeYes;
        let mut service = ImportService::new(index_path, &mut confirm);
        let mut journal = MemoryJournal::default();

        let outcome = service.execute(&mut journal, Some(&export)).unwrap();
        assert_eq!(outcome, ImportOutcome::Imported(2));
        assert!(journal.entries[1].body.contains("[[archive/2023/05/04|standup]]"));
    }

    #[test]
    fn test_malformed_entry_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let export = temp.path().join("Bad.json");
        fs::write(
            &export,
            r#"{"entries": [
                {"creationDate": "2023-05-04T14:00:00Z", "text": "fine"},
                {"creationDate": "2023-05-04T14:00:00Z", "timeZone": "Nowhere/Land"}
            ]}"#,
        )
        .unwrap();

        let mut confirm = AssumeYes;
        let mut service = ImportService::new(temp.path().join("index.json"), &mut confirm);
        let mut journal = MemoryJournal::default();

        let err = service.execute(&mut journal, Some(&export)).unwrap_err();
        assert_eq!(err.kind(), Some(MsgText::InvalidTimeZone));
        assert_eq!(journal.entry_count(), 0);
        assert_eq!(journal.writes.get(), 0);
    }
}
