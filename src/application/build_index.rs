//! Build, update and clear the Day One link index

use crate::domain::MergeOutcome;
use crate::error::Result;
use crate::infrastructure::{Confirm, DayOneExport, DayOneIndex};
use crate::messages::{print_msg, Message, MsgStyle, MsgText};
use std::path::Path;
use tracing::info;

/// Add the entries of the export at `input` to the index, attributing them
/// to `journal_name`.
pub fn build_index(
    index: &mut DayOneIndex,
    journal_name: &str,
    input: Option<&Path>,
) -> Result<MergeOutcome> {
    let input = input.ok_or_else(|| Message::error(MsgText::IndexFileMissing))?;
    let export = DayOneExport::load(input, MsgText::IndexFileNotFound)?;

    let outcome = index.add_entries(&export.entries, journal_name, &export.path)?;
    print_msg(&outcome_message(outcome));

    Ok(outcome)
}

/// Clear the index at `index_path` after the user confirms (default: no).
/// The current contents are not parsed, so a malformed index can be cleared.
/// Returns whether the index was cleared.
pub fn clear_index(index_path: &Path, confirm: &mut dyn Confirm) -> Result<bool> {
    let question = Message::new(MsgText::ConfirmClear, MsgStyle::Prompt);
    if !confirm.confirm(&question, false) {
        print_msg(&Message::warning(MsgText::IndexClearAborted));
        return Ok(false);
    }

    let index = DayOneIndex::reset(index_path.to_path_buf())?;
    info!(path = %index.path().display(), "cleared Day One index");
    print_msg(&Message::normal(MsgText::IndexCleared));

    Ok(true)
}

fn outcome_message(outcome: MergeOutcome) -> Message {
    match outcome {
        MergeOutcome::UpToDate => Message::normal(MsgText::IndexUpToDate),
        MergeOutcome::Created(count) => {
            Message::normal(MsgText::IndexCreated).with_param("count", count)
        }
        MergeOutcome::Updated(count) => {
            Message::normal(MsgText::IndexUpdated).with_param("count", count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::INDEX_FILE;
    use crate::infrastructure::{AssumeYes, IndexMode};
    use std::fs;
    use tempfile::TempDir;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&mut self, _message: &Message, _default: bool) -> bool {
            false
        }
    }

    fn write_export(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("Work.json");
        fs::write(
            &path,
            r#"{"entries": [
                {"uuid": "U1", "creationDate": "2023-05-04T10:00:00Z"},
                {"uuid": "U2", "creationDate": "2023-05-05T10:00:00Z"}
            ]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_build_then_rebuild() {
        let temp = TempDir::new().unwrap();
        let export = write_export(temp.path());
        let mut index = DayOneIndex::open(temp.path().join(INDEX_FILE), IndexMode::Build).unwrap();

        let first = build_index(&mut index, "work", Some(&export)).unwrap();
        assert_eq!(first, MergeOutcome::Created(2));

        let second = build_index(&mut index, "work", Some(&export)).unwrap();
        assert_eq!(second, MergeOutcome::UpToDate);
    }

    #[test]
    fn test_build_requires_input() {
        let temp = TempDir::new().unwrap();
        let mut index = DayOneIndex::open(temp.path().join(INDEX_FILE), IndexMode::Build).unwrap();

        let err = build_index(&mut index, "work", None).unwrap_err();
        assert_eq!(err.kind(), Some(MsgText::IndexFileMissing));

        let missing = temp.path().join("nope.json");
        let err = build_index(&mut index, "work", Some(&missing)).unwrap_err();
        assert_eq!(err.kind(), Some(MsgText::IndexFileNotFound));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let temp = TempDir::new().unwrap();
        let export = write_export(temp.path());
        let path = temp.path().join(INDEX_FILE);
        let mut index = DayOneIndex::open(path.clone(), IndexMode::Build).unwrap();
        build_index(&mut index, "work", Some(&export)).unwrap();

        assert!(!clear_index(&path, &mut Decline).unwrap());
        assert_eq!(DayOneIndex::open(path.clone(), IndexMode::Build).unwrap().len(), 2);

        assert!(clear_index(&path, &mut AssumeYes).unwrap());
        assert!(DayOneIndex::open(path, IndexMode::Build).unwrap().is_empty());
    }

    #[test]
    fn test_clear_recovers_malformed_index() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(INDEX_FILE);
        fs::write(&path, "{not json").unwrap();

        assert!(!clear_index(&path, &mut Decline).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");

        assert!(clear_index(&path, &mut AssumeYes).unwrap());
        assert!(DayOneIndex::open(path, IndexMode::Build).unwrap().is_empty());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            outcome_message(MergeOutcome::Created(3)).render(),
            "Day One index created from 3 entries"
        );
        assert_eq!(
            outcome_message(MergeOutcome::Updated(1)).render(),
            "Day One index updated (1 new entries)"
        );
        assert_eq!(
            outcome_message(MergeOutcome::UpToDate).render(),
            "Day One index is already up to date"
        );
    }
}
