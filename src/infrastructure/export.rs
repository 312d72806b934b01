//! Day One JSON export files

use crate::domain::RawDayOneEntry;
use crate::error::{ImportError, Result};
use crate::messages::{Message, MsgText};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// A parsed Day One export with its location on disk
#[derive(Debug, Clone)]
pub struct DayOneExport {
    pub path: PathBuf,
    pub entries: Vec<RawDayOneEntry>,
}

/// Outcome of checking an export's media files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCheck {
    pub found: usize,
    pub missing: Vec<PathBuf>,
}

impl DayOneExport {
    /// Read and validate an export. `not_found` is the message kind used
    /// when the file does not exist.
    pub fn load(path: &Path, not_found: MsgText) -> Result<Self> {
        if !path.exists() {
            let param = match not_found {
                MsgText::IndexFileNotFound => "path",
                _ => "name",
            };
            return Err(Message::error(not_found)
                .with_param(param, path.display())
                .into());
        }

        let contents = fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&contents)
            .map_err(|e| Message::error(MsgText::InvalidJson).with_param("error", e))?;

        let raw_entries = match data.get("entries") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(invalid_export("entries is not a list")),
            None => return Err(invalid_export("no entries found")),
        };

        let entries = raw_entries
            .iter()
            .enumerate()
            .map(|(i, value)| {
                RawDayOneEntry::deserialize(value).map_err(|e| {
                    ImportError::from(
                        Message::error(MsgText::MalformedEntry)
                            .with_param("entry", format!("#{}", i + 1))
                            .with_param("reason", e),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(path = %path.display(), entries = entries.len(), "loaded Day One export");

        Ok(DayOneExport {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Directory holding the `photos/`, `pdfs/` and `audios/` folders
    pub fn media_base(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// When the export file was created; falls back to its modification
    /// time on filesystems that do not record creation
    pub fn created(&self) -> Result<SystemTime> {
        let metadata = fs::metadata(&self.path)?;
        Ok(metadata.created().or_else(|_| metadata.modified())?)
    }

    /// Check that every referenced media file exists
    pub fn check_media(&self) -> MediaCheck {
        let base = self.media_base();
        let mut check = MediaCheck::default();

        for entry in &self.entries {
            for (kind, media) in entry.all_media() {
                let path = kind.local_path(base, media);
                if path.exists() {
                    check.found += 1;
                } else {
                    check.missing.push(path);
                }
            }
        }

        check
    }
}

fn invalid_export(reason: &str) -> ImportError {
    Message::error(MsgText::InvalidExport)
        .with_param("reason", reason)
        .into()
}
