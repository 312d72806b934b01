//! Day One export records
//!
//! Mirrors the subset of the Day One JSON export schema that the importer
//! reads. Field names follow the export (camelCase on the wire).

use crate::error::Result;
use crate::messages::{Message, MsgText};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One entry of a Day One export
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDayOneEntry {
    #[serde(default)]
    pub uuid: Option<String>,
    pub creation_date: String,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub creation_device: Option<String>,
    #[serde(default)]
    pub creation_device_type: Option<String>,
    #[serde(default)]
    pub photos: Vec<MediaRef>,
    #[serde(default)]
    pub pdf_attachments: Vec<MediaRef>,
    #[serde(default)]
    pub audios: Vec<MediaRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub locality_name: Option<String>,
    #[serde(default, alias = "Country")]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub conditions_description: String,
    pub temperature_celsius: f64,
    #[serde(rename = "windSpeedKPH")]
    pub wind_speed_kph: f64,
}

/// An attached media asset, stored on disk under its content hash
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaRef {
    pub identifier: String,
    pub md5: String,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// The three kinds of media a Day One entry can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Pdf,
    Audio,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Photo, MediaKind::Pdf, MediaKind::Audio];

    /// Directory next to the export file holding this kind of media
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaKind::Photo => "photos",
            MediaKind::Pdf => "pdfs",
            MediaKind::Audio => "audios",
        }
    }

    /// Moment URL the export uses to embed this asset in entry text
    pub fn moment_url(self, identifier: &str) -> String {
        match self {
            MediaKind::Photo => format!("dayone-moment://{}", identifier),
            MediaKind::Pdf => format!("dayone-moment:/pdfAttachment/{}", identifier),
            MediaKind::Audio => format!("dayone-moment:/audio/{}", identifier),
        }
    }

    /// File extension of the asset on disk
    pub fn extension(self, media: &MediaRef) -> String {
        match self {
            MediaKind::Photo => media
                .media_type
                .clone()
                .or_else(|| media.format.clone())
                .unwrap_or_default(),
            MediaKind::Pdf => "pdf".to_string(),
            // Audio is exported as aac but stored as m4a
            MediaKind::Audio => match media.format.as_deref().or(media.media_type.as_deref()) {
                Some("aac") => "m4a".to_string(),
                Some(ext) => ext.to_string(),
                None => String::new(),
            },
        }
    }

    /// Path of the asset under the export's media directories
    pub fn local_path(self, base: &Path, media: &MediaRef) -> PathBuf {
        base.join(self.dir_name())
            .join(format!("{}.{}", media.md5, self.extension(media)))
    }
}

impl RawDayOneEntry {
    /// Media references of one kind
    pub fn media(&self, kind: MediaKind) -> &[MediaRef] {
        match kind {
            MediaKind::Photo => &self.photos,
            MediaKind::Pdf => &self.pdf_attachments,
            MediaKind::Audio => &self.audios,
        }
    }

    /// Every media reference with its kind, photos first
    pub fn all_media(&self) -> impl Iterator<Item = (MediaKind, &MediaRef)> {
        MediaKind::ALL
            .into_iter()
            .flat_map(move |kind| self.media(kind).iter().map(move |m| (kind, m)))
    }

    /// Label used in error messages
    pub fn label(&self) -> String {
        self.uuid
            .clone()
            .unwrap_or_else(|| format!("created {}", self.creation_date))
    }

    /// Creation date in the entry's own time zone (UTC if none is recorded)
    pub fn localized_creation_date(&self) -> Result<DateTime<FixedOffset>> {
        let utc = parse_utc(&self.creation_date).ok_or_else(|| {
            Message::error(MsgText::MalformedEntry)
                .with_param("entry", self.label())
                .with_param(
                    "reason",
                    format!("invalid creationDate '{}'", self.creation_date),
                )
        })?;

        match &self.time_zone {
            Some(zone) => {
                let zone = zone.replace('\\', "");
                let tz: Tz = zone.parse().map_err(|_| {
                    Message::error(MsgText::InvalidTimeZone).with_param("zone", &zone)
                })?;
                Ok(utc.with_timezone(&tz).fixed_offset())
            }
            None => Ok(utc.fixed_offset()),
        }
    }
}

/// Parse an ISO 8601 timestamp; one without an offset is taken as UTC
fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Name of the Day One journal an export came from, taken from its
/// percent-encoded file name (`%F0%9F%A7%AA Test 2.json` is `🧪 Test 2`)
pub fn source_journal_name(export_path: &Path) -> Result<String> {
    let invalid = || {
        Message::error(MsgText::InvalidSourceName).with_param("name", export_path.display())
    };

    let stem = export_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;

    urlencoding::decode(stem)
        .map(|name| name.into_owned())
        .map_err(|_| invalid().into())
}
