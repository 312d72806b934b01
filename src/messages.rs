//! User-facing message catalog
//!
//! Every status line, warning, prompt and fatal error the tool shows is a
//! [`MsgText`] kind. A [`Message`] pairs a kind with a display style and the
//! values substituted into the kind's template.

use std::fmt;

/// Every kind of message the tool can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgText {
    // Import
    NoInputPath,
    DoesNotExist,
    InvalidJson,
    InvalidExport,
    MalformedEntry,
    InvalidTimeZone,
    InvalidSourceName,
    MediaNotFound,
    MediaProcessed,
    Continue,
    ImportAborted,
    ImportSummary,

    // Index
    IndexFileMissing,
    IndexFileNotFound,
    IndexNotFound,
    IndexNotUsable,
    IndexMalformed,
    IndexCreated,
    IndexUpdated,
    IndexUpToDate,
    IndexCleared,
    IndexClearAborted,
    IndexOutdated,
    ConfirmClear,

    // Configuration
    ConfigNotFound,
    ConfigExists,
    ConfigInitialized,
    InvalidJournalName,
    JournalNotFound,
}

impl MsgText {
    /// Template for this message kind, with `{name}` placeholders
    pub fn template(self) -> &'static str {
        match self {
            MsgText::NoInputPath => "Day One JSON import requires an input file path",
            MsgText::DoesNotExist => "The path {name} does not exist",
            MsgText::InvalidJson => "Cannot parse Day One JSON: {error}",
            MsgText::InvalidExport => "Invalid Day One export: {reason}",
            MsgText::MalformedEntry => "Malformed Day One entry {entry}: {reason}",
            MsgText::InvalidTimeZone => "Unknown time zone '{zone}' in Day One entry",
            MsgText::InvalidSourceName => {
                "Export file name {name} does not decode to valid UTF-8 text"
            }
            MsgText::MediaNotFound => "Media file not found at {path}",
            MsgText::MediaProcessed => {
                "Successfully processed {count} media files from Day One export"
            }
            MsgText::Continue => "Do you want to continue importing entries from Day One?",
            MsgText::ImportAborted => "Import aborted",
            MsgText::ImportSummary => "{count} imported to {journal_name} journal",

            MsgText::IndexFileMissing => "Creating a Day One index requires an input file",
            MsgText::IndexFileNotFound => "Day One index file {path} does not exist",
            MsgText::IndexNotFound => {
                "No Day One index found. Run 'dayone-import index' first to enable link resolution"
            }
            MsgText::IndexNotUsable => {
                "Cannot resolve Day One links: index not found or empty. \
                 Run 'dayone-import index path/to/dayone.json' first"
            }
            MsgText::IndexMalformed => "Day One index at {path} is malformed: {error}",
            MsgText::IndexCreated => "Day One index created from {count} entries",
            MsgText::IndexUpdated => "Day One index updated ({count} new entries)",
            MsgText::IndexUpToDate => "Day One index is already up to date",
            MsgText::IndexCleared => "Day One index cleared",
            MsgText::IndexClearAborted => "Day One index left unchanged",
            MsgText::IndexOutdated => {
                "Day One index is older than the export file. \
                 Links to newer entries may not resolve"
            }
            MsgText::ConfirmClear => "Do you really want to clear the Day One index?",

            MsgText::ConfigNotFound => "No configuration found at {path}",
            MsgText::ConfigExists => "Configuration already exists at {path}",
            MsgText::ConfigInitialized => {
                "Configuration written to {path} with journal '{journal_name}' at {journal_path}"
            }
            MsgText::InvalidJournalName => "Journal name is not valid UTF-8 text",
            MsgText::JournalNotFound => "No journal named '{journal_name}' in configuration",
        }
    }
}

/// How a message is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MsgStyle {
    #[default]
    Normal,
    Warning,
    Error,
    Prompt,
}

/// A message kind with its style and substitution parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: MsgText,
    pub style: MsgStyle,
    pub params: Vec<(&'static str, String)>,
}

impl Message {
    pub fn new(text: MsgText, style: MsgStyle) -> Self {
        Message {
            text,
            style,
            params: Vec::new(),
        }
    }

    pub fn normal(text: MsgText) -> Self {
        Self::new(text, MsgStyle::Normal)
    }

    pub fn warning(text: MsgText) -> Self {
        Self::new(text, MsgStyle::Warning)
    }

    pub fn error(text: MsgText) -> Self {
        Self::new(text, MsgStyle::Error)
    }

    /// Add a substitution parameter
    pub fn with_param(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// Look up a parameter value by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Substitute parameters into the template.
    /// Placeholders without a matching parameter are left as-is.
    pub fn render(&self) -> String {
        let mut result = self.text.template().to_string();
        for (name, value) in &self.params {
            result = result.replace(&format!("{{{}}}", name), value);
        }
        result
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a message with its style prefix
pub fn format_msg(message: &Message) -> String {
    match message.style {
        MsgStyle::Normal | MsgStyle::Prompt => message.render(),
        MsgStyle::Warning => format!("WARNING: {}", message.render()),
        MsgStyle::Error => format!("ERROR: {}", message.render()),
    }
}

/// Show a status message. All messages go to stderr so stdout stays clean.
pub fn print_msg(message: &Message) {
    eprintln!("{}", format_msg(message));
}
