//! CLI command definitions

use crate::infrastructure::config::DEFAULT_JOURNAL;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dayone-import")]
#[command(about = "Import Day One JSON exports into a plain-text journal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the configuration with a single journal
    Init {
        /// Name of the journal
        #[arg(short, long, default_value = DEFAULT_JOURNAL)]
        journal: String,

        /// Journal file (default: journal.txt in the configuration directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Import a Day One JSON export into a journal
    Import {
        /// Day One JSON export file
        file: Option<PathBuf>,

        /// Journal to import into (default: the configured default journal)
        #[arg(short, long)]
        journal: Option<OsString>,

        /// Continue without asking when the index is outdated
        #[arg(short, long)]
        yes: bool,
    },

    /// Build or update the Day One link index from an export
    Index {
        /// Day One JSON export file
        file: Option<PathBuf>,

        /// Journal the export's entries are imported into
        #[arg(short, long)]
        journal: Option<OsString>,

        /// Remove every entry from the index
        #[arg(long)]
        clear: bool,

        /// Clear without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_without_file_parses() {
        let cli = Cli::parse_from(["dayone-import", "import"]);
        match cli.command {
            Commands::Import { file, journal, yes } => {
                assert!(file.is_none());
                assert!(journal.is_none());
                assert!(!yes);
            }
            other => panic!("Expected Import, got {:?}", other),
        }
    }

    #[test]
    fn test_index_clear_flags() {
        let cli = Cli::parse_from(["dayone-import", "-v", "index", "--clear", "-y"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Index { clear, yes, .. } => {
                assert!(clear);
                assert!(yes);
            }
            other => panic!("Expected Index, got {:?}", other),
        }
    }
}
