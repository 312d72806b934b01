use clap::Parser;
use dayone_import::application::{build_index, clear_index, init, ImportService};
use dayone_import::cli::{Cli, Commands};
use dayone_import::error::{ImportError, Result};
use dayone_import::infrastructure::config::INDEX_FILE;
use dayone_import::infrastructure::{
    config_dir, AssumeYes, Config, Confirm, DayOneIndex, IndexMode, PlainTextJournal,
    TerminalConfirm,
};
use dayone_import::messages::{Message, MsgText};
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let dir = config_dir();

    match cli.command {
        Commands::Init { journal, path } => {
            init(&dir, &journal, path)?;
            Ok(())
        }
        Commands::Import { file, journal, yes } => {
            let config = Config::load_from_dir(&dir)?;
            let requested = journal_arg(journal)?;
            let name = config.journal_name(requested.as_deref());
            let mut journal = PlainTextJournal::open(name, config.journal_path(name)?)?;

            let mut confirm = confirmer(yes);
            let mut service = ImportService::new(dir.join(INDEX_FILE), confirm.as_mut());
            service.execute(&mut journal, file.as_deref())?;
            Ok(())
        }
        Commands::Index {
            file,
            journal,
            clear,
            yes,
        } => {
            let config = Config::load_from_dir(&dir)?;
            let index_path = dir.join(INDEX_FILE);

            if clear {
                let mut confirm = confirmer(yes);
                clear_index(&index_path, confirm.as_mut())?;
                return Ok(());
            }

            let mut index = DayOneIndex::open(index_path, IndexMode::Build)?;
            let requested = journal_arg(journal)?;
            let name = config.journal_name(requested.as_deref());
            config.journal_path(name)?;
            build_index(&mut index, name, file.as_deref())?;
            Ok(())
        }
    }
}

/// Journal names must be valid UTF-8
fn journal_arg(journal: Option<OsString>) -> Result<Option<String>> {
    journal
        .map(|name| {
            name.into_string()
                .map_err(|_| ImportError::from(Message::error(MsgText::InvalidJournalName)))
        })
        .transpose()
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm::stdio())
    }
}
