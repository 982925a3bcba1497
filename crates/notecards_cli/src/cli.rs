//! Command-line surface and its mapping onto store intents.

use clap::{Parser, Subcommand};
use notecards_core::{JsonFileNoteRepository, NoteIntent, NoteStore, NoteTarget, StoreConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "notecards")]
#[command(version, about = "Pastel note cards kept in a JSON file")]
pub struct Cli {
    /// Notes file
    #[arg(
        short,
        long,
        global = true,
        env = "NOTECARDS_PATH",
        default_value = notecards_core::DEFAULT_NOTES_FILE
    )]
    pub file: PathBuf,

    /// Disable colored cards
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Overwrite the notes file in place instead of replacing it atomically
    #[arg(long, global = true)]
    pub direct_writes: bool,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "NOTECARDS_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); needs --log-dir
    #[arg(long, global = true, requires = "log_dir")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show all notes as a card grid
    List,

    /// Open one note with its full content
    Show {
        /// Card number shown in the grid
        index: usize,
    },

    /// Add a note; blank input is ignored
    Add {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Replace a note; omitted fields keep their current value
    Edit {
        index: usize,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete { index: usize },

    /// Print the core library version
    Version,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            notes_path: self.file.clone(),
            atomic_writes: !self.direct_writes,
        }
    }
}

/// Builds the store intent for a mutating command, or `None` for read-only
/// commands.
///
/// Edit fills omitted fields from the note currently at `index`; an invalid
/// index is left for the store to reject.
pub fn intent_for(
    command: &Command,
    store: &NoteStore<JsonFileNoteRepository>,
) -> Option<NoteIntent> {
    match command {
        Command::Add { title, content } => Some(NoteIntent::AddNote {
            title: title.clone(),
            content: content.clone(),
        }),
        Command::Edit {
            index,
            title,
            content,
        } => {
            let current = store.get(*index);
            let keep = |field: &Option<String>, existing: Option<&String>| {
                field
                    .clone()
                    .or_else(|| existing.cloned())
                    .unwrap_or_default()
            };
            Some(NoteIntent::EditNote {
                target: NoteTarget::at(*index),
                title: keep(title, current.map(|entry| &entry.note.title)),
                content: keep(content, current.map(|entry| &entry.note.content)),
            })
        }
        Command::Delete { index } => Some(NoteIntent::DeleteNote {
            target: NoteTarget::at(*index),
        }),
        Command::List | Command::Show { .. } | Command::Version => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{intent_for, Cli, Command};
    use clap::Parser;
    use notecards_core::{JsonFileNoteRepository, NoteIntent, NoteStore, NoteTarget};

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_file_after_subcommand() {
        let cli = Cli::parse_from(["notecards", "add", "-t", "hi", "--file", "/tmp/x.json"]);
        assert_eq!(cli.file.to_str(), Some("/tmp/x.json"));
        assert_eq!(
            cli.command,
            Some(Command::Add {
                title: "hi".to_string(),
                content: String::new(),
            })
        );
        assert!(cli.store_config().atomic_writes);
    }

    #[test]
    fn edit_keeps_omitted_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store =
            NoteStore::open(JsonFileNoteRepository::new(dir.path().join("n.json"))).expect("open");
        store.add("title", "old body").expect("add");

        let intent = intent_for(
            &Command::Edit {
                index: 0,
                title: None,
                content: Some("new body".to_string()),
            },
            &store,
        );

        assert_eq!(
            intent,
            Some(NoteIntent::EditNote {
                target: NoteTarget::at(0),
                title: "title".to_string(),
                content: "new body".to_string(),
            })
        );
        assert_eq!(intent_for(&Command::List, &store), None);
    }

    #[test]
    fn log_level_requires_log_dir() {
        let err = Cli::try_parse_from(["notecards", "--log-level", "debug", "list"])
            .expect_err("log level alone must be rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from([
            "notecards",
            "--log-dir",
            "/tmp/notecards-logs",
            "--log-level",
            "debug",
        ])
        .expect("log level with log dir");
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
