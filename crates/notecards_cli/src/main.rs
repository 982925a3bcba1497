//! Terminal front end for notecards.
//!
//! # Responsibility
//! - Render the note collection as a grid of colored cards.
//! - Turn subcommands into store intents and re-render after each change.

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{intent_for, Cli, Command};
use log::info;
use notecards_core::{
    default_log_level, init_logging, note_cards, IntentOutcome, NoteStoreError,
};
use render::{render_detail, render_grid, RenderStyle};
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let code = execute(Cli::parse(), &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(code)
}

/// Runs `cli`, reporting any error on `err`; returns the process exit code.
fn execute(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match run(cli, out) {
        Ok(()) => 0,
        Err(error) => {
            // Nothing left to report to if stderr itself fails.
            let _ = writeln!(err, "error: {error:#}");
            1
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let command = cli.command.clone().unwrap_or(Command::List);
    if command == Command::Version {
        writeln!(out, "notecards_core {}", notecards_core::core_version())?;
        return Ok(());
    }

    let config = cli.store_config();
    let mut store = config
        .open_store()
        .with_context(|| format!("cannot open notes file `{}`", config.notes_path.display()))?;
    let style = RenderStyle {
        color: !cli.no_color && std::io::stdout().is_terminal(),
        ..RenderStyle::default()
    };

    if let Command::Show { index } = command {
        let card = note_cards(store.entries())
            .into_iter()
            .nth(index)
            .ok_or(NoteStoreError::IndexOutOfRange {
                index,
                len: store.len(),
            })?;
        write!(out, "{}", render_detail(&card, style))?;
        return Ok(());
    }

    if let Some(intent) = intent_for(&command, &store) {
        let outcome = store.apply(intent)?;
        info!("event=cli_command module=cli status=ok changed={}", outcome.changed());
        writeln!(out, "{}", outcome_message(&outcome))?;
        if !outcome.changed() {
            return Ok(());
        }
    }

    write!(out, "{}", render_grid(&note_cards(store.entries()), style))?;
    Ok(())
}

fn outcome_message(outcome: &IntentOutcome) -> String {
    match outcome {
        IntentOutcome::Added { index, .. } => format!("Added note #{index}."),
        IntentOutcome::Unchanged => "Nothing to add: title and content are both empty.".to_string(),
        IntentOutcome::Edited { index, .. } => format!("Saved note #{index}."),
        IntentOutcome::Deleted { index, .. } => format!("Deleted note #{index}."),
    }
}
