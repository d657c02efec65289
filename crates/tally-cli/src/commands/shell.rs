//! Interactive session
//!
//! Each line is parsed as a `tally` subcommand. A failing command prints a
//! one-line notice and the session carries on.

use anyhow::{anyhow, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tally_core::{LoginState, Tracker};
use tracing::{debug, warn};

use super::{execute, print_snapshot};
use crate::cli::{Commands, ShellLine};

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Exit,
}

pub fn cmd_shell(tracker: &mut Tracker, login: &mut LoginState) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!(
        "Welcome, {} · {}",
        login.username(),
        tracker.today().format("%A, %-d %B %Y")
    );
    println!("Type 'help' for commands, 'exit' to leave.");

    let snapshot = tracker.refresh()?;
    print_snapshot(tracker, &snapshot);

    loop {
        match rl.readline("tally> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(line) {
                    debug!(error = %e, "Could not record history");
                }

                match run_line(tracker, login, line) {
                    Ok(ShellFlow::Continue) => {}
                    Ok(ShellFlow::Exit) => break,
                    Err(e) => println!("{}", error_notice(&e)),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Parse and run one shell line
pub fn run_line(tracker: &mut Tracker, login: &mut LoginState, line: &str) -> Result<ShellFlow> {
    if matches!(line, "exit" | "quit") {
        return Ok(ShellFlow::Exit);
    }

    let words = split_line(line)?;
    debug!(?words, "Shell command");

    let command = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed.command,
        Err(e) if e.use_stderr() => return Err(anyhow!("{}", first_line(&e.to_string()))),
        Err(e) => {
            // --help and friends
            println!("{}", e);
            return Ok(ShellFlow::Continue);
        }
    };

    match command {
        Commands::Shell => println!("Already in the shell."),
        Commands::Logout => {
            execute(tracker, login, Commands::Logout)?;
            return Ok(ShellFlow::Exit);
        }
        command => execute(tracker, login, command)?,
    }

    Ok(ShellFlow::Continue)
}

/// One-line notice for a failed shell command
///
/// Input mistakes show just the message. Anything else shows the full
/// context chain and is logged.
pub fn error_notice(err: &anyhow::Error) -> String {
    match err.downcast_ref::<tally_core::Error>() {
        Some(e) if e.is_user_error() => format!("❌ {}", e),
        _ => {
            warn!(error = %format!("{:#}", err), "Shell command failed");
            format!("❌ {:#}", err)
        }
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or(message).trim()
}

/// Split a line into words, honouring single and double quotes
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(anyhow!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
