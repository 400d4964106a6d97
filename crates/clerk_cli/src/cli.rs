//! Command-line grammar for `clerk`.
//!
//! References (`<ref>`) are `#<id>` or a bare name. Multi-word contents and
//! queries are collected as separate words and joined with a single space.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use clerk_core::config::{DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
use std::path::PathBuf;

/// Clerk - tasks and notes from the terminal.
#[derive(Debug, Parser)]
#[command(name = "clerk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database.
    #[arg(long, global = true, env = DB_PATH_ENV)]
    pub db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, env = LOG_LEVEL_ENV)]
    pub log_level: Option<String>,

    /// Directory for rotating log files.
    #[arg(long, global = true, env = LOG_DIR_ENV)]
    pub log_dir: Option<PathBuf>,

    /// Disable ANSI colors in output.
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage your tasks.
    #[command(alias = "t", subcommand)]
    Task(TaskCommand),

    /// Manage your notes.
    #[command(alias = "n", subcommand)]
    Note(NoteCommand),

    /// Search tasks and notes for a substring.
    #[command(alias = "s")]
    Search(Words),
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List all tasks.
    #[command(alias = "ls")]
    List,

    /// Add a new task.
    #[command(alias = "a")]
    Add(NamedContents),

    /// Replace the contents of a task.
    #[command(alias = "e")]
    Edit(RefContents),

    /// Delete a task.
    #[command(alias = "d")]
    Del(Target),

    /// Mark a task as completed.
    Done(Target),
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// List all notes.
    #[command(alias = "ls")]
    List,

    /// Add a new note.
    #[command(alias = "a")]
    Add(NamedContents),

    /// Append contents to a note.
    #[command(alias = "app")]
    Append(RefContents),

    /// Show a note with all of its contents.
    #[command(alias = "sh")]
    Show(Target),

    /// Delete a note and its contents.
    #[command(alias = "d")]
    Del(Target),
}

#[derive(Debug, Args)]
pub struct NamedContents {
    /// Name of the new entry.
    pub name: String,
    /// Contents, one or more words.
    #[arg(required = true, num_args = 1..)]
    pub contents: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RefContents {
    /// `#<id>` or name.
    pub reference: String,
    /// Contents, one or more words.
    #[arg(required = true, num_args = 1..)]
    pub contents: Vec<String>,
}

#[derive(Debug, Args)]
pub struct Target {
    /// `#<id>` or name.
    pub reference: String,
}

#[derive(Debug, Args)]
pub struct Words {
    /// Words to look for.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,
}

impl Words {
    pub fn joined(&self) -> String {
        join_words(&self.words)
    }
}

impl NamedContents {
    pub fn joined(&self) -> String {
        join_words(&self.contents)
    }
}

impl RefContents {
    pub fn joined(&self) -> String {
        join_words(&self.contents)
    }
}

fn join_words(words: &[String]) -> String {
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, NoteCommand, TaskCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_and_word_joining() {
        let cli = Cli::try_parse_from(["clerk", "t", "a", "buy milk", "2%", "whole"]).unwrap();
        match cli.command {
            Command::Task(TaskCommand::Add(args)) => {
                assert_eq!(args.name, "buy milk");
                assert_eq!(args.joined(), "2% whole");
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["clerk", "n", "app", "#3", "more", "words"]).unwrap();
        match cli.command {
            Command::Note(NoteCommand::Append(args)) => {
                assert_eq!(args.reference, "#3");
                assert_eq!(args.joined(), "more words");
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["clerk", "s", "two", "words"]).unwrap();
        match cli.command {
            Command::Search(words) => assert_eq!(words.joined(), "two words"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn add_requires_contents() {
        assert!(Cli::try_parse_from(["clerk", "task", "add", "lonely"]).is_err());
        assert!(Cli::try_parse_from(["clerk", "search"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "clerk",
            "note",
            "ls",
            "--db",
            "/tmp/x.db",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Note(NoteCommand::List)));
    }
}
