//! Command execution against an open store.
//!
//! # Responsibility
//! - Translate parsed commands into repository and search calls.
//! - Write human-readable output; errors are returned to `main`.

use crate::cli::{Command, NoteCommand, TaskCommand};
use crate::palette::Palette;
use anyhow::Result;
use clerk_core::model::timestamp;
use clerk_core::{
    highlight, resolve, search_all, NoteRepository, Render, SqliteNoteRepository,
    SqliteTaskRepository, Store, TaskRepository,
};
use std::io::Write;

pub fn run(command: &Command, store: &Store, out: &mut impl Write, palette: &Palette) -> Result<()> {
    match command {
        Command::Task(task) => run_task(task, store, out, palette),
        Command::Note(note) => run_note(note, store, out, palette),
        Command::Search(words) => run_search(&words.joined(), store, out, palette),
    }
}

/// Short stable name used in log lines.
pub fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Task(TaskCommand::List) => "task_list",
        Command::Task(TaskCommand::Add(_)) => "task_add",
        Command::Task(TaskCommand::Edit(_)) => "task_edit",
        Command::Task(TaskCommand::Del(_)) => "task_delete",
        Command::Task(TaskCommand::Done(_)) => "task_complete",
        Command::Note(NoteCommand::List) => "note_list",
        Command::Note(NoteCommand::Add(_)) => "note_add",
        Command::Note(NoteCommand::Append(_)) => "note_append",
        Command::Note(NoteCommand::Show(_)) => "note_show",
        Command::Note(NoteCommand::Del(_)) => "note_delete",
        Command::Search(_) => "search",
    }
}

fn run_task(
    command: &TaskCommand,
    store: &Store,
    out: &mut impl Write,
    palette: &Palette,
) -> Result<()> {
    let conn = store.connection()?;
    let repo = SqliteTaskRepository::try_new(&conn)?;

    match command {
        TaskCommand::List => {
            for task in repo.list_tasks()? {
                writeln!(out, "{}", palette.item(&task.render()))?;
            }
        }
        TaskCommand::Add(args) => {
            let id = repo.add_task(&args.name, &args.joined(), timestamp::now())?;
            writeln!(out, "Added task #{id}")?;
        }
        TaskCommand::Edit(args) => {
            let id = repo.edit_task(&resolve(&args.reference), &args.joined())?;
            writeln!(out, "Updated task #{id}")?;
        }
        TaskCommand::Del(target) => {
            let id = repo.delete_task(&resolve(&target.reference))?;
            writeln!(out, "Deleted task #{id}")?;
        }
        TaskCommand::Done(target) => {
            let id = repo.complete_task(&resolve(&target.reference), timestamp::now())?;
            writeln!(out, "Completed task #{id}")?;
        }
    }
    Ok(())
}

fn run_note(
    command: &NoteCommand,
    store: &Store,
    out: &mut impl Write,
    palette: &Palette,
) -> Result<()> {
    let mut conn = store.connection()?;
    let mut repo = SqliteNoteRepository::try_new(&mut conn)?;

    match command {
        NoteCommand::List => {
            for header in repo.list_notes()? {
                writeln!(out, "{}", palette.item(&header.render()))?;
            }
        }
        NoteCommand::Add(args) => {
            let id = repo.add_note(&args.name, &args.joined(), timestamp::now())?;
            writeln!(out, "Added note #{id}")?;
        }
        NoteCommand::Append(args) => {
            let id = repo.append_note(&resolve(&args.reference), &args.joined())?;
            writeln!(out, "Appended to note #{id}")?;
        }
        NoteCommand::Show(target) => {
            let note = repo.get_note(&resolve(&target.reference))?;
            writeln!(out, "{}", palette.item(&note.render()))?;
        }
        NoteCommand::Del(target) => {
            let id = repo.delete_note(&resolve(&target.reference))?;
            writeln!(out, "Deleted note #{id}")?;
        }
    }
    Ok(())
}

fn run_search(query: &str, store: &Store, out: &mut impl Write, palette: &Palette) -> Result<()> {
    let conn = store.connection()?;
    for hit in search_all(&conn, query)? {
        writeln!(out, "{}", palette.kind(hit.kind().as_str()))?;
        writeln!(out, "{}", highlight(&hit.render(), query, &palette.marker))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::cli::Cli;
    use crate::palette::Palette;
    use clap::Parser;
    use clerk_core::Store;

    fn exec(store: &Store, args: &[&str], palette: &Palette) -> anyhow::Result<String> {
        let mut argv = vec!["clerk"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&cli.command, store, &mut out, palette)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn plain(store: &Store, args: &[&str]) -> String {
        exec(store, args, &Palette::PLAIN).unwrap()
    }

    #[test]
    fn task_lifecycle_prints_confirmations() {
        let store = Store::open_in_memory().unwrap();

        assert_eq!(plain(&store, &["task", "add", "buy milk", "2%"]), "Added task #1\n");
        assert_eq!(plain(&store, &["t", "e", "buy milk", "whole"]), "Updated task #1\n");
        assert_eq!(plain(&store, &["t", "done", "#1"]), "Completed task #1\n");

        let listing = plain(&store, &["t", "ls"]);
        assert!(listing.starts_with("- id: 1 | name: buy milk | created_at: "));
        assert!(listing.contains("| completed_at: "));
        assert!(listing.contains("\n  Contents: whole\n"));

        assert_eq!(plain(&store, &["t", "d", "#1"]), "Deleted task #1\n");
        assert_eq!(plain(&store, &["t", "ls"]), "");
    }

    #[test]
    fn note_show_joins_appended_fragments() {
        let store = Store::open_in_memory().unwrap();

        assert_eq!(plain(&store, &["note", "add", "ideas", "one"]), "Added note #1\n");
        assert_eq!(
            plain(&store, &["n", "app", "ideas", "two", "words"]),
            "Appended to note #1\n"
        );

        let shown = plain(&store, &["n", "sh", "#1"]);
        assert!(shown.ends_with("\n  Contents: one; two words\n"));

        let listing = plain(&store, &["n", "ls"]);
        assert_eq!(listing.lines().count(), 1);
        assert!(!listing.contains("Contents"));
    }

    #[test]
    fn search_prints_kind_then_highlighted_hit() {
        let store = Store::open_in_memory().unwrap();
        plain(&store, &["t", "a", "write test", "soon"]);
        plain(&store, &["n", "a", "journal", "a", "test", "entry"]);

        let output = exec(&store, &["s", "test"], &Palette::ANSI).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "\x1b[36mtask\x1b[0m");
        assert!(lines[1].contains("write \x1b[31mtest\x1b[0m"));
        assert_eq!(lines[3], "\x1b[36mnote\x1b[0m");
        assert!(lines[5].contains("a \x1b[31mtest\x1b[0m entry"));
    }

    #[test]
    fn missing_reference_is_an_error() {
        let store = Store::open_in_memory().unwrap();

        let err = exec(&store, &["t", "done", "#9"], &Palette::PLAIN).unwrap_err();
        assert_eq!(err.to_string(), "no entry matches #9");
    }
}
