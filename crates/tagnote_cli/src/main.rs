//! Command-line front end for tagnote.
//!
//! # Responsibility
//! - Parse note/tag commands and forward them to `NoteService`.
//! - Resolve configuration from flags and `TAGNOTE_*` environment variables.
//!
//! # Invariants
//! - Unknown ids are reported on stderr but never fail the process.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use tagnote_core::{
    init_logging, CollectionRepository, CoreConfig, DbLocation, MutationOutcome, Note, NoteData,
    NoteFilter, NoteService, SqliteKvStore, StoreCollectionRepository, Tag,
};

#[derive(Parser, Debug)]
#[command(name = "tagnote", version, about = "Tagged markdown notes")]
struct Cli {
    /// SQLite file holding notes and tags (`:memory:` for a throwaway store).
    #[arg(long, global = true)]
    db: Option<String>,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Note operations.
    #[command(subcommand)]
    Note(NoteCommand),
    /// Tag operations.
    #[command(subcommand)]
    Tag(TagCommand),
    /// Print the core version.
    Version,
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    /// List notes, optionally filtered by title text and tags.
    List {
        #[arg(long, default_value = "")]
        title: String,
        /// Tag id the note must carry; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show one note.
    Show { id: String },
    /// Create a note.
    Create(NoteInput),
    /// Replace a note's title, body and tags.
    Update {
        id: String,
        #[command(flatten)]
        input: NoteInput,
    },
    /// Delete a note.
    Delete { id: String },
}

#[derive(Args, Debug)]
struct NoteInput {
    #[arg(long)]
    title: String,
    #[arg(long)]
    markdown: String,
    /// Tag id to attach; repeatable.
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum TagCommand {
    /// List tags.
    List,
    /// Create a tag; the id is generated unless given.
    Create {
        label: String,
        #[arg(long)]
        id: Option<String>,
    },
    /// Rename a tag.
    Update { id: String, label: String },
    /// Delete a tag; notes keep their reference.
    Delete { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CoreConfig::from_env().with_overrides(
        cli.db.as_deref(),
        cli.log_level.as_deref(),
        cli.log_dir.clone(),
    );

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    if let Command::Version = cli.command {
        println!("tagnote_core version={}", tagnote_core::core_version());
        return Ok(());
    }

    if let DbLocation::File(path) = &config.db {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
    }
    let conn = config
        .open_connection()
        .context("failed to open note store")?;
    let store = SqliteKvStore::try_new(&conn).context("note store is not usable")?;
    let mut service = NoteService::open(StoreCollectionRepository::new(store));
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Note(command) => run_note(&mut service, command),
        Command::Tag(command) => run_tag(&mut service, command),
        Command::Version => Ok(()),
    }
}

fn run_note<R: CollectionRepository>(
    service: &mut NoteService<R>,
    command: NoteCommand,
) -> Result<()> {
    match command {
        NoteCommand::List { title, tags } => {
            let filter = NoteFilter {
                title,
                tag_ids: tags,
            };
            for note in service.find_notes(&filter) {
                println!("{}\t{}\t{}", note.id, note.title, tag_labels(&note));
            }
        }
        NoteCommand::Show { id } => match service.note(&id) {
            Some(note) => {
                println!("# {}", note.title);
                println!("tags: {}", tag_labels(&note));
                println!();
                println!("{}", note.markdown);
            }
            None => eprintln!("note not found: {id}"),
        },
        NoteCommand::Create(input) => {
            let data = note_data(service, input);
            let created = service.create_note(&data).context("failed to create note")?;
            println!("{}", created.id);
        }
        NoteCommand::Update { id, input } => {
            let data = note_data(service, input);
            let outcome = service
                .update_note(&id, &data)
                .context("failed to update note")?;
            report(outcome, "note", &id);
        }
        NoteCommand::Delete { id } => {
            let outcome = service.delete_note(&id).context("failed to delete note")?;
            report(outcome, "note", &id);
        }
    }
    Ok(())
}

fn run_tag<R: CollectionRepository>(
    service: &mut NoteService<R>,
    command: TagCommand,
) -> Result<()> {
    match command {
        TagCommand::List => {
            for tag in service.tags() {
                println!("{}\t{}", tag.id, tag.label);
            }
        }
        TagCommand::Create { label, id } => {
            let tag = match id {
                Some(id) => Tag::with_id(id, label),
                None => Tag::new(label),
            };
            let id = tag.id.clone();
            let outcome = service.create_tag(tag).context("failed to create tag")?;
            match outcome {
                MutationOutcome::Applied => println!("{id}"),
                MutationOutcome::Ignored => eprintln!("tag already exists: {id}"),
            }
        }
        TagCommand::Update { id, label } => {
            let outcome = service
                .update_tag(&id, &label)
                .context("failed to update tag")?;
            report(outcome, "tag", &id);
        }
        TagCommand::Delete { id } => {
            let outcome = service.delete_tag(&id).context("failed to delete tag")?;
            report(outcome, "tag", &id);
        }
    }
    Ok(())
}

/// Resolves tag ids given on the command line against known tags.
///
/// Unknown ids are kept as bare references so the join drops them later.
fn note_data<R: CollectionRepository>(service: &NoteService<R>, input: NoteInput) -> NoteData {
    let tags = input
        .tags
        .into_iter()
        .map(|id| {
            service
                .tags()
                .iter()
                .find(|tag| tag.id == id)
                .cloned()
                .unwrap_or_else(|| Tag::with_id(id, String::new()))
        })
        .collect();
    NoteData::new(input.title, input.markdown, tags)
}

fn tag_labels(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| tag.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn report(outcome: MutationOutcome, kind: &str, id: &str) {
    if outcome == MutationOutcome::Ignored {
        eprintln!("{kind} not found: {id}");
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, NoteCommand, TagCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_note_create_with_repeated_tags() {
        let cli = Cli::parse_from([
            "tagnote", "--db", ":memory:", "note", "create", "--title", "A", "--markdown", "x",
            "--tag", "t1", "--tag", "t2",
        ]);
        assert_eq!(cli.db.as_deref(), Some(":memory:"));
        match cli.command {
            Command::Note(NoteCommand::Create(input)) => {
                assert_eq!(input.title, "A");
                assert_eq!(input.tags, vec!["t1".to_string(), "t2".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_tag_update() {
        let cli = Cli::parse_from(["tagnote", "tag", "update", "t1", "office"]);
        match cli.command {
            Command::Tag(TagCommand::Update { id, label }) => {
                assert_eq!(id, "t1");
                assert_eq!(label, "office");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
