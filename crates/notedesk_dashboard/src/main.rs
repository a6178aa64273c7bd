//! Dashboard entry point: a line-command front-end over the shared service.
//!
//! Commands:
//!   list                      show the filtered table with stats
//!   search [term]             set or clear the search filter
//!   urlonly                   toggle the with-url filter
//!   select <id>               load a record into the form for editing
//!   set <field> [text]        edit a form field (name|description|url|comment)
//!   form                      show the current mode and form buffer
//!   submit                    create or update from the form
//!   delete <id>               two-step delete; repeat to confirm
//!   export <dir>              write the filtered set as CSV
//!   reset                     back to create mode, clear the form
//!   quit

use clap::Parser;
use notedesk_core::db::open_db;
use notedesk_core::{
    default_log_level, init_logging, Note, NoteService, NoteServiceError, SqliteNoteRepository,
};
use notedesk_dashboard::{write_export, DeleteOutcome, ListingStats, Mode, NoteFilter, Session};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "notedesk_dashboard", about = "NoteDesk terminal dashboard")]
struct Args {
    /// SQLite database file.
    #[arg(long, default_value = "notes.db")]
    db: PathBuf,
    /// Absolute log directory. File logging is disabled when unset.
    #[arg(long)]
    log_dir: Option<String>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(io::Error::other)?;
    }

    // Apply migrations up front so every later command sees a ready store.
    open_db(&args.db).map_err(io::Error::other)?;
    log::info!(
        "event=dashboard_start module=dashboard status=ok db={}",
        args.db.display()
    );

    let mut session = Session::new();
    let mut filter = NoteFilter::default();
    let stdin = io::stdin();

    println!("notedesk dashboard — type `help` for commands");
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        if command == "quit" || command == "exit" {
            break;
        }
        // Any action other than a delete request disarms a pending delete.
        if command != "delete" {
            session.disarm_delete();
        }

        if let Err(message) = run_command(&args.db, &mut session, &mut filter, command, rest) {
            println!("error: {message}");
        }
    }

    Ok(())
}

fn run_command(
    db: &Path,
    session: &mut Session,
    filter: &mut NoteFilter,
    command: &str,
    rest: &str,
) -> Result<(), String> {
    match command {
        "help" => print_help(),
        "list" => {
            let notes = load_listing(db, session)?;
            print_listing(&notes, filter);
        }
        "search" => {
            filter.search = (!rest.is_empty()).then(|| rest.to_string());
            println!(
                "search filter {}",
                filter.search.as_deref().unwrap_or("cleared")
            );
        }
        "urlonly" => {
            filter.with_url_only = !filter.with_url_only;
            println!("with-url filter {}", on_off(filter.with_url_only));
        }
        "select" => {
            let id = parse_id(rest)?;
            with_service(db, |service| session.select(service, id))?;
            println!("editing note {id}");
        }
        "set" => {
            let (field, value) = match rest.split_once(' ') {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            let form = session.form_mut();
            match field {
                "name" => form.name = value.to_string(),
                "description" => form.description = value.to_string(),
                "url" => form.url = value.to_string(),
                "comment" => form.comment = value.to_string(),
                other => return Err(format!("unknown field `{other}`")),
            }
        }
        "form" => {
            let mode = match session.mode() {
                Mode::Create => "create".to_string(),
                Mode::Editing(id) => format!("editing note {id}"),
            };
            let form = session.form();
            println!("mode: {mode}");
            println!("  name:        {}", form.name);
            println!("  description: {}", form.description);
            println!("  url:         {}", form.url);
            println!("  comment:     {}", form.comment);
        }
        "submit" => {
            let note = with_service(db, |service| session.submit(service))?;
            println!("saved note {}", note.id);
        }
        "delete" => {
            let id = parse_id(rest)?;
            let outcome = with_service(db, |service| session.request_delete(service, id))?;
            match outcome {
                DeleteOutcome::Armed(id) => println!("delete {id} again to confirm"),
                DeleteOutcome::Deleted(id) => println!("note {id} deleted"),
            }
        }
        "export" => {
            if rest.is_empty() {
                return Err("export needs a target directory".to_string());
            }
            let notes = load_listing(db, session)?;
            let filtered = filter.apply(&notes);
            let path = write_export(Path::new(rest), filtered).map_err(|err| err.to_string())?;
            println!("exported to {}", path.display());
        }
        "reset" => {
            session.reset();
            println!("form reset");
        }
        other => return Err(format!("unknown command `{other}`; try `help`")),
    }

    Ok(())
}

fn with_service<T>(
    db: &Path,
    op: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, NoteServiceError>,
) -> Result<T, String> {
    let conn = open_db(db).map_err(|err| err.to_string())?;
    let repo = SqliteNoteRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = NoteService::new(repo);
    op(&service).map_err(|err| err.to_string())
}

fn load_listing(db: &Path, session: &mut Session) -> Result<Vec<Note>, String> {
    with_service(db, |service| {
        session.notes(service).map(<[Note]>::to_vec)
    })
}

fn print_listing(notes: &[Note], filter: &NoteFilter) {
    let stats = ListingStats::compute(notes);
    println!(
        "{} notes | {} with url | {} with description | last updated {}",
        stats.total,
        stats.with_url,
        stats.with_description,
        stats
            .last_updated
            .map_or_else(|| "n/a".to_string(), |ms| ms.to_string())
    );

    let filtered = filter.apply(notes);
    println!("showing {} of {}", filtered.len(), notes.len());
    for note in filtered {
        println!(
            "#{:<4} {:<24} {:<32} {}",
            note.id,
            truncate(&note.name, 24),
            truncate(&note.description, 32),
            note.url
        );
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn parse_id(value: &str) -> Result<i64, String> {
    value
        .parse()
        .map_err(|_| format!("`{value}` is not a note id"))
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn print_help() {
    println!("commands:");
    println!("  list | search [term] | urlonly");
    println!("  select <id> | set <field> [text] | form | submit | reset");
    println!("  delete <id> (twice to confirm) | export <dir> | quit");
}
