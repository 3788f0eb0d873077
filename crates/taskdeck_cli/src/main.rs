//! Command-line front end for the task store.
//!
//! # Responsibility
//! - Map subcommands onto store operations against a SQLite file.
//! - Own confirmation of destructive operations (`--yes`).
//! - Print the board after every command, as text or HTML.

mod text;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use taskdeck_core::db::open_db;
use taskdeck_core::{
    default_log_level, init_logging, render_board, render_html, DeadlinePolicy, SaveStatus,
    SqliteKeyValueStore, StoreConfig, TaskId, TaskStore, TaskStoreError,
};

const DEFAULT_DB_FILE_NAME: &str = "taskdeck.sqlite3";

#[derive(Debug, Parser)]
#[command(author, version, about = "Category-aware to-do list", long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    /// SQLite file holding the task collection.
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,
    /// Absolute directory for rotating log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error; defaults to debug in debug builds, info otherwise.
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,
    /// Reject tasks without a deadline.
    #[arg(long, global = true)]
    require_deadline: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Add a task")]
    Add(TaskFields),
    #[command(about = "Replace text, category and deadline of a task")]
    Edit {
        id: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    #[command(about = "Toggle a task between active and completed")]
    Toggle { id: String },
    #[command(about = "Delete a task")]
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Delete every active task")]
    ClearActive {
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Delete every completed task")]
    ClearCompleted {
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Show active and completed tasks")]
    List {
        #[arg(long)]
        html: bool,
    },
}

#[derive(Debug, Args)]
struct TaskFields {
    text: String,
    /// study|assignment|project|exam|lab|reading|other
    #[arg(long, short, default_value = "")]
    category: String,
    /// Local date-time, e.g. 2025-12-30T14:30
    #[arg(long, short, default_value = "")]
    deadline: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli_open module=cli status=error error={err}");
            eprintln!("error: cannot open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };

    let policy = if cli.require_deadline {
        DeadlinePolicy::Required
    } else {
        DeadlinePolicy::Optional
    };
    let config = StoreConfig::default().with_deadline_policy(policy);
    let mut store = TaskStore::open(SqliteKeyValueStore::new(conn), config);

    match run(&mut store, cli.command) {
        Ok(()) => {
            if let SaveStatus::NotSaved(reason) = store.save_status() {
                eprintln!("warning: changes not saved: {reason}");
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("\u{26A0}\u{FE0F} {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(store: &mut TaskStore<SqliteKeyValueStore>, command: Commands) -> Result<(), String> {
    let mut html = false;
    match command {
        Commands::Add(fields) => {
            let task = store
                .add_raw(&fields.text, &fields.category, &fields.deadline)
                .map_err(user_message)?;
            println!("Added task {}", task.id);
        }
        Commands::Edit { id, fields } => {
            let task = store
                .edit_raw(&TaskId::from(id), &fields.text, &fields.category, &fields.deadline)
                .map_err(user_message)?;
            println!("Updated task {}", task.id);
        }
        Commands::Toggle { id } => {
            let task = store
                .toggle_completed(&TaskId::from(id))
                .map_err(user_message)?;
            let state = if task.completed { "completed" } else { "active" };
            println!("Task {} is now {state}", task.id);
        }
        Commands::Delete { id, yes } => {
            confirm(yes, "Are you sure you want to delete this task?")?;
            let task = store.delete(&TaskId::from(id)).map_err(user_message)?;
            println!("Deleted task {}", task.id);
        }
        Commands::ClearActive { yes } => {
            if store.active_count() == 0 {
                return Err("No active tasks to delete!".to_string());
            }
            confirm(yes, "Delete all active tasks?")?;
            println!("Deleted {} active task(s)", store.delete_all_active());
        }
        Commands::ClearCompleted { yes } => {
            if store.completed_count() == 0 {
                return Err("No completed tasks to delete!".to_string());
            }
            confirm(yes, "Delete all completed tasks?")?;
            println!("Deleted {} completed task(s)", store.delete_all_completed());
        }
        Commands::List { html: as_html } => html = as_html,
    }

    let board = render_board(store.tasks(), Local::now().naive_local());
    if html {
        let page = render_html(&board);
        println!("<ul id=\"activeTasksList\">{}</ul>", page.active_list);
        println!("<ul id=\"completedTasksList\">{}</ul>", page.completed_list);
    } else {
        print!("{}", text::render_text(&board));
    }
    Ok(())
}

fn confirm(yes: bool, prompt: &str) -> Result<(), String> {
    if yes {
        Ok(())
    } else {
        Err(format!("{prompt} Re-run with --yes to confirm."))
    }
}

fn user_message(err: TaskStoreError) -> String {
    match err {
        TaskStoreError::Duplicate(_) => {
            "Duplicate task! This task already exists. Please enter a different task.".to_string()
        }
        other => other.to_string(),
    }
}
