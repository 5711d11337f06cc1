//! Command-line interface for tend
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in their own submodules.

use clap::{Parser, Subcommand};

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::storage::Storage;

mod due;
mod focus;
mod history;
mod stats;
mod task;

/// tend - personal task tracker
///
/// Tasks with due dates and locations, focus sessions, daily activity
/// stats with a streak, and linear undo/redo.
#[derive(Parser, Debug)]
#[command(name = "tend")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TEND_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text
        text: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<String>,

        /// Due time (HH:MM)
        #[arg(long)]
        due_time: Option<String>,

        /// Location
        #[arg(long)]
        location: Option<String>,
    },

    /// List tasks
    List {
        /// View filter: all, active, completed
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Toggle a task's completed state
    Done {
        /// Task id (or unambiguous prefix)
        id: String,
    },

    /// Edit a task (empty text deletes it)
    Edit {
        /// Task id (or unambiguous prefix)
        id: String,

        /// New task text
        text: String,

        /// Due date (YYYY-MM-DD); omit to keep, pass "" to clear
        #[arg(long)]
        due_date: Option<String>,

        /// Due time (HH:MM); omit to keep, pass "" to clear
        #[arg(long)]
        due_time: Option<String>,

        /// Location; omit to keep, pass "" to clear
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a task
    Rm {
        /// Task id (or unambiguous prefix)
        id: String,
    },

    /// Move a task before another
    Move {
        /// Task id to move
        id: String,

        /// Task id to place it before
        #[arg(long)]
        before: String,
    },

    /// Complete all tasks, or uncomplete all if everything is done
    ToggleAll,

    /// Remove all completed tasks
    ClearCompleted,

    /// Undo the last mutation
    Undo,

    /// Redo the last undone mutation
    Redo,

    /// Show activity statistics
    Stats,

    /// Run a focus session in the foreground
    Focus {
        /// Session length in minutes
        #[arg(default_value = "25")]
        minutes: String,

        /// Task to focus on
        #[arg(long)]
        task: Option<String>,

        /// Skip the break after the work session
        #[arg(long)]
        no_break: bool,
    },

    /// Show tasks that are due now
    Due {
        /// Keep polling and report tasks as they fall due
        #[arg(long)]
        watch: bool,
    },

    /// Show recently used locations
    Locations,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let storage = Storage::resolve(self.data_dir.clone())?;
        let config = Config::load_from_dir(storage.data_dir());
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let mut app = App::load(storage, config);
        app.roll_ledger()?;

        match self.command {
            Commands::Add {
                text,
                due_date,
                due_time,
                location,
            } => task::run_add(&mut app, output, &text, due_date, due_time, location),
            Commands::List { filter } => task::run_list(&app, output, &filter),
            Commands::Done { id } => task::run_done(&mut app, output, &id),
            Commands::Edit {
                id,
                text,
                due_date,
                due_time,
                location,
            } => task::run_edit(&mut app, output, &id, &text, due_date, due_time, location),
            Commands::Rm { id } => task::run_rm(&mut app, output, &id),
            Commands::Move { id, before } => task::run_move(&mut app, output, &id, &before),
            Commands::ToggleAll => task::run_toggle_all(&mut app, output),
            Commands::ClearCompleted => task::run_clear_completed(&mut app, output),
            Commands::Undo => history::run_undo(&mut app, output),
            Commands::Redo => history::run_redo(&mut app, output),
            Commands::Stats => stats::run_stats(&app, output),
            Commands::Focus {
                minutes,
                task,
                no_break,
            } => focus::run_focus(&mut app, output, &minutes, task, no_break),
            Commands::Due { watch } => due::run_due(&mut app, output, watch),
            Commands::Locations => task::run_locations(&app, output),
        }
    }
}
