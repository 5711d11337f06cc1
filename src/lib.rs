//! tend - Personal Task Tracker Library
//!
//! This library provides the core functionality for the tend CLI: a
//! single-user task list with focus sessions, daily activity statistics,
//! and linear undo/redo.
//!
//! # Core Concepts
//!
//! - **TaskStore**: the ordered task list with always-consistent cached
//!   active/completed counters
//! - **HistoryLog**: bounded snapshot history for undo/redo
//! - **ActivityLedger**: a fixed trailing window of per-day activity,
//!   backing the streak and heatmap
//! - **FocusTimer**: the work/break countdown state machine
//! - **Storage**: JSON blobs in the data directory with per-key
//!   corruption fallback
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `app`: Component wiring and the snapshot-before-mutate pipeline
//! - `config`: Configuration loading from `.tend.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task records and the task store
//! - `events`: Lifecycle events emitted by task mutations
//! - `history`: Undo/redo snapshot log
//! - `ledger`: Daily activity window, streak, heatmap
//! - `focus`: Focus session state machine
//! - `due`: Due-task scanning
//! - `location`: Recent-location suggestions
//! - `storage`: Blob storage and data-directory management
//! - `lock`: File locking and atomic writes

pub mod app;
pub mod cli;
pub mod config;
pub mod due;
pub mod error;
pub mod events;
pub mod focus;
pub mod history;
pub mod ledger;
pub mod location;
pub mod lock;
pub mod output;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
