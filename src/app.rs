//! Application wiring.
//!
//! `App` owns one instance of each core component and routes every user
//! intent through the same pipeline: snapshot the pre-mutation list, apply
//! the mutation, forward completion events to the activity ledger, then
//! persist. Components never reach into each other; the store hands out
//! events and copies, never live references.

use chrono::Local;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{EventKind, TaskEvent};
use crate::history::HistoryLog;
use crate::ledger::ActivityLedger;
use crate::location::RecentLocations;
use crate::storage::Storage;
use crate::task::{EditOutcome, TaskFields, TaskId, TaskStore};

pub struct App {
    config: Config,
    storage: Storage,
    store: TaskStore,
    history: HistoryLog,
    ledger: ActivityLedger,
    locations: RecentLocations,
}

impl App {
    /// Load all state from the data directory. A corrupt or missing blob
    /// falls back to that key's default; startup never fails on bad data.
    pub fn load(storage: Storage, config: Config) -> Self {
        let today = Local::now().date_naive();

        let tasks = storage.read_blob_or(&storage.tasks_file(), Vec::new);
        let store = TaskStore::from_tasks(tasks);

        let locations = storage.read_blob_or(&storage.locations_file(), RecentLocations::default);

        let window = config.stats.window_days;
        let ledger = storage
            .read_blob_or(&storage.stats_file(), || {
                ActivityLedger::new(window, today)
            })
            .restore(window, today);

        let capacity = config.history.capacity;
        let history = storage
            .read_blob_or(&storage.history_file(), || HistoryLog::new(capacity))
            .restore(capacity);

        Self {
            config,
            storage,
            store,
            history,
            ledger,
            locations,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn ledger(&self) -> &ActivityLedger {
        &self.ledger
    }

    pub fn locations(&self) -> &RecentLocations {
        &self.locations
    }

    // =========================================================================
    // Task intents
    // =========================================================================

    pub fn add(&mut self, text: &str, fields: TaskFields) -> Result<TaskId> {
        let location = fields.location.clone();
        self.history.snapshot(self.store.tasks());
        let (id, events) = match self.store.add(text, fields) {
            Ok(added) => added,
            Err(err) => {
                // The mutation aborted; drop the snapshot we just took so
                // a later undo does not replay a no-op.
                let _ = self.history.undo_discard();
                return Err(err);
            }
        };

        if let Some(location) = location {
            self.locations.touch(&location, self.config.locations.capacity);
        }
        self.apply_events(&events);
        self.persist()?;
        Ok(id)
    }

    pub fn delete(&mut self, id: TaskId) -> Result<()> {
        self.mutate(|store| store.delete(id))
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<()> {
        self.mutate(|store| store.toggle(id))
    }

    pub fn edit(&mut self, id: TaskId, text: &str, fields: TaskFields) -> Result<EditOutcome> {
        let location = fields.location.clone();
        self.history.snapshot(self.store.tasks());
        let (outcome, events) = match self.store.edit(id, text, fields) {
            Ok(edited) => edited,
            Err(err) => {
                let _ = self.history.undo_discard();
                return Err(err);
            }
        };

        if let Some(location) = location {
            self.locations.touch(&location, self.config.locations.capacity);
        }
        self.apply_events(&events);
        self.persist()?;
        Ok(outcome)
    }

    /// One snapshot for the whole bulk operation; a single undo restores
    /// every flipped task at once.
    pub fn toggle_all(&mut self) -> Result<()> {
        self.history.snapshot(self.store.tasks());
        let events = self.store.toggle_all();
        self.apply_events(&events);
        self.persist()
    }

    /// One snapshot for the whole bulk deletion. Returns the removed count.
    pub fn clear_completed(&mut self) -> Result<usize> {
        self.history.snapshot(self.store.tasks());
        let (removed, events) = self.store.clear_completed();
        self.apply_events(&events);
        self.persist()?;
        Ok(removed)
    }

    pub fn reorder(&mut self, id: TaskId, before_id: TaskId) -> Result<()> {
        self.mutate(|store| store.reorder(id, before_id))
    }

    // =========================================================================
    // History intents
    // =========================================================================

    /// Restore the state immediately prior to the most recent mutation.
    /// When the cursor sits at the tail the live list is recorded first so
    /// redo can return to it; the history itself only ever holds copies.
    pub fn undo(&mut self) -> Result<()> {
        if self.history.is_empty() {
            return Err(Error::NothingToUndo);
        }

        if self.history.at_tail() && !self.history.current_matches(self.store.tasks()) {
            self.history.snapshot(self.store.tasks());
        }

        let tasks = self.history.undo()?;
        self.store.replace(tasks);
        self.persist()
    }

    pub fn redo(&mut self) -> Result<()> {
        let tasks = self.history.redo()?;
        self.store.replace(tasks);
        self.persist()
    }

    // =========================================================================
    // Activity intents
    // =========================================================================

    /// Record a completed focus work session of the given length.
    pub fn record_focus_session(&mut self, minutes: u64) -> Result<()> {
        self.ledger.roll_to(Local::now().date_naive());
        self.ledger.record_focus_session_completed(minutes);
        self.persist()
    }

    /// Roll the ledger window to today and persist if it moved.
    pub fn roll_ledger(&mut self) -> Result<()> {
        let today = Local::now().date_naive();
        if self.ledger.today().date != today {
            self.ledger.roll_to(today);
            self.persist()?;
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn mutate<F, T>(&mut self, mutation: F) -> Result<T>
    where
        F: FnOnce(&mut TaskStore) -> Result<Vec<TaskEvent>>,
        T: Default,
    {
        self.history.snapshot(self.store.tasks());
        let events = match mutation(&mut self.store) {
            Ok(events) => events,
            Err(err) => {
                let _ = self.history.undo_discard();
                return Err(err);
            }
        };

        self.apply_events(&events);
        self.persist()?;
        Ok(T::default())
    }

    /// Forward completion transitions to the ledger. Only the
    /// false->true and true->false edges count, never edits or deletes.
    fn apply_events(&mut self, events: &[TaskEvent]) {
        if events.is_empty() {
            return;
        }

        self.ledger.roll_to(Local::now().date_naive());
        for event in events {
            match event.event {
                EventKind::TaskCompleted => self.ledger.record_task_completed(),
                EventKind::TaskUncompleted => self.ledger.record_task_uncompleted(),
                _ => {}
            }
        }
    }

    /// Write every blob. A failure leaves in-memory state untouched
    /// and authoritative.
    fn persist(&self) -> Result<()> {
        self.storage
            .write_blob(&self.storage.tasks_file(), &self.store.tasks())?;
        self.storage
            .write_blob(&self.storage.locations_file(), &self.locations)?;
        self.storage
            .write_blob(&self.storage.stats_file(), &self.ledger)?;
        self.storage
            .write_blob(&self.storage.history_file(), &self.history)?;
        Ok(())
    }
}
