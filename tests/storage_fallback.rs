//! Per-key corruption fallback: a bad blob resets that key alone, and
//! startup never aborts on bad data.

mod support;

use support::TestEnv;
use tend::task::TaskFields;

#[test]
fn corrupt_tasks_blob_falls_back_without_losing_stats() {
    let env = TestEnv::new();

    {
        let mut app = env.app();
        let id = app.add("task", TaskFields::default()).unwrap();
        app.toggle(id).unwrap();
    }

    env.write_blob("tasks.json", "{ definitely not json");

    let app = env.app();
    assert!(app.store().is_empty(), "corrupt task list resets to empty");
    assert_eq!(
        app.ledger().today().tasks_completed,
        1,
        "stats blob is unaffected by task corruption"
    );
}

#[test]
fn corrupt_stats_blob_falls_back_without_losing_tasks() {
    let env = TestEnv::new();

    {
        let mut app = env.app();
        app.add("task", TaskFields::default()).unwrap();
    }

    env.write_blob("stats.json", "[1, 2");

    let app = env.app();
    assert_eq!(app.store().len(), 1);
    assert_eq!(app.ledger().today().tasks_completed, 0);
    assert_eq!(app.ledger().window_days(), 84, "fresh window, full length");
}

#[test]
fn corrupt_history_blob_only_clears_undo() {
    let env = TestEnv::new();

    {
        let mut app = env.app();
        app.add("task", TaskFields::default()).unwrap();
    }

    env.write_blob("history.json", "null");

    let mut app = env.app();
    assert_eq!(app.store().len(), 1);
    assert!(matches!(app.undo(), Err(tend::Error::NothingToUndo)));
}

#[test]
fn counters_are_recomputed_from_loaded_tasks() {
    let env = TestEnv::new();

    {
        let mut app = env.app();
        let id = app.add("done", TaskFields::default()).unwrap();
        app.add("open", TaskFields::default()).unwrap();
        app.toggle(id).unwrap();
    }

    let app = env.app();
    assert_eq!(app.store().active_count(), 1);
    assert_eq!(app.store().completed_count(), 1);
}

#[test]
fn window_length_config_renormalizes_persisted_ledger() {
    let env = TestEnv::new();

    {
        let mut app = env.app();
        let id = app.add("task", TaskFields::default()).unwrap();
        app.toggle(id).unwrap();
        assert_eq!(app.ledger().window_days(), 84);
    }

    env.write_config("[stats]\nwindow_days = 28\n");

    let app = env.app();
    assert_eq!(app.ledger().window_days(), 28);
    assert_eq!(app.ledger().today().tasks_completed, 1, "today's entry survives");
}
