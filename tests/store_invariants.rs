//! Counter-consistency invariants for the task store.
//!
//! After every public operation, `active + completed == len(tasks)` and
//! `completed` equals the true count of completed tasks.

use tend::task::{Filter, TaskFields, TaskStore};

fn assert_counters(store: &TaskStore) {
    let completed = store.tasks().iter().filter(|t| t.completed).count();
    assert_eq!(
        store.completed_count(),
        completed,
        "completed counter drifted from the list"
    );
    assert_eq!(
        store.active_count() + store.completed_count(),
        store.len(),
        "counters do not sum to the list length"
    );
}

#[test]
fn counters_hold_across_a_long_operation_sequence() {
    let mut store = TaskStore::new();
    let mut ids = Vec::new();

    for n in 0..20 {
        let (id, _) = store.add(&format!("task {n}"), TaskFields::default()).unwrap();
        ids.push(id);
        assert_counters(&store);
    }

    for id in ids.iter().step_by(3) {
        store.toggle(*id).unwrap();
        assert_counters(&store);
    }

    for id in ids.iter().step_by(5) {
        let _ = store.delete(*id);
        assert_counters(&store);
    }

    store.toggle_all();
    assert_counters(&store);
    assert_eq!(store.completed_count(), store.len());

    store.toggle_all();
    assert_counters(&store);
    assert_eq!(store.active_count(), store.len());

    for id in store.tasks().iter().take(4).map(|t| t.id).collect::<Vec<_>>() {
        store.toggle(id).unwrap();
    }
    let (removed, _) = store.clear_completed();
    assert_eq!(removed, 4);
    assert_counters(&store);
    assert_eq!(store.completed_count(), 0);
}

#[test]
fn delete_adjusts_the_right_counter() {
    let mut store = TaskStore::new();
    let (active_id, _) = store.add("active", TaskFields::default()).unwrap();
    let (done_id, _) = store.add("done", TaskFields::default()).unwrap();
    store.toggle(done_id).unwrap();

    store.delete(done_id).unwrap();
    assert_eq!(store.completed_count(), 0);
    assert_eq!(store.active_count(), 1);
    assert_counters(&store);

    store.delete(active_id).unwrap();
    assert_eq!(store.active_count(), 0);
    assert_counters(&store);
}

#[test]
fn recalculate_matches_incremental_counters() {
    let mut store = TaskStore::new();
    let mut ids = Vec::new();
    for n in 0..10 {
        let (id, _) = store.add(&format!("t{n}"), TaskFields::default()).unwrap();
        ids.push(id);
    }
    for id in ids.iter().take(4) {
        store.toggle(*id).unwrap();
    }

    let (active, completed) = (store.active_count(), store.completed_count());
    store.recalculate_counters();
    assert_eq!(store.active_count(), active);
    assert_eq!(store.completed_count(), completed);
}

#[test]
fn toggle_all_on_empty_store_is_safe() {
    let mut store = TaskStore::new();
    let events = store.toggle_all();
    assert!(events.is_empty());
    assert_counters(&store);
}

#[test]
fn filters_partition_the_list() {
    let mut store = TaskStore::new();
    let mut ids = Vec::new();
    for n in 0..6 {
        let (id, _) = store.add(&format!("t{n}"), TaskFields::default()).unwrap();
        ids.push(id);
    }
    store.toggle(ids[0]).unwrap();
    store.toggle(ids[2]).unwrap();

    let all = store.filtered(Filter::All).len();
    let active = store.filtered(Filter::Active).len();
    let completed = store.filtered(Filter::Completed).len();

    assert_eq!(all, 6);
    assert_eq!(active, 4);
    assert_eq!(completed, 2);
    assert_eq!(active + completed, all);
}

#[test]
fn edit_does_not_touch_completion_or_counters() {
    let mut store = TaskStore::new();
    let (id, _) = store.add("task", TaskFields::default()).unwrap();
    store.toggle(id).unwrap();

    store.edit(id, "renamed", TaskFields::default()).unwrap();
    let task = store.get(id).unwrap();
    assert!(task.completed);
    assert_eq!(task.text, "renamed");
    assert_eq!(store.completed_count(), 1);
    assert_counters(&store);
}
