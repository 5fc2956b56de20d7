// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn map_dataset(ntasks: usize) -> Dataset {
    Dataset::new(
        DatasetKind::Map,
        InputRef::Files((0..ntasks).map(|i| format!("file:///{i}")).collect()),
        "wordcount_map",
        "default_partition",
        ntasks,
        2,
        "outdir",
        "mtxt",
    )
}

#[test]
fn invariant_todo_active_done_sums_to_ntasks() {
    let mut ds = map_dataset(3);
    ds.materialize(vec![vec!["a".into()], vec!["b".into()], vec!["c".into()]]);
    assert_eq!(ds.todo_len() + ds.active_len() + ds.done_len(), 3);

    ds.pop_todo(WorkerId::new(0));
    assert_eq!(ds.todo_len() + ds.active_len() + ds.done_len(), 3);

    ds.complete(TaskId::new(0), WorkerId::new(0), vec!["p0".into(), "p1".into()]);
    assert_eq!(ds.todo_len() + ds.active_len() + ds.done_len(), 3);
}

#[test]
fn not_ready_until_materialized() {
    let ds = map_dataset(2);
    assert!(!ds.is_ready());
}

#[test]
fn ready_once_all_tasks_done() {
    let mut ds = map_dataset(1);
    ds.materialize(vec![vec!["a".into()]]);
    assert!(!ds.is_ready());
    let id = ds.pop_todo(WorkerId::new(0)).unwrap();
    assert!(!ds.is_ready());
    ds.complete(id, WorkerId::new(0), vec!["p0".into(), "p1".into()]);
    assert!(ds.is_ready());
}

#[test]
fn requeue_after_worker_death_returns_task_to_todo() {
    let mut ds = map_dataset(1);
    ds.materialize(vec![vec!["a".into()]]);
    let id = ds.pop_todo(WorkerId::new(0)).unwrap();
    ds.requeue(id);
    assert_eq!(ds.todo_len(), 1);
    assert_eq!(ds.active_len(), 0);
    assert!(ds.task(id).is_todo());
}

#[test]
fn partition_outputs_gathers_same_slot_across_tasks() {
    let mut ds = map_dataset(2);
    ds.materialize(vec![vec!["a".into()], vec!["b".into()]]);
    let t0 = ds.pop_todo(WorkerId::new(0)).unwrap();
    let t1 = ds.pop_todo(WorkerId::new(1)).unwrap();
    ds.complete(t0, WorkerId::new(0), vec!["t0p0".into(), "t0p1".into()]);
    ds.complete(t1, WorkerId::new(1), vec!["t1p0".into(), "t1p1".into()]);

    assert_eq!(ds.partition_outputs(0), vec!["t0p0".to_string(), "t1p0".to_string()]);
    assert_eq!(ds.partition_outputs(1), vec!["t0p1".to_string(), "t1p1".to_string()]);
}

#[test]
fn duplicate_completion_by_stale_worker_is_ignored() {
    let mut ds = map_dataset(1);
    ds.materialize(vec![vec!["a".into()]]);
    let id = ds.pop_todo(WorkerId::new(0)).unwrap();
    ds.requeue(id);
    // Worker 0 was declared dead and the task reassigned to worker 1.
    let id2 = ds.pop_todo(WorkerId::new(1)).unwrap();
    assert_eq!(id, id2);
    let stale = ds.complete(id, WorkerId::new(0), vec!["late".into(), "late".into()]);
    assert!(!stale);
    assert!(ds.task(id).is_active());
}
