// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn worker_id_round_trips_through_display() {
    let id = WorkerId::new(7);
    assert_eq!(id.to_string(), "w7");
    assert_eq!(id.index(), 7);
}

#[test]
fn dataset_and_task_ids_are_ordered() {
    assert!(DatasetId::new(0) < DatasetId::new(1));
    assert!(TaskId::new(2) > TaskId::new(1));
}

#[test]
fn task_ref_displays_as_dataset_slash_task() {
    let r = TaskRef::new(DatasetId::new(3), TaskId::new(9));
    assert_eq!(r.to_string(), "ds3/t9");
}

#[test]
fn job_id_uses_define_id_machinery() {
    let id = JobId::new();
    assert!(id.as_str().starts_with("job_"));
    let reparsed = JobId::from_string(id.to_string());
    assert_eq!(id, reparsed);
}
