// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests for the universal task-count invariant: at every
//! observable instant, todo + active + done == ntasks.

use proptest::prelude::*;

use crate::dataset::{Dataset, DatasetKind, InputRef};
use crate::ids::WorkerId;

#[derive(Debug, Clone, Copy)]
enum Op {
    Assign(u32),
    Complete(u32),
    Requeue,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..8).prop_map(Op::Assign),
        (0u32..8).prop_map(Op::Complete),
        Just(Op::Requeue),
    ]
}

proptest! {
    #[test]
    fn todo_active_done_always_sums_to_ntasks(ntasks in 1usize..6, ops in prop::collection::vec(op_strategy(), 0..50)) {
        let mut ds = Dataset::new(
            DatasetKind::Map,
            InputRef::Files((0..ntasks).map(|i| format!("file:///{i}")).collect()),
            "m",
            "p",
            ntasks,
            1,
            "outdir",
            "mtxt",
        );
        ds.materialize((0..ntasks).map(|_| vec!["in".to_string()]).collect());
        let mut active_ids = Vec::new();

        for op in ops {
            match op {
                Op::Assign(w) => {
                    if let Some(id) = ds.pop_todo(WorkerId::new(w)) {
                        active_ids.push((id, WorkerId::new(w)));
                    }
                }
                Op::Complete(w) => {
                    if let Some(pos) = active_ids.iter().position(|(_, ww)| *ww == WorkerId::new(w)) {
                        let (id, worker) = active_ids.remove(pos);
                        ds.complete(id, worker, vec!["out".into()]);
                    }
                }
                Op::Requeue => {
                    if let Some((id, _)) = active_ids.pop() {
                        ds.requeue(id);
                    }
                }
            }
            prop_assert_eq!(ds.todo_len() + ds.active_len() + ds.done_len(), ntasks);
        }
    }
}
