// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A dataset is one stage of the pipeline: a fixed-size bag of tasks
//! derived either from external input files or from an upstream dataset's
//! partitioned outputs.

use std::collections::VecDeque;

use crate::ids::{DatasetId, TaskId, WorkerId};
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DatasetKind {
    Map,
    Reduce,
}

crate::simple_display! {
    DatasetKind {
        Map => "map",
        Reduce => "reduce",
    }
}

/// Where a dataset's tasks read their input from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum InputRef {
    /// External files, one per task (see the `ntasks == len(files)`
    /// precondition discussed in the design notes).
    Files(Vec<String>),
    /// The partitioned outputs of an earlier dataset in the graph.
    Upstream(DatasetId),
}

/// Immutable-after-construction descriptor of one map or reduce stage,
/// plus the mutable task bag the scheduler drains.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub input: InputRef,
    pub function_name: String,
    pub partition_name: String,
    pub ntasks: usize,
    pub nparts: usize,
    pub outdir: String,
    pub output_extension: String,
    tasks: Vec<Task>,
    todo: VecDeque<TaskId>,
    active: usize,
    done: usize,
}

impl Dataset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: DatasetKind,
        input: InputRef,
        function_name: impl Into<String>,
        partition_name: impl Into<String>,
        ntasks: usize,
        nparts: usize,
        outdir: impl Into<String>,
        output_extension: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            input,
            function_name: function_name.into(),
            partition_name: partition_name.into(),
            ntasks,
            nparts,
            outdir: outdir.into(),
            output_extension: output_extension.into(),
            tasks: Vec::new(),
            todo: VecDeque::new(),
            active: 0,
            done: 0,
        }
    }

    pub fn is_materialized(&self) -> bool {
        !self.tasks.is_empty() || self.ntasks == 0
    }

    /// Build the task vector from per-task input URL lists. Called exactly
    /// once per dataset, by the owning graph once it can resolve `input`.
    pub fn materialize(&mut self, inurls_per_task: Vec<Vec<String>>) {
        debug_assert_eq!(inurls_per_task.len(), self.ntasks);
        self.tasks = inurls_per_task.into_iter().map(Task::new).collect();
        self.todo = (0..self.ntasks).map(TaskId::new).collect();
        self.active = 0;
        self.done = 0;
    }

    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.index()]
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn todo_len(&self) -> usize {
        self.todo.len()
    }

    pub fn active_len(&self) -> usize {
        self.active
    }

    pub fn done_len(&self) -> usize {
        self.done
    }

    /// A dataset is ready once every task has reached DONE.
    pub fn is_ready(&self) -> bool {
        self.is_materialized() && self.todo.is_empty() && self.active == 0
    }

    /// Pop a TODO task and move it to ACTIVE under `worker`.
    pub fn pop_todo(&mut self, worker: WorkerId) -> Option<TaskId> {
        let id = self.todo.pop_front()?;
        self.tasks[id.index()].assign(worker);
        self.active += 1;
        Some(id)
    }

    /// ACTIVE -> DONE for `id`, if `worker` is still its assignee. Returns
    /// true iff the transition happened (false on a stale/duplicate report).
    pub fn complete(&mut self, id: TaskId, worker: WorkerId, outputs: Vec<String>) -> bool {
        let task = &mut self.tasks[id.index()];
        if task.complete(worker, outputs) {
            self.active -= 1;
            self.done += 1;
            true
        } else {
            false
        }
    }

    /// ACTIVE -> TODO for `id`. Used when its worker is declared dead.
    pub fn requeue(&mut self, id: TaskId) {
        let task = &mut self.tasks[id.index()];
        if task.is_active() {
            task.requeue();
            self.active -= 1;
            self.todo.push_back(id);
        }
    }

    /// Gathers partition `part` of every task's outputs, in task-id order —
    /// the shuffle read performed by a downstream stage's task `part`.
    pub fn partition_outputs(&self, part: usize) -> Vec<String> {
        self.tasks
            .iter()
            .map(|t| t.outputs[part].clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "dataset_proptest.rs"]
mod proptests;
