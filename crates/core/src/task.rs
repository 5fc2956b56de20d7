// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task state machine: TODO -> ACTIVE -> DONE, or ACTIVE -> TODO on
//! worker death or cancellation. See the task lifecycle design for the
//! full transition table.

use crate::ids::WorkerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TaskState {
    Todo,
    Active,
    Done,
}

crate::simple_display! {
    TaskState {
        Todo => "todo",
        Active => "active",
        Done => "done",
    }
}

/// One unit of work within a dataset: the URLs it reads, the outputs it
/// produces once done, and its current lifecycle state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Task {
    /// Input URLs this task must read; set when the owning dataset
    /// materializes its task vector.
    pub inurls: Vec<String>,
    /// Output URLs, one per downstream partition. Empty until DONE.
    pub outputs: Vec<String>,
    state: TaskState,
    /// Worker currently executing this task, if ACTIVE.
    assignment: Option<WorkerId>,
}

impl Task {
    pub fn new(inurls: Vec<String>) -> Self {
        Self {
            inurls,
            outputs: Vec::new(),
            state: TaskState::Todo,
            assignment: None,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn assignment(&self) -> Option<WorkerId> {
        self.assignment
    }

    pub fn is_todo(&self) -> bool {
        self.state == TaskState::Todo
    }

    pub fn is_active(&self) -> bool {
        self.state == TaskState::Active
    }

    pub fn is_done(&self) -> bool {
        self.state == TaskState::Done
    }

    /// TODO -> ACTIVE, assigning `worker`. Caller (the dataset) is
    /// responsible for moving the task id between its todo/active sets.
    pub fn assign(&mut self, worker: WorkerId) {
        debug_assert!(self.is_todo(), "assign called on a non-todo task");
        self.state = TaskState::Active;
        self.assignment = Some(worker);
    }

    /// ACTIVE -> DONE, recording the worker's reported outputs. No-op
    /// (returns false) if the task is not currently ACTIVE under `worker` —
    /// this makes a late or duplicate `done` report idempotent.
    pub fn complete(&mut self, worker: WorkerId, outputs: Vec<String>) -> bool {
        if self.assignment != Some(worker) {
            return false;
        }
        self.outputs = outputs;
        self.state = TaskState::Done;
        self.assignment = None;
        true
    }

    /// ACTIVE -> TODO, clearing the assignment. Used when a worker is
    /// declared dead or a task is explicitly cancelled.
    pub fn requeue(&mut self) {
        self.state = TaskState::Todo;
        self.assignment = None;
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
