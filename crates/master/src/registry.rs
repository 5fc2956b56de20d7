// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async wrapper around [`mr_core::WorkerRecord`]: a locked slot vector,
//! an idle queue backed by a counting semaphore, a completion queue, and
//! the shared "activity" event the scheduler blocks on.
//!
//! Slots are never removed, only marked dead — so a [`WorkerId`] handed
//! out at signin never resolves to a different worker later (the
//! identity-stability invariant the scheduler design relies on). The
//! idle semaphore is not decremented when a worker is removed: a stale
//! permit just means a future pop finds the queue empty and loops (for
//! the blocking variant) or returns `None` (for the non-blocking one).

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Notify, Semaphore};

use mr_core::{Clock, TaskRef, WorkerId, WorkerRecord};

pub struct WorkerRegistry<C: Clock> {
    slots: Mutex<Vec<WorkerRecord>>,
    idle: Mutex<VecDeque<WorkerId>>,
    idle_sem: Semaphore,
    done: Mutex<VecDeque<(WorkerId, Vec<String>)>>,
    activity: Arc<Notify>,
    clock: C,
}

impl<C: Clock> WorkerRegistry<C> {
    pub fn new(clock: C, activity: Arc<Notify>) -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
            idle: Mutex::new(VecDeque::new()),
            idle_sem: Semaphore::new(0),
            done: Mutex::new(VecDeque::new()),
            activity,
            clock,
        }
    }

    /// Register a new worker slot under the cookie the worker itself
    /// presented at signin (the source protocol has the worker mint its
    /// own cookie; the master's only job is to remember and require it
    /// on every subsequent call from that slot).
    pub fn new_worker(&self, host: impl Into<String>, port: u16, cookie: impl Into<String>) -> WorkerId {
        let mut slots = self.slots.lock();
        let id = WorkerId::new(slots.len() as u32);
        slots.push(WorkerRecord::new(id, host, port, cookie, self.clock.epoch_ms()));
        drop(slots);
        self.push_idle(id);
        id
    }

    /// Return a clone of the worker record iff `id` is in range, alive,
    /// and `cookie` matches — rejects forged or stale calls.
    pub fn get(&self, id: WorkerId, cookie: &str) -> Option<WorkerRecord> {
        let slots = self.slots.lock();
        let record = slots.get(id.index())?;
        (record.is_alive() && record.cookie_matches(cookie)).then(|| record.clone())
    }

    /// Update `last_seen` for `id` iff the cookie matches. Returns false
    /// on a bad cookie or dead worker without changing any state.
    pub fn touch(&self, id: WorkerId, cookie: &str) -> bool {
        let mut slots = self.slots.lock();
        match slots.get_mut(id.index()) {
            Some(record) if record.is_alive() && record.cookie_matches(cookie) => {
                record.touch(self.clock.epoch_ms());
                true
            }
            _ => false,
        }
    }

    pub fn assign(&self, id: WorkerId, task_ref: TaskRef) {
        let mut slots = self.slots.lock();
        if let Some(record) = slots.get_mut(id.index()) {
            record.assign(task_ref);
        }
    }

    /// Push a worker back onto the idle queue and wake the scheduler.
    pub fn push_idle(&self, id: WorkerId) {
        {
            let mut slots = self.slots.lock();
            if let Some(record) = slots.get_mut(id.index()) {
                if !record.is_alive() {
                    return;
                }
                record.clear_assignment();
            }
        }
        self.idle.lock().push_back(id);
        self.idle_sem.add_permits(1);
        self.activity.notify_one();
    }

    /// Non-blocking pop for the scheduler's assignment step: returns
    /// `None` immediately if no worker is idle (including the "sad"
    /// case of a stale permit left by a removed worker).
    pub fn try_pop_idle(&self) -> Option<WorkerId> {
        let permit = self.idle_sem.try_acquire().ok()?;
        permit.forget();
        self.idle.lock().pop_front()
    }

    /// Blocking pop: waits for a permit, then loops if the queue turns
    /// out to be empty (a worker was removed between signal and pop).
    pub async fn pop_idle_blocking(&self) -> WorkerId {
        loop {
            let permit = self
                .idle_sem
                .acquire()
                .await
                .expect("idle semaphore is never closed");
            permit.forget();
            if let Some(id) = self.idle.lock().pop_front() {
                return id;
            }
        }
    }

    /// Mark a worker dead: removes it from the idle queue if present and
    /// returns its prior assignment (if any) so the caller can requeue
    /// that task. Does not decrement the idle semaphore.
    pub fn remove(&self, id: WorkerId) -> Option<TaskRef> {
        let prior = {
            let mut slots = self.slots.lock();
            let record = slots.get_mut(id.index())?;
            if !record.is_alive() {
                return None;
            }
            record.mark_dead()
        };
        self.idle.lock().retain(|&w| w != id);
        prior
    }

    /// Enqueue a completion report and wake the scheduler. The scheduler
    /// is responsible for moving the task to DONE and pushing the worker
    /// back onto the idle queue.
    pub fn mark_done(&self, id: WorkerId, outputs: Vec<String>) {
        self.done.lock().push_back((id, outputs));
        self.activity.notify_one();
    }

    pub fn pop_done(&self) -> Option<(WorkerId, Vec<String>)> {
        self.done.lock().pop_front()
    }

    pub fn snapshot(&self, id: WorkerId) -> Option<WorkerRecord> {
        self.slots.lock().get(id.index()).cloned()
    }

    pub fn alive_ids(&self) -> Vec<WorkerId> {
        self.slots
            .lock()
            .iter()
            .filter(|r| r.is_alive())
            .map(|r| r.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
