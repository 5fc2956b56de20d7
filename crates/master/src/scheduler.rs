// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler event loop: matches idle workers to ready tasks, drains
//! completions, advances the dataset graph across the map/reduce stage
//! barrier, and terminates once the graph is exhausted.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use mr_core::{Clock, DatasetGraph, DatasetKind, TaskRef, WorkerId};

use crate::client::WorkerClient;
use crate::env;
use crate::error::SchedulerError;
use crate::registry::WorkerRegistry;

pub struct Scheduler<C: Clock, W: WorkerClient> {
    graph: Mutex<DatasetGraph>,
    registry: Arc<WorkerRegistry<C>>,
    client: Arc<W>,
    activity: Arc<Notify>,
}

impl<C: Clock + 'static, W: WorkerClient + 'static> Scheduler<C, W> {
    pub fn new(
        graph: DatasetGraph,
        registry: Arc<WorkerRegistry<C>>,
        client: Arc<W>,
        activity: Arc<Notify>,
    ) -> Self {
        Self {
            graph: Mutex::new(graph),
            registry,
            client,
            activity,
        }
    }

    pub fn registry(&self) -> &WorkerRegistry<C> {
        &self.registry
    }

    /// Drive the pipeline to completion. Returns once every dataset in the
    /// graph has reached DONE.
    pub async fn run(self: &Arc<Self>) -> Result<(), SchedulerError> {
        loop {
            let notified = self.activity.notified();
            if self.tick().await? {
                info!("dataset graph exhausted, scheduler stopping");
                return Ok(());
            }
            notified.await;
        }
    }

    /// One iteration: drain completions, advance the graph, materialize
    /// and hand out tasks for the current stage. Returns `true` once the
    /// whole run is finished.
    async fn tick(self: &Arc<Self>) -> Result<bool, SchedulerError> {
        self.drain_completions()?;

        {
            let mut graph = self.graph.lock();
            graph.advance();
            if graph.is_done() {
                return Ok(true);
            }
        }

        let current = {
            let mut graph = self.graph.lock();
            let current = graph.current().expect("checked not done above");
            graph.ensure_materialized(current)?;
            current
        };

        self.assign_ready_tasks(current);
        Ok(false)
    }

    fn drain_completions(&self) -> Result<(), SchedulerError> {
        while let Some((worker, outputs)) = self.registry.pop_done() {
            let Some(record) = self.registry.snapshot(worker) else {
                continue;
            };
            let Some(task_ref) = record.assignment() else {
                // Late report from a worker with no current assignment
                // (already reassigned elsewhere) — drop it.
                continue;
            };
            let moved = self.graph.lock().complete(task_ref.dataset, task_ref.task, worker, outputs)?;
            if moved {
                debug!(%worker, %task_ref, "task completed");
                self.registry.push_idle(worker);
            } else {
                warn!(%worker, %task_ref, "dropped stale completion report");
            }
        }
        Ok(())
    }

    fn assign_ready_tasks(self: &Arc<Self>, current: mr_core::DatasetId) {
        loop {
            let Some(worker) = self.registry.try_pop_idle() else {
                break;
            };
            let assigned = {
                let mut graph = self.graph.lock();
                graph.pop_todo_from_current(worker)
            };
            let Some((dataset, task)) = assigned else {
                self.registry.push_idle(worker);
                break;
            };
            debug_assert_eq!(dataset, current);
            let task_ref = TaskRef::new(dataset, task);
            self.registry.assign(worker, task_ref);
            self.dispatch(worker, task_ref);
        }
    }

    /// Issue the outbound RPC for a freshly assigned task. Runs on its
    /// own task so a slow or unreachable worker never blocks the
    /// scheduler loop; failure is treated as an immediate worker death.
    fn dispatch(self: &Arc<Self>, worker: WorkerId, task_ref: TaskRef) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let result = this.dispatch_inner(worker, task_ref).await;
            if let Err(err) = result {
                warn!(%worker, %task_ref, %err, "dispatch failed, declaring worker dead");
                this.worker_died(worker);
            }
        });
    }

    async fn dispatch_inner(&self, worker: WorkerId, task_ref: TaskRef) -> Result<(), SchedulerError> {
        let record = self
            .registry
            .snapshot(worker)
            .ok_or(SchedulerError::UnknownWorker(worker.0))?;
        let kind = self.graph.lock().get(task_ref.dataset)?.kind;
        let (function_name, partition_name, nparts, outdir, output_extension, inurls) = {
            let graph = self.graph.lock();
            let dataset = graph.get(task_ref.dataset)?;
            let task = dataset.task(task_ref.task);
            (
                dataset.function_name.clone(),
                dataset.partition_name.clone(),
                dataset.nparts,
                dataset.outdir.clone(),
                dataset.output_extension.clone(),
                task.inurls.clone(),
            )
        };

        let result = match kind {
            DatasetKind::Map => {
                self.client
                    .start_map(
                        &record,
                        task_ref.task.index(),
                        inurls,
                        &function_name,
                        &partition_name,
                        nparts,
                        &outdir,
                        &output_extension,
                    )
                    .await
            }
            DatasetKind::Reduce => {
                self.client
                    .start_reduce(
                        &record,
                        task_ref.task.index(),
                        inurls,
                        &function_name,
                        &partition_name,
                        nparts,
                        &outdir,
                        &output_extension,
                    )
                    .await
            }
        };
        result.map_err(|source| SchedulerError::Dispatch { worker, source })
    }

    /// Declare `worker` dead: remove it from the registry, requeue its
    /// in-flight task (if any), and wake the scheduler so it can
    /// reassign that task to a different worker.
    pub fn worker_died(&self, worker: WorkerId) {
        if let Some(task_ref) = self.registry.remove(worker) {
            if let Err(err) = self.graph.lock().requeue(task_ref.dataset, task_ref.task) {
                warn!(%worker, %task_ref, %err, "failed to requeue task for dead worker");
            }
        }
        self.activity.notify_one();
    }

    /// Start this worker's periodic liveness ping. Runs until the worker
    /// is declared dead (by this loop or by a failed dispatch elsewhere),
    /// at which point it exits quietly.
    pub fn spawn_liveness_task(self: &Arc<Self>, worker: WorkerId) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let retries = env::ping_retries();
            let mut strikes = 0u32;
            loop {
                tokio::time::sleep(env::ping_interval()).await;
                let Some(record) = this.registry.snapshot(worker) else {
                    return;
                };
                if !record.is_alive() {
                    return;
                }
                match this.client.ping(&record).await {
                    Ok(()) => strikes = 0,
                    Err(err) => {
                        strikes += 1;
                        warn!(%worker, %err, strikes, "ping failed");
                        if strikes >= retries.max(1) {
                            this.worker_died(worker);
                            return;
                        }
                    }
                }
            }
        });
    }

    /// Broadcast a graceful `quit` to every alive worker. Called on
    /// Ctrl-C; best-effort, since a worker that's already gone or
    /// unreachable has nothing left to tell.
    pub async fn shutdown(&self) {
        info!("shutting down, broadcasting quit to all alive workers");
        for worker in self.registry.alive_ids() {
            let Some(record) = self.registry.snapshot(worker) else {
                continue;
            };
            if let Err(err) = self.client.quit(&record).await {
                warn!(%worker, %err, "quit broadcast failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
