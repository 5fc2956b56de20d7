// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The other degenerate case: the real scheduler and dataset graph, but
//! backed by in-process fake workers instead of a real RPC round trip —
//! exercises the scheduling logic end to end without binding a socket.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::warn;

use mr_core::{job_dir, DatasetGraph, FunctionRegistry, InputRef, Job, JobId, SystemClock, WorkerRecord};
use mr_master::{Scheduler, WorkerClient, WorkerRegistry};
use mr_wire::ProtocolError;
use mr_worker::executor::{run_map, run_reduce};

use super::program::Program;

/// Accepts a dispatch instantly (matching the real RPC's quick ack) and
/// runs the task on a spawned task, reporting completion back through
/// the same registry a real `done` call would go through.
struct InProcessWorkerClient {
    registry: Arc<WorkerRegistry<SystemClock>>,
    functions: Arc<FunctionRegistry>,
}

#[async_trait]
impl WorkerClient for InProcessWorkerClient {
    async fn start_map(
        &self,
        worker: &WorkerRecord,
        taskid: usize,
        input_urls: Vec<String>,
        map_name: &str,
        partition_name: &str,
        nparts: usize,
        outdir: &str,
        output_extension: &str,
    ) -> Result<(), ProtocolError> {
        self.spawn(worker.id.0, taskid, input_urls, map_name.to_string(), partition_name.to_string(), nparts, outdir.to_string(), output_extension.to_string(), true);
        Ok(())
    }

    async fn start_reduce(
        &self,
        worker: &WorkerRecord,
        taskid: usize,
        input_urls: Vec<String>,
        reduce_name: &str,
        partition_name: &str,
        nparts: usize,
        outdir: &str,
        output_extension: &str,
    ) -> Result<(), ProtocolError> {
        self.spawn(worker.id.0, taskid, input_urls, reduce_name.to_string(), partition_name.to_string(), nparts, outdir.to_string(), output_extension.to_string(), false);
        Ok(())
    }

    async fn ping(&self, _worker: &WorkerRecord) -> Result<(), ProtocolError> {
        Ok(())
    }

    async fn quit(&self, _worker: &WorkerRecord) -> Result<(), ProtocolError> {
        Ok(())
    }
}

impl InProcessWorkerClient {
    #[allow(clippy::too_many_arguments)]
    fn spawn(
        &self,
        worker_id: u32,
        taskid: usize,
        input_urls: Vec<String>,
        function_name: String,
        partition_name: String,
        nparts: usize,
        outdir: String,
        output_extension: String,
        is_map: bool,
    ) {
        let registry = Arc::clone(&self.registry);
        let functions = Arc::clone(&self.functions);
        tokio::spawn(async move {
            let worker = mr_core::WorkerId::new(worker_id);
            let result = if is_map {
                run_map(&functions, taskid, &input_urls, &function_name, &partition_name, nparts, &outdir, &output_extension)
            } else {
                run_reduce(&functions, taskid, &input_urls, &function_name, &partition_name, nparts, &outdir, &output_extension)
            };
            match result {
                Ok(outputs) => registry.mark_done(worker, outputs),
                Err(err) => warn!(%worker, taskid, %err, "mock worker task execution failed"),
            }
        });
    }
}

pub async fn run(shared: PathBuf, workers: usize, reduce_tasks: usize, inputs: Vec<String>, program: Program) -> Result<()> {
    let spec = program.spec();
    let functions = Arc::new(spec.registry);
    let map_tasks = inputs.len();

    let job_dir = job_dir(&shared, JobId::new());
    std::fs::create_dir_all(&job_dir).with_context(|| format!("creating job directory {}", job_dir.display()))?;
    let outdir = job_dir.display().to_string();

    let mut graph = DatasetGraph::new();
    let mut job = Job::new(&mut graph);
    let map_id = job.map_data(InputRef::Files(inputs), spec.map_name, spec.partition_name, map_tasks, reduce_tasks, outdir.clone());
    job.reduce_data(map_id, spec.reduce_name, spec.partition_name, reduce_tasks, 1, outdir);

    let activity = Arc::new(Notify::new());
    let registry = Arc::new(WorkerRegistry::new(SystemClock, activity.clone()));
    for i in 0..workers {
        registry.new_worker("local", 0, format!("mock-{i}"));
    }

    let client = Arc::new(InProcessWorkerClient { registry: registry.clone(), functions });
    let scheduler = Arc::new(Scheduler::new(graph, registry, client, activity));
    scheduler.run().await.context("scheduler run failed")?;

    println!("mockparallel run complete: {}", job_dir.display());
    Ok(())
}
