// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Notify;
use tracing::info;

use mr_core::{job_dir, DatasetGraph, InputRef, Job, JobId, SystemClock};
use mr_master::{Listener, ProgramFingerprint, Scheduler, TcpWorkerClient, WorkerRegistry};

use super::program::Program;

pub async fn run(port: u16, shared: PathBuf, map_tasks: usize, reduce_tasks: usize, inputs: Vec<String>, program: Program) -> Result<()> {
    if inputs.len() != map_tasks {
        anyhow::bail!("{} input files given but -M {} map tasks requested", inputs.len(), map_tasks);
    }

    let spec = program.spec();
    let mut options = HashMap::new();
    options.insert("shared".to_string(), shared.display().to_string());
    let fingerprint = ProgramFingerprint {
        version: env!("CARGO_PKG_VERSION").to_string(),
        source_hash: mr_core::source_fingerprint(spec.source),
        registry_hash: spec.registry.fingerprint(),
        options,
    };

    let job_dir = job_dir(&shared, JobId::new());
    std::fs::create_dir_all(&job_dir).with_context(|| format!("creating job directory {}", job_dir.display()))?;
    let outdir = job_dir.display().to_string();

    let mut graph = DatasetGraph::new();
    let mut job = Job::new(&mut graph);
    let map_id = job.map_data(InputRef::Files(inputs), spec.map_name, spec.partition_name, map_tasks, reduce_tasks, outdir.clone());
    job.reduce_data(map_id, spec.reduce_name, spec.partition_name, reduce_tasks, 1, outdir);

    let activity = Arc::new(Notify::new());
    let worker_registry = Arc::new(WorkerRegistry::new(SystemClock, activity.clone()));
    let client = Arc::new(TcpWorkerClient);
    let scheduler = Arc::new(Scheduler::new(graph, worker_registry, client, activity));
    let listener = Arc::new(Listener::new(scheduler.clone(), fingerprint));

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    tokio::spawn(async move {
        if let Err(err) = listener.run(addr).await {
            tracing::error!(%err, "listener stopped");
        }
    });

    info!(port, shared = %job_dir.display(), "master started");
    tokio::select! {
        result = scheduler.run() => result.context("scheduler run failed"),
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, shutting down");
            scheduler.shutdown().await;
            anyhow::bail!("shut down by ctrl-c");
        }
    }
}
