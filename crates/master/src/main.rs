// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Standalone master binary: runs the built-in wordcount demo program
//! against a directory of input files, listening for worker signins on
//! `--port` and materializing intermediate/output data under `--shared`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::Notify;
use tracing::info;

use mr_core::{job_dir as job_dir_path, wordcount_registry, DatasetGraph, InputRef, Job, JobId, SystemClock, WORDCOUNT_SOURCE};
use mr_master::{Listener, ProgramFingerprint, Scheduler, TcpWorkerClient, WorkerRegistry};

#[derive(Parser)]
#[command(name = "mr-master", about = "MapReduce coordination master")]
struct Cli {
    /// RPC listen port for incoming worker signins. 0 picks an ephemeral
    /// port (the historical default).
    #[arg(long, default_value_t = 0)]
    port: u16,

    /// Shared-storage directory all dataset outdirs live under.
    #[arg(long)]
    shared: PathBuf,

    /// Number of map tasks. Must equal the number of input files.
    #[arg(short = 'M', long = "map-tasks")]
    map_tasks: usize,

    /// Number of reduce tasks (and output partitions).
    #[arg(short = 'R', long = "reduce-tasks")]
    reduce_tasks: usize,

    /// Input file URLs, one per map task.
    inputs: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if cli.inputs.len() != cli.map_tasks {
        anyhow::bail!("{} input files given but -M {} map tasks requested", cli.inputs.len(), cli.map_tasks);
    }

    let registry = wordcount_registry();
    let mut options = HashMap::new();
    options.insert("shared".to_string(), cli.shared.display().to_string());
    let fingerprint = ProgramFingerprint {
        version: env!("CARGO_PKG_VERSION").to_string(),
        source_hash: mr_core::source_fingerprint(WORDCOUNT_SOURCE),
        registry_hash: registry.fingerprint(),
        options,
    };

    let job_id = JobId::new();
    let job_dir = job_dir_path(&cli.shared, job_id);
    std::fs::create_dir_all(&job_dir).with_context(|| format!("creating job directory {}", job_dir.display()))?;
    let outdir = job_dir.display().to_string();

    let mut graph = DatasetGraph::new();
    let mut job = Job::new(&mut graph);
    let map_id = job.map_data(
        InputRef::Files(cli.inputs.clone()),
        mr_core::WORDCOUNT_MAP,
        mr_core::HASH_PARTITION,
        cli.map_tasks,
        cli.reduce_tasks,
        outdir.clone(),
    );
    job.reduce_data(
        map_id,
        mr_core::WORDCOUNT_REDUCE,
        mr_core::HASH_PARTITION,
        cli.reduce_tasks,
        1,
        outdir,
    );

    let activity = Arc::new(Notify::new());
    let worker_registry = Arc::new(WorkerRegistry::new(SystemClock, activity.clone()));
    let client = Arc::new(TcpWorkerClient);
    let scheduler = Arc::new(Scheduler::new(graph, worker_registry, client, activity));
    let listener = Arc::new(Listener::new(scheduler.clone(), fingerprint));

    let addr: SocketAddr = ([0, 0, 0, 0], cli.port).into();
    let listener_addr = addr;
    tokio::spawn(async move {
        if let Err(err) = listener.run(listener_addr).await {
            tracing::error!(%err, "listener stopped");
        }
    });

    info!(port = cli.port, shared = %cli.shared.display(), "master started");
    tokio::select! {
        result = scheduler.run() => result.context("scheduler run failed"),
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, shutting down");
            scheduler.shutdown().await;
            anyhow::bail!("shut down by ctrl-c");
        }
    }
}
