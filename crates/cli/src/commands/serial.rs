// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single-process degenerate case: drive the same [`DatasetGraph`]
//! the master would, but execute every task inline instead of handing
//! it to a worker over RPC. No sockets, no scheduler, no concurrency —
//! this is what scenario S1 (serial-equivalence) checks against.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mr_core::{job_dir, DatasetGraph, DatasetKind, InputRef, Job, JobId, TaskId, WorkerId};
use mr_worker::executor::{run_map, run_reduce};

use super::program::Program;

pub fn run(shared: PathBuf, reduce_tasks: usize, inputs: Vec<String>, program: Program) -> Result<()> {
    let spec = program.spec();
    let map_tasks = inputs.len();

    let job_dir = job_dir(&shared, JobId::new());
    std::fs::create_dir_all(&job_dir).with_context(|| format!("creating job directory {}", job_dir.display()))?;
    let outdir = job_dir.display().to_string();

    let mut graph = DatasetGraph::new();
    let mut job = Job::new(&mut graph);
    let map_id = job.map_data(InputRef::Files(inputs), spec.map_name, spec.partition_name, map_tasks, reduce_tasks, outdir.clone());
    job.reduce_data(map_id, spec.reduce_name, spec.partition_name, reduce_tasks, 1, outdir);

    let worker = WorkerId::new(0);
    loop {
        graph.advance();
        let Some(current) = graph.current() else {
            break;
        };
        graph.ensure_materialized(current)?;

        let ntasks = graph.get(current)?.tasks().len();
        for index in 0..ntasks {
            let task_id = TaskId::new(index);
            let dataset = graph.get(current)?;
            let inurls = dataset.task(task_id).inurls.clone();
            let outputs = match dataset.kind {
                DatasetKind::Map => run_map(
                    &spec.registry,
                    index,
                    &inurls,
                    &dataset.function_name,
                    &dataset.partition_name,
                    dataset.nparts,
                    &dataset.outdir,
                    &dataset.output_extension,
                )?,
                DatasetKind::Reduce => run_reduce(
                    &spec.registry,
                    index,
                    &inurls,
                    &dataset.function_name,
                    &dataset.partition_name,
                    dataset.nparts,
                    &dataset.outdir,
                    &dataset.output_extension,
                )?,
            };
            graph.get_mut(current)?.pop_todo(worker);
            graph.complete(current, task_id, worker, outputs)?;
        }
    }

    println!("serial run complete: {}", job_dir.display());
    Ok(())
}
