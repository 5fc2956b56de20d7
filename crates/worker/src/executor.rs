// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executes one map or reduce task against the in-process
//! [`FunctionRegistry`] and the `key\tvalue` record file format, writing
//! one output file per downstream partition under the stage directory
//! the master told this task to use.

use std::fs;
use std::path::Path;

use mr_core::{partition_file, stage_dir, DatasetKind, FunctionRegistry};

use crate::error::WorkerError;
use crate::records::{read_lines_as_records, read_records, write_records};

/// Group `pairs` into `nparts` buckets by `partition_name`, preserving
/// per-bucket insertion order.
fn partition_pairs(
    registry: &FunctionRegistry,
    partition_name: &str,
    nparts: usize,
    pairs: Vec<(String, String)>,
) -> Result<Vec<Vec<(String, String)>>, WorkerError> {
    let partition_fn = registry.partition(partition_name)?;
    let mut buckets = vec![Vec::new(); nparts.max(1)];
    for (key, value) in pairs {
        let part = partition_fn.call(&key, nparts).min(buckets.len() - 1);
        buckets[part].push((key, value));
    }
    Ok(buckets)
}

fn write_buckets(
    outdir: &str,
    kind: DatasetKind,
    taskid: usize,
    output_extension: &str,
    buckets: Vec<Vec<(String, String)>>,
) -> Result<Vec<String>, WorkerError> {
    let stage_dir = stage_dir(Path::new(outdir), kind, taskid);
    fs::create_dir_all(&stage_dir)?;
    let mut outputs = Vec::with_capacity(buckets.len());
    for (part, records) in buckets.into_iter().enumerate() {
        let file = partition_file(&stage_dir, part, output_extension);
        write_records(&file, &records)?;
        outputs.push(file.display().to_string());
    }
    Ok(outputs)
}

/// Run one map task: read every input file as line-indexed `(key,
/// value)` records, apply the named map function, and partition the
/// results into `nparts` output files.
#[allow(clippy::too_many_arguments)]
pub fn run_map(
    registry: &FunctionRegistry,
    taskid: usize,
    input_urls: &[String],
    map_name: &str,
    partition_name: &str,
    nparts: usize,
    outdir: &str,
    output_extension: &str,
) -> Result<Vec<String>, WorkerError> {
    let map_fn = registry.map(map_name)?;
    let mut mapped = Vec::new();
    for path in input_urls {
        for (key, value) in read_lines_as_records(path)? {
            mapped.extend(map_fn.call(&key, &value));
        }
    }
    let buckets = partition_pairs(registry, partition_name, nparts, mapped)?;
    write_buckets(outdir, DatasetKind::Map, taskid, output_extension, buckets)
}

/// Run one reduce task: read every shuffled input partition file, group
/// by key, apply the named reduce function per key, and partition the
/// (usually singly-partitioned) results into output files.
#[allow(clippy::too_many_arguments)]
pub fn run_reduce(
    registry: &FunctionRegistry,
    taskid: usize,
    input_urls: &[String],
    reduce_name: &str,
    partition_name: &str,
    nparts: usize,
    outdir: &str,
    output_extension: &str,
) -> Result<Vec<String>, WorkerError> {
    let reduce_fn = registry.reduce(reduce_name)?;

    let mut by_key: std::collections::BTreeMap<String, Vec<String>> = std::collections::BTreeMap::new();
    for path in input_urls {
        for (key, value) in read_records(Path::new(path))? {
            by_key.entry(key).or_default().push(value);
        }
    }

    let mut reduced = Vec::new();
    for (key, values) in by_key {
        for value in reduce_fn.call(&key, &values) {
            reduced.push((key.clone(), value));
        }
    }

    let buckets = partition_pairs(registry, partition_name, nparts, reduced)?;
    write_buckets(outdir, DatasetKind::Reduce, taskid, output_extension, buckets)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
