// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared-storage job directory layout: `mrs.job_<rand>/` at the top,
//! with one `map_<taskid>_<rand>/` or `reduce_<taskid>_<rand>/`
//! subdirectory per task, each holding one file per output partition.
//! Workers write here directly; the master only hands out the `outdir`
//! a stage's tasks should write under and trusts whatever URLs a
//! worker reports back via `done`.

use std::path::{Path, PathBuf};

use crate::dataset::DatasetKind;
use crate::ids::JobId;

pub fn job_dir(shared: &Path, job: JobId) -> PathBuf {
    shared.join(format!("mrs.job_{}", job.suffix()))
}

pub fn stage_dir(job_dir: &Path, kind: DatasetKind, taskid: usize) -> PathBuf {
    let prefix = match kind {
        DatasetKind::Map => "map",
        DatasetKind::Reduce => "reduce",
    };
    job_dir.join(format!("{prefix}_{taskid}_{}", nanoid::nanoid!(8)))
}

pub fn partition_file(stage_dir: &Path, part: usize, extension: &str) -> PathBuf {
    stage_dir.join(format!("part-{part}.{extension}"))
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
