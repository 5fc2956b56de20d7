// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared scaffolding for the workspace's black-box specs: a disposable
//! shared-storage directory plus a handle on the built `mr` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp workspace"),
        }
    }

    pub fn shared_dir(&self) -> PathBuf {
        self.dir.path().join("shared")
    }

    /// Write `contents` to `name` inside the workspace and return its path.
    pub fn input_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write input fixture");
        path
    }

    pub fn mr(&self) -> Command {
        Command::cargo_bin("mr").expect("built mr binary")
    }
}

/// The job directory layout names one `{map,reduce}_<taskid>_<rand>/`
/// subdirectory per task with a random suffix, so a test can't predict
/// the path up front — walk `job_dir` looking for the one task
/// directory matching `prefix_<taskid>_`, then read its partition file.
pub fn read_task_partition(job_dir: &Path, prefix: &str, taskid: usize, part: usize, extension: &str) -> String {
    let wanted = format!("{prefix}_{taskid}_");
    let entries = std::fs::read_dir(job_dir).unwrap_or_else(|err| panic!("reading job dir {}: {err}", job_dir.display()));
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&wanted) {
            let file = entry.path().join(format!("part-{part}.{extension}"));
            return std::fs::read_to_string(&file).unwrap_or_else(|err| panic!("reading {}: {err}", file.display()));
        }
    }
    panic!("no task directory matching {wanted}* under {}", job_dir.display());
}

/// The one job directory `mr` created under `shared`.
pub fn single_job_dir(shared: &Path) -> PathBuf {
    let mut jobs: Vec<_> = std::fs::read_dir(shared)
        .unwrap_or_else(|err| panic!("reading shared dir {}: {err}", shared.display()))
        .flatten()
        .map(|entry| entry.path())
        .collect();
    assert_eq!(jobs.len(), 1, "expected exactly one job directory under {}", shared.display());
    jobs.pop().unwrap()
}
