// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::ids::JobId;

use super::*;

#[test]
fn job_dir_uses_the_mrs_job_prefix() {
    let job = JobId::new();
    let dir = job_dir(Path::new("/shared"), job);
    assert_eq!(dir, Path::new("/shared").join(format!("mrs.job_{}", job.suffix())));
}

#[test]
fn stage_dir_encodes_kind_and_taskid() {
    let job = Path::new("/shared/mrs.job_x");
    let dir = stage_dir(job, DatasetKind::Map, 3);
    let name = dir.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("map_3_"));
}

#[test]
fn partition_file_is_named_by_index_and_extension() {
    let stage = Path::new("/shared/mrs.job_x/map_0_abc");
    let file = partition_file(stage, 2, "mtxt");
    assert_eq!(file, stage.join("part-2.mtxt"));
}
