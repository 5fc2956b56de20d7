// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S1 (serial-equivalence): one map stage (ntasks=1, nparts=1) with the
//! identity program, one reduce stage (ntasks=1). Feeding in two lines
//! must round-trip them unchanged through the terminal reduce's only
//! output partition.

use crate::support::{read_task_partition, single_job_dir, Workspace};

#[test]
fn serial_run_with_identity_program_round_trips_input_lines() {
    let workspace = Workspace::new();
    let input = workspace.input_file("in.txt", "a\nb\n");

    workspace
        .mr()
        .arg("serial")
        .arg("--shared")
        .arg(workspace.shared_dir())
        .arg("-R")
        .arg("1")
        .arg("--program")
        .arg("identity")
        .arg(&input)
        .assert()
        .success();

    let job_dir = single_job_dir(&workspace.shared_dir());
    let output = read_task_partition(&job_dir, "reduce", 0, 0, "rtxt");

    assert_eq!(output, "0\ta\n1\tb\n");
}

#[test]
fn serial_run_reports_the_job_directory() {
    let workspace = Workspace::new();
    let input = workspace.input_file("in.txt", "only line\n");

    let assert = workspace
        .mr()
        .arg("serial")
        .arg("--shared")
        .arg(workspace.shared_dir())
        .arg("-R")
        .arg("1")
        .arg("--program")
        .arg("identity")
        .arg(&input)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("serial run complete"));
}
