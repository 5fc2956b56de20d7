// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Worker -> master calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InboundRequest {
    /// A worker process reporting for duty. Rejected (signin returns a
    /// negative worker id) unless `source_hash` and `registry_hash` match
    /// the master's own program fingerprints.
    Signin {
        version: String,
        cookie: String,
        worker_port: u16,
        source_hash: String,
        registry_hash: String,
    },

    /// Worker has no current assignment and wants work.
    Ready { worker_id: u32, cookie: String },

    /// Worker finished its current assignment.
    Done {
        worker_id: u32,
        cookie: String,
        outputs: Vec<String>,
    },

    /// Liveness beacon from the worker's side (in addition to the
    /// master-initiated ping in the other direction).
    Ping { worker_id: u32, cookie: String },

    /// Ask the master what host it sees this connection coming from.
    Whoami,
}

/// Master -> worker calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum OutboundRequest {
    /// Execute one map task.
    StartMap {
        taskid: usize,
        input_urls: Vec<String>,
        map_name: String,
        partition_name: String,
        nparts: usize,
        outdir: String,
        output_extension: String,
        cookie: String,
    },

    /// Execute one reduce task.
    StartReduce {
        taskid: usize,
        input_urls: Vec<String>,
        reduce_name: String,
        partition_name: String,
        nparts: usize,
        outdir: String,
        output_extension: String,
        cookie: String,
    },

    /// Liveness check; the worker should answer promptly regardless of
    /// whether it currently holds an assignment.
    Ping,

    /// Tells the worker to acknowledge and exit.
    Quit { cookie: String },
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
