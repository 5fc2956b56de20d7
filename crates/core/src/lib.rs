// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure data model for the MapReduce coordination core: the dataset
//! graph, per-task lifecycle, function registry, and worker record shape.
//!
//! This crate has no I/O and no async runtime — it is the part of the
//! system that is exhaustively unit- and property-testable without
//! spinning up a network. [`mr-master`](../mr_master/index.html) wraps
//! these types with locks, a semaphore, and an RPC listener; [`mr-wire`]
//! defines the request/response envelope sent over the network.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod builtin;
pub mod clock;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod id;
pub mod ids;
pub mod macros;
pub mod registry;
pub mod storage;
pub mod task;
pub mod worker;

pub use builtin::{
    identity_registry, wordcount_registry, HASH_PARTITION, IDENTITY_MAP, IDENTITY_PARTITION, IDENTITY_REDUCE,
    IDENTITY_SOURCE, WORDCOUNT_MAP, WORDCOUNT_REDUCE, WORDCOUNT_SOURCE,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use dataset::{Dataset, DatasetKind, InputRef};
pub use error::{GraphError, GraphResult};
pub use graph::{DatasetGraph, Job};
pub use id::IdBuf;
pub use ids::{DatasetId, JobId, TaskId, TaskRef, WorkerId};
pub use registry::{source_fingerprint, FunctionRegistry, MapFn, PartitionFn, ReduceFn, RegistryError};
pub use storage::{job_dir, partition_file, stage_dir};
pub use task::{Task, TaskState};
pub use worker::{WorkerRecord, WorkerStatus};
