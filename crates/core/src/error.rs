// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fatal errors raised by the dataset graph and function registry.
//!
//! These are programmer/driver errors (a malformed stage declaration, an
//! unregistered function name) rather than runtime faults; the scheduler
//! treats them as fatal to the run (see error handling design).

use crate::ids::{DatasetId, TaskRef};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("dataset {dataset} declares ntasks={ntasks} but its external input has {ninputs} files")]
    TaskCountMismatch {
        dataset: DatasetId,
        ntasks: usize,
        ninputs: usize,
    },

    #[error("dataset {0} reads from an upstream dataset that has not been materialized")]
    UpstreamNotReady(DatasetId),

    #[error("dataset index {0} is out of range")]
    NoSuchDataset(DatasetId),

    #[error("function {0:?} is not registered")]
    UnknownFunction(String),

    #[error("{task_ref} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        task_ref: TaskRef,
        from: crate::task::TaskState,
        to: crate::task::TaskState,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
