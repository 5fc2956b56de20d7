// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListenError {
    #[error("failed to bind {0}: {1}")]
    Bind(std::net::SocketAddr, #[source] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] mr_wire::ProtocolError),
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("dataset graph error: {0}")]
    Graph(#[from] mr_core::GraphError),

    #[error("no worker registered with id {0}")]
    UnknownWorker(u32),

    #[error("outbound RPC to worker {worker} failed: {source}")]
    Dispatch {
        worker: mr_core::WorkerId,
        #[source]
        source: mr_wire::ProtocolError,
    },
}
