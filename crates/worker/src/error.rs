// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("master rejected signin (version or fingerprint mismatch)")]
    SigninRejected,

    #[error("master rejected call: cookie or worker id not recognized")]
    Unauthenticated,

    #[error("failed to bind {0}: {1}")]
    Bind(std::net::SocketAddr, #[source] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] mr_wire::ProtocolError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry error: {0}")]
    Registry(#[from] mr_core::RegistryError),
}
