// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ties the worker's pieces together: sign in to the master, then serve
//! its inbound listener until told to quit or until the master stops
//! answering pings.
//!
//! Signin itself already leaves the worker idle (the master's registry
//! pushes a freshly signed-in slot straight onto its idle queue), so
//! there is no separate "announce readiness" step here; the listener's
//! accept loop *is* the worker's run loop.

use std::net::SocketAddr;
use std::sync::Arc;

use mr_core::FunctionRegistry;
use mr_wire::InboundResponse;
use tracing::info;

use crate::client::MasterClient;
use crate::error::WorkerError;
use crate::listener::{Listener, WorkerState};

pub struct WorkerConfig {
    pub listen_addr: SocketAddr,
    pub advertised_port: u16,
    pub version: String,
    pub source_hash: String,
}

/// Mint this process's signin cookie. The master never generates it —
/// it only remembers whatever the worker presents here.
pub fn mint_cookie() -> String {
    nanoid::nanoid!(21)
}

pub async fn run(
    config: WorkerConfig,
    registry: FunctionRegistry,
    master: Arc<dyn MasterClient>,
) -> Result<(), WorkerError> {
    let cookie = mint_cookie();
    let registry_hash = registry.fingerprint();

    let response = master
        .signin(&config.version, &cookie, config.advertised_port, &config.source_hash, &registry_hash)
        .await?;

    let worker_id = match response {
        InboundResponse::SigninOk { worker_id, .. } => worker_id,
        InboundResponse::SigninRejected => return Err(WorkerError::SigninRejected),
        _ => return Err(WorkerError::Protocol(mr_wire::ProtocolError::ConnectionClosed)),
    };

    info!(worker_id, addr = %config.listen_addr, "signed in, listening for work");

    let state = Arc::new(WorkerState {
        worker_id,
        cookie,
        registry: Arc::new(registry),
        master,
    });
    let listener = Listener::new(state);
    listener.run(config.listen_addr).await
}
