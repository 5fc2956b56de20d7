// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use mr_worker::{run as run_worker, TcpMasterClient, WorkerConfig};

use super::program::Program;

pub async fn run(server_uri: String, port: u16, program: Program) -> Result<()> {
    let spec = program.spec();
    let listen_addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let bound = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding worker listen address {listen_addr}"))?;
    let advertised_port = bound.local_addr()?.port();
    drop(bound);

    let config = WorkerConfig {
        listen_addr: ([0, 0, 0, 0], advertised_port).into(),
        advertised_port,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source_hash: mr_core::source_fingerprint(spec.source),
    };

    let master = Arc::new(TcpMasterClient::new(server_uri.clone()));
    run_worker(config, spec.registry, master)
        .await
        .with_context(|| format!("worker run against {server_uri}"))
}
