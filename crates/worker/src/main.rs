// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Standalone worker binary: signs in to a master and executes whatever
//! map/reduce tasks it's dispatched, running the same built-in wordcount
//! demo program the `mr-master` binary registers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use mr_core::{wordcount_registry, WORDCOUNT_SOURCE};
use mr_worker::{run, TcpMasterClient, WorkerConfig};

#[derive(Parser)]
#[command(name = "mr-worker", about = "MapReduce worker")]
struct Cli {
    /// Master's RPC endpoint, e.g. `127.0.0.1:9000`.
    server_uri: String,

    /// Port this worker listens on for the master's dispatch calls. 0
    /// picks an ephemeral port.
    #[arg(long, default_value_t = 0)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let listen_addr: SocketAddr = ([0, 0, 0, 0], cli.port).into();
    let bound = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding worker listen address {listen_addr}"))?;
    let advertised_port = bound.local_addr()?.port();
    drop(bound);

    let config = WorkerConfig {
        listen_addr: ([0, 0, 0, 0], advertised_port).into(),
        advertised_port,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source_hash: mr_core::source_fingerprint(WORDCOUNT_SOURCE),
    };

    let master = Arc::new(TcpMasterClient::new(cli.server_uri.clone()));
    run(config, wordcount_registry(), master).await.with_context(|| format!("worker run against {}", cli.server_uri))?;
    Ok(())
}
