// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound RPC surface: accepts the master's connections and dispatches
//! `start_map`/`start_reduce`/`ping`/`quit`. One request, one response,
//! per connection, mirroring `mr-master`'s own listener.
//!
//! `accept` is wrapped in a timeout so an idle worker (no inbound call
//! for a full [`env::ping_interval`]) proactively pings the master
//! instead of waiting forever — the same idle-then-ping discipline the
//! source `run_slave` loop built around `select()`.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use mr_core::FunctionRegistry;
use mr_wire::{read_message, write_message, OutboundRequest, OutboundResponse};

use crate::client::MasterClient;
use crate::env;
use crate::error::WorkerError;
use crate::executor;

/// Everything a dispatched task needs: who this worker is (to report
/// `done` under the right id/cookie) and the functions it can run.
pub struct WorkerState {
    pub worker_id: u32,
    pub cookie: String,
    pub registry: Arc<FunctionRegistry>,
    pub master: Arc<dyn MasterClient>,
}

pub struct Listener {
    state: Arc<WorkerState>,
}

impl Listener {
    pub fn new(state: Arc<WorkerState>) -> Self {
        Self { state }
    }

    /// Accept and serve connections until the master sends `quit`.
    pub async fn run(&self, addr: SocketAddr) -> Result<(), WorkerError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| WorkerError::Bind(addr, e))?;
        info!(%addr, "worker listening for master connections");
        loop {
            match tokio::time::timeout(env::ping_interval(), listener.accept()).await {
                Ok(Ok((stream, peer))) => {
                    if self.handle_connection(stream, peer).await? {
                        return Ok(());
                    }
                }
                Ok(Err(err)) => warn!(%err, "accept failed"),
                Err(_elapsed) => {
                    if self
                        .state
                        .master
                        .ping(self.state.worker_id, &self.state.cookie)
                        .await
                        .is_err()
                    {
                        warn!("idle ping to master failed, shutting down");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Returns `Ok(true)` once the master has told this worker to quit.
    async fn handle_connection(&self, mut stream: TcpStream, peer: SocketAddr) -> Result<bool, WorkerError> {
        let request: OutboundRequest = read_message(&mut stream).await?;
        let (response, quit) = self.handle_request(request, peer);
        write_message(&mut stream, &response).await?;
        Ok(quit)
    }

    fn handle_request(&self, request: OutboundRequest, peer: SocketAddr) -> (OutboundResponse, bool) {
        match request {
            OutboundRequest::StartMap {
                taskid,
                input_urls,
                map_name,
                partition_name,
                nparts,
                outdir,
                output_extension,
                cookie,
            } => {
                if cookie != self.state.cookie {
                    return (OutboundResponse::Ack(false), false);
                }
                self.spawn_map(taskid, input_urls, map_name, partition_name, nparts, outdir, output_extension);
                (OutboundResponse::Ack(true), false)
            }

            OutboundRequest::StartReduce {
                taskid,
                input_urls,
                reduce_name,
                partition_name,
                nparts,
                outdir,
                output_extension,
                cookie,
            } => {
                if cookie != self.state.cookie {
                    return (OutboundResponse::Ack(false), false);
                }
                self.spawn_reduce(taskid, input_urls, reduce_name, partition_name, nparts, outdir, output_extension);
                (OutboundResponse::Ack(true), false)
            }

            OutboundRequest::Ping => (OutboundResponse::Ack(true), false),

            OutboundRequest::Quit { cookie } => {
                if cookie != self.state.cookie {
                    return (OutboundResponse::Ack(false), false);
                }
                info!(%peer, "master requested quit");
                (OutboundResponse::Ack(true), true)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_map(
        &self,
        taskid: usize,
        input_urls: Vec<String>,
        map_name: String,
        partition_name: String,
        nparts: usize,
        outdir: String,
        output_extension: String,
    ) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let result = executor::run_map(
                &state.registry,
                taskid,
                &input_urls,
                &map_name,
                &partition_name,
                nparts,
                &outdir,
                &output_extension,
            );
            report(&state, taskid, result).await;
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_reduce(
        &self,
        taskid: usize,
        input_urls: Vec<String>,
        reduce_name: String,
        partition_name: String,
        nparts: usize,
        outdir: String,
        output_extension: String,
    ) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let result = executor::run_reduce(
                &state.registry,
                taskid,
                &input_urls,
                &reduce_name,
                &partition_name,
                nparts,
                &outdir,
                &output_extension,
            );
            report(&state, taskid, result).await;
        });
    }
}

async fn report(state: &WorkerState, taskid: usize, result: Result<Vec<String>, WorkerError>) {
    match result {
        Ok(outputs) => {
            if let Err(err) = state.master.done(state.worker_id, &state.cookie, outputs).await {
                warn!(taskid, %err, "failed to report task completion to master");
            }
        }
        Err(err) => warn!(taskid, %err, "task execution failed"),
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
