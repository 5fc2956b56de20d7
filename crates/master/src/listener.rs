// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound RPC surface: accepts worker connections and dispatches
//! `signin`/`ready`/`done`/`ping`/`whoami` against the scheduler's
//! registry. One request, one response, per connection — workers open a
//! fresh connection per call, mirroring the short-lived calls of the
//! source protocol.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use mr_core::{Clock, WorkerId};
use mr_wire::{read_message, write_message, InboundRequest, InboundResponse};

use crate::client::WorkerClient;
use crate::error::ListenError;
use crate::scheduler::Scheduler;

/// Program fingerprints the master compares against a worker's signin,
/// and the options handed back on acceptance (e.g. the shared directory
/// path the worker should read/write under).
pub struct ProgramFingerprint {
    pub version: String,
    pub source_hash: String,
    pub registry_hash: String,
    pub options: HashMap<String, String>,
}

pub struct Listener<C: Clock, W: WorkerClient> {
    scheduler: Arc<Scheduler<C, W>>,
    fingerprint: ProgramFingerprint,
}

impl<C: Clock + 'static, W: WorkerClient + 'static> Listener<C, W> {
    pub fn new(scheduler: Arc<Scheduler<C, W>>, fingerprint: ProgramFingerprint) -> Self {
        Self { scheduler, fingerprint }
    }

    pub async fn run(self: Arc<Self>, addr: SocketAddr) -> Result<(), ListenError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| ListenError::Bind(addr, e))?;
        info!(%addr, "master listening for worker connections");
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(pair) => pair,
                Err(err) => {
                    warn!(%err, "accept failed");
                    continue;
                }
            };
            let this = Arc::clone(&self);
            tokio::spawn(async move {
                if let Err(err) = this.handle_connection(stream, peer).await {
                    warn!(%peer, %err, "connection ended with an error");
                }
            });
        }
    }

    async fn handle_connection(&self, mut stream: TcpStream, peer: SocketAddr) -> Result<(), ListenError> {
        let request: InboundRequest = read_message(&mut stream).await?;
        let response = self.handle_request(request, peer);
        write_message(&mut stream, &response).await?;
        Ok(())
    }

    fn handle_request(&self, request: InboundRequest, peer: SocketAddr) -> InboundResponse {
        match request {
            InboundRequest::Signin {
                version,
                cookie,
                worker_port,
                source_hash,
                registry_hash,
            } => self.handle_signin(version, cookie, worker_port, source_hash, registry_hash, peer),

            InboundRequest::Ready { worker_id, cookie } => {
                let id = WorkerId::new(worker_id);
                if self.scheduler.registry().get(id, &cookie).is_some() {
                    self.scheduler.registry().push_idle(id);
                    InboundResponse::Ack(true)
                } else {
                    InboundResponse::Ack(false)
                }
            }

            InboundRequest::Done { worker_id, cookie, outputs } => {
                let id = WorkerId::new(worker_id);
                if self.scheduler.registry().get(id, &cookie).is_some() {
                    self.scheduler.registry().mark_done(id, outputs);
                    InboundResponse::Ack(true)
                } else {
                    InboundResponse::Ack(false)
                }
            }

            InboundRequest::Ping { worker_id, cookie } => {
                let id = WorkerId::new(worker_id);
                InboundResponse::Ack(self.scheduler.registry().touch(id, &cookie))
            }

            InboundRequest::Whoami => InboundResponse::Whoami { host: peer.ip().to_string() },
        }
    }

    fn handle_signin(
        &self,
        version: String,
        cookie: String,
        worker_port: u16,
        source_hash: String,
        registry_hash: String,
        peer: SocketAddr,
    ) -> InboundResponse {
        if version != self.fingerprint.version
            || source_hash != self.fingerprint.source_hash
            || registry_hash != self.fingerprint.registry_hash
        {
            warn!(%peer, "signin rejected: version or fingerprint mismatch");
            return InboundResponse::SigninRejected;
        }
        let id = self
            .scheduler
            .registry()
            .new_worker(peer.ip().to_string(), worker_port, cookie);
        self.scheduler.spawn_liveness_task(id);
        info!(%peer, %id, "worker signed in");
        InboundResponse::SigninOk {
            worker_id: id.0,
            options: self.fingerprint.options.clone(),
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
