// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound RPC: the worker's half of the worker -> master calls. A
//! trait so the run loop can be driven by an in-memory fake in tests
//! instead of opening real sockets.

use async_trait::async_trait;
use tokio::net::TcpStream;

use mr_wire::{read_message, write_message, InboundRequest, InboundResponse, ProtocolError};

use crate::env;

#[async_trait]
pub trait MasterClient: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn signin(
        &self,
        version: &str,
        cookie: &str,
        worker_port: u16,
        source_hash: &str,
        registry_hash: &str,
    ) -> Result<InboundResponse, ProtocolError>;

    async fn ready(&self, worker_id: u32, cookie: &str) -> Result<bool, ProtocolError>;

    async fn done(&self, worker_id: u32, cookie: &str, outputs: Vec<String>) -> Result<bool, ProtocolError>;

    async fn ping(&self, worker_id: u32, cookie: &str) -> Result<bool, ProtocolError>;

    async fn whoami(&self) -> Result<String, ProtocolError>;
}

/// Opens a fresh TCP connection to the master for each call, mirroring
/// the master's own one-connection-per-call client for the opposite
/// direction.
pub struct TcpMasterClient {
    master_addr: String,
}

impl TcpMasterClient {
    pub fn new(master_addr: impl Into<String>) -> Self {
        Self { master_addr: master_addr.into() }
    }

    async fn call(&self, request: InboundRequest) -> Result<InboundResponse, ProtocolError> {
        tokio::time::timeout(env::rpc_timeout(), self.call_inner(request))
            .await
            .map_err(|_| ProtocolError::Timeout)?
    }

    async fn call_inner(&self, request: InboundRequest) -> Result<InboundResponse, ProtocolError> {
        let mut stream = TcpStream::connect(&self.master_addr).await?;
        write_message(&mut stream, &request).await?;
        read_message(&mut stream).await
    }
}

#[async_trait]
impl MasterClient for TcpMasterClient {
    async fn signin(
        &self,
        version: &str,
        cookie: &str,
        worker_port: u16,
        source_hash: &str,
        registry_hash: &str,
    ) -> Result<InboundResponse, ProtocolError> {
        self.call(InboundRequest::Signin {
            version: version.to_string(),
            cookie: cookie.to_string(),
            worker_port,
            source_hash: source_hash.to_string(),
            registry_hash: registry_hash.to_string(),
        })
        .await
    }

    async fn ready(&self, worker_id: u32, cookie: &str) -> Result<bool, ProtocolError> {
        match self.call(InboundRequest::Ready { worker_id, cookie: cookie.to_string() }).await? {
            InboundResponse::Ack(ok) => Ok(ok),
            _ => Err(ProtocolError::ConnectionClosed),
        }
    }

    async fn done(&self, worker_id: u32, cookie: &str, outputs: Vec<String>) -> Result<bool, ProtocolError> {
        match self
            .call(InboundRequest::Done { worker_id, cookie: cookie.to_string(), outputs })
            .await?
        {
            InboundResponse::Ack(ok) => Ok(ok),
            _ => Err(ProtocolError::ConnectionClosed),
        }
    }

    async fn ping(&self, worker_id: u32, cookie: &str) -> Result<bool, ProtocolError> {
        match self.call(InboundRequest::Ping { worker_id, cookie: cookie.to_string() }).await? {
            InboundResponse::Ack(ok) => Ok(ok),
            _ => Err(ProtocolError::ConnectionClosed),
        }
    }

    async fn whoami(&self) -> Result<String, ProtocolError> {
        match self.call(InboundRequest::Whoami).await? {
            InboundResponse::Whoami { host } => Ok(host),
            _ => Err(ProtocolError::ConnectionClosed),
        }
    }
}
