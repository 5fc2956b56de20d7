// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound RPC: the master's half of the master -> worker calls. A trait
//! so the scheduler can be driven by an in-memory fake in tests instead
//! of opening real sockets.

use async_trait::async_trait;
use tokio::net::TcpStream;

use mr_core::WorkerRecord;
use mr_wire::{read_message, write_message, OutboundRequest, OutboundResponse, ProtocolError};

use crate::env;

#[async_trait]
pub trait WorkerClient: Send + Sync {
    async fn start_map(
        &self,
        worker: &WorkerRecord,
        taskid: usize,
        input_urls: Vec<String>,
        map_name: &str,
        partition_name: &str,
        nparts: usize,
        outdir: &str,
        output_extension: &str,
    ) -> Result<(), ProtocolError>;

    #[allow(clippy::too_many_arguments)]
    async fn start_reduce(
        &self,
        worker: &WorkerRecord,
        taskid: usize,
        input_urls: Vec<String>,
        reduce_name: &str,
        partition_name: &str,
        nparts: usize,
        outdir: &str,
        output_extension: &str,
    ) -> Result<(), ProtocolError>;

    async fn ping(&self, worker: &WorkerRecord) -> Result<(), ProtocolError>;

    async fn quit(&self, worker: &WorkerRecord) -> Result<(), ProtocolError>;
}

/// Opens a fresh TCP connection to the worker for each call. Workers are
/// few and calls are infrequent relative to task execution time, so
/// connection reuse isn't worth the complexity.
#[derive(Default)]
pub struct TcpWorkerClient;

impl TcpWorkerClient {
    async fn call(&self, worker: &WorkerRecord, request: OutboundRequest) -> Result<(), ProtocolError> {
        tokio::time::timeout(env::rpc_timeout(), self.call_inner(worker, request))
            .await
            .map_err(|_| ProtocolError::Timeout)?
    }

    async fn call_inner(&self, worker: &WorkerRecord, request: OutboundRequest) -> Result<(), ProtocolError> {
        let mut stream = TcpStream::connect((worker.host.as_str(), worker.port)).await?;
        write_message(&mut stream, &request).await?;
        let response: OutboundResponse = read_message(&mut stream).await?;
        match response {
            OutboundResponse::Ack(true) => Ok(()),
            OutboundResponse::Ack(false) => Err(ProtocolError::ConnectionClosed),
        }
    }
}

#[async_trait]
impl WorkerClient for TcpWorkerClient {
    async fn start_map(
        &self,
        worker: &WorkerRecord,
        taskid: usize,
        input_urls: Vec<String>,
        map_name: &str,
        partition_name: &str,
        nparts: usize,
        outdir: &str,
        output_extension: &str,
    ) -> Result<(), ProtocolError> {
        self.call(
            worker,
            OutboundRequest::StartMap {
                taskid,
                input_urls,
                map_name: map_name.to_string(),
                partition_name: partition_name.to_string(),
                nparts,
                outdir: outdir.to_string(),
                output_extension: output_extension.to_string(),
                cookie: worker.cookie.clone(),
            },
        )
        .await
    }

    async fn start_reduce(
        &self,
        worker: &WorkerRecord,
        taskid: usize,
        input_urls: Vec<String>,
        reduce_name: &str,
        partition_name: &str,
        nparts: usize,
        outdir: &str,
        output_extension: &str,
    ) -> Result<(), ProtocolError> {
        self.call(
            worker,
            OutboundRequest::StartReduce {
                taskid,
                input_urls,
                reduce_name: reduce_name.to_string(),
                partition_name: partition_name.to_string(),
                nparts,
                outdir: outdir.to_string(),
                output_extension: output_extension.to_string(),
                cookie: worker.cookie.clone(),
            },
        )
        .await
    }

    async fn ping(&self, worker: &WorkerRecord) -> Result<(), ProtocolError> {
        self.call(worker, OutboundRequest::Ping).await
    }

    async fn quit(&self, worker: &WorkerRecord) -> Result<(), ProtocolError> {
        self.call(worker, OutboundRequest::Quit { cookie: worker.cookie.clone() }).await
    }
}
