// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RPC envelope between the master and its workers.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload, read and
//! written over any `AsyncRead`/`AsyncWrite` pair (a TCP stream in
//! practice). [`InboundRequest`]/[`InboundResponse`] are the worker-to-
//! master direction; [`OutboundRequest`]/[`OutboundResponse`] are the
//! master-to-worker direction.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod codec;
mod request;
mod response;


pub use codec::{read_message, write_message, MAX_FRAME_LEN};
pub use request::{InboundRequest, OutboundRequest};
pub use response::{InboundResponse, OutboundResponse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("rpc call timed out")]
    Timeout,

    #[error("frame of {0} bytes exceeds the {MAX_FRAME_LEN} byte limit")]
    FrameTooLarge(u32),

    #[error("malformed JSON payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
