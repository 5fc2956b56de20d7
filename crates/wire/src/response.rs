// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Master's reply to an [`InboundRequest`](crate::InboundRequest).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InboundResponse {
    /// Signin accepted; `worker_id` is the dense id assigned to this slot.
    SigninOk {
        worker_id: u32,
        options: HashMap<String, String>,
    },

    /// Signin rejected (version or fingerprint mismatch, per the source
    /// protocol's `(-1, {})` sentinel).
    SigninRejected,

    /// Generic accept/reject for `ready`/`done`/`ping`; false means the
    /// cookie didn't match a live worker and no state changed.
    Ack(bool),

    /// Reply to `whoami`.
    Whoami { host: String },
}

/// Worker's reply to an [`OutboundRequest`](crate::OutboundRequest).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum OutboundResponse {
    Ack(bool),
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
