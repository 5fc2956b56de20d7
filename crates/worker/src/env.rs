// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the worker crate,
//! mirroring `mr-master`'s `env` module.

use std::time::Duration;

/// How long the worker waits on an idle connection from the master
/// before proactively pinging it — the same idle-timeout-then-ping
/// discipline the source `run_slave` loop uses around its listening
/// socket.
pub fn ping_interval() -> Duration {
    std::env::var("MR_PING_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

/// Timeout for an individual outbound RPC call to the master
/// (signin/ready/done/ping/whoami) before it's treated as a failure.
pub fn rpc_timeout() -> Duration {
    std::env::var("MR_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}
