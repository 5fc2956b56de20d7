// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the master crate. CLI
//! flags (see `mr-cli`) take precedence; these are the defaults and the
//! knobs that don't have a flag of their own.

use std::time::Duration;

/// How often each worker is pinged to check liveness.
pub fn ping_interval() -> Duration {
    std::env::var("MR_PING_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

/// Consecutive ping failures tolerated before a worker is declared dead.
/// Defaults to 1 (one strike), matching the source implementation;
/// raising it trades failure-detection latency for tolerance of
/// transient network hiccups.
pub fn ping_retries() -> u32 {
    std::env::var("MR_PING_RETRIES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1)
}

/// Timeout for an individual outbound RPC call (signin/ready/done/ping or
/// start_map/start_reduce/quit) before it's treated as a failure.
pub fn rpc_timeout() -> Duration {
    std::env::var("MR_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}
