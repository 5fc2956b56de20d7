// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn signin_ok_round_trips_through_json() {
    let mut options = HashMap::new();
    options.insert("shared".to_string(), "/mnt/shared".to_string());
    let resp = InboundResponse::SigninOk { worker_id: 4, options };
    let json = serde_json::to_string(&resp).unwrap();
    let decoded: InboundResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, resp);
}

#[test]
fn ack_false_is_distinguishable_from_ack_true() {
    let yes = serde_json::to_string(&InboundResponse::Ack(true)).unwrap();
    let no = serde_json::to_string(&InboundResponse::Ack(false)).unwrap();
    assert_ne!(yes, no);
}
