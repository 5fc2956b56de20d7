// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::request::InboundRequest;

#[tokio::test]
async fn round_trips_a_message_through_an_in_memory_pipe() {
    let (mut client, mut server) = tokio::io::duplex(4096);

    let msg = InboundRequest::Ready {
        worker_id: 3,
        cookie: "abc".into(),
    };
    write_message(&mut client, &msg).await.unwrap();
    let decoded: InboundRequest = read_message(&mut server).await.unwrap();
    assert_eq!(decoded, msg);
}

#[tokio::test]
async fn read_on_a_closed_stream_reports_connection_closed() {
    let (client, mut server) = tokio::io::duplex(4096);
    drop(client);
    let err = read_message::<_, InboundRequest>(&mut server).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[tokio::test]
async fn oversized_length_prefix_is_rejected_before_allocating() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    client.write_all(&(MAX_FRAME_LEN + 1).to_be_bytes()).await.unwrap();
    drop(client);
    let err = read_message::<_, InboundRequest>(&mut server).await.unwrap_err();
    assert!(matches!(err, ProtocolError::FrameTooLarge(_)));
}
