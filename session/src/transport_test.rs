use super::*;
use board::{Color, MoveRequest};
use serde_json::json;
use tokio::net::TcpListener;
use wire::{GameOverMessage, GameStatus, JoinMessage};

fn join() -> Outbound {
    Outbound::JoinRoom(JoinMessage { room_id: "r1".into(), player_id: "p1".into(), player_color: Color::White })
}

fn move_made() -> Inbound {
    Inbound::MoveMade {
        mv: MoveRequest::new("e7".parse().unwrap(), "e5".parse().unwrap()),
        color: Color::Black,
    }
}

// =============================================================================
// MEMORY
// =============================================================================

#[tokio::test]
async fn memory_pair_carries_typed_messages_both_ways() {
    let (mut client, mut relay) = MemoryTransport::pair();

    client.send(&join()).await.unwrap();
    assert_eq!(relay.recv().await, Some(join()));

    relay.send(&move_made()).await.unwrap();
    assert_eq!(client.recv().await, Some(move_made()));
}

#[tokio::test]
async fn memory_transport_drops_invalid_messages_in_order() {
    let (mut client, relay) = MemoryTransport::pair();

    relay.send_envelope(Envelope::bare("chat")).await.unwrap();
    relay
        .send_envelope(Envelope::new("moveMade", vec![json!({"from": "z9", "to": "e5"}), json!("b")]))
        .await
        .unwrap();
    relay.send(&Inbound::BothPlayersReady).await.unwrap();
    relay.send(&move_made()).await.unwrap();

    assert_eq!(client.recv().await, Some(Inbound::BothPlayersReady));
    assert_eq!(client.recv().await, Some(move_made()));
}

#[tokio::test]
async fn relay_disconnect_ends_client_stream() {
    let (mut client, mut relay) = MemoryTransport::pair();
    relay.send(&Inbound::BothPlayersReady).await.unwrap();
    relay.disconnect();

    assert_eq!(client.recv().await, Some(Inbound::BothPlayersReady));
    assert_eq!(client.recv().await, None);
}

#[tokio::test]
async fn client_close_is_seen_by_relay_and_blocks_sends() {
    let (mut client, mut relay) = MemoryTransport::pair();
    client.close().await.unwrap();
    client.close().await.unwrap();

    assert_eq!(relay.recv().await, None);
    assert!(matches!(client.send(&join()).await, Err(SessionError::ChannelClosed)));
    assert!(matches!(relay.send(&Inbound::BothPlayersReady).await, Err(SessionError::ChannelClosed)));
}

// =============================================================================
// WEBSOCKET
// =============================================================================

#[tokio::test]
async fn ws_transport_speaks_binary_and_accepts_text() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();

        let Some(Ok(Message::Binary(bytes))) = ws.next().await else {
            panic!("expected binary join frame");
        };
        let received = Outbound::from_envelope(&wire::decode_binary(&bytes).unwrap()).unwrap();

        ws.send(Message::Text("not json".into())).await.unwrap();
        ws.send(Message::Text(wire::encode_text(&Envelope::bare("chat")).into())).await.unwrap();
        ws.send(Message::Text(wire::encode_text(&Inbound::BothPlayersReady.to_envelope()).into()))
            .await
            .unwrap();
        let over = Inbound::GameOver(GameOverMessage { game_status: GameStatus::Draw });
        ws.send(Message::Binary(wire::encode_binary(&over.to_envelope()).into())).await.unwrap();
        ws.close(None).await.unwrap();
        received
    });

    let mut client = WsTransport::connect(&format!("ws://{addr}"), Duration::from_secs(5)).await.unwrap();
    client.send(&join()).await.unwrap();

    assert_eq!(client.recv().await, Some(Inbound::BothPlayersReady));
    assert_eq!(
        client.recv().await,
        Some(Inbound::GameOver(GameOverMessage { game_status: GameStatus::Draw }))
    );
    assert_eq!(client.recv().await, None);
    client.close().await.unwrap();
    client.close().await.unwrap();
    assert!(matches!(client.send(&join()).await, Err(SessionError::ChannelClosed)));

    assert_eq!(server.await.unwrap(), join());
}

#[tokio::test]
async fn ws_close_after_relay_hangup_is_clean() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        ws.close(None).await.unwrap();
        while ws.next().await.is_some() {}
    });

    let mut client = WsTransport::connect(&format!("ws://{addr}"), Duration::from_secs(5)).await.unwrap();
    assert_eq!(client.recv().await, None);
    client.close().await.unwrap();
    assert!(matches!(client.send(&join()).await, Err(SessionError::ChannelClosed)));
    drop(client);
    server.await.unwrap();
}

#[tokio::test]
async fn ws_connect_to_closed_port_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = WsTransport::connect(&format!("ws://{addr}"), Duration::from_secs(5)).await;
    assert!(matches!(result, Err(SessionError::WebSocket(_) | SessionError::ConnectTimeout(_))));
}
