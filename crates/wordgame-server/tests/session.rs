//! Session handshake behavior, driven over an in-memory duplex stream.
//!
//! The session entry point is generic over the transport, so these
//! tests stand in for a real socket with `tokio::io::duplex` and speak
//! the wire protocol from the client side.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

use wordgame_core::{ClientCommand, ClientId, ServerMessage};
use wordgame_protocol::{decode_message, encode_command, MAX_FRAME_LEN};
use wordgame_server::client::run_client;
use wordgame_server::config::{Config, ListenMode};
use wordgame_server::types::{ClientRegistry, GameTaskRx, GameTaskTx};

const SECRET: &[u8] = b"letmein";

struct Harness {
    config: Arc<Config>,
    clients: ClientRegistry,
    game_tx: GameTaskTx,
    // Kept open so session commands have somewhere to go.
    _game_rx: GameTaskRx,
}

fn harness() -> Harness {
    let mut config = Config::from_env(ListenMode::Tcp).expect("defaults parse");
    config.secret = SECRET.to_vec();

    let (game_tx, game_rx) = mpsc::unbounded_channel();
    Harness {
        config: Arc::new(config),
        clients: Arc::new(RwLock::new(HashMap::new())),
        game_tx,
        _game_rx: game_rx,
    }
}

fn connect(h: &Harness) -> (DuplexStream, JoinHandle<anyhow::Result<()>>) {
    let (client_side, server_side) = tokio::io::duplex(MAX_FRAME_LEN);
    let handle = tokio::spawn(run_client(
        server_side,
        "test-peer".to_string(),
        h.config.clone(),
        h.game_tx.clone(),
        h.clients.clone(),
    ));
    (client_side, handle)
}

async fn read_message(stream: &mut DuplexStream) -> ServerMessage {
    let mut buf = [0u8; MAX_FRAME_LEN];
    let n = stream.read(&mut buf).await.expect("read frame");
    assert!(n > 0, "stream closed while a message was expected");
    decode_message(&buf[..n]).expect("server frames decode")
}

async fn send_command(stream: &mut DuplexStream, cmd: &ClientCommand) {
    let mut frame = Vec::new();
    encode_command(cmd, &mut frame);
    stream.write_all(&frame).await.expect("write frame");
}

/// Drive a connection through the full handshake with the right secret.
async fn authorize(h: &Harness) -> (ClientId, DuplexStream, JoinHandle<anyhow::Result<()>>) {
    let (mut stream, handle) = connect(h);

    match read_message(&mut stream).await {
        ServerMessage::Welcome(_) => {}
        other => panic!("expected welcome banner, got {other:?}"),
    }
    send_command(&mut stream, &ClientCommand::Password(SECRET.to_vec())).await;
    match read_message(&mut stream).await {
        ServerMessage::Authorized(id) => (id, stream, handle),
        other => panic!("expected an assigned id, got {other:?}"),
    }
}

#[tokio::test]
async fn correct_secret_assigns_fresh_increasing_ids() {
    let h = harness();

    let (first, stream, handle) = authorize(&h).await;
    assert!(h.clients.read().await.contains_key(&first));

    drop(stream);
    handle.await.expect("session task").expect("session exits cleanly");
    assert!(h.clients.read().await.is_empty());

    // The next session gets a fresh id; ids are never reused.
    let (second, stream, handle) = authorize(&h).await;
    assert!(second > first);

    drop(stream);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn wrong_secret_is_rejected_and_never_registered() {
    let h = harness();
    let (mut stream, handle) = connect(&h);

    match read_message(&mut stream).await {
        ServerMessage::Welcome(_) => {}
        other => panic!("expected welcome banner, got {other:?}"),
    }
    send_command(&mut stream, &ClientCommand::Password(b"guessing".to_vec())).await;
    match read_message(&mut stream).await {
        ServerMessage::AuthRejected => {}
        other => panic!("expected rejection, got {other:?}"),
    }

    // The server closes the connection after rejecting.
    let mut buf = [0u8; MAX_FRAME_LEN];
    assert_eq!(stream.read(&mut buf).await.unwrap(), 0);

    handle.await.unwrap().unwrap();
    assert!(h.clients.read().await.is_empty());

    // A later client with the right secret is unaffected.
    let (_, stream, handle) = authorize(&h).await;
    drop(stream);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn non_password_first_frame_is_rejected() {
    let h = harness();
    let (mut stream, handle) = connect(&h);

    match read_message(&mut stream).await {
        ServerMessage::Welcome(_) => {}
        other => panic!("expected welcome banner, got {other:?}"),
    }
    send_command(&mut stream, &ClientCommand::ListOpponents).await;
    match read_message(&mut stream).await {
        ServerMessage::AuthRejected => {}
        other => panic!("expected rejection, got {other:?}"),
    }

    let mut buf = [0u8; MAX_FRAME_LEN];
    assert_eq!(stream.read(&mut buf).await.unwrap(), 0);

    handle.await.unwrap().unwrap();
    assert!(h.clients.read().await.is_empty());
}
