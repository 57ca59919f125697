//! Per-connection session: handshake, dispatch loop, teardown.
//!
//! Control flow per connection:
//! 1. Send the welcome banner.
//! 2. Require a password submission as the first frame; on mismatch,
//!    send the rejection message and close without allocating an id.
//! 3. On match, allocate a `ClientId`, register the outbound channel,
//!    and confirm the id to the client.
//! 4. Loop: one frame per read, decoded and forwarded to the game
//!    task. Undecodable frames are logged and dropped; the session
//!    continues. EOF, I/O error, or timeout ends the loop.
//! 5. Teardown removes the id from the client registry exactly once.
//!
//! Exactly one exchange is in flight at a time per session: the read
//! loop does not pick up the next frame until the previous command has
//! been handed to the game task.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, WriteHalf};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use wordgame_core::{ClientCommand, ClientId, ServerMessage};
use wordgame_protocol::{codec, MAX_FRAME_LEN};

use crate::config::Config;
use crate::server::next_client_id;
use crate::types::{ClientRegistry, GameRequest, GameTaskTx, OutboundRx};

/// Banner sent to every connection before authentication.
const WELCOME_TEXT: &str = "Welcome to the server!";

/// Run the session for a single connection.
///
/// Generic over the stream so TCP and Unix-domain connections share
/// one implementation.
pub async fn run_client<S>(
    stream: S,
    peer: String,
    config: Arc<Config>,
    game_tx: GameTaskTx,
    clients: ClientRegistry,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let idle = config.idle_timeout();
    let (mut reader, mut writer) = tokio::io::split(stream);

    send_message(&mut writer, &ServerMessage::Welcome(WELCOME_TEXT.to_string()), idle).await?;

    // Authentication: the first frame must be a password submission.
    let Some(frame) = read_frame(&mut reader, idle).await? else {
        debug!(%peer, "connection closed before authentication");
        return Ok(());
    };

    let client_id = match codec::decode_command(&frame) {
        Ok(ClientCommand::Password(secret)) if secret == config.secret => next_client_id(),
        Ok(ClientCommand::Password(_)) => {
            warn!(%peer, "wrong secret, closing connection");
            send_message(&mut writer, &ServerMessage::AuthRejected, idle).await?;
            return Ok(());
        }
        other => {
            warn!(%peer, first_frame = ?other, "expected password as first message, closing");
            send_message(&mut writer, &ServerMessage::AuthRejected, idle).await?;
            return Ok(());
        }
    };

    send_message(&mut writer, &ServerMessage::Authorized(client_id), idle).await?;

    // Register the outbound channel under the new id.
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    {
        let mut guard = clients.write().await;
        guard.insert(client_id, out_tx);
    }
    info!(%peer, %client_id, "client authorized");

    // Writer task: drain outbound messages onto the socket.
    let _writer_handle = tokio::spawn(run_writer(writer, out_rx, client_id, idle));

    read_loop(&mut reader, client_id, &game_tx, idle).await;

    // Teardown: exactly one registry removal per connection.
    {
        let mut guard = clients.write().await;
        guard.remove(&client_id);
    }
    info!(%client_id, "client disconnected");

    Ok(())
}

async fn read_loop<R>(
    reader: &mut R,
    client_id: ClientId,
    game_tx: &GameTaskTx,
    idle: Option<Duration>,
) where
    R: AsyncRead + Unpin,
{
    loop {
        let frame = match read_frame(reader, idle).await {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                warn!(%client_id, error = %e, "read failed, closing session");
                return;
            }
        };

        match codec::decode_command(&frame) {
            Ok(ClientCommand::Password(_)) => {
                debug!(%client_id, "ignoring password frame after authentication");
            }
            Ok(cmd) => {
                let req = GameRequest { client_id, cmd };
                if game_tx.send(req).is_err() {
                    warn!(%client_id, "game task channel closed");
                    return;
                }
            }
            Err(e) => {
                // Contained to this frame; the session continues.
                warn!(%client_id, error = %e, "dropping undecodable frame");
            }
        }
    }
}

async fn run_writer<S>(
    mut writer: WriteHalf<S>,
    mut out_rx: OutboundRx,
    client_id: ClientId,
    idle: Option<Duration>,
) where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    while let Some(msg) = out_rx.recv().await {
        if let Err(e) = send_message(&mut writer, &msg, idle).await {
            warn!(%client_id, error = %e, "write failed, dropping outbound channel");
            break;
        }
    }
}

/// Read one frame. One read is trusted to deliver one logical message.
///
/// Returns `Ok(None)` on a clean end of stream. A configured idle
/// timeout surfaces as a `TimedOut` I/O error, equivalent to a
/// disconnect for the caller.
async fn read_frame<R>(reader: &mut R, idle: Option<Duration>) -> io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; MAX_FRAME_LEN];

    let n = match idle {
        Some(limit) => timeout(limit, reader.read(&mut buf))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "read timed out"))??,
        None => reader.read(&mut buf).await?,
    };

    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(buf[..n].to_vec()))
    }
}

async fn send_message<W>(
    writer: &mut W,
    msg: &ServerMessage,
    idle: Option<Duration>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut frame = Vec::with_capacity(64);
    codec::encode_message(msg, &mut frame);

    match idle {
        Some(limit) => timeout(limit, write_frame(writer, &frame))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "write timed out"))?,
        None => write_frame(writer, &frame).await,
    }
}

async fn write_frame<W>(writer: &mut W, frame: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(frame).await?;
    writer.flush().await
}
