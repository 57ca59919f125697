//! Listener and top-level server wiring.
//!
//! This module:
//! - Binds the configured transport (TCP or Unix-domain socket).
//! - Accepts new connections.
//! - Spawns:
//!   - a per-connection session task,
//!   - a single central game task that owns the `GameRegistry`,
//!   - the read-only HTTP status page.
//!
//! The per-connection logic and the game loop live in the `client` and
//! `game_task` modules respectively. Client ids are allocated here, on
//! successful authentication only, never at accept time.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, UnixListener};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use wordgame_core::ClientId;

use crate::client;
use crate::config::{Config, ListenMode};
use crate::game_task;
use crate::status;
use crate::types::{ClientRegistry, GameTaskRx, GameTaskTx, SharedGames};

/// Process-wide counter for assigning unique `ClientId`s.
///
/// Monotonic for the lifetime of the process: ids are never reused,
/// even after the client disconnects.
static NEXT_CLIENT_ID: AtomicU32 = AtomicU32::new(1);

pub(crate) fn next_client_id() -> ClientId {
    ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Open connections, authenticated or not.
///
/// The client registry only tracks authorized sessions, so the
/// `max_clients` cap counts through this instead: a connection claims
/// a slot at accept time and releases it when its session task exits.
static OPEN_CONNECTIONS: AtomicUsize = AtomicUsize::new(0);

/// Holds one connection slot; dropping it releases the slot.
pub struct ConnectionGuard {
    _priv: (),
}

impl ConnectionGuard {
    /// Claim a slot, or `None` when `max` connections are already open.
    pub fn try_acquire(max: usize) -> Option<Self> {
        OPEN_CONNECTIONS
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |open| {
                (open < max).then_some(open + 1)
            })
            .ok()
            .map(|_| ConnectionGuard { _priv: () })
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        OPEN_CONNECTIONS.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Removes the Unix socket file when dropped.
///
/// Held inside [`Listener`] so the path is unlinked on any exit from
/// `run`, including unwinding.
struct SocketGuard {
    path: PathBuf,
}

impl SocketGuard {
    /// Claim `path`, removing a stale socket file if one exists.
    fn new(path: &Path) -> std::io::Result<Self> {
        match std::fs::remove_file(path) {
            Ok(()) => info!(path = %path.display(), "removed stale socket file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        Ok(SocketGuard {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for SocketGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove socket file");
            }
        }
    }
}

enum Listener {
    Tcp(TcpListener),
    Unix {
        listener: UnixListener,
        _guard: SocketGuard,
    },
}

impl Listener {
    async fn bind(config: &Config) -> anyhow::Result<Self> {
        match config.mode {
            ListenMode::Tcp => {
                let addr = config.socket_addr_string();
                let listener = TcpListener::bind(&addr)
                    .await
                    .with_context(|| format!("binding tcp listener on {addr}"))?;
                info!("listening on {}", addr);
                Ok(Listener::Tcp(listener))
            }
            ListenMode::Unix => {
                let guard = SocketGuard::new(&config.socket_path)
                    .context("claiming unix socket path")?;
                let listener = UnixListener::bind(&config.socket_path).with_context(|| {
                    format!("binding unix socket {}", config.socket_path.display())
                })?;
                info!("listening on {}", config.socket_path.display());
                Ok(Listener::Unix {
                    listener,
                    _guard: guard,
                })
            }
        }
    }
}

/// Run the server with the given configuration until ctrl-c.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let listener = Listener::bind(&config).await?;

    // Shared registry of clients → outbound channels.
    let clients: ClientRegistry = Arc::new(tokio::sync::RwLock::new(Default::default()));

    // All game state. The game task serializes every mutation; the
    // status page only ever takes read locks.
    let games: SharedGames = Arc::new(tokio::sync::RwLock::new(Default::default()));

    // Channel from sessions → game task.
    let (game_tx, game_rx): (GameTaskTx, GameTaskRx) = mpsc::unbounded_channel();

    // Spawn the central game task.
    {
        let clients = clients.clone();
        let games = games.clone();
        tokio::spawn(async move {
            game_task::run_game_loop(game_rx, clients, games).await;
        });
    }

    // Spawn the read-only status page.
    {
        let games = games.clone();
        let status_port = config.status_port;
        tokio::spawn(async move {
            if let Err(e) = status::run_status_server(status_port, games).await {
                error!(error = %e, "status server failed");
            }
        });
    }

    tokio::select! {
        res = accept_loop(&listener, &config, &clients, &game_tx) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            Ok(())
        }
    }
    // `listener` drops here; in Unix mode that unlinks the socket file.
}

async fn accept_loop(
    listener: &Listener,
    config: &Arc<Config>,
    clients: &ClientRegistry,
    game_tx: &GameTaskTx,
) -> anyhow::Result<()> {
    loop {
        match listener {
            Listener::Tcp(l) => {
                let (stream, peer_addr) = l.accept().await?;
                spawn_session(stream, peer_addr.to_string(), config, clients, game_tx);
            }
            Listener::Unix { listener: l, .. } => {
                let (stream, _) = l.accept().await?;
                spawn_session(stream, "unix-peer".to_string(), config, clients, game_tx);
            }
        }
    }
}

fn spawn_session<S>(
    stream: S,
    peer: String,
    config: &Arc<Config>,
    clients: &ClientRegistry,
    game_tx: &GameTaskTx,
) where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let Some(slot) = ConnectionGuard::try_acquire(config.max_clients) else {
        warn!(
            %peer,
            max_clients = config.max_clients,
            "rejecting connection: max_clients reached"
        );
        // Just drop the stream; the client sees the connection close.
        return;
    };

    info!(%peer, "accepted connection");

    let config = config.clone();
    let clients = clients.clone();
    let game_tx = game_tx.clone();

    tokio::spawn(async move {
        let _slot = slot;
        if let Err(e) = client::run_client(stream, peer.clone(), config, game_tx, clients).await {
            warn!(%peer, error = %e, "session ended with error");
        }
    });
}
