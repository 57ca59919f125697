//! Shared types for the game server.
//!
//! This module defines:
//! - the registry of connected clients and their outbound channels
//! - the shared handle to the game registry
//! - `GameRequest`: messages flowing from sessions to the game task

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::RwLock;

use wordgame_core::{ClientCommand, ClientId, GameRegistry, ServerMessage};

/// Outbound messages from the server to a given client.
pub type OutboundTx = mpsc::UnboundedSender<ServerMessage>;
pub type OutboundRx = mpsc::UnboundedReceiver<ServerMessage>;

/// Registry of connected clients and their outbound channels.
///
/// - Key: `ClientId`, allocated on successful authentication.
/// - Value: `OutboundTx` to send `ServerMessage`s to that client.
///
/// Absence of an id means "not currently connected".
pub type ClientRegistry = Arc<RwLock<HashMap<ClientId, OutboundTx>>>;

/// The game registry, shared between the game task (writes) and the
/// status page (reads).
pub type SharedGames = Arc<RwLock<GameRegistry>>;

/// Message flowing from a session task into the central game task.
#[derive(Debug)]
pub struct GameRequest {
    pub client_id: ClientId,
    pub cmd: ClientCommand,
}

/// Channel from sessions → game task.
pub type GameTaskTx = mpsc::UnboundedSender<GameRequest>;
pub type GameTaskRx = mpsc::UnboundedReceiver<GameRequest>;
