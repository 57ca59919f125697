//! Message types used by the game server.
//!
//! These are **transport-agnostic** logical messages:
//! - [`ClientCommand`]: what a client asks the server to do.
//! - [`ServerMessage`]: what the server tells a client.
//!
//! There is one variant per wire tag; the binary encoders live in the
//! `wordgame-protocol` crate, this module is purely logical.

use crate::ids::ClientId;

/// A request from a client into the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Shared-secret submission; must be the first message on a connection.
    Password(Vec<u8>),

    /// Ask for the ids of all other connected clients.
    ListOpponents,

    /// Challenge `opponent` to guess; `word` is delivered to the opponent.
    RequestMatch { opponent: ClientId, word: String },

    /// Submit a guess for the caller's active game.
    Guess(String),

    /// Send a hint to the guessing player of the caller's active game.
    Hint(String),

    /// Abandon the caller's active game (guessing role only).
    GiveUp,
}

/// An event from the server to a single client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Banner sent immediately after the connection is accepted.
    Welcome(String),

    /// Authentication succeeded; carries the assigned id.
    Authorized(ClientId),

    /// Wrong secret; the server closes the connection after sending this.
    AuthRejected,

    /// Ids of the other connected clients.
    OpponentList(Vec<ClientId>),

    /// Match request accepted (sent to the challenger).
    MatchConfirmed,

    /// Match request refused: opponent busy or not connected.
    MatchDeclined(String),

    /// A match has started (sent to the opponent); carries the word.
    MatchStarted(String),

    /// The game ended: won, lost, or given up.
    GameOver(String),

    /// A guess did not match the word.
    WrongGuess(String),

    /// Hint relayed from the opponent to the guessing player.
    Hint(String),

    /// Generic rule violation, reported as text.
    RuleViolation(String),

    /// No active game for the attempted hint.
    NoActiveGame(String),
}
