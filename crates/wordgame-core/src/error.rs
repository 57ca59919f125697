//! Error types for the game registry.

use thiserror::Error;

/// Rule violations reported by [`GameRegistry`](crate::GameRegistry)
/// operations.
///
/// All of these are non-fatal: the server reports them back to the
/// requesting client as a text notification and the session continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A client tried to challenge itself.
    #[error("cannot play against yourself")]
    SelfMatch,

    /// One of the participants is already in an active game.
    #[error("a participant is already in another game")]
    AlreadyInGame,

    /// The requested opponent is not currently connected.
    #[error("opponent not available")]
    OpponentUnavailable,

    /// The caller has no active game in the role the operation requires.
    #[error("no active game")]
    NoActiveGame,

    /// Only the guessing player may give up.
    #[error("only the guessing player can give up")]
    NotGuessingRole,
}
