//! wordgame-core
//!
//! Pure word-guessing game logic:
//! - client identifiers
//! - messages (command/event types)
//! - game state machine (key, roles, attempts, hints, result)
//! - game registry (matchmaking, guess resolution, hints, give-up, history)

pub mod error;
pub mod game;
pub mod ids;
pub mod messages;
pub mod registry;

pub use error::GameError;
pub use game::{Game, GameKey, GameResult, Role};
pub use ids::ClientId;
pub use messages::{ClientCommand, ServerMessage};
pub use registry::{GameRegistry, GamesSnapshot, GuessOutcome};
