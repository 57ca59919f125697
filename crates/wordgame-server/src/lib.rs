//! wordgame-server
//!
//! Multi-client async server for the word-guessing game.
//! Listens on TCP or a Unix-domain socket, runs one session task per
//! connection, and serializes all game state behind a central game task.

pub mod client;
pub mod config;
pub mod server;
pub mod types;

// these are internal modules, not re-exported
mod game_task;
mod status;
