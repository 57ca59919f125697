//! A single word-guessing match between two clients.
//!
//! The key encodes *roles*, not just the pairing: the challenger issued
//! the match request and must guess the word; the opponent received the
//! word and may send hints. `(a, b)` and `(b, a)` are different games.

use std::fmt;

use crate::ids::ClientId;

/// Identifies an active or completed game and the roles within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameKey {
    /// The client who issued the match request; guesses the word,
    /// receives hints, and is the only one allowed to give up.
    pub challenger: ClientId,

    /// The client who was challenged; holds the word and sends hints.
    pub opponent: ClientId,
}

/// Which side of a game a client is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Challenger,
    Opponent,
}

impl GameKey {
    pub fn new(challenger: ClientId, opponent: ClientId) -> Self {
        GameKey {
            challenger,
            opponent,
        }
    }

    /// Role of `id` in this game, if it participates at all.
    pub fn role_of(&self, id: ClientId) -> Option<Role> {
        if id == self.challenger {
            Some(Role::Challenger)
        } else if id == self.opponent {
            Some(Role::Opponent)
        } else {
            None
        }
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} vs {})", self.challenger, self.opponent)
    }
}

/// Terminal state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// The challenger guessed the word.
    Success,

    /// The challenger gave up.
    GaveUp,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Success => write!(f, "success"),
            GameResult::GaveUp => write!(f, "gave up"),
        }
    }
}

/// State of one match.
///
/// `attempts` and `hints` are append-only while the game is in
/// progress; `result` is assigned exactly once, at termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// The secret word the challenger has to guess.
    pub word: String,

    /// Every guess submitted so far, in order.
    pub attempts: Vec<String>,

    /// Every hint relayed so far, in order.
    pub hints: Vec<String>,

    /// `None` while in progress; set once when the game ends.
    pub result: Option<GameResult>,
}

impl Game {
    pub fn new(word: String) -> Self {
        Game {
            word,
            attempts: Vec::new(),
            hints: Vec::new(),
            result: None,
        }
    }

    /// Terminate the game. Must be called at most once.
    pub(crate) fn finish(&mut self, result: GameResult) {
        debug_assert!(self.result.is_none(), "game finished twice");
        self.result = Some(result);
    }
}
