//! Game registry: matchmaking, guess resolution, hints, give-up, history.
//!
//! Owns all game state:
//! - active games, keyed by [`GameKey`]
//! - completed games, accumulated per key as an ordered history
//! - a per-client index into the active games, so role lookups never
//!   scan and "one active game per client" is enforced structurally
//!
//! The registry is deliberately synchronous and connection-agnostic.
//! Operations that depend on who is connected take a snapshot of the
//! connected ids; the server layer owns the actual sockets and wraps
//! the whole registry in its synchronization discipline.
//!
//! State machine per game: in progress (attempts/hints accumulate) →
//! `Success` or `GaveUp`. Termination happens in [`GameRegistry::finish`],
//! the only place a game moves from active to completed, so a key can
//! never be visible in both at once.

use std::collections::{HashMap, HashSet};

use crate::error::GameError;
use crate::game::{Game, GameKey, GameResult, Role};
use crate::ids::ClientId;

/// Result of a guess submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched; the game has been moved to the completed history.
    Correct { key: GameKey },

    /// The guess did not match; the game stays active.
    Incorrect { key: GameKey },
}

/// Cloned, read-only view of the registry for status reporting.
#[derive(Debug, Clone, Default)]
pub struct GamesSnapshot {
    pub active: Vec<(GameKey, Game)>,
    pub completed: Vec<(GameKey, Vec<Game>)>,
}

/// All game state for the server process.
#[derive(Debug, Default)]
pub struct GameRegistry {
    /// Games currently in progress.
    active: HashMap<GameKey, Game>,

    /// Finished games, in completion order per key. Never mutated again.
    completed: HashMap<GameKey, Vec<Game>>,

    /// Which active game each participant is in, either role.
    ///
    /// Kept in lockstep with `active`; its existence is what makes
    /// "at most one active game per client" a hard invariant.
    by_client: HashMap<ClientId, GameKey>,
}

impl GameRegistry {
    pub fn new() -> Self {
        GameRegistry::default()
    }

    /// Start a new match between `challenger` and `opponent`.
    ///
    /// `connected` is a snapshot of the currently registered client ids.
    /// Checks, in order: self-match, either participant busy, opponent
    /// connected. On success the game is registered and its key returned;
    /// the caller is responsible for notifying both participants.
    pub fn create_match(
        &mut self,
        challenger: ClientId,
        opponent: ClientId,
        word: String,
        connected: &HashSet<ClientId>,
    ) -> Result<GameKey, GameError> {
        if challenger == opponent {
            return Err(GameError::SelfMatch);
        }
        if self.is_participant(challenger) || self.is_participant(opponent) {
            return Err(GameError::AlreadyInGame);
        }
        if !connected.contains(&opponent) {
            return Err(GameError::OpponentUnavailable);
        }

        let key = GameKey::new(challenger, opponent);
        self.active.insert(key, Game::new(word));
        self.by_client.insert(challenger, key);
        self.by_client.insert(opponent, key);

        Ok(key)
    }

    /// Record a guess from `guesser`, who must hold the challenger role.
    ///
    /// The guess is appended to the attempts either way. A correct guess
    /// terminates the game with [`GameResult::Success`] and moves it to
    /// the completed history before returning.
    pub fn submit_guess(
        &mut self,
        guesser: ClientId,
        guess: &str,
    ) -> Result<GuessOutcome, GameError> {
        let key = self.key_in_role(guesser, Role::Challenger)?;

        let game = self
            .active
            .get_mut(&key)
            .ok_or(GameError::NoActiveGame)?;
        game.attempts.push(guess.to_string());

        if guess == game.word {
            self.finish(key, GameResult::Success);
            Ok(GuessOutcome::Correct { key })
        } else {
            Ok(GuessOutcome::Incorrect { key })
        }
    }

    /// Record a hint from `sender`, who must hold the opponent role.
    ///
    /// If the challenger is still connected the hint is appended and
    /// `Ok(Some(challenger))` tells the caller where to relay it. If the
    /// challenger is gone the hint is dropped without error: nothing is
    /// appended and `Ok(None)` is returned.
    pub fn submit_hint(
        &mut self,
        sender: ClientId,
        hint: &str,
        connected: &HashSet<ClientId>,
    ) -> Result<Option<ClientId>, GameError> {
        let key = self.key_in_role(sender, Role::Opponent)?;

        if !connected.contains(&key.challenger) {
            return Ok(None);
        }

        let game = self
            .active
            .get_mut(&key)
            .ok_or(GameError::NoActiveGame)?;
        game.hints.push(hint.to_string());

        Ok(Some(key.challenger))
    }

    /// Abandon the game `requester` participates in.
    ///
    /// Either role locates the game, but only the challenger may give up.
    /// On success the game terminates with [`GameResult::GaveUp`] and the
    /// key is returned so the caller can notify both sides.
    pub fn give_up(&mut self, requester: ClientId) -> Result<GameKey, GameError> {
        let key = *self
            .by_client
            .get(&requester)
            .ok_or(GameError::NoActiveGame)?;

        if key.role_of(requester) != Some(Role::Challenger) {
            return Err(GameError::NotGuessingRole);
        }

        self.finish(key, GameResult::GaveUp);
        Ok(key)
    }

    /// Whether `id` is in any active game, in either role.
    pub fn is_participant(&self, id: ClientId) -> bool {
        self.by_client.contains_key(&id)
    }

    /// Cloned view of active and completed games, for status reporting.
    pub fn snapshot(&self) -> GamesSnapshot {
        GamesSnapshot {
            active: self
                .active
                .iter()
                .map(|(k, g)| (*k, g.clone()))
                .collect(),
            completed: self
                .completed
                .iter()
                .map(|(k, gs)| (*k, gs.clone()))
                .collect(),
        }
    }

    /// Number of games currently in progress.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Completed history for one key, oldest first.
    pub fn history(&self, key: GameKey) -> &[Game] {
        self.completed.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Active game for one key, if in progress.
    pub fn active_game(&self, key: GameKey) -> Option<&Game> {
        self.active.get(&key)
    }

    // -------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------

    /// Active game key where `id` holds `role`.
    fn key_in_role(&self, id: ClientId, role: Role) -> Result<GameKey, GameError> {
        let key = self.by_client.get(&id).ok_or(GameError::NoActiveGame)?;
        if key.role_of(id) == Some(role) {
            Ok(*key)
        } else {
            Err(GameError::NoActiveGame)
        }
    }

    /// Terminate a game: set the result and move it from active to the
    /// completed history in one step.
    fn finish(&mut self, key: GameKey, result: GameResult) {
        let Some(mut game) = self.active.remove(&key) else {
            return;
        };
        game.finish(result);

        self.by_client.remove(&key.challenger);
        self.by_client.remove(&key.opponent);

        self.completed.entry(key).or_default().push(game);
    }
}
