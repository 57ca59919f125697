//! Central game loop.
//!
//! This task is the single writer of the `GameRegistry`: every command
//! from every session funnels through one channel, so matchmaking,
//! guess resolution, hints, and give-up are serialized and no caller
//! can observe the registry in a partially-updated state.
//!
//! Delivery policy: outbound messages are computed while holding the
//! game lock, then sent through a roster snapshot *after* the lock is
//! released. Sends are unbounded-channel pushes and never block on a
//! slow peer; the per-client writer task does the actual socket I/O.

use std::collections::HashSet;

use tracing::{debug, info};

use wordgame_core::{
    ClientCommand, ClientId, GameError, GameRegistry, GuessOutcome, ServerMessage,
};

use crate::types::{ClientRegistry, GameRequest, GameTaskRx, SharedGames};

/// Messages to deliver, each to a single recipient.
type Outbound = Vec<(ClientId, ServerMessage)>;

/// Run the central game processing loop.
///
/// - `game_rx`: receives requests from all session tasks.
/// - `clients`: registry of connected clients and their outbound channels.
/// - `games`: the shared game registry, written only from here.
pub(crate) async fn run_game_loop(
    mut game_rx: GameTaskRx,
    clients: ClientRegistry,
    games: SharedGames,
) {
    while let Some(req) = game_rx.recv().await {
        handle_request(req, &clients, &games).await;
    }

    info!("game loop shutting down (game_rx closed)");
}

async fn handle_request(req: GameRequest, clients: &ClientRegistry, games: &SharedGames) {
    let GameRequest { client_id, cmd } = req;

    // Snapshot of current clients to minimize lock hold time. A client
    // that disconnects after this point simply loses the message.
    let roster = {
        let guard = clients.read().await;
        guard.clone()
    };
    let connected: HashSet<ClientId> = roster.keys().copied().collect();

    let outbound = match cmd {
        ClientCommand::Password(_) => {
            // Authentication happens in the session, never here.
            debug!(%client_id, "ignoring password command in game loop");
            Vec::new()
        }
        ClientCommand::ListOpponents => list_opponents(client_id, &connected),
        ClientCommand::RequestMatch { opponent, word } => {
            let mut games = games.write().await;
            request_match(&mut games, client_id, opponent, word, &connected)
        }
        ClientCommand::Guess(guess) => {
            let mut games = games.write().await;
            resolve_guess(&mut games, client_id, &guess)
        }
        ClientCommand::Hint(hint) => {
            let mut games = games.write().await;
            relay_hint(&mut games, client_id, hint, &connected)
        }
        ClientCommand::GiveUp => {
            let mut games = games.write().await;
            give_up(&mut games, client_id)
        }
    };

    for (to, msg) in outbound {
        match roster.get(&to) {
            Some(tx) => {
                let _ = tx.send(msg);
            }
            None => debug!(%to, "dropping message to disconnected client"),
        }
    }
}

fn list_opponents(caller: ClientId, connected: &HashSet<ClientId>) -> Outbound {
    let mut ids: Vec<ClientId> = connected
        .iter()
        .copied()
        .filter(|id| *id != caller)
        .collect();
    // Stable order for clients; the roster itself is unordered.
    ids.sort_unstable();

    vec![(caller, ServerMessage::OpponentList(ids))]
}

fn request_match(
    games: &mut GameRegistry,
    challenger: ClientId,
    opponent: ClientId,
    word: String,
    connected: &HashSet<ClientId>,
) -> Outbound {
    match games.create_match(challenger, opponent, word.clone(), connected) {
        Ok(key) => {
            info!(%key, "match started");
            vec![
                (opponent, ServerMessage::MatchStarted(word)),
                (challenger, ServerMessage::MatchConfirmed),
            ]
        }
        Err(GameError::SelfMatch) => vec![(
            challenger,
            ServerMessage::RuleViolation("You cannot play against yourself.".to_string()),
        )],
        Err(GameError::AlreadyInGame) => vec![(
            challenger,
            ServerMessage::MatchDeclined("Opponent is currently in another game.".to_string()),
        )],
        Err(GameError::OpponentUnavailable) => vec![(
            challenger,
            ServerMessage::MatchDeclined("Opponent not available.".to_string()),
        )],
        Err(other) => vec![(challenger, ServerMessage::RuleViolation(other.to_string()))],
    }
}

fn resolve_guess(games: &mut GameRegistry, guesser: ClientId, guess: &str) -> Outbound {
    match games.submit_guess(guesser, guess) {
        Ok(GuessOutcome::Correct { key }) => {
            info!(%key, "word guessed, game over");
            vec![
                (
                    key.challenger,
                    ServerMessage::GameOver(format!(
                        "The word \"{guess}\" is correct. You won the game."
                    )),
                ),
                (
                    key.opponent,
                    ServerMessage::GameOver(format!(
                        "The opponent guessed the word \"{guess}\" correctly. You lost the game."
                    )),
                ),
            ]
        }
        Ok(GuessOutcome::Incorrect { key }) => {
            let text = format!("The guess \"{guess}\" is incorrect.");
            vec![
                (key.challenger, ServerMessage::WrongGuess(text.clone())),
                (key.opponent, ServerMessage::WrongGuess(text)),
            ]
        }
        Err(_) => vec![(
            guesser,
            ServerMessage::RuleViolation("No active game found for your guess.".to_string()),
        )],
    }
}

fn relay_hint(
    games: &mut GameRegistry,
    sender: ClientId,
    hint: String,
    connected: &HashSet<ClientId>,
) -> Outbound {
    match games.submit_hint(sender, &hint, connected) {
        Ok(Some(challenger)) => vec![(challenger, ServerMessage::Hint(hint))],
        Ok(None) => {
            debug!(%sender, "hint dropped: guessing player not connected");
            Vec::new()
        }
        Err(_) => vec![(
            sender,
            ServerMessage::NoActiveGame("No game found for sending hint.".to_string()),
        )],
    }
}

fn give_up(games: &mut GameRegistry, requester: ClientId) -> Outbound {
    match games.give_up(requester) {
        Ok(key) => {
            info!(%key, "challenger gave up, game over");
            vec![
                (
                    key.challenger,
                    ServerMessage::GameOver(
                        "You gave up. The game is over. You lose.".to_string(),
                    ),
                ),
                (
                    key.opponent,
                    ServerMessage::GameOver(
                        "The player has given up. The game is over. You won.".to_string(),
                    ),
                ),
            ]
        }
        Err(GameError::NotGuessingRole) => vec![(
            requester,
            ServerMessage::RuleViolation(
                "Only the player who is guessing can give up.".to_string(),
            ),
        )],
        Err(_) => vec![(
            requester,
            ServerMessage::RuleViolation("No active game found to give up.".to_string()),
        )],
    }
}
