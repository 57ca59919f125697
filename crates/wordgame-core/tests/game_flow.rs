//! End-to-end flows through the game registry: matchmaking, guess
//! resolution, hints, give-up, and the completed-game history.

use std::collections::HashSet;

use wordgame_core::{ClientId, GameError, GameKey, GameRegistry, GameResult, GuessOutcome};

fn connected(ids: &[u32]) -> HashSet<ClientId> {
    ids.iter().copied().map(ClientId).collect()
}

fn key(challenger: u32, opponent: u32) -> GameKey {
    GameKey::new(ClientId(challenger), ClientId(opponent))
}

#[test]
fn create_match_registers_one_active_game() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2, 3]);

    let k = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .expect("both idle and distinct");

    assert_eq!(k, key(1, 2));
    assert_eq!(games.active_len(), 1);
    assert!(games.is_participant(ClientId(1)));
    assert!(games.is_participant(ClientId(2)));
    assert!(!games.is_participant(ClientId(3)));

    let game = games.active_game(k).expect("game is active");
    assert_eq!(game.word, "apple");
    assert!(game.attempts.is_empty());
    assert!(game.hints.is_empty());
    assert!(game.result.is_none());
}

#[test]
fn self_match_is_rejected() {
    let mut games = GameRegistry::new();
    let online = connected(&[1]);

    let err = games
        .create_match(ClientId(1), ClientId(1), "apple".to_string(), &online)
        .unwrap_err();

    assert_eq!(err, GameError::SelfMatch);
    assert_eq!(games.active_len(), 0);
}

#[test]
fn busy_participant_rejects_new_match_in_either_role() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2, 3]);

    games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    // Same pair again before resolution.
    assert_eq!(
        games
            .create_match(ClientId(1), ClientId(2), "grape".to_string(), &online)
            .unwrap_err(),
        GameError::AlreadyInGame
    );
    // Opponent of the active game challenged by a third client.
    assert_eq!(
        games
            .create_match(ClientId(3), ClientId(2), "grape".to_string(), &online)
            .unwrap_err(),
        GameError::AlreadyInGame
    );
    // Challenger of the active game challenging a third client.
    assert_eq!(
        games
            .create_match(ClientId(1), ClientId(3), "grape".to_string(), &online)
            .unwrap_err(),
        GameError::AlreadyInGame
    );

    assert_eq!(games.active_len(), 1);
}

#[test]
fn offline_opponent_is_unavailable() {
    let mut games = GameRegistry::new();
    let online = connected(&[1]);

    let err = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap_err();

    assert_eq!(err, GameError::OpponentUnavailable);
}

#[test]
fn wrong_guess_accumulates_and_keeps_game_active() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    let k = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    let outcome = games.submit_guess(ClientId(1), "grape").unwrap();
    assert_eq!(outcome, GuessOutcome::Incorrect { key: k });

    let game = games.active_game(k).expect("still active");
    assert_eq!(game.attempts, vec!["grape"]);
    assert!(game.result.is_none());
    assert!(games.is_participant(ClientId(1)));
}

#[test]
fn correct_guess_completes_the_game() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    let k = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    games.submit_guess(ClientId(1), "grape").unwrap();
    let outcome = games.submit_guess(ClientId(1), "apple").unwrap();
    assert_eq!(outcome, GuessOutcome::Correct { key: k });

    assert_eq!(games.active_len(), 0);
    assert!(!games.is_participant(ClientId(1)));
    assert!(!games.is_participant(ClientId(2)));

    let history = games.history(k);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, Some(GameResult::Success));
    assert_eq!(history[0].attempts, vec!["grape", "apple"]);
}

#[test]
fn only_the_challenger_role_can_guess() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    // The opponent holds the word; guesses from that side have no game.
    assert_eq!(
        games.submit_guess(ClientId(2), "apple").unwrap_err(),
        GameError::NoActiveGame
    );
    // A bystander has no game either.
    assert_eq!(
        games.submit_guess(ClientId(9), "apple").unwrap_err(),
        GameError::NoActiveGame
    );
    assert_eq!(games.active_len(), 1);
}

#[test]
fn give_up_terminates_only_from_the_guessing_role() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    let k = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();
    games.submit_guess(ClientId(1), "grape").unwrap();

    // The opponent cannot give up; the game is left untouched.
    assert_eq!(
        games.give_up(ClientId(2)).unwrap_err(),
        GameError::NotGuessingRole
    );
    let game = games.active_game(k).expect("still active");
    assert_eq!(game.attempts, vec!["grape"]);
    assert!(game.result.is_none());

    // The challenger can.
    assert_eq!(games.give_up(ClientId(1)).unwrap(), k);
    assert_eq!(games.active_len(), 0);

    let history = games.history(k);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, Some(GameResult::GaveUp));
}

#[test]
fn give_up_without_a_game_fails() {
    let mut games = GameRegistry::new();
    assert_eq!(
        games.give_up(ClientId(1)).unwrap_err(),
        GameError::NoActiveGame
    );
}

#[test]
fn hints_accumulate_in_call_order() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    let k = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    assert_eq!(
        games.submit_hint(ClientId(2), "a____", &online).unwrap(),
        Some(ClientId(1))
    );
    assert_eq!(
        games.submit_hint(ClientId(2), "ap___", &online).unwrap(),
        Some(ClientId(1))
    );

    let game = games.active_game(k).unwrap();
    assert_eq!(game.hints, vec!["a____", "ap___"]);
}

#[test]
fn hint_to_disconnected_challenger_is_dropped() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    let k = games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    // Challenger went away after the match was made.
    let remaining = connected(&[2]);
    assert_eq!(
        games.submit_hint(ClientId(2), "a____", &remaining).unwrap(),
        None
    );
    assert!(games.active_game(k).unwrap().hints.is_empty());
}

#[test]
fn hint_requires_the_opponent_role() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();

    // The challenger guesses; it cannot send hints.
    assert_eq!(
        games.submit_hint(ClientId(1), "a____", &online).unwrap_err(),
        GameError::NoActiveGame
    );
}

#[test]
fn completed_history_accumulates_per_key() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);
    let k = key(1, 2);

    games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();
    games.submit_guess(ClientId(1), "apple").unwrap();

    // The same pair plays again after resolution.
    games
        .create_match(ClientId(1), ClientId(2), "grape".to_string(), &online)
        .unwrap();
    games.give_up(ClientId(1)).unwrap();

    let history = games.history(k);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].word, "apple");
    assert_eq!(history[0].result, Some(GameResult::Success));
    assert_eq!(history[1].word, "grape");
    assert_eq!(history[1].result, Some(GameResult::GaveUp));
}

#[test]
fn reversed_roles_are_a_distinct_key() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2]);

    games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();
    games.submit_guess(ClientId(1), "apple").unwrap();

    games
        .create_match(ClientId(2), ClientId(1), "grape".to_string(), &online)
        .unwrap();
    games.submit_guess(ClientId(2), "grape").unwrap();

    assert_eq!(games.history(key(1, 2)).len(), 1);
    assert_eq!(games.history(key(2, 1)).len(), 1);
}

#[test]
fn snapshot_reflects_active_and_completed() {
    let mut games = GameRegistry::new();
    let online = connected(&[1, 2, 3, 4]);

    games
        .create_match(ClientId(1), ClientId(2), "apple".to_string(), &online)
        .unwrap();
    games
        .create_match(ClientId(3), ClientId(4), "grape".to_string(), &online)
        .unwrap();
    games.submit_guess(ClientId(3), "grape").unwrap();

    let snapshot = games.snapshot();
    assert_eq!(snapshot.active.len(), 1);
    assert_eq!(snapshot.active[0].0, key(1, 2));
    assert_eq!(snapshot.completed.len(), 1);
    assert_eq!(snapshot.completed[0].0, key(3, 4));
    assert_eq!(snapshot.completed[0].1.len(), 1);
}
