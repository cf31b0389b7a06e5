use uuid::Uuid;

use crate::room::{Player, Room};
use crate::websocket::message::ServerMessage;
use crate::words::WordBank;

/// Points awarded for a correct guess
pub const GUESS_REWARD: u32 = 10;

/// Full drawer rotations before the game resets
pub const ROUNDS_PER_GAME: u32 = 1;

/// Result of routing a chat line through guess evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Dropped without any broadcast: empty input, unknown sender,
    /// or a room with no drawer
    Ignored,
    /// Relayed to the room as an attributed chat line
    Chat,
    /// Scored and rotated the drawer role
    Correct { game_over: bool },
}

/// Start a turn: pick a fresh word, reveal it to the drawer only,
/// reset the canvas and announce the drawer to the room.
///
/// No-op on an empty room. Also normalizes a stale drawer index, so it
/// is safe to call right after a removal.
pub fn start_turn(room: &mut Room, words: &WordBank) {
    if room.is_empty() {
        return;
    }

    room.drawer_index %= room.player_count();
    room.word = words.draw().to_string();

    let drawer = &room.players[room.drawer_index];
    let (drawer_id, drawer_name) = (drawer.id, drawer.username.clone());

    room.broadcast(ServerMessage::NotYourTurn.to_ws_message());
    room.broadcast(ServerMessage::Clear.to_ws_message());
    room.send_to(
        drawer_id,
        ServerMessage::YourTurn {
            word: room.word.clone(),
        }
        .to_ws_message(),
    );
    room.broadcast(
        ServerMessage::Chat {
            msg: format!("✏️ {} is now drawing!", drawer_name),
        }
        .to_ws_message(),
    );
    room.broadcast(
        ServerMessage::Players {
            players: room.player_list(),
        }
        .to_ws_message(),
    );
}

/// Evaluate a chat line as a guess against the room's secret word.
///
/// Whitespace-only input is noise, not a guess. The drawer's own messages
/// relay as plain chat and never score. Matching is exact equality after
/// trim + lowercase, nothing fuzzy.
pub fn evaluate_guess(
    room: &mut Room,
    connection_id: Uuid,
    raw_msg: &str,
    words: &WordBank,
) -> GuessOutcome {
    let guess = raw_msg.trim();
    if guess.is_empty() {
        return GuessOutcome::Ignored;
    }

    let Some(index) = room.players.iter().position(|p| p.id == connection_id) else {
        return GuessOutcome::Ignored;
    };
    if room.drawer().is_none() {
        return GuessOutcome::Ignored;
    }

    let username = room.players[index].username.clone();

    if room.is_drawer(connection_id) || guess.to_lowercase() != room.word {
        room.broadcast(
            ServerMessage::Chat {
                msg: format!("{}: {}", username, guess),
            }
            .to_ws_message(),
        );
        return GuessOutcome::Chat;
    }

    room.players[index].score += GUESS_REWARD;
    room.broadcast(
        ServerMessage::Chat {
            msg: format!("🎉 {} guessed it!", username),
        }
        .to_ws_message(),
    );
    room.broadcast(
        ServerMessage::Players {
            players: room.player_list(),
        }
        .to_ws_message(),
    );

    room.drawer_index += 1;
    if room.drawer_index >= room.player_count() {
        room.drawer_index = 0;
        room.rounds_completed += 1;
    }

    if room.rounds_completed >= ROUNDS_PER_GAME {
        finish_game(room, words);
        return GuessOutcome::Correct { game_over: true };
    }

    start_turn(room, words);
    GuessOutcome::Correct { game_over: false }
}

/// Game over: announce the winner, wipe scores and restart from the
/// first player. Does not chain into the ordinary turn start.
fn finish_game(room: &mut Room, words: &WordBank) {
    // Highest score wins; ties go to the earliest join
    let winner_name = room
        .players
        .iter()
        .fold(None, |best: Option<&Player>, p| match best {
            Some(b) if b.score >= p.score => Some(b),
            _ => Some(p),
        })
        .map(|p| p.username.clone())
        .unwrap_or_default();

    room.broadcast(
        ServerMessage::Chat {
            msg: format!("🏆 Game Over! Winner: {}", winner_name),
        }
        .to_ws_message(),
    );

    for player in &mut room.players {
        player.score = 0;
    }
    room.rounds_completed = 0;
    room.drawer_index = 0;
    room.word = words.draw().to_string();

    let Some(first) = room.players.first() else {
        return;
    };
    let (first_id, first_name) = (first.id, first.username.clone());

    room.broadcast(ServerMessage::NotYourTurn.to_ws_message());
    room.broadcast(ServerMessage::Clear.to_ws_message());
    room.send_to(
        first_id,
        ServerMessage::YourTurn {
            word: room.word.clone(),
        }
        .to_ws_message(),
    );
    room.broadcast(
        ServerMessage::Chat {
            msg: format!("🔁 New game started! {} is drawing", first_name),
        }
        .to_ws_message(),
    );
    room.broadcast(
        ServerMessage::Players {
            players: room.player_list(),
        }
        .to_ws_message(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ws::Message;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn bank() -> WordBank {
        WordBank::new(vec!["cat".to_string()])
    }

    fn join(room: &mut Room, name: &str) -> (Uuid, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        room.join(id, name, tx).unwrap();
        (id, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<Message>) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Ok(Message::Text(text)) = rx.try_recv() {
            out.push(serde_json::from_str(&text).unwrap());
        }
        out
    }

    fn chats(messages: &[ServerMessage]) -> Vec<String> {
        messages
            .iter()
            .filter_map(|m| match m {
                ServerMessage::Chat { msg } => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_turn_on_empty_room_is_noop() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        start_turn(&mut room, &bank());
        assert!(room.is_empty());
    }

    #[test]
    fn test_start_turn_reveals_word_only_to_drawer() {
        let mut room = Room::new("r1".to_string(), "old".to_string());
        let (_alice, mut rx_alice) = join(&mut room, "alice");
        let (_bob, mut rx_bob) = join(&mut room, "bob");

        start_turn(&mut room, &bank());
        assert_eq!(room.word, "cat");

        let alice_msgs = drain(&mut rx_alice);
        assert!(alice_msgs
            .iter()
            .any(|m| matches!(m, ServerMessage::YourTurn { word } if word == "cat")));

        let bob_msgs = drain(&mut rx_bob);
        assert!(!bob_msgs
            .iter()
            .any(|m| matches!(m, ServerMessage::YourTurn { .. })));
        assert!(bob_msgs
            .iter()
            .any(|m| matches!(m, ServerMessage::NotYourTurn)));
        assert!(bob_msgs.iter().any(|m| matches!(m, ServerMessage::Clear)));
        assert!(bob_msgs
            .iter()
            .any(|m| matches!(m, ServerMessage::Players { .. })));
        assert!(chats(&bob_msgs)
            .iter()
            .any(|c| c.contains("alice is now drawing")));
    }

    #[test]
    fn test_start_turn_normalizes_stale_drawer_index() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (_bob, _rx2) = join(&mut room, "bob");

        room.drawer_index = 5;
        start_turn(&mut room, &bank());

        assert!(room.drawer_index < room.player_count());
    }

    #[test]
    fn test_wrong_guess_relays_as_chat() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (bob, _rx2) = join(&mut room, "bob");
        let (_carol, mut rx3) = join(&mut room, "carol");

        let outcome = evaluate_guess(&mut room, bob, "dog", &bank());

        assert_eq!(outcome, GuessOutcome::Chat);
        assert_eq!(room.players[1].score, 0);
        assert_eq!(chats(&drain(&mut rx3)), vec!["bob: dog".to_string()]);
    }

    #[test]
    fn test_empty_guess_is_ignored() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (bob, mut rx2) = join(&mut room, "bob");

        assert_eq!(evaluate_guess(&mut room, bob, "   ", &bank()), GuessOutcome::Ignored);
        assert_eq!(evaluate_guess(&mut room, bob, "", &bank()), GuessOutcome::Ignored);

        assert!(drain(&mut rx2).is_empty());
        assert_eq!(room.players[1].score, 0);
    }

    #[test]
    fn test_unknown_sender_is_ignored() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, mut rx1) = join(&mut room, "alice");

        let outcome = evaluate_guess(&mut room, Uuid::new_v4(), "cat", &bank());

        assert_eq!(outcome, GuessOutcome::Ignored);
        assert!(drain(&mut rx1).is_empty());
    }

    #[test]
    fn test_drawer_cannot_score() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (alice, _rx1) = join(&mut room, "alice");
        let (_bob, mut rx2) = join(&mut room, "bob");

        let outcome = evaluate_guess(&mut room, alice, "cat", &bank());

        assert_eq!(outcome, GuessOutcome::Chat);
        assert_eq!(room.players[0].score, 0);
        assert_eq!(room.drawer_index, 0);
        assert_eq!(chats(&drain(&mut rx2)), vec!["alice: cat".to_string()]);
    }

    #[test]
    fn test_match_is_case_and_trim_insensitive() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (bob, _rx2) = join(&mut room, "bob");
        let (_carol, _rx3) = join(&mut room, "carol");

        let outcome = evaluate_guess(&mut room, bob, "  CAT ", &bank());

        assert_eq!(outcome, GuessOutcome::Correct { game_over: false });
        assert_eq!(room.players[1].score, GUESS_REWARD);
    }

    #[test]
    fn test_correct_guess_rotates_drawer() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (bob, mut rx2) = join(&mut room, "bob");
        let (carol, _rx3) = join(&mut room, "carol");

        let outcome = evaluate_guess(&mut room, bob, "cat", &bank());

        assert_eq!(outcome, GuessOutcome::Correct { game_over: false });
        assert_eq!(room.drawer_index, 1);
        assert_eq!(room.rounds_completed, 0);
        assert!(room.is_drawer(bob));
        assert!(!room.is_drawer(carol));

        let msgs = drain(&mut rx2);
        assert!(chats(&msgs).iter().any(|c| c.contains("🎉 bob guessed it!")));
        // bob is the new drawer and gets the private reveal
        assert!(msgs
            .iter()
            .any(|m| matches!(m, ServerMessage::YourTurn { word } if word == "cat")));
    }

    #[test]
    fn test_full_rotation_triggers_game_over() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (alice, mut rx1) = join(&mut room, "alice");
        let (bob, _rx2) = join(&mut room, "bob");

        // bob guesses against alice's word: half a rotation
        evaluate_guess(&mut room, bob, "cat", &bank());
        assert_eq!(room.rounds_completed, 0);
        drain(&mut rx1);

        // alice guesses against bob's word: rotation wraps, game over
        let outcome = evaluate_guess(&mut room, alice, "cat", &bank());
        assert_eq!(outcome, GuessOutcome::Correct { game_over: true });

        assert_eq!(room.rounds_completed, 0);
        assert_eq!(room.drawer_index, 0);
        assert!(room.players.iter().all(|p| p.score == 0));

        let msgs = drain(&mut rx1);
        let chat_lines = chats(&msgs);
        // tie at 10 points each: earliest join wins
        assert!(chat_lines
            .iter()
            .any(|c| c.contains("🏆 Game Over! Winner: alice")));
        assert!(chat_lines
            .iter()
            .any(|c| c.contains("🔁 New game started! alice is drawing")));
        // alice is players[0] and draws again
        assert!(msgs
            .iter()
            .any(|m| matches!(m, ServerMessage::YourTurn { .. })));
        assert!(room.is_drawer(alice));
    }

    #[test]
    fn test_game_over_winner_has_max_score() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (bob, _rx2) = join(&mut room, "bob");
        let (_carol, mut rx3) = join(&mut room, "carol");

        // bob already leads from an earlier game state
        room.players[1].score = 30;
        room.drawer_index = 2;

        let outcome = evaluate_guess(&mut room, bob, "cat", &bank());

        assert_eq!(outcome, GuessOutcome::Correct { game_over: true });
        assert!(chats(&drain(&mut rx3))
            .iter()
            .any(|c| c.contains("🏆 Game Over! Winner: bob")));
    }

    #[test]
    fn test_stale_word_no_longer_matches() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (_alice, _rx1) = join(&mut room, "alice");
        let (bob, _rx2) = join(&mut room, "bob");
        let (carol, _rx3) = join(&mut room, "carol");

        // bob's correct guess replaces the word before carol's is evaluated
        evaluate_guess(&mut room, bob, "cat", &bank());
        room.word = "dog".to_string();

        let outcome = evaluate_guess(&mut room, carol, "cat", &bank());
        assert_eq!(outcome, GuessOutcome::Chat);
        assert_eq!(room.players[2].score, 0);
    }

    #[test]
    fn test_drawer_removal_then_restart_picks_valid_drawer() {
        let mut room = Room::new("r1".to_string(), "cat".to_string());
        let (alice, _rx1) = join(&mut room, "alice");
        let (bob, mut rx2) = join(&mut room, "bob");

        let removed = room.remove(alice).unwrap();
        assert!(removed.was_drawer);

        start_turn(&mut room, &bank());

        assert!(room.is_drawer(bob));
        assert!(drain(&mut rx2)
            .iter()
            .any(|m| matches!(m, ServerMessage::YourTurn { .. })));
    }
}
