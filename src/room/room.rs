use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::error::GameError;
use crate::room::{Player, PlayerSummary};

/// One game room: the player list, the drawer pointer, the secret word
/// and the round counter.
///
/// Player order is join order and defines the drawer rotation; the
/// drawer index is always a valid index whenever the list is non-empty.
pub struct Room {
    pub id: String,
    pub(crate) players: Vec<Player>,
    pub(crate) drawer_index: usize,
    pub(crate) word: String,
    pub(crate) rounds_completed: u32,
}

/// Result of a successful join
pub struct JoinOutcome {
    /// True iff the join brought the room from empty to one player,
    /// which triggers the initial turn start.
    pub is_first_player: bool,
}

/// Result of removing a player
pub struct RemovedPlayer {
    pub player: Player,
    /// Whether the removed player held the drawer role at removal time
    pub was_drawer: bool,
}

impl Room {
    pub fn new(id: String, word: String) -> Self {
        Self {
            id,
            players: Vec::new(),
            drawer_index: 0,
            word: word.to_lowercase(),
            rounds_completed: 0,
        }
    }

    /// Add a player to the room.
    ///
    /// Rejects an empty-after-trim username. Joining twice with the same
    /// connection id is a no-op, so a reconnect re-submit never duplicates
    /// the player.
    pub fn join(
        &mut self,
        connection_id: Uuid,
        username: &str,
        sender: UnboundedSender<Message>,
    ) -> Result<JoinOutcome, GameError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(GameError::EmptyUsername);
        }

        if self.players.iter().any(|p| p.id == connection_id) {
            return Ok(JoinOutcome {
                is_first_player: false,
            });
        }

        self.players
            .push(Player::new(connection_id, username.to_string(), sender));

        Ok(JoinOutcome {
            is_first_player: self.players.len() == 1,
        })
    }

    /// Remove the player with the given connection id, if present.
    ///
    /// `was_drawer` is computed against the drawer index before removal.
    /// Removing a player who joined before the drawer shifts every later
    /// index down by one, so the drawer index follows; a trailing index
    /// is clamped back to 0.
    pub fn remove(&mut self, connection_id: Uuid) -> Option<RemovedPlayer> {
        let index = self.players.iter().position(|p| p.id == connection_id)?;
        let was_drawer = index == self.drawer_index;
        let player = self.players.remove(index);

        if index < self.drawer_index {
            self.drawer_index -= 1;
        }
        if self.drawer_index >= self.players.len() {
            self.drawer_index = 0;
        }

        Some(RemovedPlayer { player, was_drawer })
    }

    /// Drawing-authority gate: true iff this connection holds the drawer role
    pub fn is_drawer(&self, connection_id: Uuid) -> bool {
        self.drawer()
            .map(|drawer| drawer.id == connection_id)
            .unwrap_or(false)
    }

    pub fn drawer(&self) -> Option<&Player> {
        self.players.get(self.drawer_index)
    }

    pub fn find_player(&self, connection_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == connection_id)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Snapshot of usernames and scores, in join order
    pub fn player_list(&self) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .map(|p| PlayerSummary {
                username: p.username.clone(),
                score: p.score,
            })
            .collect()
    }

    /// Send a message to every player in the room
    pub fn broadcast(&self, message: Message) {
        for player in &self.players {
            let _ = player.send(message.clone());
        }
    }

    /// Send a message to every player except the given connection
    pub fn broadcast_except(&self, message: Message, except: Uuid) {
        for player in self.players.iter().filter(|p| p.id != except) {
            let _ = player.send(message.clone());
        }
    }

    /// Send a message to a single player
    pub fn send_to(&self, connection_id: Uuid, message: Message) {
        if let Some(player) = self.find_player(connection_id) {
            let _ = player.send(message);
        }
    }
}
