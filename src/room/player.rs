use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

#[derive(Debug)]
pub struct Player {
    pub id: Uuid,
    pub username: String,
    pub score: u32,
    pub sender: UnboundedSender<Message>,
}

impl Player {
    pub fn new(id: Uuid, username: String, sender: UnboundedSender<Message>) -> Self {
        Self {
            id,
            username,
            score: 0,
            sender,
        }
    }

    /// Send a message to this player
    pub fn send(&self, message: Message) -> bool {
        self.sender.send(message).is_ok()
    }
}

/// The public view of a player, broadcast in `players` refreshes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSummary {
    pub username: String,
    pub score: u32,
}
