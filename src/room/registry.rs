use std::collections::HashMap;

use crate::room::Room;
use crate::words::WordBank;

/// Owned store of every live room, keyed by room id.
///
/// Rooms are created lazily on first join and removed as soon as their
/// player list empties. The registry is handed around via `AppState`
/// rather than living in a global, so tests can build isolated instances.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the room for this id, creating it with a fresh word if unseen.
    /// Idempotent by id.
    pub fn get_or_create(&mut self, room_id: &str, words: &WordBank) -> &mut Room {
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(|| Room::new(room_id.to_string(), words.draw().to_string()))
    }

    /// Lookup only. Gated operations use this so events naming an unknown
    /// room are silently ignored.
    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Delete the room if its player list is empty. Called after every
    /// player removal. Returns true if the room was deleted.
    pub fn remove_if_empty(&mut self, room_id: &str) -> bool {
        if self.rooms.get(room_id).is_some_and(|room| room.is_empty()) {
            self.rooms.remove(room_id);
            return true;
        }
        false
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
