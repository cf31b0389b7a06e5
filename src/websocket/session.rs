use uuid::Uuid;

/// Per-connection identity, alive for the lifetime of one socket.
///
/// Tracks which room the connection joined so disconnect cleanup goes
/// straight to it instead of scanning the registry.
#[derive(Debug)]
pub struct ConnectionSession {
    pub connection_id: Uuid,
    pub room_id: Option<String>,
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            room_id: None,
        }
    }
}

impl Default for ConnectionSession {
    fn default() -> Self {
        Self::new()
    }
}
