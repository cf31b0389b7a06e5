pub mod error;
pub mod room;
pub mod websocket;
pub mod words;

use std::sync::Arc;
use tokio::sync::RwLock;

use room::RoomRegistry;
use words::WordBank;

/// Application state shared across all connections.
///
/// Every room mutation happens under the registry's write lock, so each
/// inbound event is handled as one atomic transition.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<RoomRegistry>>,
    pub words: Arc<WordBank>,
}

impl AppState {
    pub fn new(words: WordBank) -> Self {
        Self {
            registry: Arc::new(RwLock::new(RoomRegistry::new())),
            words: Arc::new(words),
        }
    }
}
