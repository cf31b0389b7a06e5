pub mod player;
pub mod registry;
pub mod room;
pub mod turn;

pub use player::{Player, PlayerSummary};
pub use registry::RoomRegistry;
pub use room::{JoinOutcome, RemovedPlayer, Room};
