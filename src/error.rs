use thiserror::Error;

/// Join-validation failures, surfaced only through the ack unicast.
/// Everything else in the game (authority violations, unknown rooms,
/// blank guesses) is silently dropped rather than reported.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Room id cannot be empty")]
    EmptyRoomId,
}
