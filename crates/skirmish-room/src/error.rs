//! Error types for the room layer.

use skirmish_protocol::{RoomId, SessionId};

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room is at capacity or no longer accepting joins.
    #[error("room {0} is not accepting joins")]
    CapacityExceeded(RoomId),

    /// The targeted participant has no entry in the arena state.
    #[error("unknown player {0}")]
    UnknownPlayer(SessionId),

    /// The participant is already in a room.
    #[error("player {0} already in room {1}")]
    AlreadyInRoom(SessionId, RoomId),

    /// The participant is not in any room.
    #[error("player {0} is not in any room")]
    NotInRoom(SessionId),

    /// The room's command channel is closed (actor stopped).
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
