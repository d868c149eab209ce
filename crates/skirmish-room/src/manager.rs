//! Room manager: creates, tracks, and routes participants to rooms.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use skirmish_protocol::{Intent, JoinData, RoomId, SessionId};

use crate::room::spawn_room;
use crate::{PlayerSender, RoomConfig, RoomError, RoomHandle, RoomInfo};

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns every active room and tracks which participant is in which one.
///
/// This is the entry point for room operations from the hosting layer.
/// Discovery is not its job: callers arrive with a `RoomId` they got
/// from whoever created the room.
pub struct RoomManager {
    rooms: HashMap<RoomId, RoomHandle>,

    /// Maps each participant to their current room. A participant can be
    /// in at most ONE room at a time (key invariant).
    player_rooms: HashMap<SessionId, RoomId>,
}

impl RoomManager {
    /// Creates a new, empty room manager.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
        }
    }

    /// Creates a new room and returns its ID.
    pub fn create_room(&mut self, config: RoomConfig) -> RoomId {
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let handle = spawn_room(room_id, config, DEFAULT_CHANNEL_SIZE);
        self.rooms.insert(room_id, handle);
        tracing::info!(%room_id, "room created");
        room_id
    }

    /// Adds a participant to a room.
    ///
    /// Enforces the one-room-at-a-time invariant before the room itself
    /// gets a say.
    pub async fn join_room(
        &mut self,
        session_id: SessionId,
        room_id: RoomId,
        data: JoinData,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if let Some(current) = self.player_rooms.get(&session_id) {
            return Err(RoomError::AlreadyInRoom(session_id, *current));
        }

        let handle = self
            .rooms
            .get(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;

        handle.join(session_id.clone(), data, sender).await?;
        self.player_rooms.insert(session_id, room_id);
        Ok(())
    }

    /// Removes a participant from their current room.
    pub async fn leave_room(
        &mut self,
        session_id: SessionId,
    ) -> Result<(), RoomError> {
        let room_id = self
            .player_rooms
            .get(&session_id)
            .copied()
            .ok_or_else(|| RoomError::NotInRoom(session_id.clone()))?;

        if let Some(handle) = self.rooms.get(&room_id) {
            handle.leave(session_id.clone()).await?;
        }

        self.player_rooms.remove(&session_id);
        Ok(())
    }

    /// Routes an intent from a participant to their current room.
    pub async fn route_intent(
        &self,
        session_id: SessionId,
        intent: Intent,
    ) -> Result<(), RoomError> {
        let room_id = self
            .player_rooms
            .get(&session_id)
            .ok_or_else(|| RoomError::NotInRoom(session_id.clone()))?;

        let handle = self
            .rooms
            .get(room_id)
            .ok_or(RoomError::NotFound(*room_id))?;

        handle.intent(session_id, intent).await
    }

    /// Returns info about a specific room.
    pub async fn room_info(
        &self,
        room_id: RoomId,
    ) -> Result<RoomInfo, RoomError> {
        let handle = self
            .rooms
            .get(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        handle.info().await
    }

    /// Disposes a room and clears its participants from the index.
    pub async fn dispose_room(
        &mut self,
        room_id: RoomId,
    ) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;

        let _ = handle.dispose().await;
        self.player_rooms.retain(|_, rid| *rid != room_id);

        tracing::info!(%room_id, "room disposed");
        Ok(())
    }

    /// Returns the room a participant is currently in, if any.
    pub fn player_room(&self, session_id: &SessionId) -> Option<RoomId> {
        self.player_rooms.get(session_id).copied()
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lists all active room IDs.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
