//! The arena state and its mutation protocol.
//!
//! [`ArenaState`] is the single authoritative collection of [`Player`]
//! entries for one match. Nothing mutates a player directly; every write
//! goes through one of the four protocol methods here, which is what lets
//! the room controller reason about invariants (hp bounds, monotonic loss
//! counts) in exactly one place.

use std::collections::HashMap;

use serde::Serialize;
use skirmish_protocol::{JoinData, MoveIntent, SessionId};

use crate::{Player, RoomError, Vec3};

/// What a damage application did to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The target survived; `hp` is the post-damage value.
    Survived { hp: i16 },

    /// The target was eliminated: hp reset to max, loss count bumped.
    Eliminated { loss_count: u16 },
}

/// Authoritative player collection for one match.
#[derive(Debug, Default, Serialize)]
pub struct ArenaState {
    players: HashMap<SessionId, Player>,
}

impl ArenaState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh entry built from the join payload.
    ///
    /// An existing entry under the same id is overwritten; last write
    /// wins. Same-id rejoins therefore reset hp and loss count.
    pub fn create_player(
        &mut self,
        session_id: SessionId,
        data: &JoinData,
        position: Vec3,
        rot_y: f64,
        skin_index: Option<i8>,
    ) {
        let player = Player::new(data, position, rot_y, skin_index);
        self.players.insert(session_id, player);
    }

    /// Removes the entry. Removing an absent id is a no-op.
    pub fn remove_player(&mut self, session_id: &SessionId) {
        self.players.remove(session_id);
    }

    /// Overwrites the target's full transform: position, velocity, and
    /// rotation. Combat fields are untouched.
    ///
    /// # Errors
    /// [`RoomError::UnknownPlayer`] if the id has no entry. A move never
    /// creates one.
    pub fn move_player(
        &mut self,
        session_id: &SessionId,
        data: &MoveIntent,
    ) -> Result<(), RoomError> {
        let player = self
            .players
            .get_mut(session_id)
            .ok_or_else(|| RoomError::UnknownPlayer(session_id.clone()))?;

        player.position = Vec3::new(data.px, data.py, data.pz);
        player.velocity = Vec3::new(data.vx, data.vy, data.vz);
        player.rotation.x = data.rx;
        player.rotation.y = data.ry;
        Ok(())
    }

    /// Subtracts `value` hit points from the target.
    ///
    /// If the target stays above zero it survives, with hp clamped at
    /// `max_hp` so negative damage cannot heal past full. Otherwise the
    /// target is eliminated: loss count bumped (saturating), hp reset to
    /// `max_hp`. The arithmetic is widened to `i32` so extreme values
    /// cannot wrap the `i16` fields.
    ///
    /// # Errors
    /// [`RoomError::UnknownPlayer`] if the id has no entry.
    pub fn apply_damage(
        &mut self,
        session_id: &SessionId,
        value: i16,
    ) -> Result<DamageOutcome, RoomError> {
        let player = self
            .players
            .get_mut(session_id)
            .ok_or_else(|| RoomError::UnknownPlayer(session_id.clone()))?;

        let new_hp = i32::from(player.hp) - i32::from(value);
        if new_hp > 0 {
            player.hp = new_hp.min(i32::from(player.max_hp)) as i16;
            return Ok(DamageOutcome::Survived { hp: player.hp });
        }

        player.loss_count = player.loss_count.saturating_add(1);
        player.hp = player.max_hp;
        Ok(DamageOutcome::Eliminated {
            loss_count: player.loss_count,
        })
    }

    /// Read access to one entry.
    pub fn player(&self, session_id: &SessionId) -> Option<&Player> {
        self.players.get(session_id)
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.players.contains_key(session_id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
