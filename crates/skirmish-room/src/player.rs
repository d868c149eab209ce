//! Entity model: the per-participant combat state.

use serde::{Deserialize, Serialize};
use skirmish_protocol::JoinData;

/// A point or direction in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Orientation along the two axes the client animates (pitch and yaw).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

/// One connected participant's authoritative state.
///
/// Owned exclusively by [`ArenaState`](crate::ArenaState); the only way
/// to change a field after construction is the mutation protocol.
/// `Serialize` so the hosting layer can snapshot it for replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Hit points at full health; also the value hp resets to on respawn.
    #[serde(rename = "maxHp")]
    pub max_hp: i16,

    /// Current hit points. Held within `0..=max_hp` by the mutation
    /// protocol.
    pub hp: i16,

    /// Times this participant has been eliminated. Never decreases.
    #[serde(rename = "loss")]
    pub loss_count: u16,

    /// Client-reported movement speed. Trusted as sent.
    pub speed: f64,

    /// Skin dealt at join when the room runs a skin pool. Immutable for
    /// the life of the entry; absent from snapshots otherwise.
    #[serde(rename = "skin", default, skip_serializing_if = "Option::is_none")]
    pub skin_index: Option<i8>,

    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Rotation,
}

impl Player {
    /// Builds a fresh entry from a join payload: full hp, zero losses,
    /// zero velocity, placement as decided by the room.
    pub fn new(
        data: &JoinData,
        position: Vec3,
        rot_y: f64,
        skin_index: Option<i8>,
    ) -> Self {
        Self {
            max_hp: data.max_hp,
            hp: data.max_hp,
            loss_count: 0,
            speed: data.speed,
            skin_index,
            position,
            velocity: Vec3::default(),
            rotation: Rotation { x: 0.0, y: rot_y },
        }
    }
}
