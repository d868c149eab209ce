//! Core types crossing the transport/room boundary.
//!
//! Field names and topic tags mirror the wire format the arena client
//! already speaks (`pX`/`vX`/`rY` transform keys, `"hello"` / `"Shoot"` /
//! `"Restart"` topics), so the serde attributes here are load-bearing:
//! changing one breaks the client.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A participant's session identifier, unique within a match.
///
/// This is the single identity scheme in the system: the authoritative
/// state map, the ordered connection list, and damage targets all use the
/// same value. The hosting layer resolves it before any intent reaches
/// the core.
///
/// `#[serde(transparent)]` keeps the wire shape a plain string: a
/// `SessionId("k3x…")` serializes as `"k3x…"`, not `{"0":"k3x…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Builds a session id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A unique identifier for a room (one match instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Recipient — who should receive a signal?
// ---------------------------------------------------------------------------

/// Specifies who should receive an outbound [`Signal`].
///
/// This is the whole outbound contract the room core asks of the hosting
/// layer: targeted delivery and all-but-sender broadcast. Full-room state
/// replication is the transport's own concern and never flows through
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Send to one specific participant.
    Player(SessionId),

    /// Send to everyone except the specified participant.
    AllExcept(SessionId),
}

// ---------------------------------------------------------------------------
// Inbound intents
// ---------------------------------------------------------------------------

/// Initial combat parameters a participant supplies when joining.
///
/// The transform fields are only consulted when the room is configured to
/// take spawn placement from the join payload; rooms with server-random
/// spawns ignore them. They default to zero when absent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinData {
    /// Hit points the participant starts (and respawns) with.
    #[serde(rename = "maxHp")]
    pub max_hp: i16,

    /// Client-reported movement speed. Trusted as sent.
    pub speed: f64,

    /// Requested spawn position, X axis.
    #[serde(default, rename = "pX")]
    pub px: f64,

    /// Requested spawn position, Y axis.
    #[serde(default, rename = "pY")]
    pub py: f64,

    /// Requested spawn position, Z axis.
    #[serde(default, rename = "pZ")]
    pub pz: f64,

    /// Requested spawn facing (yaw).
    #[serde(default, rename = "rY")]
    pub rot_y: f64,
}

impl JoinData {
    /// Rejects payloads whose numeric fields are not finite.
    pub fn validate(&self) -> Result<(), crate::ProtocolError> {
        let fields = [self.speed, self.px, self.py, self.pz, self.rot_y];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(crate::ProtocolError::InvalidPayload(
                "join payload contains a non-finite number".into(),
            ));
        }
        Ok(())
    }
}

/// A wholesale transform update: position, velocity, and rotation.
///
/// Applied as-is to the authoritative state — there is no server-side
/// physics validation, only shape/finiteness checks at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    #[serde(rename = "pX")]
    pub px: f64,
    #[serde(rename = "pY")]
    pub py: f64,
    #[serde(rename = "pZ")]
    pub pz: f64,
    #[serde(rename = "vX")]
    pub vx: f64,
    #[serde(rename = "vY")]
    pub vy: f64,
    #[serde(rename = "vZ")]
    pub vz: f64,
    #[serde(rename = "rX")]
    pub rx: f64,
    #[serde(rename = "rY")]
    pub ry: f64,
}

impl MoveIntent {
    /// Rejects transforms containing NaN or infinite components.
    pub fn validate(&self) -> Result<(), crate::ProtocolError> {
        let fields = [
            self.px, self.py, self.pz, self.vx, self.vy, self.vz, self.rx,
            self.ry,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(crate::ProtocolError::InvalidPayload(
                "move payload contains a non-finite number".into(),
            ));
        }
        Ok(())
    }
}

/// A damage report against another participant.
///
/// `value` is trusted as sent: negative values (healing) and values
/// exceeding the target's max hp are legal — only the post-subtraction
/// sign decides elimination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageIntent {
    /// The participant taking the damage.
    #[serde(rename = "id")]
    pub target_id: SessionId,

    /// Hit points to subtract.
    pub value: i16,
}

/// A participant-authored request to change or observe shared state.
///
/// `#[serde(tag = "type", content = "data")]` produces the adjacently
/// tagged shape the client sends:
/// `{ "type": "move", "data": { "pX": …, … } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Intent {
    /// Overwrite the sender's transform.
    Move(MoveIntent),

    /// Relay an opaque combat payload to every other participant.
    /// The room never inspects or stores it.
    Shoot(serde_json::Value),

    /// Apply damage to a target participant.
    Damage(DamageIntent),
}

impl Intent {
    /// Validates the intent payload at the boundary, before it is allowed
    /// anywhere near the authoritative state.
    pub fn validate(&self) -> Result<(), crate::ProtocolError> {
        match self {
            Intent::Move(m) => m.validate(),
            // Shoot payloads are opaque by contract; anything that parsed
            // as JSON is relayed verbatim.
            Intent::Shoot(_) => Ok(()),
            Intent::Damage(_) => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound signals
// ---------------------------------------------------------------------------

/// Where an eliminated participant comes back to life.
///
/// Untagged: a plane-spawn room produces `{ "x": …, "z": … }`, a
/// spawn-point room produces `{ "index": … }` — exactly the two shapes
/// the client's restart handler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RespawnTarget {
    /// A fresh coordinate pair on the world plane.
    Position { x: f64, z: f64 },

    /// An index into the room's predefined spawn points.
    Point { index: u32 },
}

/// An outbound message the room asks the hosting layer to deliver.
///
/// The topic tags are the client's subscription keys, kept verbatim
/// (including the historical casing mismatch between `"hello"` and
/// `"Shoot"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "data")]
pub enum Signal {
    /// One-time greeting sent to a participant right after joining.
    #[serde(rename = "hello")]
    Hello(String),

    /// A relayed shot payload, exactly as the shooter sent it.
    #[serde(rename = "Shoot")]
    Shoot(serde_json::Value),

    /// Tells an eliminated participant where to respawn.
    #[serde(rename = "Restart")]
    Restart(RespawnTarget),
}

// =========================================================================
// Tests
// =========================================================================
