//! Room configuration and lifecycle phases.

use serde::{Deserialize, Serialize};

/// Hard cap on participants per match.
pub const MAX_CLIENTS: usize = 2;

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration for one room instance.
///
/// Two arena flavors ship today, both served by the same controller:
/// [`RoomConfig::random_spawn`] places joiners at a random spot on the
/// world plane and greets them on arrival; [`RoomConfig::spawn_points`]
/// trusts the join payload for placement and deals each joiner a skin
/// from the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Compute spawn positions server-side instead of reading them from
    /// the join payload.
    pub use_random_spawn: bool,

    /// Deal each joiner a skin index drawn from the pool.
    pub use_skin_pool: bool,

    /// Send the one-time `hello` greeting right after a join completes.
    pub greet_on_join: bool,

    /// Side length of the square world plane. Spawn coordinates land in
    /// `[-plane_size/2, plane_size/2)` on both axes.
    pub plane_size: f64,

    /// Number of predefined spawn points the client map defines.
    pub points_length: u32,

    /// Number of selectable skins in the pool.
    pub skin_count: u8,
}

impl RoomConfig {
    /// A room that spawns joiners at a random plane position and greets
    /// them. Skins are not dealt; respawns are `{x, z}` coordinates.
    pub fn random_spawn(plane_size: f64) -> Self {
        Self {
            use_random_spawn: true,
            use_skin_pool: false,
            greet_on_join: true,
            plane_size,
            points_length: 0,
            skin_count: 0,
        }
    }

    /// A room that places joiners where their join payload asks and
    /// deals each one a skin. Respawns are spawn-point indices.
    pub fn spawn_points(points_length: u32, skin_count: u8) -> Self {
        Self {
            use_random_spawn: false,
            use_skin_pool: true,
            greet_on_join: false,
            plane_size: 0.0,
            points_length,
            skin_count,
        }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self::random_spawn(10.0)
    }
}

// ---------------------------------------------------------------------------
// RoomPhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a room.
///
/// ```text
/// Open → Locked → Disposed
///   └───────────────┘
/// ```
///
/// - **Open**: accepting joins.
/// - **Locked**: at capacity. A leave does NOT reopen the room; the lock
///   is one-way.
/// - **Disposed**: terminal. State dropped, actor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomPhase {
    Open,
    Locked,
    Disposed,
}

impl RoomPhase {
    /// Returns `true` if the room is accepting new participants.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` if the room has not been disposed.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Open | Self::Locked)
    }

    /// Returns `true` if transitioning to `target` is valid.
    ///
    /// `Open → Locked` and `{Open, Locked} → Disposed` are the only
    /// moves; in particular `Locked → Open` is not one.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Locked)
                | (Self::Open, Self::Disposed)
                | (Self::Locked, Self::Disposed)
        )
    }
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Locked => write!(f, "Locked"),
            Self::Disposed => write!(f, "Disposed"),
        }
    }
}
