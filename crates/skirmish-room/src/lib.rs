//! Authoritative room sessions for the Skirmish arena.
//!
//! Each room runs as an isolated Tokio task (actor model) exclusively
//! owning one match's [`ArenaState`]: the hosting layer talks to it
//! through a [`RoomHandle`], and every signal back out travels over the
//! per-participant channels registered at join.
//!
//! # Key types
//!
//! - [`RoomManager`] — creates/disposes rooms, routes participants
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`ArenaState`] — the authoritative player map + mutation protocol
//! - [`RoomConfig`] / [`RoomPhase`] — room flavor flags and lifecycle
//! - [`spawn`] — placement and skin allocation over an injected RNG

mod config;
mod error;
mod manager;
mod player;
mod room;
pub mod spawn;
mod state;

pub use config::{RoomConfig, RoomPhase, MAX_CLIENTS};
pub use error::RoomError;
pub use manager::RoomManager;
pub use player::{Player, Rotation, Vec3};
pub use room::{PlayerSender, RoomHandle, RoomInfo};
pub use state::{ArenaState, DamageOutcome};
