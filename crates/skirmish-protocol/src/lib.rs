//! Boundary types for the Skirmish room core.
//!
//! This crate defines everything that crosses the line between the hosting
//! transport layer and the authoritative room session:
//!
//! - **Types** ([`SessionId`], [`Intent`], [`Signal`], [`Recipient`], etc.)
//!   — participant identity, typed inbound intents, and outbound signals.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how the hosting layer
//!   turns raw payload bytes into those types before they reach the core.
//! - **Errors** ([`ProtocolError`]) — what can go wrong at that boundary.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the room
//! session (authoritative state). It knows nothing about connections or
//! rooms — it only describes the messages and how to (de)serialize them.
//!
//! ```text
//! Transport (bytes) → Protocol (Intent) → Room session (state mutation)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    DamageIntent, Intent, JoinData, MoveIntent, Recipient, RespawnTarget,
    RoomId, SessionId, Signal,
};
