//! Room session controller: an isolated Tokio task that owns one match.
//!
//! Each room runs in its own task and communicates with the outside
//! world through an mpsc channel. The task is the only code that can
//! touch the room's [`ArenaState`], so every mutation is serialized by
//! construction; there is no lock to hold wrong.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use skirmish_protocol::{
    Intent, JoinData, Recipient, RespawnTarget, RoomId, SessionId, Signal,
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    spawn, ArenaState, DamageOutcome, RoomConfig, RoomError, RoomPhase,
    Vec3, MAX_CLIENTS,
};

/// Channel sender for delivering outbound signals to one participant.
///
/// Registered at join; the hosting layer holds the receiving half and
/// forwards signals onto the participant's connection.
pub type PlayerSender = mpsc::UnboundedSender<Signal>;

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the caller
/// sends a command and awaits the response on it. Intents carry no reply;
/// they are fire-and-forget.
pub(crate) enum RoomCommand {
    Join {
        session_id: SessionId,
        data: JoinData,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    Leave {
        session_id: SessionId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    Intent {
        session_id: SessionId,
        intent: Intent,
    },

    Info {
        reply: oneshot::Sender<RoomInfo>,
    },

    Dispose,
}

/// A snapshot of room metadata (not the arena state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub phase: RoomPhase,
    pub player_count: usize,
    pub max_clients: usize,
}

/// Handle to a running room actor. Cheap to clone; the
/// [`RoomManager`](crate::RoomManager) holds one per room.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's unique ID.
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Adds a participant to the room.
    ///
    /// `sender` is the outbound channel the room will use for every
    /// signal addressed to this participant.
    pub async fn join(
        &self,
        session_id: SessionId,
        data: JoinData,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                session_id,
                data,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Removes a participant from the room. The room stays locked even
    /// when this drops it below capacity.
    pub async fn leave(
        &self,
        session_id: SessionId,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                session_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Delivers a participant intent (fire-and-forget).
    ///
    /// A malformed or misaddressed intent is logged and dropped inside
    /// the actor; only a stopped room surfaces an error here.
    pub async fn intent(
        &self,
        session_id: SessionId,
        intent: Intent,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Intent { session_id, intent })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Requests the current room info.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Tells the room to dispose itself: phase to `Disposed`, actor
    /// stopped, state dropped. Disposing an already-stopped room is a
    /// success; the operation is idempotent.
    pub async fn dispose(&self) -> Result<(), RoomError> {
        let _ = self.sender.send(RoomCommand::Dispose).await;
        Ok(())
    }
}

/// The internal room actor. Runs inside a Tokio task and exclusively
/// owns the arena state.
struct RoomActor {
    room_id: RoomId,
    phase: RoomPhase,
    config: RoomConfig,
    state: ArenaState,
    /// Ordered join list; the elimination lookup scans this, mirroring
    /// the client-list iteration the deployed game expects.
    clients: Vec<SessionId>,
    senders: HashMap<SessionId, PlayerSender>,
    skin_pool: Vec<i8>,
    rng: StdRng,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until disposal.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room session started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    session_id,
                    data,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(session_id, data, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { session_id, reply } => {
                    let result = self.handle_leave(session_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Intent { session_id, intent } => {
                    self.handle_intent(session_id, intent);
                }
                RoomCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Dispose => {
                    self.phase = RoomPhase::Disposed;
                    tracing::info!(room_id = %self.room_id, "room disposed");
                    break;
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room session stopped");
    }

    fn handle_join(
        &mut self,
        session_id: SessionId,
        data: JoinData,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        // A locked or disposed room rejects every join; with the lock
        // engaging at two participants this is also the capacity check.
        if !self.phase.is_joinable() {
            return Err(RoomError::CapacityExceeded(self.room_id));
        }

        // A rejoin of a live session id replaces the sender and recreates
        // the player; the ordered client list keeps its single entry.
        if !self.clients.contains(&session_id) {
            self.clients.push(session_id.clone());
        }
        self.senders.insert(session_id.clone(), sender);

        if self.clients.len() > 1
            && self.phase.can_transition_to(RoomPhase::Locked)
        {
            self.phase = RoomPhase::Locked;
            tracing::info!(room_id = %self.room_id, "room locked");
        }

        let (position, rot_y) = if self.config.use_random_spawn {
            let (x, z) = spawn::plane_spawn(self.config.plane_size, &mut self.rng);
            (Vec3::new(x, 0.0, z), 0.0)
        } else {
            (Vec3::new(data.px, data.py, data.pz), data.rot_y)
        };

        let skin = if self.config.use_skin_pool {
            spawn::allocate(&self.skin_pool, &mut self.rng)
        } else {
            None
        };

        self.state
            .create_player(session_id.clone(), &data, position, rot_y, skin);

        if self.config.greet_on_join {
            self.dispatch(
                Recipient::Player(session_id.clone()),
                Signal::Hello("world".into()),
            );
        }

        tracing::info!(
            room_id = %self.room_id,
            %session_id,
            players = self.state.player_count(),
            "player joined"
        );

        Ok(())
    }

    fn handle_leave(
        &mut self,
        session_id: SessionId,
    ) -> Result<(), RoomError> {
        if self.senders.remove(&session_id).is_none() {
            return Err(RoomError::NotInRoom(session_id));
        }
        self.clients.retain(|id| *id != session_id);
        self.state.remove_player(&session_id);

        // The lock stays on; a half-empty locked room never reopens.
        tracing::info!(
            room_id = %self.room_id,
            %session_id,
            players = self.state.player_count(),
            "player left"
        );

        Ok(())
    }

    /// Applies one intent. Failures are local: logged, dropped, and the
    /// session carries on.
    fn handle_intent(&mut self, session_id: SessionId, intent: Intent) {
        if !self.senders.contains_key(&session_id) {
            tracing::warn!(
                room_id = %self.room_id,
                %session_id,
                "intent from non-member, ignoring"
            );
            return;
        }

        match intent {
            Intent::Move(data) => {
                if let Err(err) = self.state.move_player(&session_id, &data) {
                    tracing::debug!(
                        room_id = %self.room_id,
                        %session_id,
                        %err,
                        "move dropped"
                    );
                }
            }
            Intent::Shoot(payload) => {
                // Relayed verbatim; the room neither inspects nor stores
                // shot payloads.
                self.dispatch(
                    Recipient::AllExcept(session_id),
                    Signal::Shoot(payload),
                );
            }
            Intent::Damage(data) => {
                match self.state.apply_damage(&data.target_id, data.value) {
                    Ok(DamageOutcome::Survived { .. }) => {}
                    Ok(DamageOutcome::Eliminated { loss_count }) => {
                        tracing::debug!(
                            room_id = %self.room_id,
                            target = %data.target_id,
                            loss_count,
                            "player eliminated"
                        );
                        self.send_respawn(&data.target_id);
                    }
                    Err(err) => {
                        tracing::debug!(
                            room_id = %self.room_id,
                            %session_id,
                            %err,
                            "damage dropped"
                        );
                    }
                }
            }
        }
    }

    /// Tells an eliminated participant where to come back.
    ///
    /// The ordered client list is scanned for the target so only the
    /// eliminated participant receives the signal, never the shooter.
    fn send_respawn(&mut self, target_id: &SessionId) {
        let target = if self.config.use_random_spawn {
            let (x, z) =
                spawn::plane_spawn(self.config.plane_size, &mut self.rng);
            RespawnTarget::Position { x, z }
        } else {
            let index =
                spawn::point_spawn(self.config.points_length, &mut self.rng);
            RespawnTarget::Point { index }
        };

        for client in &self.clients {
            if client != target_id {
                continue;
            }
            self.send_to(client, Signal::Restart(target));
        }
    }

    /// Delivers a signal to the resolved recipients.
    fn dispatch(&self, recipient: Recipient, signal: Signal) {
        match recipient {
            Recipient::Player(session_id) => {
                self.send_to(&session_id, signal);
            }
            Recipient::AllExcept(excluded) => {
                for client in &self.clients {
                    if *client != excluded {
                        self.send_to(client, signal.clone());
                    }
                }
            }
        }
    }

    /// Sends a signal to a single participant. Silently drops if the
    /// receiving half is gone (participant disconnected).
    fn send_to(&self, session_id: &SessionId, signal: Signal) {
        if let Some(sender) = self.senders.get(session_id) {
            let _ = sender.send(signal);
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room_id,
            phase: self.phase,
            player_count: self.state.player_count(),
            max_clients: MAX_CLIENTS,
        }
    }
}

/// Spawns a room actor with an OS-seeded generator.
pub(crate) fn spawn_room(
    room_id: RoomId,
    config: RoomConfig,
    channel_size: usize,
) -> RoomHandle {
    spawn_room_with_rng(room_id, config, StdRng::from_os_rng(), channel_size)
}

/// Spawns a room actor with a caller-supplied generator, which is what
/// makes spawn placement and skin draws reproducible under test.
pub(crate) fn spawn_room_with_rng(
    room_id: RoomId,
    config: RoomConfig,
    rng: StdRng,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let skin_pool: Vec<i8> = (0..config.skin_count as i8).collect();
    let actor = RoomActor {
        room_id,
        phase: RoomPhase::Open,
        config,
        state: ArenaState::new(),
        clients: Vec::new(),
        senders: HashMap::new(),
        skin_pool,
        rng,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
