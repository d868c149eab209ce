//! Integration tests driving the room session through the public
//! `RoomManager` / `RoomHandle` API, the way a hosting layer would.

use std::time::Duration;

use skirmish_protocol::{
    DamageIntent, Intent, JoinData, MoveIntent, RespawnTarget, RoomId,
    SessionId, Signal,
};
use skirmish_room::{
    PlayerSender, RoomConfig, RoomManager, RoomPhase, MAX_CLIENTS,
};
use tokio::sync::mpsc;

// =========================================================================
// Helpers
// =========================================================================

fn sid(id: &str) -> SessionId {
    SessionId::new(id)
}

fn join_data(max_hp: i16) -> JoinData {
    JoinData {
        max_hp,
        speed: 6.5,
        px: 0.0,
        py: 0.0,
        pz: 0.0,
        rot_y: 0.0,
    }
}

/// Creates a dummy player sender (receiver is dropped immediately).
fn dummy_sender() -> PlayerSender {
    mpsc::unbounded_channel().0
}

fn damage(target: &str, value: i16) -> Intent {
    Intent::Damage(DamageIntent {
        target_id: sid(target),
        value,
    })
}

/// Lets the room actor drain its command queue.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// =========================================================================
// RoomManager tests
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_unique_ids() {
    let mut mgr = RoomManager::new();
    let r1 = mgr.create_room(RoomConfig::default());
    let r2 = mgr.create_room(RoomConfig::default());
    assert_ne!(r1, r2);
    assert_eq!(mgr.room_count(), 2);
}

#[tokio::test]
async fn test_join_room_success() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    mgr.join_room(sid("a"), room, join_data(100), dummy_sender())
        .await
        .unwrap();

    assert_eq!(mgr.player_room(&sid("a")), Some(room));
}

#[tokio::test]
async fn test_join_room_not_found() {
    let mut mgr = RoomManager::new();
    let result = mgr
        .join_room(sid("a"), RoomId(999_999), join_data(100), dummy_sender())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_join_room_one_room_at_a_time() {
    let mut mgr = RoomManager::new();
    let r1 = mgr.create_room(RoomConfig::default());
    let r2 = mgr.create_room(RoomConfig::default());

    mgr.join_room(sid("a"), r1, join_data(100), dummy_sender())
        .await
        .unwrap();
    let result = mgr
        .join_room(sid("a"), r2, join_data(100), dummy_sender())
        .await;
    assert!(result.is_err(), "participant should not join two rooms");
}

#[tokio::test]
async fn test_second_join_locks_the_room() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    mgr.join_room(sid("a"), room, join_data(100), dummy_sender())
        .await
        .unwrap();
    let info = mgr.room_info(room).await.unwrap();
    assert_eq!(info.phase, RoomPhase::Open);

    mgr.join_room(sid("b"), room, join_data(100), dummy_sender())
        .await
        .unwrap();
    let info = mgr.room_info(room).await.unwrap();
    assert_eq!(info.phase, RoomPhase::Locked);
    assert_eq!(info.player_count, 2);
    assert_eq!(info.max_clients, MAX_CLIENTS);
}

#[tokio::test]
async fn test_third_join_is_rejected_without_side_effects() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    mgr.join_room(sid("a"), room, join_data(100), dummy_sender())
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), dummy_sender())
        .await
        .unwrap();

    let result = mgr
        .join_room(sid("c"), room, join_data(100), dummy_sender())
        .await;
    assert!(result.is_err(), "room is at capacity");

    let info = mgr.room_info(room).await.unwrap();
    assert_eq!(info.player_count, 2, "rejected join must not mutate state");
    assert_eq!(mgr.player_room(&sid("c")), None);
}

#[tokio::test]
async fn test_leave_does_not_reopen_a_locked_room() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    mgr.join_room(sid("a"), room, join_data(100), dummy_sender())
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), dummy_sender())
        .await
        .unwrap();
    mgr.leave_room(sid("b")).await.unwrap();

    let info = mgr.room_info(room).await.unwrap();
    assert_eq!(info.player_count, 1);
    assert_eq!(info.phase, RoomPhase::Locked, "the lock is one-way");

    let result = mgr
        .join_room(sid("c"), room, join_data(100), dummy_sender())
        .await;
    assert!(result.is_err(), "locked rooms reject joins even half-empty");
}

#[tokio::test]
async fn test_leave_room_not_in_any_room() {
    let mut mgr = RoomManager::new();
    let result = mgr.leave_room(sid("ghost")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_route_intent_not_in_room() {
    let mgr = RoomManager::new();
    let result = mgr
        .route_intent(sid("ghost"), damage("a", 10))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_dispose_room_clears_participants() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());
    mgr.join_room(sid("a"), room, join_data(100), dummy_sender())
        .await
        .unwrap();

    mgr.dispose_room(room).await.unwrap();

    assert_eq!(mgr.room_count(), 0);
    assert_eq!(mgr.player_room(&sid("a")), None);
}

#[tokio::test]
async fn test_dispose_room_not_found() {
    let mut mgr = RoomManager::new();
    let result = mgr.dispose_room(RoomId(999_999)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_room_ids() {
    let mut mgr = RoomManager::new();
    let r1 = mgr.create_room(RoomConfig::default());
    let r2 = mgr.create_room(RoomConfig::default());

    let ids = mgr.room_ids();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&r1));
    assert!(ids.contains(&r2));
}

// =========================================================================
// Signal delivery tests
// =========================================================================

#[tokio::test]
async fn test_joiner_is_greeted_once() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    let (tx, mut rx) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx)
        .await
        .unwrap();

    assert_eq!(rx.try_recv().unwrap(), Signal::Hello("world".into()));
    assert!(rx.try_recv().is_err(), "exactly one greeting");
}

#[tokio::test]
async fn test_shoot_reaches_the_other_participant_only() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), tx_b)
        .await
        .unwrap();

    // Drain greetings.
    let _ = rx_a.try_recv();
    let _ = rx_b.try_recv();

    let payload = serde_json::json!({ "origin": [0.0, 1.0, 0.0], "weapon": 2 });
    mgr.route_intent(sid("a"), Intent::Shoot(payload.clone()))
        .await
        .unwrap();
    settle().await;

    match rx_b.try_recv().unwrap() {
        Signal::Shoot(received) => assert_eq!(received, payload),
        other => panic!("expected Shoot, got {other:?}"),
    }
    assert!(rx_a.try_recv().is_err(), "shot must not echo to the shooter");
}

#[tokio::test]
async fn test_damage_below_threshold_emits_no_signal() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), tx_b)
        .await
        .unwrap();
    let _ = rx_a.try_recv();
    let _ = rx_b.try_recv();

    mgr.route_intent(sid("a"), damage("b", 40)).await.unwrap();
    settle().await;

    assert!(rx_a.try_recv().is_err());
    assert!(rx_b.try_recv().is_err(), "survival is silent");
}

#[tokio::test]
async fn test_elimination_restarts_the_target_only() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::random_spawn(10.0));

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), tx_b)
        .await
        .unwrap();
    let _ = rx_a.try_recv();
    let _ = rx_b.try_recv();

    // 40 then 70: the second hit crosses zero and eliminates.
    mgr.route_intent(sid("a"), damage("b", 40)).await.unwrap();
    mgr.route_intent(sid("a"), damage("b", 70)).await.unwrap();
    settle().await;

    match rx_b.try_recv().unwrap() {
        Signal::Restart(RespawnTarget::Position { x, z }) => {
            assert!((-5.0..5.0).contains(&x));
            assert!((-5.0..5.0).contains(&z));
        }
        other => panic!("expected Restart, got {other:?}"),
    }
    assert!(rx_b.try_recv().is_err(), "exactly one restart");
    assert!(rx_a.try_recv().is_err(), "the shooter gets nothing");
}

#[tokio::test]
async fn test_damage_against_unknown_target_is_dropped() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), tx_b)
        .await
        .unwrap();
    let _ = rx_a.try_recv();
    let _ = rx_b.try_recv();

    mgr.route_intent(sid("a"), damage("ghost", 50)).await.unwrap();
    settle().await;

    // The bad intent cost nothing: the session still works.
    mgr.route_intent(sid("a"), damage("b", 100)).await.unwrap();
    settle().await;

    assert!(matches!(rx_b.try_recv().unwrap(), Signal::Restart(_)));
}

#[tokio::test]
async fn test_move_intent_is_accepted_silently() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    let (tx, mut rx) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx)
        .await
        .unwrap();
    let _ = rx.try_recv();

    let movement = Intent::Move(MoveIntent {
        px: 1.0,
        py: 0.0,
        pz: -2.0,
        vx: 0.5,
        vy: 0.0,
        vz: 0.1,
        rx: 0.0,
        ry: 1.2,
    });
    mgr.route_intent(sid("a"), movement).await.unwrap();
    settle().await;

    // Movement replicates through state sync, not signals.
    assert!(rx.try_recv().is_err());

    let info = mgr.room_info(room).await.unwrap();
    assert_eq!(info.player_count, 1);
}

#[tokio::test]
async fn test_leave_stops_receiving() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::default());

    let (tx_a, _rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), tx_b)
        .await
        .unwrap();
    while rx_b.try_recv().is_ok() {}

    mgr.leave_room(sid("b")).await.unwrap();

    // A shot from the remaining participant reaches nobody.
    mgr.route_intent(sid("a"), Intent::Shoot(serde_json::json!({})))
        .await
        .unwrap();
    settle().await;

    assert!(rx_b.try_recv().is_err());
}

// =========================================================================
// Spawn-point flavor
// =========================================================================

#[tokio::test]
async fn test_spawn_point_room_respawns_by_index() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::spawn_points(4, 8));

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(100), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(100), tx_b)
        .await
        .unwrap();

    assert!(rx_a.try_recv().is_err(), "this flavor does not greet");

    mgr.route_intent(sid("a"), damage("b", 100)).await.unwrap();
    settle().await;

    match rx_b.try_recv().unwrap() {
        Signal::Restart(RespawnTarget::Point { index }) => {
            assert!(index < 4);
        }
        other => panic!("expected an index respawn, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_spawn_point_always_yields_index_zero() {
    let mut mgr = RoomManager::new();
    let room = mgr.create_room(RoomConfig::spawn_points(1, 2));

    let (tx_a, _rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    mgr.join_room(sid("a"), room, join_data(50), tx_a)
        .await
        .unwrap();
    mgr.join_room(sid("b"), room, join_data(50), tx_b)
        .await
        .unwrap();

    for _ in 0..3 {
        mgr.route_intent(sid("a"), damage("b", 50)).await.unwrap();
    }
    settle().await;

    for _ in 0..3 {
        match rx_b.try_recv().unwrap() {
            Signal::Restart(RespawnTarget::Point { index }) => {
                assert_eq!(index, 0);
            }
            other => panic!("expected an index respawn, got {other:?}"),
        }
    }
}
