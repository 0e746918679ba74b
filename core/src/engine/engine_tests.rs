//! Tests for the state engine
//!
//! Covers coordinate conversion, heading smoothing, zone filtering and the
//! corpse lifecycle, plus the async consumer loop.

use std::f64::consts::FRAC_PI_4;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use super::{GameSignal, PlayerState, SignalHandler, StateEngine};
use crate::tailer::LogLine;

/// Build a `/loc` line that converts to map position (x, y, z).
fn loc(x: f64, y: f64, z: f64) -> String {
    format!("Your Location is {:.2}, {:.2}, {:.2}", -y, -x, z)
}

struct Recorder(Arc<Mutex<Vec<GameSignal>>>);

impl SignalHandler for Recorder {
    fn handle_signal(&mut self, signal: &GameSignal) {
        self.0.lock().unwrap().push(signal.clone());
    }
}

fn engine_with_recorder() -> (StateEngine, Arc<Mutex<Vec<GameSignal>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut engine = StateEngine::new();
    engine.add_signal_handler(Box::new(Recorder(Arc::clone(&seen))));
    (engine, seen)
}

// ─────────────────────────────────────────────────────────────────────────────
// Position & heading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_location_is_swapped_and_negated() {
    let mut engine = StateEngine::new();
    engine.process_line("[Thu Oct 15 21:00:00 2026] Your Location is 10, 20, 3");

    let state = engine.state();
    assert_eq!((state.x, state.y, state.z), (-20.0, -10.0, 3.0));
}

#[test]
fn test_first_sample_leaves_heading_at_zero() {
    let mut engine = StateEngine::new();
    engine.process_line(&loc(100.0, 100.0, 0.0));
    assert_eq!(engine.state().heading, 0.0);
}

#[test]
fn test_heading_follows_movement() {
    let mut engine = StateEngine::new();
    engine.process_line(&loc(0.0, 0.0, 0.0));
    let signal = engine.process_line(&loc(5.0, 5.0, 0.0));

    assert!((engine.state().heading - FRAC_PI_4).abs() < 1e-9);
    match signal {
        Some(GameSignal::PositionUpdated { x, y, heading, .. }) => {
            assert_eq!((x, y), (5.0, 5.0));
            assert!((heading - 0.785).abs() < 1e-3);
        }
        other => panic!("expected PositionUpdated, got {:?}", other),
    }
}

#[test]
fn test_small_moves_keep_heading() {
    let mut engine = StateEngine::new();
    engine.process_line(&loc(0.0, 0.0, 0.0));
    engine.process_line(&loc(0.0, 10.0, 0.0));
    let heading = engine.state().heading;
    assert!((heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);

    engine.process_line(&loc(0.05, 10.08, 1.0));
    assert_eq!(engine.state().heading, heading);
    // Position still updates even when the heading does not.
    assert!((engine.state().x - 0.05).abs() < 1e-9);
    assert!((engine.state().y - 10.08).abs() < 1e-9);
    assert_eq!(engine.state().z, 1.0);
}

#[test]
fn test_heading_uses_previous_sample_not_origin() {
    let mut engine = StateEngine::new();
    engine.process_line(&loc(0.0, 0.0, 0.0));
    engine.process_line(&loc(10.0, 0.0, 0.0));
    assert_eq!(engine.state().heading, 0.0);

    // Moving back toward the origin points the heading at pi.
    engine.process_line(&loc(5.0, 0.0, 0.0));
    assert!((engine.state().heading - std::f64::consts::PI).abs() < 1e-9);
}

// ─────────────────────────────────────────────────────────────────────────────
// Zones
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zone_change() {
    let mut engine = StateEngine::new();
    let signal = engine.process_line("You have entered The Nexus.");

    assert_eq!(engine.state().zone, "The Nexus");
    assert_eq!(
        signal,
        Some(GameSignal::ZoneChanged {
            from: String::new(),
            to: "The Nexus".to_string()
        })
    );
}

#[test]
fn test_pvp_area_annotation_ignored() {
    let mut engine = StateEngine::new();
    engine.process_line("You have entered The Nexus.");

    assert_eq!(engine.process_line("You have entered an Arena (PvP) area."), None);
    assert_eq!(engine.process_line("You have entered a no-combat area."), None);
    assert_eq!(engine.state().zone, "The Nexus");
}

#[test]
fn test_reentering_same_zone_is_silent() {
    let mut engine = StateEngine::new();
    engine.process_line("You have entered The Nexus.");
    assert_eq!(engine.process_line("You have entered The Nexus."), None);
}

#[test]
fn test_seed_zone() {
    let mut engine = StateEngine::new();
    engine.seed_zone(Some("East Commonlands"));
    assert_eq!(engine.state().zone(), Some("East Commonlands"));

    engine.seed_zone(None);
    engine.seed_zone(Some(""));
    assert_eq!(engine.state().zone, "East Commonlands");

    // Seeded zone counts as current; entering it again changes nothing.
    assert_eq!(engine.process_line("You have entered East Commonlands."), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Corpse lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_corpse_stays_where_player_died() {
    let mut engine = StateEngine::new();
    engine.process_line("You have entered A.");
    engine.process_line(&loc(5.0, 5.0, 0.0));
    engine.process_line("You have been slain by a skeleton!");
    engine.process_line(&loc(9.0, 9.0, 0.0));

    let corpse = engine.state().corpse.clone().expect("corpse should be set");
    assert_eq!((corpse.x, corpse.y, corpse.zone.as_str()), (5.0, 5.0, "A"));
    assert_eq!((engine.state().x, engine.state().y), (9.0, 9.0));

    engine.process_line("You have been resurrected by Cleric.");
    assert!(!engine.state().has_corpse());
}

#[test]
fn test_second_death_overwrites_corpse() {
    let mut engine = StateEngine::new();
    engine.process_line("You have entered A.");
    engine.process_line(&loc(1.0, 1.0, 0.0));
    engine.process_line("You have been slain by a skeleton!");
    engine.process_line("You have entered B.");
    engine.process_line(&loc(2.0, 2.0, 0.0));
    engine.process_line("You have been slain by a ghoul!");

    let corpse = engine.state().corpse.clone().unwrap();
    assert_eq!((corpse.x, corpse.y, corpse.zone.as_str()), (2.0, 2.0, "B"));
}

#[test]
fn test_each_recovery_phrase_clears_corpse() {
    for phrase in [
        "Summoning your corpse.",
        "You receive a resurrection from Cleric.",
        "You have been resurrected.",
        "Your corpse decays.",
        "You summon your corpse.",
    ] {
        let mut engine = StateEngine::new();
        engine.process_line("You have been slain!");
        assert!(engine.state().has_corpse());
        assert_eq!(engine.process_line(phrase), Some(GameSignal::CorpseRecovered));
        assert!(!engine.state().has_corpse(), "{} did not clear", phrase);
    }
}

#[test]
fn test_recovery_without_corpse_is_noop() {
    let mut engine = StateEngine::new();
    assert_eq!(engine.process_line("You have been resurrected."), None);
}

#[test]
fn test_unrelated_lines_change_nothing() {
    let mut engine = StateEngine::new();
    engine.process_line("You have entered The Nexus.");
    let before = engine.state().clone();
    assert_eq!(engine.process_line("Fippy shouts, 'I will destroy you!'"), None);
    assert_eq!(engine.state(), &before);
}

// ─────────────────────────────────────────────────────────────────────────────
// Consumer loop
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_run_publishes_state_and_dispatches_in_order() {
    let (mut engine, seen) = engine_with_recorder();
    engine.seed_zone(Some("North Qeynos"));
    let handle = engine.state_handle();

    let (tx, rx) = mpsc::channel(8);
    let task = engine.spawn(rx);

    for text in [
        "You have entered The Nexus.".to_string(),
        loc(0.0, 0.0, 0.0),
        "nothing to see".to_string(),
        loc(5.0, 5.0, 2.0),
        "You have been slain by a vah shir!".to_string(),
    ] {
        tx.send(LogLine::new(text)).await.unwrap();
    }
    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("engine did not stop")
        .unwrap();

    let state: PlayerState = handle.snapshot().await;
    assert_eq!(state.zone, "The Nexus");
    assert_eq!((state.x, state.y, state.z), (5.0, 5.0, 2.0));
    assert!(state.has_corpse());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(
        seen[0],
        GameSignal::ZoneChanged {
            from: "North Qeynos".to_string(),
            to: "The Nexus".to_string()
        }
    );
    assert!(matches!(seen[1], GameSignal::PositionUpdated { .. }));
    assert!(matches!(seen[2], GameSignal::PositionUpdated { .. }));
    assert!(matches!(&seen[3], GameSignal::PlayerDied(c) if c.zone == "The Nexus"));
}

#[tokio::test]
async fn test_seeded_zone_visible_before_any_line() {
    let mut engine = StateEngine::new();
    engine.seed_zone(Some("Befallen"));
    let handle = engine.state_handle();

    let (tx, rx) = mpsc::channel(1);
    let task = engine.spawn(rx);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(handle.snapshot().await.zone, "Befallen");
    drop(tx);
    task.await.unwrap();
}

#[test]
fn test_blocking_snapshot_outside_runtime() {
    let engine = StateEngine::new();
    let handle = engine.state_handle();
    assert_eq!(handle.blocking_snapshot(), PlayerState::default());
}
