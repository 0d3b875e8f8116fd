//! Action recording - the player's past, captured for ghost playback.
//!
//! Every tick the recorder logs a "move" action; shots and pickups add their
//! own entries. Every `RECORD_INTERVAL` seconds the current buffer is sealed
//! into an immutable history segment. Segment N covers roughly the window
//! `[N * RECORD_INTERVAL, (N + 1) * RECORD_INTERVAL)` of game time.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::content::blueprints::MaterialKind;
use crate::content::powerups::PowerupKind;
use crate::content::weapons::WeaponKind;

/// Seconds of play captured per recording segment
pub const RECORD_INTERVAL: f32 = 10.0;

/// What a recorded action did, beyond the pose snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    /// Pose-only sample, logged once per tick
    Move,
    /// The player fired their equipped weapon
    Shoot,
    /// The player collected a pickup
    Pickup { payload: RecordedPickup },
}

/// Pickup payloads as they appear in a recording
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedPickup {
    Weapon(WeaponKind),
    Powerup(PowerupKind),
    Material { kind: MaterialKind, amount: u32 },
}

/// One timestamped entry in a recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Action {
    /// Absolute game time when the action happened
    pub t: f32,
    pub kind: ActionKind,
    pub position: Vec3,
    pub yaw: f32,
    /// Weapon equipped at that moment
    pub weapon: WeaponKind,
}

/// A sealed, immutable sequence of actions. Time-ordered by construction:
/// the recorder only ever appends.
#[derive(Debug)]
pub struct Recording {
    actions: Vec<Action>,
}

impl Recording {
    fn seal(actions: Vec<Action>) -> Self {
        debug_assert!(!actions.is_empty());
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Action> {
        self.actions.get(idx)
    }

    /// Timestamp of the first action; playback offsets are relative to this
    pub fn first_time(&self) -> f32 {
        self.actions[0].t
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

/// Captures player actions and seals them into history segments
#[derive(Debug, Default)]
pub struct ActionRecorder {
    current: Vec<Action>,
    history: Vec<Arc<Recording>>,
    last_flush: f32,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action stamped with the current game time and player pose
    pub fn record(
        &mut self,
        time: f32,
        kind: ActionKind,
        position: Vec3,
        yaw: f32,
        weapon: WeaponKind,
    ) {
        self.current.push(Action {
            t: time,
            kind,
            position,
            yaw,
            weapon,
        });
    }

    /// Seal the current buffer if the flush interval elapsed. An empty buffer
    /// is never sealed, so every history segment is non-empty. Returns the
    /// sealed segment index, if any.
    pub fn maybe_flush(&mut self, time: f32) -> Option<usize> {
        if time - self.last_flush < RECORD_INTERVAL {
            return None;
        }
        self.last_flush = time;
        if self.current.is_empty() {
            return None;
        }
        let sealed = Recording::seal(std::mem::take(&mut self.current));
        self.history.push(Arc::new(sealed));
        Some(self.history.len() - 1)
    }

    pub fn history(&self) -> &[Arc<Recording>] {
        &self.history
    }

    pub fn segment(&self, idx: usize) -> Option<Arc<Recording>> {
        self.history.get(idx).cloned()
    }

    /// Actions buffered since the last flush (for diagnostics)
    pub fn pending(&self) -> &[Action] {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_at(rec: &mut ActionRecorder, t: f32, x: f32) {
        rec.record(t, ActionKind::Move, Vec3::new(x, 1.0, 0.0), 0.0, WeaponKind::Pistol);
    }

    #[test]
    fn flush_seals_nonempty_buffer_in_order() {
        let mut rec = ActionRecorder::new();
        move_at(&mut rec, 1.0, 0.0);
        move_at(&mut rec, 2.0, 1.0);
        rec.record(
            3.0,
            ActionKind::Shoot,
            Vec3::new(1.0, 1.0, 0.0),
            0.5,
            WeaponKind::Rifle,
        );

        assert!(rec.maybe_flush(5.0).is_none(), "interval not yet elapsed");
        let seg = rec.maybe_flush(10.0).expect("should seal at 10s");
        assert_eq!(seg, 0);
        assert_eq!(rec.history().len(), 1);

        let recording = rec.segment(0).unwrap();
        assert_eq!(recording.len(), 3);
        let times: Vec<f32> = recording.actions().iter().map(|a| a.t).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(recording.first_time(), 1.0);
    }

    #[test]
    fn empty_buffer_is_never_sealed() {
        let mut rec = ActionRecorder::new();
        assert!(rec.maybe_flush(10.0).is_none());
        assert!(rec.maybe_flush(20.0).is_none());
        assert!(rec.history().is_empty());

        // The flush timer still resets, so a later action lands in a fresh
        // window rather than sealing immediately.
        move_at(&mut rec, 20.5, 0.0);
        assert!(rec.maybe_flush(21.0).is_none());
        assert!(rec.maybe_flush(30.0).is_some());
    }

    #[test]
    fn pickup_actions_carry_payload() {
        let mut rec = ActionRecorder::new();
        rec.record(
            0.5,
            ActionKind::Pickup {
                payload: RecordedPickup::Weapon(WeaponKind::Shotgun),
            },
            Vec3::ZERO,
            0.0,
            WeaponKind::Shotgun,
        );
        rec.maybe_flush(10.0).unwrap();
        let recording = rec.segment(0).unwrap();
        match recording.get(0).unwrap().kind {
            ActionKind::Pickup {
                payload: RecordedPickup::Weapon(w),
            } => assert_eq!(w, WeaponKind::Shotgun),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
