//! Ghost playback - past versions of the player replayed as adversaries.
//!
//! Once game time passes `GHOST_SPAWN_TIME` and a sealed recording exists,
//! a ghost spawns every `RECORD_INTERVAL` seconds, each bound to the history
//! segment matching its spawn window. Ghost N replays `history[N]`, so the
//! arena fills with progressively more past selves as a run goes on.

use std::sync::Arc;

use glam::Vec3;
use tracing::debug;
use uuid::Uuid;

use crate::content::powerups::{PowerupKind, DAMAGE_BOOST_MULTIPLIER};
use crate::content::weapons::WeaponKind;

use super::combat;
use super::events::GameEvent;
use super::recording::{ActionKind, RecordedPickup, Recording, RECORD_INTERVAL};
use super::SimulationState;

/// Game time before the first ghost may appear
pub const GHOST_SPAWN_TIME: f32 = 30.0;
/// Health a ghost spawns with (independent of what the player had)
pub const GHOST_HEALTH: f32 = 100.0;

/// A replaying past self
#[derive(Debug, Clone)]
pub struct Ghost {
    pub id: Uuid,
    recording: Arc<Recording>,
    /// Next action to replay; never rewinds
    cursor: usize,
    /// Game time when playback began
    pub start_time: f32,
    pub position: Vec3,
    pub yaw: f32,
    pub weapon: WeaponKind,
    pub health: f32,
    pub damage_multiplier: f32,
    pub alive: bool,
}

impl Ghost {
    fn new(recording: Arc<Recording>, start_time: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            recording,
            cursor: 0,
            start_time,
            position: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            weapon: WeaponKind::Pistol,
            health: GHOST_HEALTH,
            damage_multiplier: 1.0,
            alive: true,
        }
    }

    /// Playback progress for diagnostics
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn for_test(position: Vec3) -> Self {
        let mut recorder = super::recording::ActionRecorder::new();
        recorder.record(0.0, ActionKind::Move, position, 0.0, WeaponKind::Pistol);
        recorder.maybe_flush(RECORD_INTERVAL);
        let recording = recorder.segment(0).unwrap();
        let mut ghost = Self::new(recording, 0.0);
        ghost.position = position;
        ghost
    }
}

/// Spawn a ghost if its window has arrived: game time past the threshold, a
/// full record interval since the previous spawn, and a sealed segment
/// matching the window index.
pub fn maybe_spawn(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    if state.time < GHOST_SPAWN_TIME || state.recorder.history().is_empty() {
        return;
    }

    let segment = ((state.time - GHOST_SPAWN_TIME) / RECORD_INTERVAL) as usize;
    if state.time - state.last_ghost_spawn < RECORD_INTERVAL {
        return;
    }
    let Some(recording) = state.recorder.segment(segment) else {
        return;
    };

    let ghost = Ghost::new(recording, state.time);
    debug!(ghost_id = %ghost.id, segment, time = f64::from(state.time), "ghost spawned");
    events.push(GameEvent::GhostSpawned {
        ghost_id: ghost.id,
        segment,
    });
    state.ghosts.push(ghost);
    state.last_ghost_spawn = state.time;
}

/// Advance every ghost's playback cursor: replay all actions whose relative
/// timestamp has been reached, then stop. A ghost that outlives its recording
/// holds its last pose.
pub fn update(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let SimulationState {
        ghosts,
        projectiles,
        rng,
        time,
        ..
    } = state;

    for ghost in ghosts.iter_mut().filter(|g| g.alive) {
        let elapsed = *time - ghost.start_time;
        let first_time = ghost.recording.first_time();

        while let Some(action) = ghost.recording.get(ghost.cursor) {
            if action.t - first_time > elapsed {
                break;
            }

            match action.kind {
                ActionKind::Move => {
                    ghost.position = action.position;
                    ghost.yaw = action.yaw;
                }
                ActionKind::Shoot => {
                    combat::ghost_fire(ghost, action.weapon, rng, projectiles, events);
                }
                ActionKind::Pickup { payload } => match payload {
                    RecordedPickup::Weapon(weapon) => ghost.weapon = weapon,
                    RecordedPickup::Powerup(PowerupKind::DamageBoost) => {
                        ghost.damage_multiplier = DAMAGE_BOOST_MULTIPLIER;
                    }
                    // Speed/shield change nothing for a ghost: movement is
                    // replayed verbatim and ghosts take damage normally
                    RecordedPickup::Powerup(_) | RecordedPickup::Material { .. } => {}
                },
            }
            ghost.cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArenaLayout;
    use crate::sim::{FrameInput, Simulation};
    use crate::util::time::tick_delta;

    /// Drive the sim with empty input until the given game time, collecting
    /// every emitted event
    fn run_until(sim: &mut Simulation, t: f32, events: &mut Vec<GameEvent>) {
        let dt = tick_delta();
        while sim.state.time < t {
            events.extend(sim.tick(dt, &FrameInput::default()));
        }
    }

    #[test]
    fn no_ghost_before_spawn_threshold() {
        let mut sim = Simulation::new(3, ArenaLayout::empty());
        let mut events = Vec::new();
        run_until(&mut sim, GHOST_SPAWN_TIME - 0.5, &mut events);
        assert!(sim.state.ghosts.is_empty());
    }

    #[test]
    fn ghost_n_binds_history_n_with_interval_spacing() {
        let mut sim = Simulation::new(3, ArenaLayout::empty());
        let mut events = Vec::new();

        run_until(&mut sim, GHOST_SPAWN_TIME + 0.5, &mut events);
        assert_eq!(sim.state.ghosts.len(), 1, "first ghost at 30s");

        run_until(&mut sim, GHOST_SPAWN_TIME + RECORD_INTERVAL - 0.5, &mut events);
        assert_eq!(sim.state.ghosts.len(), 1, "second ghost not before 40s");

        run_until(&mut sim, GHOST_SPAWN_TIME + RECORD_INTERVAL + 0.5, &mut events);
        assert_eq!(sim.state.ghosts.len(), 2);

        // Segment binding is visible through the spawn events
        let segments: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GhostSpawned { segment, .. } => Some(*segment),
                _ => None,
            })
            .collect();
        assert_eq!(segments, vec![0, 1]);
    }

    #[test]
    fn playback_replays_moves_in_order_and_holds_last_pose() {
        let mut sim = Simulation::new(3, ArenaLayout::empty());
        let mut recorder = crate::sim::recording::ActionRecorder::new();
        recorder.record(
            5.0,
            ActionKind::Move,
            Vec3::new(1.0, 1.0, 0.0),
            0.1,
            WeaponKind::Pistol,
        );
        recorder.record(
            6.0,
            ActionKind::Move,
            Vec3::new(2.0, 1.0, 0.0),
            0.2,
            WeaponKind::Pistol,
        );
        recorder.maybe_flush(RECORD_INTERVAL);
        let ghost = Ghost::new(recorder.segment(0).unwrap(), 100.0);
        let ghost_id = ghost.id;
        sim.state.ghosts.push(ghost);
        sim.state.time = 100.5;

        let mut events = Vec::new();
        update(&mut sim.state, &mut events);
        let ghost = sim.state.ghosts.iter().find(|g| g.id == ghost_id).unwrap();
        assert_eq!(ghost.position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(ghost.cursor(), 1);

        // Past the end of the recording, the cursor pins and pose holds
        sim.state.time = 130.0;
        update(&mut sim.state, &mut events);
        update(&mut sim.state, &mut events);
        let ghost = sim.state.ghosts.iter().find(|g| g.id == ghost_id).unwrap();
        assert_eq!(ghost.position, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(ghost.yaw, 0.2);
        assert_eq!(ghost.cursor(), 2);
    }

    #[test]
    fn replayed_shot_spawns_hostile_projectile() {
        let mut sim = Simulation::new(3, ArenaLayout::empty());
        let mut recorder = crate::sim::recording::ActionRecorder::new();
        recorder.record(
            0.0,
            ActionKind::Move,
            Vec3::new(5.0, 1.0, 5.0),
            0.0,
            WeaponKind::Pistol,
        );
        recorder.record(
            1.0,
            ActionKind::Shoot,
            Vec3::new(5.0, 1.0, 5.0),
            0.0,
            WeaponKind::Pistol,
        );
        recorder.maybe_flush(RECORD_INTERVAL);
        sim.state.ghosts.push(Ghost::new(recorder.segment(0).unwrap(), 50.0));
        sim.state.time = 52.0;

        let mut events = Vec::new();
        update(&mut sim.state, &mut events);
        assert_eq!(sim.state.projectiles.len(), 1);
        assert_eq!(
            sim.state.projectiles[0].hostility,
            crate::sim::combat::Hostility::ToPlayer
        );
    }

    #[test]
    fn pickup_replay_updates_weapon_and_damage_boost() {
        let mut sim = Simulation::new(3, ArenaLayout::empty());
        let mut recorder = crate::sim::recording::ActionRecorder::new();
        recorder.record(
            0.0,
            ActionKind::Pickup {
                payload: RecordedPickup::Weapon(WeaponKind::Rifle),
            },
            Vec3::ZERO,
            0.0,
            WeaponKind::Rifle,
        );
        recorder.record(
            1.0,
            ActionKind::Pickup {
                payload: RecordedPickup::Powerup(PowerupKind::DamageBoost),
            },
            Vec3::ZERO,
            0.0,
            WeaponKind::Rifle,
        );
        recorder.maybe_flush(RECORD_INTERVAL);
        sim.state.ghosts.push(Ghost::new(recorder.segment(0).unwrap(), 50.0));
        sim.state.time = 55.0;

        let mut events = Vec::new();
        update(&mut sim.state, &mut events);
        let ghost = &sim.state.ghosts[0];
        assert_eq!(ghost.weapon, WeaponKind::Rifle);
        assert_eq!(ghost.damage_multiplier, DAMAGE_BOOST_MULTIPLIER);
    }
}
