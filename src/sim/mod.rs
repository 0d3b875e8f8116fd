//! Simulation core: a single-player arena where the opposition is the
//! player's own past. Actions are recorded in fixed intervals; sealed
//! recordings come back as hostile ghosts that replay them.
//!
//! The world advances in fixed ticks. Each tick consumes one frame of
//! input, runs every subsystem in a fixed stage order, and returns the
//! events the tick produced.

pub mod build;
pub mod combat;
pub mod destruction;
pub mod events;
pub mod ghost;
pub mod pickup;
pub mod player;
pub mod recording;
pub mod snapshot;
pub mod spatial;
pub mod vehicle;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::content::arena::ArenaLayout;
use crate::content::blueprints::BlueprintKind;

use build::{BuildState, Inventory, PlayerStructure};
use combat::Projectile;
use destruction::{BuildingPart, Debris};
use events::GameEvent;
use ghost::Ghost;
use pickup::Pickup;
use player::PlayerState;
use recording::{ActionKind, ActionRecorder};
use spatial::Aabb;
use vehicle::Vehicle;

/// Session phase. There is no respawn: the first death ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Running,
    GameOver,
}

/// One frame of player intent, sampled by the host once per tick
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Aim deltas in radians for this frame
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    pub fire: bool,
    pub toggle_build: bool,
    pub select_blueprint: Option<BlueprintKind>,
    pub place: bool,
    pub toggle_vehicle: bool,
}

/// A walkable surface the player can land on. Arena platforms, load-bearing
/// building parts, and load-bearing player structures all register here.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub id: Uuid,
    pub aabb: Aabb,
}

/// Part damage queued by the combat stage and applied by the destruction
/// stage in the same tick
#[derive(Debug, Clone, Copy)]
pub struct PendingPartDamage {
    pub part_id: Uuid,
    pub amount: f32,
}

/// The whole mutable world. Subsystem stage functions take this and
/// destructure the fields they need.
#[derive(Debug)]
pub struct SimulationState {
    pub phase: Phase,
    /// Game time in seconds, frozen on game over
    pub time: f32,
    pub tick: u64,
    /// Seeded per session so pellet spread and debris replay identically
    pub rng: ChaCha8Rng,
    pub layout: ArenaLayout,
    pub player: PlayerState,
    pub ghosts: Vec<Ghost>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub vehicles: Vec<Vehicle>,
    pub platforms: Vec<Platform>,
    pub parts: Vec<BuildingPart>,
    pub structures: Vec<PlayerStructure>,
    pub debris: Vec<Debris>,
    pub inventory: Inventory,
    pub build: BuildState,
    pub recorder: ActionRecorder,
    /// Game time of the last ghost spawn; spawns are at least one record
    /// interval apart
    pub last_ghost_spawn: f32,
    pub last_pickup_respawn: f32,
    pub pending_part_damage: Vec<PendingPartDamage>,
}

/// The simulation host: owns the state and drives the per-tick stage order
pub struct Simulation {
    pub state: SimulationState,
}

impl Simulation {
    pub fn new(seed: u64, layout: ArenaLayout) -> Self {
        let mut platforms: Vec<Platform> = layout
            .platforms
            .iter()
            .map(|spec| Platform {
                id: Uuid::new_v4(),
                aabb: Aabb::from_center_size(spec.center, spec.size),
            })
            .collect();

        let mut parts = Vec::new();
        for building in &layout.buildings {
            let building_id = Uuid::new_v4();
            for spec in &building.parts {
                let aabb = Aabb::from_center_size(spec.center, spec.size);
                let mut part = BuildingPart::new(spec.kind, building_id, spec.floor, aabb);
                if spec.kind.is_load_bearing() {
                    let platform_id = Uuid::new_v4();
                    platforms.push(Platform {
                        id: platform_id,
                        aabb,
                    });
                    part.platform = Some(platform_id);
                }
                parts.push(part);
            }
        }

        let vehicles = layout
            .vehicle_spawns
            .iter()
            .map(|&(position, yaw, kind)| Vehicle::new(kind, position, yaw))
            .collect();

        let mut state = SimulationState {
            phase: Phase::Running,
            time: 0.0,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            layout,
            player: PlayerState::new(),
            ghosts: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            vehicles,
            platforms,
            parts,
            structures: Vec::new(),
            debris: Vec::new(),
            inventory: Inventory::new(),
            build: BuildState::default(),
            recorder: ActionRecorder::new(),
            last_ghost_spawn: 0.0,
            last_pickup_respawn: 0.0,
            pending_part_damage: Vec::new(),
        };
        pickup::spawn_table(&mut state);

        Self { state }
    }

    /// Advance the world by one fixed step. Returns the events the tick
    /// produced, in emission order. After game over every tick is a no-op.
    pub fn tick(&mut self, dt: f32, input: &FrameInput) -> Vec<GameEvent> {
        let state = &mut self.state;
        if state.phase == Phase::GameOver {
            return Vec::new();
        }

        state.tick += 1;
        state.time += dt;
        let mut events = Vec::new();

        player::update(state, input, dt);

        if input.toggle_vehicle {
            vehicle::toggle(state, &mut events);
        }
        vehicle::update(state, input, dt);

        if input.fire {
            combat::try_fire_player(state, &mut events);
        }
        combat::advance(state, dt, &mut events);

        ghost::update(state, &mut events);

        destruction::apply_pending(state, &mut events);
        destruction::update_debris(state, dt);

        pickup::update(state, &mut events);
        player::expire_effects(state, &mut events);

        state.recorder.record(
            state.time,
            ActionKind::Move,
            state.player.position,
            state.player.yaw,
            state.player.weapon,
        );
        if let Some(segment) = state.recorder.maybe_flush(state.time) {
            let actions = state
                .recorder
                .segment(segment)
                .map(|r| r.len())
                .unwrap_or(0);
            info!(segment, actions, time = f64::from(state.time), "recording sealed");
            events.push(GameEvent::RecordingSealed { segment, actions });
        }
        ghost::maybe_spawn(state, &mut events);

        build::update(state, input, &mut events);

        if state.phase == Phase::GameOver {
            info!(survived_secs = f64::from(state.time), "run over");
        }

        events
    }

    /// Pose teleport for scripted demos and tests
    pub fn place_player(&mut self, position: Vec3, yaw: f32) {
        self.state.player.position = position;
        self.state.player.yaw = yaw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::time::tick_delta;

    #[test]
    fn standard_layout_registers_load_bearing_platforms() {
        let sim = Simulation::new(1, ArenaLayout::standard());

        let arena_platforms = sim.state.layout.platforms.len();
        assert!(sim.state.platforms.len() > arena_platforms);

        for part in sim.state.parts.iter().filter(|p| p.kind.is_load_bearing()) {
            let id = part.platform.expect("load-bearing part has a platform");
            assert!(sim.state.platforms.iter().any(|p| p.id == id));
        }
        for part in sim.state.parts.iter().filter(|p| !p.kind.is_load_bearing()) {
            assert!(part.platform.is_none());
        }
    }

    #[test]
    fn ticks_freeze_after_game_over() {
        let mut sim = Simulation::new(1, ArenaLayout::empty());
        sim.state.player.health = 5.0;
        let mut events = Vec::new();
        player::damage(&mut sim.state, 10.0, &mut events);
        assert_eq!(sim.state.phase, Phase::GameOver);

        let frozen = sim.state.time;
        let out = sim.tick(tick_delta(), &FrameInput::default());
        assert!(out.is_empty());
        assert_eq!(sim.state.time, frozen);
    }

    #[test]
    fn every_tick_records_a_move_action() {
        let mut sim = Simulation::new(1, ArenaLayout::empty());
        for _ in 0..10 {
            sim.tick(tick_delta(), &FrameInput::default());
        }
        assert_eq!(sim.state.recorder.pending().len(), 10);
        assert!(sim
            .state
            .recorder
            .pending()
            .iter()
            .all(|a| a.kind == ActionKind::Move));
    }
}
