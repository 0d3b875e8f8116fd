//! Build system - blueprint selection, placement preview, construction

use std::collections::HashMap;

use glam::Vec3;
use uuid::Uuid;

use crate::content::blueprints::{
    Blueprint, BlueprintKind, BlueprintTarget, MaterialKind, StructureKind,
};

use super::events::GameEvent;
use super::player::PLAYER_SIZE;
use super::spatial::{ray_hits_top, Aabb};
use super::vehicle::{Vehicle, VEHICLE_REST_HEIGHT};
use super::{FrameInput, Platform, SimulationState};

/// Furthest a structure may be placed from the player
pub const MAX_PLACEMENT_DISTANCE: f32 = 12.0;
/// Preview distance when the aim ray misses every platform
pub const PREVIEW_FALLBACK_DISTANCE: f32 = 6.0;
/// Aim ray length for preview placement
const PREVIEW_RAY_RANGE: f32 = 30.0;
/// Nominal footprint reserved for a vehicle placement
const VEHICLE_FOOTPRINT: Vec3 = Vec3::new(3.0, 2.0, 4.0);

/// Material holdings. Quantities never go negative; a debit either covers
/// the full cost or changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    counts: HashMap<MaterialKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: MaterialKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: MaterialKind, amount: u32) {
        *self.counts.entry(kind).or_insert(0) += amount;
    }

    /// Checked per material, not aggregated
    pub fn can_afford(&self, cost: &[(MaterialKind, u32)]) -> bool {
        cost.iter().all(|&(kind, amount)| self.count(kind) >= amount)
    }

    /// Atomic: subtracts the full cost or nothing
    pub fn debit(&mut self, cost: &[(MaterialKind, u32)]) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for &(kind, amount) in cost {
            *self.counts.entry(kind).or_insert(0) -= amount;
        }
        true
    }
}

/// A player-placed structure
#[derive(Debug, Clone)]
pub struct PlayerStructure {
    pub id: Uuid,
    pub kind: StructureKind,
    /// Center of the structure's box
    pub position: Vec3,
    pub yaw: f32,
    pub health: f32,
    pub max_health: f32,
    pub aabb: Aabb,
    /// Platform-set entry for load-bearing kinds
    pub platform: Option<Uuid>,
}

/// Build-mode state machine: inactive, browsing, or previewing a selection
#[derive(Debug, Clone, Default)]
pub struct BuildState {
    pub active: bool,
    pub selected: Option<BlueprintKind>,
    pub preview: Option<Preview>,
}

/// Current placement preview, recomputed every tick while a blueprint is
/// selected
#[derive(Debug, Clone, Copy)]
pub struct Preview {
    /// Base point the structure would stand on
    pub position: Vec3,
    pub valid: bool,
}

/// Drive the build system for one tick: mode toggle, selection, preview,
/// and any pending placement request. Every rejected operation is a silent
/// no-op.
pub fn update(state: &mut SimulationState, input: &FrameInput, events: &mut Vec<GameEvent>) {
    if input.toggle_build {
        state.build.active = !state.build.active;
        if !state.build.active {
            state.build.selected = None;
            state.build.preview = None;
        }
    }

    if !state.build.active {
        return;
    }

    if let Some(kind) = input.select_blueprint {
        if state.inventory.can_afford(kind.blueprint().cost) {
            state.build.selected = Some(kind);
        }
    }

    let Some(selected) = state.build.selected else {
        state.build.preview = None;
        return;
    };

    let blueprint = selected.blueprint();
    let preview = compute_preview(state, &blueprint);
    state.build.preview = Some(preview);

    if input.place {
        place(state, selected, events);
    }
}

/// Preview pose: aim ray intersected with the platform set, defaulting to a
/// fixed distance ahead of the player when nothing is hit
fn compute_preview(state: &SimulationState, blueprint: &Blueprint) -> Preview {
    let player = &state.player;
    let eye = player.position + Vec3::Y;
    let dir = player.aim_dir();

    let mut base: Option<Vec3> = None;
    let mut best_t = PREVIEW_RAY_RANGE;
    for platform in &state.platforms {
        if let Some(t) = ray_hits_top(eye, dir, &platform.aabb) {
            if t < best_t {
                best_t = t;
                base = Some(eye + dir * t);
            }
        }
    }

    let feet_y = player.position.y - PLAYER_SIZE.y / 2.0;
    let base = base.unwrap_or_else(|| {
        let ahead = player.position + player.forward() * PREVIEW_FALLBACK_DISTANCE;
        Vec3::new(ahead.x, feet_y, ahead.z)
    });

    let size = footprint(blueprint);
    let volume = Aabb::from_center_size(base + Vec3::Y * (size.y / 2.0), size);

    let in_reach = player.position.distance(base) <= MAX_PLACEMENT_DISTANCE;
    let clear = !state.structures.iter().any(|s| s.aabb.intersects(&volume))
        && !state
            .parts
            .iter()
            .filter(|p| !p.destroyed)
            .any(|p| p.aabb.intersects(&volume));

    Preview {
        position: base,
        valid: in_reach && clear,
    }
}

fn footprint(blueprint: &Blueprint) -> Vec3 {
    match blueprint.target {
        BlueprintTarget::Structure(kind) => kind.size(),
        BlueprintTarget::Vehicle(_) => VEHICLE_FOOTPRINT,
    }
}

/// Place the selected blueprint at the current preview. Re-validates
/// affordability and placement; any failure leaves the world and the
/// inventory untouched.
fn place(state: &mut SimulationState, selected: BlueprintKind, events: &mut Vec<GameEvent>) {
    let blueprint = selected.blueprint();
    let Some(preview) = state.build.preview else {
        return;
    };
    if !preview.valid || !state.inventory.can_afford(blueprint.cost) {
        return;
    }
    if !state.inventory.debit(blueprint.cost) {
        return;
    }

    match blueprint.target {
        BlueprintTarget::Structure(kind) => {
            let size = kind.size();
            let center = preview.position + Vec3::Y * (size.y / 2.0);
            let aabb = Aabb::from_center_size(center, size);

            let platform = kind.is_load_bearing().then(|| {
                let id = Uuid::new_v4();
                state.platforms.push(Platform { id, aabb });
                id
            });

            let structure = PlayerStructure {
                id: Uuid::new_v4(),
                kind,
                position: center,
                yaw: state.player.yaw,
                health: kind.max_health(),
                max_health: kind.max_health(),
                aabb,
                platform,
            };
            events.push(GameEvent::StructurePlaced {
                structure_id: structure.id,
                kind,
            });
            state.structures.push(structure);
        }
        BlueprintTarget::Vehicle(kind) => {
            let position = Vec3::new(
                preview.position.x,
                preview.position.y + VEHICLE_REST_HEIGHT,
                preview.position.z,
            );
            let vehicle = Vehicle::new(kind, position, state.player.yaw);
            events.push(GameEvent::VehiclePlaced {
                vehicle_id: vehicle.id,
                kind,
            });
            state.vehicles.push(vehicle);
        }
    }
}
