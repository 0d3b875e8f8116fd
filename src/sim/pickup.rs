//! World pickups: weapons, power-ups, and dropped crafting materials

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::blueprints::MaterialKind;
use crate::content::powerups::PowerupKind;
use crate::content::weapons::WeaponKind;

use super::events::GameEvent;
use super::recording::{ActionKind, RecordedPickup};
use super::spatial::within;
use super::SimulationState;

/// Collection radius around the player
pub const PICKUP_RADIUS: f32 = 2.0;
/// Weapon/power-up pickups are wiped and respawned on this interval
pub const PICKUP_RESPAWN_INTERVAL: f32 = 15.0;
/// Vertical bob amplitude (cosmetic only; collection uses the spawn point)
const BOB_AMPLITUDE: f32 = 0.2;

/// Exactly one payload per pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PickupPayload {
    Weapon(WeaponKind),
    Powerup(PowerupKind),
    Material { kind: MaterialKind, amount: u32 },
}

/// A collectible item in the world
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: Uuid,
    /// Current position including the bob offset
    pub position: Vec3,
    pub spawn_position: Vec3,
    pub payload: PickupPayload,
    /// Part of the fixed spawn tables; wiped and respawned on the interval.
    /// Material drops are one-shot and excluded from the respawn batch.
    pub persistent: bool,
    pub alive: bool,
}

impl Pickup {
    pub fn new(position: Vec3, payload: PickupPayload, persistent: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            spawn_position: position,
            payload,
            persistent,
            alive: true,
        }
    }
}

/// Populate the arena's fixed weapon and power-up spawn points
pub fn spawn_table(state: &mut SimulationState) {
    for &(pos, weapon) in &state.layout.weapon_spawns {
        state
            .pickups
            .push(Pickup::new(pos, PickupPayload::Weapon(weapon), true));
    }
    for &(pos, powerup) in &state.layout.powerup_spawns {
        state
            .pickups
            .push(Pickup::new(pos, PickupPayload::Powerup(powerup), true));
    }
}

/// Bob pickups, collect anything in range, and run the respawn batch
pub fn update(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    // Cosmetic bob around the spawn height
    let bob = (state.time * 2.0).sin() * BOB_AMPLITUDE;
    for pickup in state.pickups.iter_mut() {
        pickup.position.y = pickup.spawn_position.y + bob;
    }

    collect_in_range(state, events);

    if state.time - state.last_pickup_respawn >= PICKUP_RESPAWN_INTERVAL {
        state.last_pickup_respawn = state.time;
        state.pickups.retain(|p| !p.persistent);
        spawn_table(state);
    }
}

/// Collect pickups within range of the player, applying their payload and
/// recording the pickup action for future ghosts
fn collect_in_range(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let player_pos = state.player.position;

    let collected: Vec<(Uuid, PickupPayload)> = state
        .pickups
        .iter_mut()
        .filter(|p| p.alive && within(p.spawn_position, player_pos, PICKUP_RADIUS))
        .map(|p| {
            p.alive = false;
            (p.id, p.payload)
        })
        .collect();

    for (id, payload) in collected {
        let recorded = match payload {
            PickupPayload::Weapon(weapon) => {
                state.player.weapon = weapon;
                RecordedPickup::Weapon(weapon)
            }
            PickupPayload::Powerup(kind) => {
                super::player::activate_powerup(state, kind);
                RecordedPickup::Powerup(kind)
            }
            PickupPayload::Material { kind, amount } => {
                state.inventory.add(kind, amount);
                RecordedPickup::Material { kind, amount }
            }
        };

        state.recorder.record(
            state.time,
            ActionKind::Pickup { payload: recorded },
            state.player.position,
            state.player.yaw,
            state.player.weapon,
        );
        events.push(GameEvent::PickupCollected { pickup_id: id });
    }

    state.pickups.retain(|p| p.alive);
}
