//! Events are the per-tick observable output of the simulation: the
//! renderer/HUD collaborators consume them to spawn effects and update text.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::arena::PartKind;
use crate::content::blueprints::{MaterialKind, StructureKind, VehicleKind};
use crate::content::powerups::PowerupKind;
use crate::content::weapons::WeaponKind;

/// Events emitted during a simulation tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A shooter spawned projectiles (one event per trigger pull, not pellet)
    ShotFired {
        shooter: ShooterId,
        weapon: WeaponKind,
        origin: Vec3,
    },
    /// The player took damage (already past the shield check)
    PlayerDamaged { damage: f32, health_after: f32 },
    /// A ghost materialized, bound to a sealed recording segment
    GhostSpawned { ghost_id: Uuid, segment: usize },
    /// A ghost's health was depleted
    GhostDestroyed { ghost_id: Uuid },
    /// The player collected a pickup
    PickupCollected { pickup_id: Uuid },
    /// A timed power-up ran out
    PowerupExpired { kind: PowerupKind },
    /// A building part took damage
    PartDamaged { part_id: Uuid, health_after: f32 },
    /// A building part was destroyed, dropping materials
    PartDestroyed {
        part_id: Uuid,
        kind: PartKind,
        drops: Vec<(MaterialKind, u32)>,
    },
    /// The player placed a structure
    StructurePlaced { structure_id: Uuid, kind: StructureKind },
    /// The player built a vehicle
    VehiclePlaced { vehicle_id: Uuid, kind: VehicleKind },
    /// The player entered a vehicle
    VehicleEntered { vehicle_id: Uuid },
    /// The player exited a vehicle
    VehicleExited { vehicle_id: Uuid },
    /// A recording buffer was sealed into the history list
    RecordingSealed { segment: usize, actions: usize },
    /// Terminal: the player's health reached zero
    GameOver { survived_secs: f32 },
}

/// Attribution for a shot: id-based so a destroyed shooter cannot dangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShooterId {
    Player,
    Ghost { id: Uuid },
    Vehicle { id: Uuid },
}
