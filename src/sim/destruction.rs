//! Destruction engine - destructible building parts, debris, material drops

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::content::arena::{PartKind, GRAVITY};

use super::events::GameEvent;
use super::pickup::{Pickup, PickupPayload};
use super::spatial::Aabb;
use super::{Platform, SimulationState};

/// Fragments spawned when a part is destroyed
pub const DEBRIS_COUNT: usize = 6;
/// Seconds before a debris fragment fades out
pub const DEBRIS_LIFETIME: f32 = 1.2;

/// A destructible fragment of static level geometry
#[derive(Debug, Clone)]
pub struct BuildingPart {
    pub id: Uuid,
    pub kind: PartKind,
    /// Owning building
    pub building: Uuid,
    /// 0-based floor index within the building
    pub floor: u32,
    pub aabb: Aabb,
    pub health: f32,
    pub max_health: f32,
    /// Damage tint for the renderer; tracks the health tier
    pub tint: [f32; 3],
    /// Platform-set entry for load-bearing kinds, removed on destruction
    pub platform: Option<Uuid>,
    pub destroyed: bool,
}

impl BuildingPart {
    pub fn new(kind: PartKind, building: Uuid, floor: u32, aabb: Aabb) -> Self {
        let max_health = kind.max_health();
        Self {
            id: Uuid::new_v4(),
            kind,
            building,
            floor,
            aabb,
            health: max_health,
            max_health,
            tint: damage_tint(kind, 1.0),
            platform: None,
            destroyed: false,
        }
    }
}

/// Short-lived rubble spawned by a destroyed part
#[derive(Debug, Clone, Copy)]
pub struct Debris {
    pub position: Vec3,
    pub velocity: Vec3,
    pub lifetime: f32,
}

/// Visual damage tint, a three-tier ramp keyed by part kind.
/// Purely cosmetic feedback; the renderer reads it, gameplay ignores it.
pub fn damage_tint(kind: PartKind, health_frac: f32) -> [f32; 3] {
    let tiers: [[f32; 3]; 3] = match kind {
        PartKind::Window => [[0.65, 0.82, 0.92], [0.55, 0.62, 0.68], [0.35, 0.38, 0.42]],
        PartKind::Wall => [[0.62, 0.62, 0.62], [0.48, 0.44, 0.40], [0.30, 0.26, 0.24]],
        PartKind::DoorFrame => [[0.55, 0.42, 0.30], [0.45, 0.33, 0.24], [0.28, 0.20, 0.15]],
        PartKind::Floor | PartKind::Roof => {
            [[0.55, 0.45, 0.33], [0.45, 0.37, 0.28], [0.28, 0.23, 0.18]]
        }
    };

    if health_frac > 0.7 {
        tiers[0]
    } else if health_frac > 0.4 {
        tiers[1]
    } else {
        tiers[2]
    }
}

/// Apply the damage queued by the combat stage this tick
pub fn apply_pending(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let SimulationState {
        parts,
        pending_part_damage,
        pickups,
        debris,
        platforms,
        rng,
        ..
    } = state;

    for pending in pending_part_damage.drain(..) {
        let Some(part) = parts.iter_mut().find(|p| p.id == pending.part_id) else {
            continue;
        };
        apply_damage(part, pending.amount, rng, pickups, debris, platforms, events);
    }
}

/// Damage one part. Health only ever decreases; a destroyed part ignores
/// further damage. Depletion spawns debris and the kind's drop-table
/// materials, and unregisters a load-bearing part from the platform set.
pub fn apply_damage(
    part: &mut BuildingPart,
    amount: f32,
    rng: &mut ChaCha8Rng,
    pickups: &mut Vec<Pickup>,
    debris: &mut Vec<Debris>,
    platforms: &mut Vec<Platform>,
    events: &mut Vec<GameEvent>,
) {
    if part.destroyed {
        return;
    }

    part.health = (part.health - amount).max(0.0);
    part.tint = damage_tint(part.kind, part.health / part.max_health);

    if part.health > 0.0 {
        events.push(GameEvent::PartDamaged {
            part_id: part.id,
            health_after: part.health,
        });
        return;
    }

    part.destroyed = true;
    let center = part.aabb.center();

    for _ in 0..DEBRIS_COUNT {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(3.0..7.0);
        debris.push(Debris {
            position: center,
            velocity: Vec3::new(angle.cos() * speed, rng.gen_range(2.0..5.0), angle.sin() * speed),
            lifetime: DEBRIS_LIFETIME,
        });
    }

    let drops: Vec<(crate::content::blueprints::MaterialKind, u32)> =
        part.kind.drop_table().to_vec();
    for &(kind, amount) in &drops {
        pickups.push(Pickup::new(
            center,
            PickupPayload::Material { kind, amount },
            false,
        ));
    }

    if let Some(platform_id) = part.platform.take() {
        platforms.retain(|p| p.id != platform_id);
    }

    events.push(GameEvent::PartDestroyed {
        part_id: part.id,
        kind: part.kind,
        drops,
    });
}

/// Advance debris fragments: gravity, integration, fade-out cull
pub fn update_debris(state: &mut SimulationState, dt: f32) {
    for fragment in state.debris.iter_mut() {
        fragment.velocity.y -= GRAVITY * dt;
        fragment.position += fragment.velocity * dt;
        fragment.lifetime -= dt;
    }
    state.debris.retain(|d| d.lifetime > 0.0);
}
