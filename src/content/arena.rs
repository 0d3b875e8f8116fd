//! Arena layout: bounds, platforms, destructible buildings, spawn tables.
//!
//! All of this is static startup data for the simulation. Coordinates use a
//! y-up right-handed space with the arena centered on the origin.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::blueprints::{MaterialKind, VehicleKind};
use super::powerups::PowerupKind;
use super::weapons::WeaponKind;

/// Half-extent of the square arena floor
pub const ARENA_HALF_SIZE: f32 = 60.0;
/// Players and vehicles clamp to this horizontal bound (inside the walls)
pub const PLAYER_BOUNDARY: f32 = 58.0;
/// Projectiles despawn past this horizontal bound
pub const PROJECTILE_BOUNDARY: f32 = 50.0;
/// Ground level for a standing character (feet on the floor plane)
pub const GROUND_HEIGHT: f32 = 1.0;
/// Downward acceleration (units per second squared)
pub const GRAVITY: f32 = 20.0;

/// Axis-aligned platform footprint: center and full extents
#[derive(Debug, Clone, Copy)]
pub struct PlatformSpec {
    pub center: Vec3,
    pub size: Vec3,
}

impl PlatformSpec {
    const fn new(x: f32, y: f32, z: f32, w: f32, h: f32, d: f32) -> Self {
        Self {
            center: Vec3::new(x, y, z),
            size: Vec3::new(w, h, d),
        }
    }
}

/// Static landing platforms: perimeter tiers, bridges, and rooftops
pub const PLATFORMS: &[PlatformSpec] = &[
    // Low-level platforms around the perimeter
    PlatformSpec::new(-25.0, 2.0, -25.0, 10.0, 1.0, 10.0),
    PlatformSpec::new(25.0, 2.0, -25.0, 10.0, 1.0, 10.0),
    PlatformSpec::new(-25.0, 2.0, 25.0, 10.0, 1.0, 10.0),
    PlatformSpec::new(25.0, 2.0, 25.0, 10.0, 1.0, 10.0),
    // Mid-level platforms
    PlatformSpec::new(-15.0, 5.0, -15.0, 8.0, 1.0, 8.0),
    PlatformSpec::new(15.0, 6.0, -15.0, 8.0, 1.0, 8.0),
    PlatformSpec::new(-15.0, 5.0, 15.0, 8.0, 1.0, 8.0),
    PlatformSpec::new(15.0, 7.0, 15.0, 8.0, 1.0, 8.0),
    // High-level platforms
    PlatformSpec::new(0.0, 10.0, -30.0, 12.0, 1.0, 8.0),
    PlatformSpec::new(0.0, 10.0, 30.0, 12.0, 1.0, 8.0),
    PlatformSpec::new(-30.0, 9.0, 0.0, 8.0, 1.0, 12.0),
    PlatformSpec::new(30.0, 9.0, 0.0, 8.0, 1.0, 12.0),
    // Elevated bridges
    PlatformSpec::new(0.0, 8.0, -15.0, 15.0, 0.5, 3.0),
    PlatformSpec::new(0.0, 8.0, 15.0, 15.0, 0.5, 3.0),
    PlatformSpec::new(-15.0, 8.0, 0.0, 3.0, 0.5, 15.0),
    PlatformSpec::new(15.0, 8.0, 0.0, 3.0, 0.5, 15.0),
    // Upper-tier small platforms
    PlatformSpec::new(-10.0, 12.0, -10.0, 5.0, 1.0, 5.0),
    PlatformSpec::new(10.0, 13.0, -10.0, 5.0, 1.0, 5.0),
    PlatformSpec::new(-10.0, 12.0, 10.0, 5.0, 1.0, 5.0),
    PlatformSpec::new(10.0, 14.0, 10.0, 5.0, 1.0, 5.0),
];

/// Destructible fragment kinds making up a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Wall,
    Window,
    DoorFrame,
    Floor,
    Roof,
}

impl PartKind {
    /// Floors and roofs are registered as landing platforms
    pub fn is_load_bearing(self) -> bool {
        matches!(self, Self::Floor | Self::Roof)
    }

    pub fn max_health(self) -> f32 {
        match self {
            Self::Wall => 100.0,
            Self::Window => 30.0,
            Self::DoorFrame => 60.0,
            Self::Floor => 120.0,
            Self::Roof => 120.0,
        }
    }

    /// Materials dropped when a part of this kind is destroyed
    pub fn drop_table(self) -> &'static [(MaterialKind, u32)] {
        match self {
            Self::Window => &[(MaterialKind::Glass, 3), (MaterialKind::Metal, 1)],
            Self::Wall => &[(MaterialKind::Concrete, 3), (MaterialKind::Metal, 1)],
            Self::DoorFrame => &[(MaterialKind::Metal, 2), (MaterialKind::Wood, 2)],
            Self::Floor => &[(MaterialKind::Wood, 3), (MaterialKind::Metal, 1)],
            Self::Roof => &[(MaterialKind::Wood, 2), (MaterialKind::Concrete, 2)],
        }
    }
}

/// One destructible part of a building, before instantiation
#[derive(Debug, Clone, Copy)]
pub struct PartSpec {
    pub kind: PartKind,
    pub center: Vec3,
    pub size: Vec3,
    /// 0-based floor index within the owning building
    pub floor: u32,
}

/// A destructible building: a footprint plus its parts
#[derive(Debug, Clone)]
pub struct BuildingSpec {
    pub parts: Vec<PartSpec>,
}

/// Footprints of the arena's destructible buildings (center x/z, width, depth,
/// floor count)
const BUILDING_FOOTPRINTS: &[(f32, f32, f32, f32, u32)] = &[
    (-30.0, -30.0, 12.0, 12.0, 2),
    (30.0, -30.0, 15.0, 10.0, 1),
    (-30.0, 30.0, 10.0, 15.0, 2),
    (35.0, 35.0, 8.0, 8.0, 2),
    (-15.0, -35.0, 8.0, 8.0, 1),
    (15.0, -35.0, 8.0, 8.0, 1),
];

const STOREY_HEIGHT: f32 = 4.0;

/// Expand a building footprint into its destructible parts: four walls with a
/// window and a door frame on the ground floor, one floor slab per storey, and
/// a roof.
fn building_parts(cx: f32, cz: f32, width: f32, depth: f32, floors: u32) -> Vec<PartSpec> {
    let mut parts = Vec::new();
    let wall_t = 0.4;

    for floor in 0..floors {
        let base = floor as f32 * STOREY_HEIGHT;
        let wall_y = base + STOREY_HEIGHT / 2.0;

        // North and south walls
        for dz in [-depth / 2.0, depth / 2.0] {
            parts.push(PartSpec {
                kind: PartKind::Wall,
                center: Vec3::new(cx, wall_y, cz + dz),
                size: Vec3::new(width, STOREY_HEIGHT, wall_t),
                floor,
            });
        }
        // East wall carries a window on every storey
        parts.push(PartSpec {
            kind: PartKind::Window,
            center: Vec3::new(cx + width / 2.0, wall_y, cz),
            size: Vec3::new(wall_t, STOREY_HEIGHT, depth),
            floor,
        });
        // West wall is the entrance on the ground floor, plain above
        parts.push(PartSpec {
            kind: if floor == 0 {
                PartKind::DoorFrame
            } else {
                PartKind::Wall
            },
            center: Vec3::new(cx - width / 2.0, wall_y, cz),
            size: Vec3::new(wall_t, STOREY_HEIGHT, depth),
            floor,
        });

        // Floor slab above the ground storey
        if floor > 0 {
            parts.push(PartSpec {
                kind: PartKind::Floor,
                center: Vec3::new(cx, base, cz),
                size: Vec3::new(width, 0.5, depth),
                floor,
            });
        }
    }

    parts.push(PartSpec {
        kind: PartKind::Roof,
        center: Vec3::new(cx, floors as f32 * STOREY_HEIGHT, cz),
        size: Vec3::new(width + 1.0, 0.5, depth + 1.0),
        floor: floors.saturating_sub(1),
    });

    parts
}

/// Weapon pickup spawn table (fixed points across the tiers)
pub const WEAPON_SPAWNS: &[(Vec3, WeaponKind)] = &[
    (Vec3::new(-10.0, 1.0, -10.0), WeaponKind::Shotgun),
    (Vec3::new(10.0, 1.0, -10.0), WeaponKind::Rifle),
    (Vec3::new(-15.0, 6.0, -15.0), WeaponKind::Pistol),
    (Vec3::new(15.0, 8.0, 15.0), WeaponKind::Shotgun),
    (Vec3::new(0.0, 11.0, -30.0), WeaponKind::Rifle),
    (Vec3::new(30.0, 10.0, 0.0), WeaponKind::Shotgun),
];

/// Power-up pickup spawn table
pub const POWERUP_SPAWNS: &[(Vec3, PowerupKind)] = &[
    (Vec3::new(0.0, 1.0, 0.0), PowerupKind::SpeedBoost),
    (Vec3::new(-25.0, 3.0, -25.0), PowerupKind::Shield),
    (Vec3::new(0.0, 9.0, 15.0), PowerupKind::DamageBoost),
    (Vec3::new(-15.0, 9.0, 0.0), PowerupKind::SpeedBoost),
    (Vec3::new(10.0, 14.5, 10.0), PowerupKind::Shield),
    (Vec3::new(-10.0, 13.0, -10.0), PowerupKind::DamageBoost),
];

/// Vehicles parked in the arena at startup
pub const VEHICLE_SPAWNS: &[(Vec3, f32, VehicleKind)] = &[
    (Vec3::new(-20.0, 0.5, 20.0), 0.0, VehicleKind::Buggy),
    (Vec3::new(25.0, 0.5, -20.0), std::f32::consts::FRAC_PI_2, VehicleKind::Helicopter),
];

/// Full static arena description handed to the simulation at startup
#[derive(Debug, Clone)]
pub struct ArenaLayout {
    pub platforms: Vec<PlatformSpec>,
    pub buildings: Vec<BuildingSpec>,
    pub weapon_spawns: Vec<(Vec3, WeaponKind)>,
    pub powerup_spawns: Vec<(Vec3, PowerupKind)>,
    pub vehicle_spawns: Vec<(Vec3, f32, VehicleKind)>,
}

impl ArenaLayout {
    /// The standard arena: perimeter platforms, bridges, six destructible
    /// buildings, and the fixed pickup/vehicle spawn tables.
    pub fn standard() -> Self {
        let buildings = BUILDING_FOOTPRINTS
            .iter()
            .map(|&(cx, cz, w, d, floors)| BuildingSpec {
                parts: building_parts(cx, cz, w, d, floors),
            })
            .collect();

        Self {
            platforms: PLATFORMS.to_vec(),
            buildings,
            weapon_spawns: WEAPON_SPAWNS.to_vec(),
            powerup_spawns: POWERUP_SPAWNS.to_vec(),
            vehicle_spawns: VEHICLE_SPAWNS.to_vec(),
        }
    }

    /// An empty layout for tests that build their own geometry
    pub fn empty() -> Self {
        Self {
            platforms: Vec::new(),
            buildings: Vec::new(),
            weapon_spawns: Vec::new(),
            powerup_spawns: Vec::new(),
            vehicle_spawns: Vec::new(),
        }
    }
}
