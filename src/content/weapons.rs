//! Weapon definitions

use serde::{Deserialize, Serialize};

/// Weapons available in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Balanced starter weapon
    Pistol,
    /// Five pellets, short effective range
    Shotgun,
    /// Fast fire rate, high projectile speed
    Rifle,
}

impl Default for WeaponKind {
    fn default() -> Self {
        Self::Pistol
    }
}

/// Weapon stats per kind
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    /// Damage per pellet before the shooter's multiplier
    pub damage: f32,
    /// Minimum time between shots (seconds)
    pub fire_interval: f32,
    /// Projectile speed (units per second)
    pub projectile_speed: f32,
    /// Pellets spawned per shot
    pub pellets: u32,
    /// Random angular spread in radians (zero for single-pellet weapons)
    pub spread: f32,
}

impl WeaponStats {
    pub fn for_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Pistol => Self {
                damage: 10.0,
                fire_interval: 0.5,
                projectile_speed: 30.0,
                pellets: 1,
                spread: 0.0,
            },
            WeaponKind::Shotgun => Self {
                damage: 8.0,
                fire_interval: 0.8,
                projectile_speed: 25.0,
                pellets: 5,
                spread: 0.1,
            },
            WeaponKind::Rifle => Self {
                damage: 15.0,
                fire_interval: 0.2,
                projectile_speed: 40.0,
                pellets: 1,
                spread: 0.0,
            },
        }
    }
}

/// Projectile lifetime (seconds), shared by all weapons
pub const PROJECTILE_LIFETIME: f32 = 3.0;
/// Sphere radius used for projectile-vs-character hit tests
pub const PROJECTILE_HIT_RADIUS: f32 = 1.5;
