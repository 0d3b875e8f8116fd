//! Power-up definitions

use serde::{Deserialize, Serialize};

/// Timed power-ups granted by pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerupKind {
    /// Doubles movement speed
    SpeedBoost,
    /// Blocks all incoming damage
    Shield,
    /// Doubles outgoing weapon damage
    DamageBoost,
}

impl PowerupKind {
    /// Effect duration in seconds
    pub fn duration(self) -> f32 {
        match self {
            Self::SpeedBoost => 10.0,
            Self::Shield => 15.0,
            Self::DamageBoost => 12.0,
        }
    }
}

/// Movement speed while Speed Boost is active
pub const BOOSTED_SPEED: f32 = 10.0;
/// Damage multiplier while Damage Boost is active
pub const DAMAGE_BOOST_MULTIPLIER: f32 = 2.0;
