//! Static content tables consumed at startup.
//!
//! Weapons, power-ups, blueprints and the arena layout are immutable lookup
//! data; the simulation treats everything here as read-only configuration.

pub mod arena;
pub mod blueprints;
pub mod powerups;
pub mod weapons;

pub use arena::{ArenaLayout, PartKind};
pub use blueprints::{
    Blueprint, BlueprintKind, BlueprintTarget, MaterialKind, StructureKind, VehicleKind,
};
pub use powerups::PowerupKind;
pub use weapons::{WeaponKind, WeaponStats};
