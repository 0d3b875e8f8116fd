//! Buildable structure and vehicle blueprints

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Crafting materials dropped by destroyed building parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Metal,
    Wood,
    Glass,
    Concrete,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Metal,
        MaterialKind::Wood,
        MaterialKind::Glass,
        MaterialKind::Concrete,
    ];
}

/// Player-buildable static structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Low cover wall
    Barricade,
    /// Walkable floor segment
    FloorPanel,
    /// Tall structure with a walkable top
    WatchTower,
}

impl StructureKind {
    /// Load-bearing structures join the platform set and can be stood on
    pub fn is_load_bearing(self) -> bool {
        match self {
            Self::Barricade => false,
            Self::FloorPanel | Self::WatchTower => true,
        }
    }

    pub fn max_health(self) -> f32 {
        match self {
            Self::Barricade => 80.0,
            Self::FloorPanel => 60.0,
            Self::WatchTower => 150.0,
        }
    }

    /// Full extents (width, height, depth) of the placed structure
    pub fn size(self) -> Vec3 {
        match self {
            Self::Barricade => Vec3::new(3.0, 2.0, 0.5),
            Self::FloorPanel => Vec3::new(4.0, 0.5, 4.0),
            Self::WatchTower => Vec3::new(3.0, 6.0, 3.0),
        }
    }
}

/// Vehicle classes, each with its own handling and fire origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    /// Ground vehicle, steers on the plane
    Buggy,
    /// Rotary-wing, free vertical movement
    Helicopter,
    /// Fixed-wing, needs forward speed for lift
    Glider,
}

impl VehicleKind {
    /// Muzzle offset from the vehicle origin, in vehicle-local space
    pub fn fire_origin_offset(self) -> Vec3 {
        match self {
            Self::Buggy => Vec3::new(0.0, 1.2, -1.8),
            Self::Helicopter => Vec3::new(0.0, 0.4, -2.5),
            Self::Glider => Vec3::new(0.0, 0.2, -2.0),
        }
    }

    /// Forward speed (units per second) while driven
    pub fn speed(self) -> f32 {
        match self {
            Self::Buggy => 14.0,
            Self::Helicopter => 10.0,
            Self::Glider => 18.0,
        }
    }

    /// Turn rate in radians per second
    pub fn turn_rate(self) -> f32 {
        match self {
            Self::Buggy => 2.0,
            Self::Helicopter => 1.6,
            Self::Glider => 1.2,
        }
    }
}

/// What a blueprint instantiates
#[derive(Debug, Clone, Copy)]
pub enum BlueprintTarget {
    Structure(StructureKind),
    Vehicle(VehicleKind),
}

/// A catalog entry: display name, material cost, and what gets built
#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    pub name: &'static str,
    pub cost: &'static [(MaterialKind, u32)],
    pub target: BlueprintTarget,
}

/// Selectable blueprint catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlueprintKind {
    Barricade,
    FloorPanel,
    WatchTower,
    Buggy,
    Helicopter,
    Glider,
}

impl BlueprintKind {
    pub const ALL: [BlueprintKind; 6] = [
        BlueprintKind::Barricade,
        BlueprintKind::FloorPanel,
        BlueprintKind::WatchTower,
        BlueprintKind::Buggy,
        BlueprintKind::Helicopter,
        BlueprintKind::Glider,
    ];

    pub fn blueprint(self) -> Blueprint {
        match self {
            Self::Barricade => Blueprint {
                name: "Barricade",
                cost: &[(MaterialKind::Concrete, 4), (MaterialKind::Metal, 2)],
                target: BlueprintTarget::Structure(StructureKind::Barricade),
            },
            Self::FloorPanel => Blueprint {
                name: "Floor Panel",
                cost: &[(MaterialKind::Wood, 4), (MaterialKind::Metal, 1)],
                target: BlueprintTarget::Structure(StructureKind::FloorPanel),
            },
            Self::WatchTower => Blueprint {
                name: "Watch Tower",
                cost: &[(MaterialKind::Wood, 8), (MaterialKind::Metal, 4)],
                target: BlueprintTarget::Structure(StructureKind::WatchTower),
            },
            Self::Buggy => Blueprint {
                name: "Buggy",
                cost: &[(MaterialKind::Metal, 10), (MaterialKind::Glass, 2)],
                target: BlueprintTarget::Vehicle(VehicleKind::Buggy),
            },
            Self::Helicopter => Blueprint {
                name: "Helicopter",
                cost: &[(MaterialKind::Metal, 14), (MaterialKind::Glass, 4)],
                target: BlueprintTarget::Vehicle(VehicleKind::Helicopter),
            },
            Self::Glider => Blueprint {
                name: "Glider",
                cost: &[(MaterialKind::Metal, 12), (MaterialKind::Wood, 4)],
                target: BlueprintTarget::Vehicle(VehicleKind::Glider),
            },
        }
    }
}
