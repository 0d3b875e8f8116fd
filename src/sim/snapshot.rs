//! Snapshot building for the renderer and HUD

use glam::Vec3;
use serde::Serialize;
use uuid::Uuid;

use crate::content::blueprints::{BlueprintKind, MaterialKind, StructureKind, VehicleKind};
use crate::content::powerups::PowerupKind;
use crate::content::weapons::WeaponKind;

use super::pickup::PickupPayload;
use super::{Phase, SimulationState};

/// Decides when a snapshot goes out; the sim ticks faster than the
/// renderer needs full state
pub struct SnapshotBuilder {
    /// Tick counter since last snapshot
    ticks_since_snapshot: u32,
    /// Snapshot interval in ticks
    snapshot_interval: u32,
}

impl SnapshotBuilder {
    pub fn new(snapshot_interval: u32) -> Self {
        Self {
            ticks_since_snapshot: 0,
            snapshot_interval,
        }
    }

    /// Check if it's time to send a snapshot
    pub fn should_send(&mut self) -> bool {
        self.ticks_since_snapshot += 1;
        if self.ticks_since_snapshot >= self.snapshot_interval {
            self.ticks_since_snapshot = 0;
            true
        } else {
            false
        }
    }

    /// Force snapshot on next check (used for important events)
    pub fn force_next(&mut self) {
        self.ticks_since_snapshot = self.snapshot_interval;
    }

    /// Build a full world snapshot
    pub fn build(&mut self, tick: u64, state: &SimulationState) -> WorldSnapshot {
        WorldSnapshot {
            tick,
            time: state.time,
            phase: state.phase,
            player: PlayerPose {
                position: state.player.position,
                velocity: state.player.velocity,
                yaw: state.player.yaw,
                pitch: state.player.pitch,
                weapon: state.player.weapon,
                health: state.player.health,
                vehicle: state.player.vehicle,
            },
            ghosts: state
                .ghosts
                .iter()
                .map(|g| GhostPose {
                    id: g.id,
                    position: g.position,
                    yaw: g.yaw,
                    weapon: g.weapon,
                    health: g.health,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectilePose {
                    id: p.id,
                    position: p.position,
                    direction: p.direction,
                })
                .collect(),
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupPose {
                    id: p.id,
                    position: p.position,
                    payload: p.payload,
                })
                .collect(),
            vehicles: state
                .vehicles
                .iter()
                .map(|v| VehiclePose {
                    id: v.id,
                    kind: v.kind,
                    position: v.position,
                    yaw: v.yaw,
                    occupied: v.occupied,
                })
                .collect(),
            parts: state
                .parts
                .iter()
                .filter(|p| !p.destroyed)
                .map(|p| PartPose {
                    id: p.id,
                    center: p.aabb.center(),
                    health_frac: p.health / p.max_health,
                    tint: p.tint,
                })
                .collect(),
            structures: state
                .structures
                .iter()
                .map(|s| StructurePose {
                    id: s.id,
                    kind: s.kind,
                    position: s.position,
                    yaw: s.yaw,
                })
                .collect(),
            debris: state
                .debris
                .iter()
                .map(|d| DebrisPose {
                    position: d.position,
                })
                .collect(),
            hud: HudState::build(state),
        }
    }
}

/// Full renderable world state at one tick
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub time: f32,
    pub phase: Phase,
    pub player: PlayerPose,
    pub ghosts: Vec<GhostPose>,
    pub projectiles: Vec<ProjectilePose>,
    pub pickups: Vec<PickupPose>,
    pub vehicles: Vec<VehiclePose>,
    pub parts: Vec<PartPose>,
    pub structures: Vec<StructurePose>,
    pub debris: Vec<DebrisPose>,
    pub hud: HudState,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerPose {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub weapon: WeaponKind,
    pub health: f32,
    pub vehicle: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GhostPose {
    pub id: Uuid,
    pub position: Vec3,
    pub yaw: f32,
    pub weapon: WeaponKind,
    pub health: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectilePose {
    pub id: Uuid,
    pub position: Vec3,
    pub direction: Vec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupPose {
    pub id: Uuid,
    pub position: Vec3,
    pub payload: PickupPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehiclePose {
    pub id: Uuid,
    pub kind: VehicleKind,
    pub position: Vec3,
    pub yaw: f32,
    pub occupied: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartPose {
    pub id: Uuid,
    pub center: Vec3,
    pub health_frac: f32,
    pub tint: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct StructurePose {
    pub id: Uuid,
    pub kind: StructureKind,
    pub position: Vec3,
    pub yaw: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebrisPose {
    pub position: Vec3,
}

/// HUD-facing summary: vitals, timers, inventory, and what the player
/// could build right now
#[derive(Debug, Clone, Serialize)]
pub struct HudState {
    pub health: f32,
    pub max_health: f32,
    pub weapon: WeaponKind,
    pub elapsed: f32,
    pub effects: Vec<EffectTimer>,
    pub materials: Vec<MaterialCount>,
    pub blueprints: Vec<BlueprintAvailability>,
    pub build_active: bool,
    pub selected_blueprint: Option<BlueprintKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectTimer {
    pub kind: PowerupKind,
    pub remaining: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialCount {
    pub kind: MaterialKind,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlueprintAvailability {
    pub kind: BlueprintKind,
    pub name: &'static str,
    pub affordable: bool,
}

impl HudState {
    pub fn build(state: &SimulationState) -> Self {
        Self {
            health: state.player.health,
            max_health: state.player.max_health,
            weapon: state.player.weapon,
            elapsed: state.time,
            effects: state
                .player
                .active_effects
                .iter()
                .map(|e| EffectTimer {
                    kind: e.kind,
                    remaining: (e.ends_at - state.time).max(0.0),
                })
                .collect(),
            materials: MaterialKind::ALL
                .iter()
                .map(|&kind| MaterialCount {
                    kind,
                    amount: state.inventory.count(kind),
                })
                .collect(),
            blueprints: BlueprintKind::ALL
                .iter()
                .map(|&kind| {
                    let bp = kind.blueprint();
                    BlueprintAvailability {
                        kind,
                        name: bp.name,
                        affordable: state.inventory.can_afford(bp.cost),
                    }
                })
                .collect(),
            build_active: state.build.active,
            selected_blueprint: state.build.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArenaLayout;
    use crate::sim::{FrameInput, Simulation};

    #[test]
    fn cadence_fires_every_interval() {
        let mut builder = SnapshotBuilder::new(6);
        for _ in 0..5 {
            assert!(!builder.should_send());
        }
        assert!(builder.should_send());
        assert!(!builder.should_send());
    }

    #[test]
    fn force_next_overrides_cadence() {
        let mut builder = SnapshotBuilder::new(6);
        builder.force_next();
        assert!(builder.should_send());
        assert!(!builder.should_send());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut sim = Simulation::new(3, ArenaLayout::standard());
        sim.tick(1.0 / 60.0, &FrameInput::default());

        let mut builder = SnapshotBuilder::new(1);
        assert!(builder.should_send());
        let snapshot = builder.build(1, &sim.state);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["tick"], 1);
        assert!(json["hud"]["blueprints"].as_array().unwrap().len() == 6);
        assert!(!json["parts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn hud_reports_effect_timers_and_affordability() {
        let mut sim = Simulation::new(3, ArenaLayout::empty());
        sim.state.inventory.add(MaterialKind::Concrete, 4);
        sim.state.inventory.add(MaterialKind::Metal, 2);
        crate::sim::player::activate_powerup(&mut sim.state, PowerupKind::SpeedBoost);
        sim.state.time = 4.0;

        let hud = HudState::build(&sim.state);
        let speed = hud
            .effects
            .iter()
            .find(|e| e.kind == PowerupKind::SpeedBoost)
            .unwrap();
        assert!((speed.remaining - 6.0).abs() < 1e-5);

        let barricade = hud
            .blueprints
            .iter()
            .find(|b| b.kind == BlueprintKind::Barricade)
            .unwrap();
        assert!(barricade.affordable);
        let tower = hud
            .blueprints
            .iter()
            .find(|b| b.kind == BlueprintKind::WatchTower)
            .unwrap();
        assert!(!tower.affordable);
    }
}
