//! Combat resolver - firing, projectile advance, hit resolution

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::content::arena::PROJECTILE_BOUNDARY;
use crate::content::weapons::{WeaponKind, WeaponStats, PROJECTILE_HIT_RADIUS, PROJECTILE_LIFETIME};

use super::events::{GameEvent, ShooterId};
use super::ghost::Ghost;
use super::recording::ActionKind;
use super::spatial::within;
use super::{SimulationState, PendingPartDamage};

/// Which side a projectile can hurt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hostility {
    /// Ghost-fired: hurts the player
    ToPlayer,
    /// Player-fired (on foot or vehicle-mounted): hurts ghosts and buildings
    ToGhosts,
}

/// A live projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: Uuid,
    pub shooter: ShooterId,
    pub position: Vec3,
    /// Unit direction of travel
    pub direction: Vec3,
    pub speed: f32,
    /// Damage already includes the shooter's multiplier at fire time
    pub damage: f32,
    pub lifetime: f32,
    pub hostility: Hostility,
    pub alive: bool,
}

impl Projectile {
    pub fn new(
        shooter: ShooterId,
        position: Vec3,
        direction: Vec3,
        stats: &WeaponStats,
        damage_multiplier: f32,
        hostility: Hostility,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            shooter,
            position,
            direction,
            speed: stats.projectile_speed,
            damage: stats.damage * damage_multiplier,
            lifetime: PROJECTILE_LIFETIME,
            hostility,
            alive: true,
        }
    }
}

/// Fire the player's equipped weapon. A request inside the weapon's fire-rate
/// interval is ignored. Mounted fire originates at the vehicle's muzzle.
pub fn try_fire_player(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let stats = WeaponStats::for_kind(state.player.weapon);
    if state.time - state.player.last_shot < stats.fire_interval {
        return;
    }
    state.player.last_shot = state.time;

    let (origin, shooter) = match state.player.vehicle {
        Some(vehicle_id) => match state.vehicles.iter().find(|v| v.id == vehicle_id) {
            Some(vehicle) => (vehicle.fire_origin(), ShooterId::Vehicle { id: vehicle.id }),
            None => (state.player.position + Vec3::Y, ShooterId::Player),
        },
        None => (state.player.position + Vec3::Y, ShooterId::Player),
    };

    for _ in 0..stats.pellets {
        let (spread_yaw, spread_pitch) = pellet_spread(&mut state.rng, stats.spread);
        let yaw = state.player.yaw + spread_yaw;
        let pitch = state.player.pitch + spread_pitch;
        let direction = Vec3::new(-yaw.sin(), -pitch.tan(), -yaw.cos()).normalize();

        state.projectiles.push(Projectile::new(
            shooter,
            origin,
            direction,
            &stats,
            state.player.damage_multiplier,
            Hostility::ToGhosts,
        ));
    }

    state.recorder.record(
        state.time,
        ActionKind::Shoot,
        state.player.position,
        state.player.yaw,
        state.player.weapon,
    );
    events.push(GameEvent::ShotFired {
        shooter,
        weapon: state.player.weapon,
        origin,
    });
}

/// Fire a recorded shot from a ghost's current pose. Replayed shots already
/// passed the fire-rate gate when they were recorded, so none applies here.
pub fn ghost_fire(
    ghost: &Ghost,
    weapon: WeaponKind,
    rng: &mut ChaCha8Rng,
    projectiles: &mut Vec<Projectile>,
    events: &mut Vec<GameEvent>,
) {
    let stats = WeaponStats::for_kind(weapon);
    let origin = ghost.position + Vec3::Y;

    for _ in 0..stats.pellets {
        let (spread_yaw, _) = pellet_spread(rng, stats.spread);
        let yaw = ghost.yaw + spread_yaw;
        // Ghosts aim level: recorded pitch is not replayed
        let direction = Vec3::new(-yaw.sin(), 0.0, -yaw.cos()).normalize();

        projectiles.push(Projectile::new(
            ShooterId::Ghost { id: ghost.id },
            origin,
            direction,
            &stats,
            ghost.damage_multiplier,
            Hostility::ToPlayer,
        ));
    }

    events.push(GameEvent::ShotFired {
        shooter: ShooterId::Ghost { id: ghost.id },
        weapon,
        origin,
    });
}

/// Bounded random spread; zero for single-pellet weapons
fn pellet_spread(rng: &mut ChaCha8Rng, spread: f32) -> (f32, f32) {
    if spread == 0.0 {
        return (0.0, 0.0);
    }
    (
        (rng.gen::<f32>() - 0.5) * spread,
        (rng.gen::<f32>() - 0.5) * spread,
    )
}

/// Advance all projectiles and resolve hits. Resolution per projectile is
/// first-match-wins in registry order: player hit (ghost-fired), ghost hits,
/// then building-part containment. Part damage is queued for the destruction
/// stage rather than applied inline.
pub fn advance(state: &mut SimulationState, dt: f32, events: &mut Vec<GameEvent>) {
    let mut player_hits: Vec<f32> = Vec::new();

    {
        let SimulationState {
            projectiles,
            ghosts,
            parts,
            pending_part_damage,
            player,
            ..
        } = state;

        for projectile in projectiles.iter_mut() {
            projectile.position += projectile.direction * projectile.speed * dt;

            if projectile.hostility == Hostility::ToPlayer
                && within(projectile.position, player.position, PROJECTILE_HIT_RADIUS)
            {
                player_hits.push(projectile.damage);
                projectile.alive = false;
                continue;
            }

            if projectile.hostility == Hostility::ToGhosts {
                let mut hit_ghost = false;
                for ghost in ghosts.iter_mut().filter(|g| g.alive) {
                    if within(projectile.position, ghost.position, PROJECTILE_HIT_RADIUS) {
                        ghost.health -= projectile.damage;
                        projectile.alive = false;
                        hit_ghost = true;
                        if ghost.health <= 0.0 {
                            ghost.alive = false;
                            events.push(GameEvent::GhostDestroyed { ghost_id: ghost.id });
                        }
                        break;
                    }
                }
                if hit_ghost {
                    continue;
                }

                let mut hit_part = false;
                for part in parts.iter().filter(|p| !p.destroyed) {
                    if part.aabb.contains_point(projectile.position) {
                        pending_part_damage.push(PendingPartDamage {
                            part_id: part.id,
                            amount: projectile.damage,
                        });
                        projectile.alive = false;
                        hit_part = true;
                        break;
                    }
                }
                if hit_part {
                    continue;
                }
            }

            projectile.lifetime -= dt;
            if projectile.lifetime <= 0.0
                || projectile.position.x.abs() > PROJECTILE_BOUNDARY
                || projectile.position.z.abs() > PROJECTILE_BOUNDARY
            {
                projectile.alive = false;
            }
        }

        projectiles.retain(|p| p.alive);
        ghosts.retain(|g| g.alive);
    }

    for damage in player_hits {
        super::player::damage(state, damage, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArenaLayout;
    use crate::sim::{FrameInput, Simulation};

    fn sim() -> Simulation {
        Simulation::new(42, ArenaLayout::empty())
    }

    #[test]
    fn fire_rate_gate_drops_second_request() {
        let mut sim = sim();
        let mut events = Vec::new();

        try_fire_player(&mut sim.state, &mut events);
        assert_eq!(sim.state.projectiles.len(), 1);

        // Second request inside the pistol's 0.5s interval
        sim.state.time += 0.1;
        try_fire_player(&mut sim.state, &mut events);
        assert_eq!(sim.state.projectiles.len(), 1);

        sim.state.time += 0.5;
        try_fire_player(&mut sim.state, &mut events);
        assert_eq!(sim.state.projectiles.len(), 2);
    }

    #[test]
    fn shotgun_fires_five_pellets_inside_spread_cone() {
        let mut sim = sim();
        sim.state.player.weapon = WeaponKind::Shotgun;
        let mut events = Vec::new();

        try_fire_player(&mut sim.state, &mut events);
        assert_eq!(sim.state.projectiles.len(), 5);

        let aim = sim.state.player.aim_dir();
        let stats = WeaponStats::for_kind(WeaponKind::Shotgun);
        for projectile in &sim.state.projectiles {
            let angle = projectile.direction.dot(aim).clamp(-1.0, 1.0).acos();
            // Yaw and pitch each deviate at most spread/2
            assert!(angle <= stats.spread, "pellet outside cone: {angle}");
        }
    }

    #[test]
    fn damage_multiplier_applies_at_fire_time() {
        let mut sim = sim();
        sim.state.player.damage_multiplier = 2.0;
        let mut events = Vec::new();
        try_fire_player(&mut sim.state, &mut events);

        let stats = WeaponStats::for_kind(WeaponKind::Pistol);
        assert_eq!(sim.state.projectiles[0].damage, stats.damage * 2.0);
    }

    #[test]
    fn projectile_expires_at_lifetime_end() {
        let mut sim = sim();
        // Park the player far away so nothing collides
        sim.state.player.position = Vec3::new(0.0, 40.0, 0.0);
        let stats = WeaponStats::for_kind(WeaponKind::Pistol);
        sim.state.projectiles.push(Projectile::new(
            ShooterId::Player,
            Vec3::new(0.0, 5.0, 0.0),
            // Slow vertical crawl keeps it inside the horizontal bounds
            Vec3::Y,
            &WeaponStats {
                projectile_speed: 1.0,
                ..stats
            },
            1.0,
            Hostility::ToGhosts,
        ));

        let dt = 0.1;
        let mut events = Vec::new();
        let steps = (PROJECTILE_LIFETIME / dt) as usize;
        for _ in 0..steps - 1 {
            advance(&mut sim.state, dt, &mut events);
        }
        assert_eq!(sim.state.projectiles.len(), 1);
        advance(&mut sim.state, dt, &mut events);
        assert!(sim.state.projectiles.is_empty());
    }

    #[test]
    fn projectile_removed_out_of_bounds() {
        let mut sim = sim();
        sim.state.player.position = Vec3::new(0.0, 40.0, 0.0);
        let stats = WeaponStats::for_kind(WeaponKind::Rifle);
        sim.state.projectiles.push(Projectile::new(
            ShooterId::Player,
            Vec3::new(PROJECTILE_BOUNDARY - 1.0, 2.0, 0.0),
            Vec3::X,
            &stats,
            1.0,
            Hostility::ToGhosts,
        ));

        let mut events = Vec::new();
        advance(&mut sim.state, 0.1, &mut events);
        assert!(sim.state.projectiles.is_empty());
    }

    #[test]
    fn ghost_projectile_damages_player() {
        let mut sim = sim();
        let stats = WeaponStats::for_kind(WeaponKind::Pistol);
        sim.state.projectiles.push(Projectile::new(
            ShooterId::Ghost { id: Uuid::new_v4() },
            sim.state.player.position + Vec3::new(0.5, 0.0, 0.0),
            Vec3::X,
            &stats,
            1.0,
            Hostility::ToPlayer,
        ));

        let mut events = Vec::new();
        advance(&mut sim.state, 0.001, &mut events);
        assert_eq!(sim.state.player.health, 90.0);
        assert!(sim.state.projectiles.is_empty());
    }

    #[test]
    fn player_projectile_removes_depleted_ghost() {
        let mut sim = sim();
        let mut ghost = crate::sim::ghost::Ghost::for_test(Vec3::new(5.0, 1.0, 0.0));
        ghost.health = 10.0;
        let ghost_id = ghost.id;
        sim.state.ghosts.push(ghost);

        let stats = WeaponStats::for_kind(WeaponKind::Rifle);
        sim.state.projectiles.push(Projectile::new(
            ShooterId::Player,
            Vec3::new(4.5, 1.0, 0.0),
            Vec3::X,
            &stats,
            1.0,
            Hostility::ToGhosts,
        ));

        let mut events = Vec::new();
        advance(&mut sim.state, 0.001, &mut events);
        assert!(sim.state.ghosts.is_empty());
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::GhostDestroyed { ghost_id: id } if *id == ghost_id)));
    }
}
