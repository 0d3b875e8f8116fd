//! Player state and the movement/physics controller

use glam::Vec3;
use uuid::Uuid;

use crate::content::arena::{GRAVITY, GROUND_HEIGHT, PLAYER_BOUNDARY};
use crate::content::powerups::{PowerupKind, BOOSTED_SPEED, DAMAGE_BOOST_MULTIPLIER};
use crate::content::weapons::WeaponKind;

use super::events::GameEvent;
use super::spatial::Aabb;
use super::{FrameInput, Phase, SimulationState};

/// Base movement speed (units per second)
pub const BASE_SPEED: f32 = 5.0;
/// Upward velocity applied on jump
pub const JUMP_FORCE: f32 = 8.0;
/// Per-tick planar velocity damping
pub const FRICTION: f32 = 0.8;
/// Player collision box (width, height, depth)
pub const PLAYER_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);

/// A timed power-up currently affecting the player
#[derive(Debug, Clone, Copy)]
pub struct ActiveEffect {
    pub kind: PowerupKind,
    /// Game time at which the effect wears off
    pub ends_at: f32,
}

/// The player (authoritative)
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
    pub health: f32,
    pub max_health: f32,
    pub weapon: WeaponKind,
    pub speed: f32,
    pub damage_multiplier: f32,
    pub has_shield: bool,
    pub active_effects: Vec<ActiveEffect>,
    /// Occupied vehicle, by id (lookup into the vehicle registry)
    pub vehicle: Option<Uuid>,
    /// Game time of the last accepted shot
    pub last_shot: f32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 0.0),
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            grounded: false,
            health: 100.0,
            max_health: 100.0,
            weapon: WeaponKind::Pistol,
            speed: BASE_SPEED,
            damage_multiplier: 1.0,
            has_shield: false,
            active_effects: Vec::new(),
            vehicle: None,
            last_shot: f32::NEG_INFINITY,
        }
    }

    /// Horizontal forward vector derived from yaw
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Full aim direction including pitch
    pub fn aim_dir(&self) -> Vec3 {
        Vec3::new(
            -(self.yaw).sin(),
            -(self.pitch).tan(),
            -(self.yaw).cos(),
        )
        .normalize()
    }

    pub fn collision_box(&self) -> Aabb {
        Aabb::from_center_size(self.position, PLAYER_SIZE)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Integrate player movement for one tick. While the player occupies a
/// vehicle the on-foot controller is suspended; the vehicle system moves the
/// player instead.
pub fn update(state: &mut SimulationState, input: &FrameInput, dt: f32) {
    let player = &mut state.player;

    // Aim always responds, vehicle or not
    player.yaw += input.yaw_delta;
    player.pitch = (player.pitch + input.pitch_delta)
        .clamp(-std::f32::consts::FRAC_PI_2 + 0.01, std::f32::consts::FRAC_PI_2 - 0.01);

    if player.vehicle.is_some() {
        return;
    }

    if !player.grounded {
        player.velocity.y -= GRAVITY * dt;
    }

    let move_speed = player.speed * dt;
    let forward = player.forward();
    let right = Vec3::new(player.yaw.cos(), 0.0, -player.yaw.sin());

    if input.move_forward {
        player.velocity.x += forward.x * move_speed;
        player.velocity.z += forward.z * move_speed;
    }
    if input.move_back {
        player.velocity.x -= forward.x * move_speed;
        player.velocity.z -= forward.z * move_speed;
    }
    if input.move_left {
        player.velocity.x -= right.x * move_speed;
        player.velocity.z -= right.z * move_speed;
    }
    if input.move_right {
        player.velocity.x += right.x * move_speed;
        player.velocity.z += right.z * move_speed;
    }

    if input.jump && player.grounded {
        player.velocity.y = JUMP_FORCE;
        player.grounded = false;
    }

    player.velocity.x *= FRICTION;
    player.velocity.z *= FRICTION;

    // Planar velocity is already per-tick scaled through move_speed; only the
    // vertical axis integrates with dt. Matches the recorded-path feel.
    player.position.x += player.velocity.x;
    player.position.y += player.velocity.y * dt;
    player.position.z += player.velocity.z;

    resolve_ground(state);

    let player = &mut state.player;
    player.position.x = player.position.x.clamp(-PLAYER_BOUNDARY, PLAYER_BOUNDARY);
    player.position.z = player.position.z.clamp(-PLAYER_BOUNDARY, PLAYER_BOUNDARY);
}

/// Ground and platform landing resolution
fn resolve_ground(state: &mut SimulationState) {
    let player = &mut state.player;
    player.grounded = false;

    if player.position.y <= GROUND_HEIGHT {
        player.position.y = GROUND_HEIGHT;
        player.velocity.y = 0.0;
        player.grounded = true;
    }

    let player_box = player.collision_box();
    for platform in &state.platforms {
        if platform.aabb.intersects(&player_box)
            && player.velocity.y < 0.0
            && player.position.y > platform.aabb.top()
        {
            // Feet land on the platform top; position is the body center
            player.position.y = platform.aabb.top() + PLAYER_SIZE.y / 2.0;
            player.velocity.y = 0.0;
            player.grounded = true;
        }
    }
}

/// Apply damage to the player. The shield blocks everything; health clamps to
/// [0, max]; the zero crossing transitions to game over exactly once.
pub fn damage(state: &mut SimulationState, amount: f32, events: &mut Vec<GameEvent>) {
    if state.player.has_shield {
        return;
    }

    state.player.health = (state.player.health - amount).max(0.0);
    events.push(GameEvent::PlayerDamaged {
        damage: amount,
        health_after: state.player.health,
    });

    if state.player.health <= 0.0 && state.phase == Phase::Running {
        state.phase = Phase::GameOver;
        events.push(GameEvent::GameOver {
            survived_secs: state.time,
        });
    }
}

/// Expire timed power-ups whose window has passed, reverting their effect
pub fn expire_effects(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    let now = state.time;
    let player = &mut state.player;

    let mut expired = Vec::new();
    player.active_effects.retain(|effect| {
        if now >= effect.ends_at {
            expired.push(effect.kind);
            false
        } else {
            true
        }
    });

    for kind in expired {
        match kind {
            PowerupKind::SpeedBoost => player.speed = BASE_SPEED,
            PowerupKind::Shield => player.has_shield = false,
            PowerupKind::DamageBoost => player.damage_multiplier = 1.0,
        }
        events.push(GameEvent::PowerupExpired { kind });
    }
}

/// Apply a power-up's immediate effect and register its expiry
pub fn activate_powerup(state: &mut SimulationState, kind: PowerupKind) {
    let player = &mut state.player;
    match kind {
        PowerupKind::SpeedBoost => player.speed = BOOSTED_SPEED,
        PowerupKind::Shield => player.has_shield = true,
        PowerupKind::DamageBoost => player.damage_multiplier = DAMAGE_BOOST_MULTIPLIER,
    }
    player.active_effects.push(ActiveEffect {
        kind,
        ends_at: state.time + kind.duration(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Platform, Simulation};
    use crate::content::ArenaLayout;

    fn sim() -> Simulation {
        Simulation::new(7, ArenaLayout::empty())
    }

    #[test]
    fn gravity_pulls_player_to_ground() {
        let mut sim = sim();
        sim.state.player.position = Vec3::new(0.0, 5.0, 0.0);
        for _ in 0..120 {
            sim.tick(1.0 / 60.0, &FrameInput::default());
        }
        assert_eq!(sim.state.player.position.y, GROUND_HEIGHT);
        assert!(sim.state.player.grounded);
    }

    #[test]
    fn jump_requires_ground_contact() {
        let mut sim = sim();
        sim.state.player.position = Vec3::new(0.0, GROUND_HEIGHT, 0.0);
        sim.state.player.grounded = true;

        let jump = FrameInput {
            jump: true,
            ..FrameInput::default()
        };
        sim.tick(1.0 / 60.0, &jump);
        assert!(!sim.state.player.grounded);
        let airborne_vel = sim.state.player.velocity.y;
        assert!(airborne_vel > 0.0);

        // A second jump request mid-air does nothing
        sim.tick(1.0 / 60.0, &jump);
        assert!(sim.state.player.velocity.y < airborne_vel);
    }

    #[test]
    fn falling_player_lands_on_platform() {
        let mut sim = sim();
        sim.state.platforms.push(Platform {
            id: uuid::Uuid::new_v4(),
            aabb: Aabb::from_center_size(Vec3::new(0.0, 5.0, 0.0), Vec3::new(8.0, 1.0, 8.0)),
        });
        sim.state.player.position = Vec3::new(0.0, 9.0, 0.0);
        sim.state.player.velocity = Vec3::ZERO;

        for _ in 0..120 {
            sim.tick(1.0 / 60.0, &FrameInput::default());
            if sim.state.player.grounded {
                break;
            }
        }
        assert!(sim.state.player.grounded);
        assert_eq!(sim.state.player.position.y, 5.5 + PLAYER_SIZE.y / 2.0);
    }

    #[test]
    fn boundary_clamp_keeps_player_in_arena() {
        let mut sim = sim();
        sim.state.player.position = Vec3::new(PLAYER_BOUNDARY - 0.1, GROUND_HEIGHT, 0.0);
        sim.state.player.grounded = true;

        // Facing -z, strafing right pushes +x into the wall
        let input = FrameInput {
            move_right: true,
            ..FrameInput::default()
        };
        for _ in 0..240 {
            sim.tick(1.0 / 60.0, &input);
        }
        assert!(sim.state.player.position.x <= PLAYER_BOUNDARY);
    }

    #[test]
    fn shield_blocks_all_damage() {
        let mut sim = sim();
        sim.state.player.has_shield = true;
        let mut events = Vec::new();
        for _ in 0..5 {
            damage(&mut sim.state, 40.0, &mut events);
        }
        assert_eq!(sim.state.player.health, 100.0);
        assert!(events.is_empty());
    }

    #[test]
    fn lethal_damage_triggers_game_over_once() {
        let mut sim = sim();
        let mut events = Vec::new();
        damage(&mut sim.state, 150.0, &mut events);
        damage(&mut sim.state, 10.0, &mut events);

        assert_eq!(sim.state.player.health, 0.0);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn effects_expire_and_revert() {
        let mut sim = sim();
        activate_powerup(&mut sim.state, PowerupKind::SpeedBoost);
        assert_eq!(sim.state.player.speed, BOOSTED_SPEED);

        sim.state.time += PowerupKind::SpeedBoost.duration() + 0.1;
        let mut events = Vec::new();
        expire_effects(&mut sim.state, &mut events);

        assert_eq!(sim.state.player.speed, BASE_SPEED);
        assert!(sim.state.player.active_effects.is_empty());
        assert!(matches!(
            events[0],
            GameEvent::PowerupExpired {
                kind: PowerupKind::SpeedBoost
            }
        ));
    }
}
