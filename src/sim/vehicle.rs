//! Vehicles: ground, rotary-wing, and fixed-wing rides with mounted fire

use glam::Vec3;
use uuid::Uuid;

use crate::content::arena::PLAYER_BOUNDARY;
use crate::content::blueprints::VehicleKind;

use super::events::GameEvent;
use super::spatial::within;
use super::{FrameInput, SimulationState};

/// Maximum distance at which the enter toggle finds a vehicle
pub const VEHICLE_ENTER_RADIUS: f32 = 4.0;
/// Resting height of a parked vehicle
pub const VEHICLE_REST_HEIGHT: f32 = 0.5;
/// Seat offset applied to the player while riding
const SEAT_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

/// A rideable vehicle. Vehicles have no health and are never destroyed.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: Uuid,
    pub kind: VehicleKind,
    pub position: Vec3,
    pub yaw: f32,
    /// At most one occupant, ever
    pub occupied: bool,
}

impl Vehicle {
    pub fn new(kind: VehicleKind, position: Vec3, yaw: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            yaw,
            occupied: false,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Muzzle position for mounted fire, in world space
    pub fn fire_origin(&self) -> Vec3 {
        let local = self.kind.fire_origin_offset();
        let (sin, cos) = self.yaw.sin_cos();
        self.position
            + Vec3::new(
                local.x * cos + local.z * sin,
                local.y,
                -local.x * sin + local.z * cos,
            )
    }
}

/// Enter the nearest free vehicle in range, or exit the current one.
/// Out of range or all occupied: the request is silently ignored.
pub fn toggle(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    if let Some(vehicle_id) = state.player.vehicle {
        if let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
            vehicle.occupied = false;
            // Dismount beside the vehicle
            let (sin, cos) = vehicle.yaw.sin_cos();
            state.player.position = vehicle.position + Vec3::new(2.0 * cos, 1.0, -2.0 * sin);
            state.player.velocity = Vec3::ZERO;
            state.player.grounded = false;
            events.push(GameEvent::VehicleExited { vehicle_id });
        }
        state.player.vehicle = None;
        return;
    }

    let player_pos = state.player.position;
    let nearest = state
        .vehicles
        .iter_mut()
        .filter(|v| !v.occupied && within(v.position, player_pos, VEHICLE_ENTER_RADIUS))
        .min_by(|a, b| {
            a.position
                .distance_squared(player_pos)
                .total_cmp(&b.position.distance_squared(player_pos))
        });

    if let Some(vehicle) = nearest {
        vehicle.occupied = true;
        state.player.vehicle = Some(vehicle.id);
        events.push(GameEvent::VehicleEntered {
            vehicle_id: vehicle.id,
        });
    }
}

/// Drive the occupied vehicle, if any, and keep the rider seated
pub fn update(state: &mut SimulationState, input: &FrameInput, dt: f32) {
    let Some(vehicle_id) = state.player.vehicle else {
        return;
    };
    let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == vehicle_id) else {
        return;
    };

    let turn = vehicle.kind.turn_rate() * dt;
    if input.move_left {
        vehicle.yaw += turn;
    }
    if input.move_right {
        vehicle.yaw -= turn;
    }

    let throttle = match (input.move_forward, input.move_back) {
        (true, false) => 1.0,
        (false, true) => -0.5,
        _ => 0.0,
    };
    let forward = vehicle.forward();
    vehicle.position += forward * throttle * vehicle.kind.speed() * dt;

    match vehicle.kind {
        VehicleKind::Buggy => {
            vehicle.position.y = VEHICLE_REST_HEIGHT;
        }
        VehicleKind::Helicopter => {
            if input.jump {
                vehicle.position.y += 4.0 * dt;
            } else {
                vehicle.position.y -= 2.0 * dt;
            }
        }
        VehicleKind::Glider => {
            // Lift comes from airspeed: level under throttle, sink otherwise
            if throttle > 0.0 {
                if input.jump {
                    vehicle.position.y += 3.0 * dt;
                }
            } else {
                vehicle.position.y -= 6.0 * dt;
            }
        }
    }
    vehicle.position.y = vehicle.position.y.max(VEHICLE_REST_HEIGHT);
    vehicle.position.x = vehicle.position.x.clamp(-PLAYER_BOUNDARY, PLAYER_BOUNDARY);
    vehicle.position.z = vehicle.position.z.clamp(-PLAYER_BOUNDARY, PLAYER_BOUNDARY);

    state.player.position = vehicle.position + SEAT_OFFSET;
    state.player.velocity = Vec3::ZERO;
}
