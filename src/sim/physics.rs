//! Gravity, velocity integration and world bounds
//!
//! Semi-implicit Euler: velocity picks up gravity first, then position moves
//! by the new velocity.

use glam::Vec2;

use super::state::{SimulationContext, World};

/// How a body reacts when it leaves the world rectangle on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
enum EdgeResponse {
    /// Clamp and stop along the axis
    Stop,
    /// Clamp and reverse, scaling speed by the coefficient
    Rebound(f32),
}

/// Result of keeping one body inside the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsContact {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Advance every dynamic body by `dt` seconds.
///
/// No-op once the session is over.
pub fn integrate(ctx: &mut SimulationContext, dt: f32) {
    if !ctx.is_playing() {
        return;
    }

    let world = ctx.world;

    let player = &mut ctx.player;
    step_body(&mut player.pos, &mut player.vel, world.gravity, dt);
    keep_in_world(
        &world,
        &mut player.pos,
        &mut player.vel,
        player.half_size,
        EdgeResponse::Stop,
        EdgeResponse::Rebound(player.bounce),
    );

    for star in ctx.collectibles.iter_mut().filter(|c| c.active) {
        step_body(&mut star.pos, &mut star.vel, world.gravity, dt);
        keep_in_world(
            &world,
            &mut star.pos,
            &mut star.vel,
            star.half_size,
            EdgeResponse::Stop,
            EdgeResponse::Rebound(star.bounce),
        );
    }

    for bomb in &mut ctx.hazards {
        step_body(&mut bomb.pos, &mut bomb.vel, world.gravity, dt);
        let contact = keep_in_world(
            &world,
            &mut bomb.pos,
            &mut bomb.vel,
            bomb.half_size,
            EdgeResponse::Rebound(1.0),
            EdgeResponse::Rebound(bomb.bounce),
        );
        if contact.horizontal {
            log::trace!("Bomb {} bounced off wall, vx={}", bomb.id, bomb.vel.x);
        }
    }
}

#[inline]
fn step_body(pos: &mut Vec2, vel: &mut Vec2, gravity: Vec2, dt: f32) {
    *vel += gravity * dt;
    *pos += *vel * dt;
}

/// Clamp a body's box inside the world and apply the edge response per axis.
///
/// A rebound always points the velocity away from the wall that was hit, so a
/// body that stays pinned against a wall for several ticks flips only once.
fn keep_in_world(
    world: &World,
    pos: &mut Vec2,
    vel: &mut Vec2,
    half_size: Vec2,
    horizontal: EdgeResponse,
    vertical: EdgeResponse,
) -> BoundsContact {
    let limit = Vec2::new(world.width, world.height);
    let mut contact = BoundsContact::default();

    for axis in 0..2 {
        // A body wider than the world sits centered on that axis
        let lo = half_size[axis].min(limit[axis] * 0.5);
        let hi = limit[axis] - lo;
        let response = if axis == 0 { horizontal } else { vertical };

        let away = if pos[axis] < lo {
            1.0
        } else if pos[axis] > hi {
            -1.0
        } else {
            continue;
        };

        pos[axis] = pos[axis].clamp(lo, hi);
        vel[axis] = match response {
            EdgeResponse::Stop => 0.0,
            EdgeResponse::Rebound(k) => away * vel[axis].abs() * k,
        };
        if axis == 0 {
            contact.horizontal = true;
        } else {
            contact.vertical = true;
        }
    }

    contact
}
