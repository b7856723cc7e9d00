//! Collision detection and response
//!
//! Solid contacts against platforms are resolved in place. Overlaps that carry
//! gameplay meaning (stars, bombs) are only reported; the rules layer decides
//! what they do.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Axis, Penetration};
use super::state::{Platform, SimulationContext};

/// A non-solid overlap found during a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapEvent {
    /// Player touched an active star, which is now inactive
    Collect(CollectEvent),
    /// Player touched a bomb
    HazardHit { hazard_id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectEvent {
    pub collectible_id: u32,
}

/// Restitution per axis used when a body is pushed out of a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restitution {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Restitution {
    /// Velocity along the resolved axis is zeroed
    pub const STOP: Self = Self {
        horizontal: 0.0,
        vertical: 0.0,
    };

    fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Outcome of pushing one body out of one platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidContact {
    pub axis: Axis,
    /// Body was above the platform and got pushed up onto it
    pub from_above: bool,
}

/// Push a body out of a platform along the axis of minimum penetration.
///
/// The velocity component along that axis is reflected and scaled by the
/// restitution, unless it already points away from the platform.
pub fn resolve_solid(
    pos: &mut Vec2,
    vel: &mut Vec2,
    half_size: Vec2,
    platform: &Platform,
    restitution: Restitution,
) -> Option<SolidContact> {
    let body = Aabb::new(*pos, half_size);
    let Penetration {
        axis,
        depth,
        normal,
    } = body.penetration(&platform.aabb)?;

    *pos += normal * depth;

    let i = match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    };
    let into_platform = vel[i] * normal[i] < 0.0;
    if into_platform {
        vel[i] = -vel[i] * restitution.along(axis);
    }

    Some(SolidContact {
        axis,
        from_above: axis == Axis::Vertical && normal.y < 0.0,
    })
}

/// Run one collision pass over the whole context.
///
/// Clears and recomputes `touching_ground`, resolves every dynamic body
/// against every platform, then reports player overlaps with stars and bombs.
/// A player that is not moving up and rests on a platform top within
/// [`CONTACT_EPSILON`](super::geometry::CONTACT_EPSILON) counts as grounded
/// even when no push-out was needed.
/// Player overlaps are skipped once the player is no longer alive.
pub fn resolve(ctx: &mut SimulationContext) -> Vec<OverlapEvent> {
    let mut events = Vec::new();
    if !ctx.is_playing() {
        return events;
    }

    let player = &mut ctx.player;
    player.touching_ground = false;
    for platform in &ctx.platforms {
        let contact = resolve_solid(
            &mut player.pos,
            &mut player.vel,
            player.half_size,
            platform,
            Restitution::STOP,
        );
        if matches!(contact, Some(SolidContact { from_above: true, .. })) {
            player.touching_ground = true;
        }
    }
    // Short ticks can leave the player sunk less than the contact tolerance,
    // which resolves nothing but is still standing
    if !player.touching_ground && player.vel.y >= 0.0 {
        let body = player.aabb();
        player.touching_ground = ctx.platforms.iter().any(|p| body.rests_on(&p.aabb));
    }

    for bomb in &mut ctx.hazards {
        let restitution = Restitution {
            horizontal: bomb.bounce,
            vertical: bomb.bounce,
        };
        for platform in &ctx.platforms {
            resolve_solid(
                &mut bomb.pos,
                &mut bomb.vel,
                bomb.half_size,
                platform,
                restitution,
            );
        }
    }

    for star in ctx.collectibles.iter_mut().filter(|c| c.active) {
        let restitution = Restitution {
            horizontal: 0.0,
            vertical: star.bounce,
        };
        for platform in &ctx.platforms {
            resolve_solid(
                &mut star.pos,
                &mut star.vel,
                star.half_size,
                platform,
                restitution,
            );
        }
    }

    if !ctx.player.alive {
        return events;
    }

    let player_box = ctx.player.aabb();

    for star in ctx.collectibles.iter_mut().filter(|c| c.active) {
        if player_box.overlaps(&star.aabb()) {
            star.active = false;
            events.push(OverlapEvent::Collect(CollectEvent {
                collectible_id: star.id,
            }));
        }
    }

    for bomb in &ctx.hazards {
        if player_box.overlaps(&bomb.aabb()) {
            events.push(OverlapEvent::HazardHit { hazard_id: bomb.id });
        }
    }

    events
}
