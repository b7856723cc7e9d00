//! Score keeping and star respawn waves

use serde::{Deserialize, Serialize};

use super::collision::{CollectEvent, OverlapEvent};
use super::state::{SimulationContext, random_star_bounce};
use crate::consts::STAR_VALUE;

/// Score counter plus the number of respawn waves triggered so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    score: u32,
    respawn_waves: u32,
}

impl ScoreKeeper {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn respawn_waves(&self) -> u32 {
        self.respawn_waves
    }

    /// Award one star. Saturates instead of wrapping.
    pub fn on_collect(&mut self, event: &CollectEvent) {
        self.score = self.score.saturating_add(STAR_VALUE);
        log::debug!(
            "Collected star {} (score {})",
            event.collectible_id,
            self.score
        );
    }
}

/// What the scoring pass did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub collected: u32,
    pub respawned: bool,
}

/// Score the tick's collect events, then re-arm every star if none are left.
///
/// Does nothing once the session is over.
pub fn apply_events(ctx: &mut SimulationContext, events: &[OverlapEvent]) -> ScoreUpdate {
    let mut update = ScoreUpdate::default();
    if !ctx.is_playing() {
        return update;
    }

    for event in events {
        if let OverlapEvent::Collect(collect) = event {
            ctx.score.on_collect(collect);
            update.collected += 1;
        }
    }

    let depleted =
        !ctx.collectibles.is_empty() && ctx.collectibles.iter().all(|c| !c.active);
    if depleted {
        respawn_wave(ctx);
        update.respawned = true;
    }

    update
}

/// Re-arm every star at the top of the world with a fresh bounce.
/// Each star keeps its current x.
pub fn respawn_wave(ctx: &mut SimulationContext) {
    for star in &mut ctx.collectibles {
        let bounce = random_star_bounce(&mut ctx.rng);
        star.respawn(bounce);
    }
    ctx.score.respawn_waves += 1;
    log::info!(
        "Respawn wave {}: {} stars re-armed (score {})",
        ctx.score.respawn_waves,
        ctx.collectibles.len(),
        ctx.score.score
    );
}
