//! Playing -> GameOver transition

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::OverlapEvent;
use super::state::{GameState, SimulationContext};

/// Raised once per session when the player is defeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverEvent {
    /// Tick on which the hit happened
    pub tick: u64,
    pub final_score: u32,
}

/// End the session on the first bomb hit of a tick.
///
/// Returns the event only on the transition itself; later calls return `None`.
pub fn evaluate(ctx: &mut SimulationContext, events: &[OverlapEvent]) -> Option<GameOverEvent> {
    if ctx.state == GameState::GameOver {
        return None;
    }

    let hazard_id = events.iter().find_map(|e| match e {
        OverlapEvent::HazardHit { hazard_id } => Some(*hazard_id),
        _ => None,
    })?;

    ctx.state = GameState::GameOver;
    ctx.player.vel = Vec2::ZERO;
    ctx.player.alive = false;

    let event = GameOverEvent {
        tick: ctx.time_ticks,
        final_score: ctx.score.score(),
    };
    log::info!(
        "Game over: hit bomb {} on tick {} with score {}",
        hazard_id,
        event.tick,
        event.final_score
    );
    Some(event)
}
