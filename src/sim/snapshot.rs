//! Read-only frame view handed to the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rules::GameOverEvent;
use super::state::{Facing, GameState, SimulationContext};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub touching_ground: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Direction of travel
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleView {
    pub id: u32,
    pub pos: Vec2,
    pub active: bool,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub player: PlayerView,
    pub hazards: Vec<HazardView>,
    pub collectibles: Vec<CollectibleView>,
    pub score: u32,
    pub respawn_waves: u32,
    pub state: GameState,
    /// Set only on the tick the session ended
    pub game_over: Option<GameOverEvent>,
}

impl FrameSnapshot {
    pub fn capture(ctx: &SimulationContext, game_over: Option<GameOverEvent>) -> Self {
        let player = &ctx.player;
        Self {
            tick: ctx.time_ticks,
            player: PlayerView {
                pos: player.pos,
                vel: player.vel,
                facing: player.facing,
                touching_ground: player.touching_ground,
                alive: player.alive,
            },
            hazards: ctx
                .hazards
                .iter()
                .map(|h| HazardView {
                    id: h.id,
                    pos: h.pos,
                    vel: h.vel,
                    facing: facing_of(h.vel.x),
                })
                .collect(),
            collectibles: ctx
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    id: c.id,
                    pos: c.pos,
                    active: c.active,
                })
                .collect(),
            score: ctx.score.score(),
            respawn_waves: ctx.score.respawn_waves(),
            state: ctx.state,
            game_over,
        }
    }

    pub fn active_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| c.active).count()
    }
}

fn facing_of(vx: f32) -> Facing {
    if vx < 0.0 {
        Facing::Left
    } else if vx > 0.0 {
        Facing::Right
    } else {
        Facing::Idle
    }
}
