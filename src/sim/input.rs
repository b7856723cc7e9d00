//! Player intents
//!
//! The host resolves keys/touch into an [`InputIntent`] each tick; this module
//! turns it into velocity and facing.

use serde::{Deserialize, Serialize};

use super::state::{Facing, Player};

/// Discrete controls held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputIntent {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        jump: false,
    };

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::IDLE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::IDLE
        }
    }

    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Self::IDLE
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

/// Map an intent onto the player's velocity.
///
/// Opposing or absent directions stop the player. A jump only fires while the
/// player stood on a platform after the previous collision pass.
pub fn apply_input(player: &mut Player, intent: InputIntent) {
    match (intent.left, intent.right) {
        (true, false) => {
            player.vel.x = -player.speed;
            player.facing = Facing::Left;
        }
        (false, true) => {
            player.vel.x = player.speed;
            player.facing = Facing::Right;
        }
        _ => {
            player.vel.x = 0.0;
            player.facing = Facing::Idle;
        }
    }

    if intent.jump && player.touching_ground {
        player.vel.y = -player.jump_speed;
    }
}
