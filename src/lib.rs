//! Star Catcher - a small 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring, game state)
//! - `config`: Data-driven world layout and tuning
//! - `session`: UI adapter seam and restart handling
//! - `clock`: Fixed timestep accumulator for host frame loops

pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod sim;

pub use clock::FixedStepper;
pub use config::{GameConfig, TickPolicy};
pub use error::{ConfigError, TickError};
pub use session::{Session, UiAdapter};
pub use sim::{FrameSnapshot, GameState, InputIntent, Simulation};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for stable landings)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host loop will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions (portrait phone frame)
    pub const WORLD_WIDTH: f32 = 720.0;
    pub const WORLD_HEIGHT: f32 = 1280.0;
    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 160.0;
    pub const PLAYER_JUMP_SPEED: f32 = 330.0;
    pub const PLAYER_BOUNCE: f32 = 0.2;

    /// Star defaults
    pub const STAR_WIDTH: f32 = 24.0;
    pub const STAR_HEIGHT: f32 = 22.0;
    pub const STAR_COUNT: u32 = 12;
    /// Points awarded per star
    pub const STAR_VALUE: u32 = 10;
    /// Bounce coefficient range assigned on spawn (half-open)
    pub const STAR_BOUNCE_MIN: f32 = 0.4;
    pub const STAR_BOUNCE_MAX: f32 = 0.8;

    /// Bomb defaults
    pub const BOMB_SIZE: f32 = 14.0;
    pub const BOMB_SPEED: f32 = 150.0;
    /// Bombs rebound without losing energy
    pub const BOMB_BOUNCE: f32 = 1.0;
}
