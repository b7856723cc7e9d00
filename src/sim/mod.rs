//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, validated before use
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CollectEvent, OverlapEvent, resolve};
pub use geometry::{Aabb, Axis, Penetration};
pub use input::{InputIntent, apply_input};
pub use physics::integrate;
pub use rules::GameOverEvent;
pub use scoring::ScoreKeeper;
pub use snapshot::{CollectibleView, FrameSnapshot, HazardView, PlayerView};
pub use state::{
    Collectible, Facing, GameState, Hazard, Platform, Player, SimulationContext, World,
};
pub use tick::{Simulation, tick};
