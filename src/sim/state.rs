//! Game state and core simulation types
//!
//! Everything a session needs lives in [`SimulationContext`], which is built
//! once from a [`GameConfig`] and mutated only by the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::scoring::ScoreKeeper;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::ConfigResult;

/// Session state. Once `GameOver`, only a full re-initialization leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

/// Which way the player sprite faces (drives animation selection in the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
    /// Standing still, facing the camera
    #[default]
    Idle,
}

/// World bounds and constant gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub gravity: Vec2,
}

/// Static collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub aabb: Aabb,
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_size: Vec2,
    /// Horizontal run speed
    pub speed: f32,
    /// Upward launch speed of a jump
    pub jump_speed: f32,
    /// Vertical rebound off the world edges
    pub bounce: f32,
    /// Standing on a platform as of the last collision pass
    pub touching_ground: bool,
    pub alive: bool,
    pub facing: Facing,
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_size)
    }
}

/// A star. Never destroyed, only toggled inactive and re-armed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    /// Stars only ever move vertically
    pub vel: Vec2,
    pub half_size: Vec2,
    /// Vertical rebound coefficient in [STAR_BOUNCE_MIN, STAR_BOUNCE_MAX)
    pub bounce: f32,
    pub active: bool,
}

impl Collectible {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_size)
    }

    /// Re-arm at the top of the world, keeping the stored x
    pub fn respawn(&mut self, bounce: f32) {
        self.active = true;
        self.pos.y = 0.0;
        self.vel = Vec2::ZERO;
        self.bounce = bounce;
    }
}

/// A bouncing bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_size: Vec2,
    pub bounce: f32,
}

impl Hazard {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_size)
    }
}

/// Draw a star bounce coefficient
pub fn random_star_bounce(rng: &mut Pcg32) -> f32 {
    rng.random_range(STAR_BOUNCE_MIN..STAR_BOUNCE_MAX)
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimulationContext {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub world: World,
    pub platforms: Vec<Platform>,
    pub player: Player,
    /// Fixed count for the whole session, ordered by id
    pub collectibles: Vec<Collectible>,
    /// Ordered by id
    pub hazards: Vec<Hazard>,
    pub score: ScoreKeeper,
    pub state: GameState,
    /// Completed ticks (rejected and frozen ticks excluded)
    pub time_ticks: u64,
}

impl SimulationContext {
    /// Build every entity for a fresh session
    pub fn new(config: &GameConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);

        let world = World {
            width: config.world.width,
            height: config.world.height,
            gravity: Vec2::new(0.0, config.world.gravity),
        };

        let platforms = config
            .platforms
            .iter()
            .map(|p| Platform { aabb: p.aabb() })
            .collect();

        let player = Player {
            pos: config.player.start,
            vel: Vec2::ZERO,
            half_size: config.player.size * 0.5,
            speed: config.player.speed,
            jump_speed: config.player.jump_speed,
            bounce: config.player.bounce,
            touching_ground: false,
            alive: true,
            facing: Facing::Idle,
        };

        let stars = &config.stars;
        let collectibles = (0..stars.count)
            .map(|i| Collectible {
                id: i,
                pos: stars.position(i),
                vel: Vec2::ZERO,
                half_size: stars.size * 0.5,
                bounce: random_star_bounce(&mut rng),
                active: true,
            })
            .collect();

        let hazards = config
            .bombs
            .iter()
            .zip(0u32..)
            .map(|(bomb, id)| Hazard {
                id,
                pos: bomb.start,
                vel: Vec2::new(bomb.speed, 0.0),
                half_size: bomb.size * 0.5,
                bounce: BOMB_BOUNCE,
            })
            .collect();

        Ok(Self {
            seed: config.seed,
            rng,
            world,
            platforms,
            player,
            collectibles,
            hazards,
            score: ScoreKeeper::default(),
            state: GameState::Playing,
            time_ticks: 0,
        })
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn active_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| c.active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_context() {
        let ctx = SimulationContext::new(&GameConfig::classic()).unwrap();
        assert_eq!(ctx.state, GameState::Playing);
        assert_eq!(ctx.collectibles.len(), STAR_COUNT as usize);
        assert_eq!(ctx.active_collectibles(), STAR_COUNT as usize);
        assert_eq!(ctx.hazards.len(), 1);
        assert_eq!(ctx.platforms.len(), 4);
        assert_eq!(ctx.score.score(), 0);
        assert!(ctx.player.alive);
        assert!(!ctx.player.touching_ground);
        assert_eq!(ctx.world.gravity, Vec2::new(0.0, GRAVITY));

        for (i, star) in ctx.collectibles.iter().enumerate() {
            assert_eq!(star.pos, Vec2::new(12.0 + 60.0 * i as f32, 0.0));
            assert!((STAR_BOUNCE_MIN..STAR_BOUNCE_MAX).contains(&star.bounce));
        }
    }

    #[test]
    fn test_same_seed_same_bounces() {
        let a = SimulationContext::new(&GameConfig::classic()).unwrap();
        let b = SimulationContext::new(&GameConfig::classic()).unwrap();
        let bounces = |ctx: &SimulationContext| -> Vec<f32> {
            ctx.collectibles.iter().map(|c| c.bounce).collect()
        };
        assert_eq!(bounces(&a), bounces(&b));
    }

    #[test]
    fn test_invalid_config_builds_nothing() {
        let mut config = GameConfig::classic();
        config.world.width = -1.0;
        assert!(SimulationContext::new(&config).is_err());
    }

    #[test]
    fn test_respawn_keeps_x() {
        let mut star = Collectible {
            id: 0,
            pos: Vec2::new(72.0, 500.0),
            vel: Vec2::new(0.0, 40.0),
            half_size: Vec2::splat(10.0),
            bounce: 0.5,
            active: false,
        };
        star.respawn(0.7);
        assert!(star.active);
        assert_eq!(star.pos, Vec2::new(72.0, 0.0));
        assert_eq!(star.vel, Vec2::ZERO);
        assert_eq!(star.bounce, 0.7);
    }
}
