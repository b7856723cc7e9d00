//! World layout and tuning
//!
//! Supplied by the host's asset/config loader, usually as JSON. The default is
//! the classic single-screen layout: a floor, three ledges, twelve stars and
//! one bomb in a 720x1280 portrait frame.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};
use crate::sim::geometry::Aabb;

/// How `Simulation::update` treats a malformed tick delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickPolicy {
    /// Return an error to the caller
    #[default]
    Strict,
    /// Log a warning and skip the tick
    Lenient,
}

impl TickPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickPolicy::Strict => "Strict",
            TickPolicy::Lenient => "Lenient",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(TickPolicy::Strict),
            "lenient" | "skip" => Some(TickPolicy::Lenient),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Downward acceleration magnitude (pixels/s²)
    pub gravity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub start: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub jump_speed: f32,
    pub bounce: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub center: Vec2,
    pub size: Vec2,
}

impl PlatformConfig {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.center, self.size)
    }
}

/// Stars are laid out in a row starting at `start`, each offset by `step`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarLayout {
    pub count: u32,
    pub start: Vec2,
    pub step: Vec2,
    pub size: Vec2,
}

impl StarLayout {
    /// Spawn position of the star at `index`
    pub fn position(&self, index: u32) -> Vec2 {
        self.start + self.step * index as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombConfig {
    pub start: Vec2,
    /// Signed horizontal speed; the magnitude never changes
    pub speed: f32,
    pub size: Vec2,
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for star bounce draws
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub tick_policy: TickPolicy,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
    pub stars: StarLayout,
    #[serde(default)]
    pub bombs: Vec<BombConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// The original phone-frame level
    pub fn classic() -> Self {
        Self {
            seed: 0,
            tick_policy: TickPolicy::Strict,
            world: WorldConfig {
                width: WORLD_WIDTH,
                height: WORLD_HEIGHT,
                gravity: GRAVITY,
            },
            player: PlayerConfig {
                start: Vec2::new(100.0, 1100.0),
                size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
                speed: PLAYER_SPEED,
                jump_speed: PLAYER_JUMP_SPEED,
                bounce: PLAYER_BOUNCE,
            },
            platforms: vec![
                // Floor, doubled in size
                PlatformConfig::new(360.0, 1200.0, 800.0, 64.0),
                PlatformConfig::new(500.0, 900.0, 400.0, 32.0),
                PlatformConfig::new(100.0, 600.0, 400.0, 32.0),
                PlatformConfig::new(650.0, 400.0, 400.0, 32.0),
            ],
            stars: StarLayout {
                count: STAR_COUNT,
                start: Vec2::new(12.0, 0.0),
                step: Vec2::new(60.0, 0.0),
                size: Vec2::new(STAR_WIDTH, STAR_HEIGHT),
            },
            bombs: vec![BombConfig {
                start: Vec2::new(400.0, 16.0),
                speed: BOMB_SPEED,
                size: Vec2::splat(BOMB_SIZE),
            }],
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config: {}x{} world, {} platforms, {} stars, {} bombs",
            config.world.width,
            config.world.height,
            config.platforms.len(),
            config.stars.count,
            config.bombs.len()
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject any configuration the simulation cannot start from
    pub fn validate(&self) -> ConfigResult<()> {
        let world = &self.world;
        finite("world.width", world.width)?;
        finite("world.height", world.height)?;
        if world.width <= 0.0 || world.height <= 0.0 {
            return Err(ConfigError::NonPositiveWorld {
                width: world.width,
                height: world.height,
            });
        }
        finite("world.gravity", world.gravity)?;

        let player = &self.player;
        non_negative("player.speed", player.speed)?;
        non_negative("player.jump_speed", player.jump_speed)?;
        non_negative("player.bounce", player.bounce)?;
        body_size("player", player.size)?;
        self.inside_world("player".to_string(), player.start)?;

        for (index, platform) in self.platforms.iter().enumerate() {
            if !platform.aabb().is_well_formed() {
                return Err(ConfigError::IllFormedPlatform { index });
            }
        }
        for (a, first) in self.platforms.iter().enumerate() {
            for (b, second) in self.platforms.iter().enumerate().skip(a + 1) {
                if first.aabb().overlaps(&second.aabb()) {
                    return Err(ConfigError::OverlappingPlatforms { a, b });
                }
            }
        }

        let stars = &self.stars;
        body_size("star", stars.size)?;
        if !stars.start.is_finite() {
            return Err(ConfigError::NonFiniteValue { field: "stars.start" });
        }
        if !stars.step.is_finite() {
            return Err(ConfigError::NonFiniteValue { field: "stars.step" });
        }
        for i in 0..stars.count {
            self.inside_world(format!("star {i}"), stars.position(i))?;
        }

        for (i, bomb) in self.bombs.iter().enumerate() {
            finite("bomb.speed", bomb.speed)?;
            body_size("bomb", bomb.size)?;
            self.inside_world(format!("bomb {i}"), bomb.start)?;
        }

        Ok(())
    }

    fn inside_world(&self, entity: String, pos: Vec2) -> ConfigResult<()> {
        let inside = pos.is_finite()
            && (0.0..=self.world.width).contains(&pos.x)
            && (0.0..=self.world.height).contains(&pos.y);
        if inside {
            Ok(())
        } else {
            Err(ConfigError::EntityOutOfWorld { entity })
        }
    }
}

fn finite(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteValue { field })
    }
}

fn non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeValue { field });
    }
    Ok(())
}

fn body_size(entity: &'static str, size: Vec2) -> ConfigResult<()> {
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::IllFormedBody { entity })
    }
}
