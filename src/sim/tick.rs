//! Per-tick simulation step
//!
//! Fixed order every tick: input, integrate, collide, score/respawn, state
//! machine, snapshot. A finished session skips straight to the snapshot.

use super::collision;
use super::input::{InputIntent, apply_input};
use super::physics;
use super::rules::{self, GameOverEvent};
use super::scoring;
use super::snapshot::FrameSnapshot;
use super::state::{GameState, SimulationContext};
use crate::config::{GameConfig, TickPolicy};
use crate::consts::MAX_FRAME_DT;
use crate::error::{ConfigResult, TickError};

/// Advance the context by `dt` seconds.
///
/// Returns the game-over event on the tick the session ends. The caller must
/// have validated `dt`.
pub fn tick(ctx: &mut SimulationContext, intent: InputIntent, dt: f32) -> Option<GameOverEvent> {
    if ctx.state == GameState::GameOver {
        return None;
    }

    ctx.time_ticks += 1;

    apply_input(&mut ctx.player, intent);
    physics::integrate(ctx, dt);
    let events = collision::resolve(ctx);
    scoring::apply_events(ctx, &events);
    rules::evaluate(ctx, &events)
}

/// An owned game session: all entity state plus the tick entry point
#[derive(Debug, Clone)]
pub struct Simulation {
    ctx: SimulationContext,
    policy: TickPolicy,
    /// Game-over event not yet handed to the UI
    pending_game_over: Option<GameOverEvent>,
}

impl Simulation {
    /// Build a fresh session. Fails without side effects on a bad config.
    pub fn new(config: &GameConfig) -> ConfigResult<Self> {
        let ctx = SimulationContext::new(config)?;
        log::info!(
            "Session started: seed {}, {} stars, {} bombs, {} tick policy",
            ctx.seed,
            ctx.collectibles.len(),
            ctx.hazards.len(),
            config.tick_policy.as_str()
        );
        Ok(Self {
            ctx,
            policy: config.tick_policy,
            pending_game_over: None,
        })
    }

    /// Run one tick and return the resulting frame.
    ///
    /// `dt` must be finite and non-negative. A bad `dt` leaves the state
    /// untouched and is either returned as an error ([`TickPolicy::Strict`])
    /// or skipped with a warning ([`TickPolicy::Lenient`]). Deltas longer
    /// than [`MAX_FRAME_DT`] are clamped to it.
    pub fn update(&mut self, dt: f32, intent: InputIntent) -> Result<FrameSnapshot, TickError> {
        if !dt.is_finite() || dt < 0.0 {
            return match self.policy {
                TickPolicy::Strict => Err(TickError::InvalidDelta(dt)),
                TickPolicy::Lenient => {
                    log::warn!("Skipping tick with invalid delta {dt}");
                    Ok(self.snapshot())
                }
            };
        }

        if dt > MAX_FRAME_DT {
            log::debug!("Clamping tick delta {dt} to {MAX_FRAME_DT}");
        }
        let game_over = tick(&mut self.ctx, intent, dt.min(MAX_FRAME_DT));
        if game_over.is_some() {
            self.pending_game_over = game_over;
        }
        Ok(FrameSnapshot::capture(&self.ctx, game_over))
    }

    /// Current frame without advancing time
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.ctx, None)
    }

    /// Hand over the game-over event, at most once per session
    pub fn take_game_over(&mut self) -> Option<GameOverEvent> {
        self.pending_game_over.take()
    }

    pub fn state(&self) -> GameState {
        self.ctx.state
    }

    pub fn score(&self) -> u32 {
        self.ctx.score.score()
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;
    use crate::consts::*;
    use crate::error::ConfigError;
    use crate::sim::state::Hazard;
    use glam::Vec2;
    use proptest::prelude::*;

    /// 720x1280 world, floor platform only, player airborne at (100, 1000)
    fn floor_config(gravity: f32) -> GameConfig {
        let mut config = GameConfig::classic();
        config.world.gravity = gravity;
        config.platforms = vec![PlatformConfig::new(360.0, 1200.0, 800.0, 64.0)];
        config.player.start = Vec2::new(100.0, 1000.0);
        config.stars.count = 0;
        config.bombs.clear();
        config
    }

    fn land(sim: &mut Simulation) {
        for _ in 0..200 {
            let frame = sim.update(SIM_DT, InputIntent::IDLE).unwrap();
            if frame.player.touching_ground {
                return;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_fall_and_land() {
        let mut sim = Simulation::new(&floor_config(800.0)).unwrap();

        let frame = sim.update(0.1, InputIntent::IDLE).unwrap();
        assert!((frame.player.vel.y - 80.0).abs() < 1e-3);
        assert!((frame.player.pos.y - 1008.0).abs() < 1e-3);
        assert!(!frame.player.touching_ground);

        let mut landed = None;
        for _ in 0..20 {
            let frame = sim.update(0.1, InputIntent::IDLE).unwrap();
            if frame.player.touching_ground {
                landed = Some(frame);
                break;
            }
        }
        let frame = landed.expect("player should reach the floor");
        assert_eq!(frame.player.vel.y, 0.0);
        // Floor top is 1168, player half height 24
        assert_eq!(frame.player.pos.y, 1144.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut sim = Simulation::new(&floor_config(GRAVITY)).unwrap();

        // Airborne: jump is ignored, vy just picks up gravity
        let before = sim.snapshot().player.vel.y;
        let frame = sim.update(SIM_DT, InputIntent::jump()).unwrap();
        assert!((frame.player.vel.y - (before + GRAVITY * SIM_DT)).abs() < 1e-4);

        land(&mut sim);
        let frame = sim.update(SIM_DT, InputIntent::jump()).unwrap();
        let expected = -PLAYER_JUMP_SPEED + GRAVITY * SIM_DT;
        assert!((frame.player.vel.y - expected).abs() < 1e-3);
        // Left the floor, so grounding is gone on the very same tick
        assert!(!frame.player.touching_ground);

        // No double jump
        let vy = frame.player.vel.y;
        let frame = sim.update(SIM_DT, InputIntent::jump()).unwrap();
        assert!((frame.player.vel.y - (vy + GRAVITY * SIM_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_grounded_through_tiny_deltas() {
        let mut sim = Simulation::new(&floor_config(GRAVITY)).unwrap();
        land(&mut sim);

        for i in 0..2000 {
            let frame = sim.update(1e-4, InputIntent::IDLE).unwrap();
            assert!(frame.player.touching_ground, "lost ground on tick {i}");
            assert!((frame.player.pos.y - 1144.0).abs() < 1e-3);
        }

        let frame = sim.update(1e-4, InputIntent::jump()).unwrap();
        assert!(frame.player.vel.y < 0.0);
        assert!(!frame.player.touching_ground);
    }

    #[test]
    fn test_collect_row_then_respawn() {
        let mut config = GameConfig::classic();
        config.world.gravity = 0.0;
        config.platforms.clear();
        config.bombs.clear();
        config.stars.count = 10;
        config.stars.start = Vec2::new(40.0, 600.0);
        config.stars.step = Vec2::new(60.0, 0.0);
        config.player.start = Vec2::new(40.0, 600.0);
        let mut sim = Simulation::new(&config).unwrap();

        let mut respawned_at = None;
        for _ in 0..60 {
            let frame = sim.update(0.1, InputIntent::right()).unwrap();
            if frame.respawn_waves > 0 {
                respawned_at = Some(frame);
                break;
            }
            let collected = 10 - frame.active_collectibles() as u32;
            assert_eq!(frame.score, STAR_VALUE * collected);
        }

        let frame = respawned_at.expect("all ten stars should be collected");
        assert_eq!(frame.score, 100);
        assert_eq!(frame.active_collectibles(), 10);
        for (i, star) in frame.collectibles.iter().enumerate() {
            assert_eq!(star.pos, Vec2::new(40.0 + 60.0 * i as f32, 0.0));
        }
        for star in &sim.context().collectibles {
            assert!((STAR_BOUNCE_MIN..STAR_BOUNCE_MAX).contains(&star.bounce));
        }
    }

    #[test]
    fn test_bomb_patrols_between_walls() {
        let mut config = GameConfig::classic();
        config.platforms.clear();
        config.stars.count = 0;
        config.bombs[0].start = Vec2::new(400.0, 16.0);
        config.bombs[0].speed = 150.0;
        let mut sim = Simulation::new(&config).unwrap();

        let mut flips = 0;
        let mut last_vx = 150.0;
        let mut reached_wall = false;
        for _ in 0..40 {
            let frame = sim.update(0.1, InputIntent::IDLE).unwrap();
            let bomb = &frame.hazards[0];
            assert!(bomb.pos.x <= 720.0 && bomb.pos.x >= 0.0);
            assert_eq!(bomb.vel.x.abs(), 150.0);
            if bomb.pos.x == 720.0 - BOMB_SIZE / 2.0 {
                reached_wall = true;
            }
            if bomb.vel.x != last_vx {
                flips += 1;
                last_vx = bomb.vel.x;
            }
        }
        assert!(reached_wall);
        assert_eq!(flips, 1);
        assert_eq!(last_vx, -150.0);
        assert_eq!(sim.state(), GameState::Playing);
    }

    #[test]
    fn test_bomb_hit_freezes_session() {
        let mut config = GameConfig::classic();
        config.platforms.clear();
        config.stars.count = 0;
        config.world.gravity = 0.0;
        let mut sim = Simulation::new(&config).unwrap();
        sim.ctx.hazards = vec![Hazard {
            id: 0,
            pos: sim.ctx.player.pos + Vec2::new(10.0, 0.0),
            vel: Vec2::new(150.0, 40.0),
            half_size: Vec2::splat(7.0),
            bounce: BOMB_BOUNCE,
        }];

        let frame = sim.update(SIM_DT, InputIntent::right()).unwrap();
        assert_eq!(frame.state, GameState::GameOver);
        assert_eq!(frame.player.vel, Vec2::ZERO);
        assert!(!frame.player.alive);
        let event = frame.game_over.expect("transition tick carries the event");
        assert_eq!(event.final_score, 0);

        let frozen = frame;
        let intent = InputIntent {
            left: true,
            right: false,
            jump: true,
        };
        for _ in 0..10 {
            let frame = sim.update(SIM_DT, intent).unwrap();
            assert_eq!(frame.player, frozen.player);
            assert_eq!(frame.hazards, frozen.hazards);
            assert!(frame.game_over.is_none());
        }

        assert_eq!(sim.take_game_over(), Some(event));
        assert_eq!(sim.take_game_over(), None);
    }

    #[test]
    fn test_collect_and_hit_same_tick_scores() {
        let mut config = GameConfig::classic();
        config.platforms.clear();
        config.world.gravity = 0.0;
        config.stars.count = 2;
        config.stars.start = Vec2::new(100.0, 600.0);
        config.stars.step = Vec2::new(300.0, 0.0);
        config.player.start = Vec2::new(100.0, 600.0);
        config.bombs[0].start = Vec2::new(110.0, 610.0);
        config.bombs[0].speed = 0.0;
        let mut sim = Simulation::new(&config).unwrap();

        let frame = sim.update(SIM_DT, InputIntent::IDLE).unwrap();
        assert_eq!(frame.score, STAR_VALUE);
        assert_eq!(frame.state, GameState::GameOver);
    }

    #[test]
    fn test_negative_width_fails_before_any_tick() {
        let mut config = GameConfig::classic();
        config.world.width = -1.0;
        assert!(matches!(
            Simulation::new(&config),
            Err(ConfigError::NonPositiveWorld { .. })
        ));
    }

    #[test]
    fn test_invalid_delta_strict() {
        let mut sim = Simulation::new(&GameConfig::classic()).unwrap();
        let before = sim.snapshot();
        for dt in [-0.1, f32::NAN, f32::INFINITY] {
            let result = sim.update(dt, InputIntent::right());
            assert!(matches!(result, Err(TickError::InvalidDelta(_))));
        }
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn test_invalid_delta_lenient() {
        let mut config = GameConfig::classic();
        config.tick_policy = TickPolicy::Lenient;
        let mut sim = Simulation::new(&config).unwrap();
        let before = sim.snapshot();
        let frame = sim.update(-1.0, InputIntent::jump()).unwrap();
        assert_eq!(frame, before);
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut sim = Simulation::new(&GameConfig::classic()).unwrap();
        for dt in [1e37, 1e37, SIM_DT, f32::MAX] {
            let frame = sim.update(dt, InputIntent::IDLE).unwrap();
            assert!(frame.player.pos.is_finite() && frame.player.vel.is_finite());
            assert!((0.0..=WORLD_HEIGHT).contains(&frame.player.pos.y));
            for bomb in &frame.hazards {
                assert!(bomb.pos.is_finite() && bomb.vel.is_finite());
                assert!((0.0..=WORLD_WIDTH).contains(&bomb.pos.x));
            }
        }

        // A clamped tick advances exactly as far as a MAX_FRAME_DT tick
        let mut a = Simulation::new(&GameConfig::classic()).unwrap();
        let mut b = Simulation::new(&GameConfig::classic()).unwrap();
        assert_eq!(
            a.update(1e37, InputIntent::right()).unwrap(),
            b.update(MAX_FRAME_DT, InputIntent::right()).unwrap()
        );
    }

    #[test]
    fn test_zero_delta_is_valid() {
        let mut sim = Simulation::new(&GameConfig::classic()).unwrap();
        let before = sim.snapshot();
        let frame = sim.update(0.0, InputIntent::right()).unwrap();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.player.pos, before.player.pos);
        assert_eq!(frame.player.vel.x, PLAYER_SPEED);
    }

    #[test]
    fn test_determinism() {
        let mut sim1 = Simulation::new(&GameConfig::classic()).unwrap();
        let mut sim2 = Simulation::new(&GameConfig::classic()).unwrap();

        let inputs = [
            InputIntent::right(),
            InputIntent::right().with_jump(),
            InputIntent::left(),
            InputIntent::IDLE,
        ];

        for i in 0..600 {
            let input = inputs[(i / 40) % inputs.len()];
            let a = sim1.update(SIM_DT, input).unwrap();
            let b = sim2.update(SIM_DT, input).unwrap();
            assert_eq!(a, b);
        }
    }

    fn intent_strategy() -> impl Strategy<Value = InputIntent> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| {
            InputIntent { left, right, jump }
        })
    }

    proptest! {
        #[test]
        fn prop_bodies_stay_in_world(
            speed in -400.0f32..400.0,
            dt in 0.001f32..0.05,
            intents in prop::collection::vec(intent_strategy(), 1..300),
        ) {
            let mut config = GameConfig::classic();
            config.bombs[0].speed = speed;
            let mut sim = Simulation::new(&config).unwrap();

            for intent in intents {
                let frame = sim.update(dt, intent).unwrap();
                for bomb in &frame.hazards {
                    prop_assert!((0.0..=WORLD_WIDTH).contains(&bomb.pos.x));
                    prop_assert!((0.0..=WORLD_HEIGHT).contains(&bomb.pos.y));
                    prop_assert_eq!(bomb.vel.x.abs(), speed.abs());
                }
                prop_assert!((0.0..=WORLD_WIDTH).contains(&frame.player.pos.x));
                prop_assert!((0.0..=WORLD_HEIGHT).contains(&frame.player.pos.y));

                let player_box = sim.context().player.aabb();
                for platform in &sim.context().platforms {
                    prop_assert!(!player_box.overlaps(&platform.aabb));
                }
            }
        }

        #[test]
        fn prop_game_over_is_final(
            intents in prop::collection::vec(intent_strategy(), 1..50),
        ) {
            let mut config = GameConfig::classic();
            config.bombs[0].start = config.player.start;
            let mut sim = Simulation::new(&config).unwrap();

            let first = sim.update(SIM_DT, InputIntent::IDLE).unwrap();
            prop_assert_eq!(first.state, GameState::GameOver);
            prop_assert!(first.game_over.is_some());

            for intent in intents {
                let frame = sim.update(SIM_DT, intent).unwrap();
                prop_assert_eq!(frame.state, GameState::GameOver);
                prop_assert!(frame.game_over.is_none());
                prop_assert_eq!(&frame.player, &first.player);
                prop_assert_eq!(&frame.hazards, &first.hazards);
                prop_assert_eq!(frame.score, first.score);
            }
        }
    }
}
