//! Session wiring between the simulation and the host UI
//!
//! The UI adapter is told when the run ends so it can offer a restart; the
//! restart itself throws the whole simulation away and builds a new one from
//! the same config.

use crate::config::GameConfig;
use crate::error::{ConfigResult, TickError};
use crate::sim::{FrameSnapshot, GameOverEvent, InputIntent, Simulation};

/// Presentation hooks implemented by the host
pub trait UiAdapter {
    /// Called once per session when the player is defeated
    fn on_game_over(&mut self, event: &GameOverEvent);

    /// Called after a restart has built a fresh session
    fn on_restart(&mut self) {}
}

/// Adapter that only logs, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogUi;

impl UiAdapter for LogUi {
    fn on_game_over(&mut self, event: &GameOverEvent) {
        log::info!(
            "Restart available (final score {}, tick {})",
            event.final_score,
            event.tick
        );
    }
}

pub struct Session<U: UiAdapter> {
    config: GameConfig,
    sim: Simulation,
    ui: U,
    restarts: u32,
}

impl<U: UiAdapter> Session<U> {
    pub fn new(config: GameConfig, ui: U) -> ConfigResult<Self> {
        let sim = Simulation::new(&config)?;
        Ok(Self {
            config,
            sim,
            ui,
            restarts: 0,
        })
    }

    /// Tick the simulation and forward a game-over to the UI
    pub fn update(&mut self, dt: f32, intent: InputIntent) -> Result<FrameSnapshot, TickError> {
        let frame = self.sim.update(dt, intent)?;
        if let Some(event) = self.sim.take_game_over() {
            self.ui.on_game_over(&event);
        }
        Ok(frame)
    }

    /// Discard every entity and start over from the stored config
    pub fn request_restart(&mut self) -> ConfigResult<()> {
        self.sim = Simulation::new(&self.config)?;
        self.restarts += 1;
        log::info!("Session restarted ({} restarts)", self.restarts);
        self.ui.on_restart();
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
