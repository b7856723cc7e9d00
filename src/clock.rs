//! Fixed timestep accumulator
//!
//! Hosts call [`FixedStepper::advance`] once per rendered frame with the wall
//! clock delta and run that many simulation ticks of [`FixedStepper::step`].

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStepper {
    step: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_DT)
    }
}

impl FixedStepper {
    pub fn new(step: f32, max_substeps: u32, max_frame_dt: f32) -> Self {
        Self {
            step,
            max_substeps,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// Fixed tick length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Bank a frame delta and return how many fixed ticks to run now.
    ///
    /// Long frames are clamped, and anything left over after `max_substeps`
    /// ticks is dropped down to one tick's worth so a slow host cannot fall
    /// further and further behind.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            log::warn!("Ignoring invalid frame delta {frame_dt}");
            return 0;
        }

        self.accumulator += frame_dt.min(self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Fraction of a tick banked but not yet simulated (for render interpolation)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
