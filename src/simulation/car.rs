//! Car state for the lane racing simulation
//!
//! The lane a car is in is always derived from `x_position`, never stored.

use super::lane::lane_of;
use super::parameters::Parameters;
use super::types::{CarId, Controller, Lane, SpeedTier};

/// A car in the race, driven either by the player or by the AI
#[derive(Debug, Clone, PartialEq)]
pub struct SimCar {
    pub id: CarId,
    pub x_position: f32,
    pub y_position: f32,
    pub speed: SpeedTier,
    pub controller: Controller,
    pub distance_travelled: f32,
    pub image_tag: String,
    pub speed_boost_active: bool,
    /// Ticks left on the current boost; zero when no boost is active
    pub boost_ticks_remaining: u32,
}

impl SimCar {
    pub fn new(
        id: CarId,
        controller: Controller,
        x_position: f32,
        y_position: f32,
        speed: SpeedTier,
        image_tag: String,
    ) -> Self {
        Self {
            id,
            x_position,
            y_position,
            speed,
            controller,
            distance_travelled: 0.0,
            image_tag,
            speed_boost_active: false,
            boost_ticks_remaining: 0,
        }
    }

    pub fn lane(&self, params: &Parameters) -> Lane {
        lane_of(&params.lanes, self.x_position)
    }

    pub fn is_player(&self) -> bool {
        self.controller == Controller::Player
    }

    /// Distance this car covers in one tick
    pub fn step(&self, params: &Parameters) -> f32 {
        params.effective_step(self.speed, self.speed_boost_active)
    }

    /// Start (or restart) a boost window
    pub fn activate_boost(&mut self, duration_ticks: u32) {
        self.speed_boost_active = duration_ticks > 0;
        self.boost_ticks_remaining = duration_ticks;
    }

    /// Count one tick off the boost window, deactivating it at zero
    pub fn tick_boost(&mut self) {
        if !self.speed_boost_active {
            return;
        }
        self.boost_ticks_remaining = self.boost_ticks_remaining.saturating_sub(1);
        if self.boost_ticks_remaining == 0 {
            self.speed_boost_active = false;
        }
    }
}
