//! Static race configuration
//!
//! Loaded once at startup and validated before any race is built.
//! All lengths share the unit of the track geometry.

use anyhow::{bail, ensure, Result};

use super::types::{Controller, LaneId, SpeedTier};

/// Length shared by every car
pub const CAR_LENGTH: f32 = 110.0;

/// Length shared by obstacles and speed boosts
pub const OBSTACLE_AND_SPEED_BOOST_LENGTH: f32 = 50.0;

/// Distance from start to finish
pub const RACE_DISTANCE: f32 = 6000.0;

/// Longitudinal spacing between generated track rows
pub const SPAWN_SPACING: f32 = 300.0;

/// Lateral shift applied by a single steering command
pub const LANE_CHANGE_STEP: f32 = 80.0;

/// Ticks a fetched speed boost stays active
pub const BOOST_DURATION_TICKS: u32 = 25;

/// Multiplier applied to the speed step while boosted
pub const BOOST_MULTIPLIER: f32 = 2.0;

/// Upper bound on generated track rows and scenery tiles
pub const MAX_TRACK_ROWS: f32 = 100_000.0;

/// Bounds of one lane, half-open on the right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneBounds {
    pub id: LaneId,
    pub x_start: f32,
    pub x_end: f32,
}

impl LaneBounds {
    pub fn new(id: u8, x_start: f32, x_end: f32) -> Self {
        Self {
            id: LaneId(id),
            x_start,
            x_end,
        }
    }

    pub fn contains(&self, x_position: f32) -> bool {
        x_position >= self.x_start && x_position < self.x_end
    }

    pub fn center(&self) -> f32 {
        (self.x_start + self.x_end) / 2.0
    }
}

/// Distance covered per tick for each speed tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSteps {
    pub rest: f32,
    pub low: f32,
    pub moderate: f32,
    pub high: f32,
}

impl SpeedSteps {
    pub fn step(&self, tier: SpeedTier) -> f32 {
        match tier {
            SpeedTier::Rest => self.rest,
            SpeedTier::Low => self.low,
            SpeedTier::Moderate => self.moderate,
            SpeedTier::High => self.high,
        }
    }
}

impl Default for SpeedSteps {
    fn default() -> Self {
        Self {
            rest: 0.0,
            low: 4.0,
            moderate: 8.0,
            high: 12.0,
        }
    }
}

/// Where a car sits when the race is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarStart {
    pub controller: Controller,
    pub x_position: f32,
    pub y_position: f32,
    pub speed: SpeedTier,
}

/// What happens when a player command is rejected by crash detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrashPolicy {
    /// Discard the command and keep racing
    #[default]
    RejectMove,
    /// Discard the command and abort the race
    EndRace,
}

/// Complete static configuration of a race
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub lanes: Vec<LaneBounds>,
    pub car_length: f32,
    pub obstacle_and_speed_boost_length: f32,
    pub speed_steps: SpeedSteps,
    pub race_distance: f32,
    pub spawn_spacing: f32,
    /// Rows closer than this to the start never get track items
    pub clear_start_distance: f32,
    pub obstacle_probability: f64,
    pub speed_boost_probability: f64,
    pub lane_change_step: f32,
    pub boost_multiplier: f32,
    pub boost_duration_ticks: u32,
    /// Length of one repeating scenery tile, drives the background offset
    pub scenery_tile_length: f32,
    pub scenery_images: Vec<String>,
    pub ai_car_images: Vec<String>,
    pub player_car_image: String,
    pub car_starts: Vec<CarStart>,
    pub crash_policy: CrashPolicy,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            lanes: vec![
                LaneBounds::new(1, 0.0, 60.0),
                LaneBounds::new(2, 61.0, 160.0),
                LaneBounds::new(3, 161.0, 230.0),
            ],
            car_length: CAR_LENGTH,
            obstacle_and_speed_boost_length: OBSTACLE_AND_SPEED_BOOST_LENGTH,
            speed_steps: SpeedSteps::default(),
            race_distance: RACE_DISTANCE,
            spawn_spacing: SPAWN_SPACING,
            clear_start_distance: 600.0,
            obstacle_probability: 0.7,
            speed_boost_probability: 0.3,
            lane_change_step: LANE_CHANGE_STEP,
            boost_multiplier: BOOST_MULTIPLIER,
            boost_duration_ticks: BOOST_DURATION_TICKS,
            scenery_tile_length: 400.0,
            scenery_images: ["tree", "bush", "rock", "house", "barn"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ai_car_images: ["ai_red", "ai_blue", "ai_green", "ai_yellow"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            player_car_image: "player".to_string(),
            car_starts: vec![
                CarStart {
                    controller: Controller::Player,
                    x_position: 110.0,
                    y_position: 0.0,
                    speed: SpeedTier::Rest,
                },
                CarStart {
                    controller: Controller::Ai,
                    x_position: 30.0,
                    y_position: 250.0,
                    speed: SpeedTier::Low,
                },
                CarStart {
                    controller: Controller::Ai,
                    x_position: 190.0,
                    y_position: 500.0,
                    speed: SpeedTier::Moderate,
                },
            ],
            crash_policy: CrashPolicy::default(),
        }
    }
}

impl Parameters {
    /// Check every startup invariant of the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.lanes.len() == 3,
            "Expected exactly 3 lanes, found {}",
            self.lanes.len()
        );

        for (index, lane) in self.lanes.iter().enumerate() {
            ensure!(
                lane.id == LaneId(index as u8 + 1),
                "Lane at index {} has id {:?}, lanes must be numbered 1..=3 in order",
                index,
                lane.id
            );
            ensure!(
                lane.x_start < lane.x_end,
                "Lane {:?} is empty: [{}, {})",
                lane.id,
                lane.x_start,
                lane.x_end
            );
        }

        for pair in self.lanes.windows(2) {
            if pair[1].x_start < pair[0].x_end {
                bail!(
                    "Lanes {:?} and {:?} overlap: [{}, {}) and [{}, {})",
                    pair[0].id,
                    pair[1].id,
                    pair[0].x_start,
                    pair[0].x_end,
                    pair[1].x_start,
                    pair[1].x_end
                );
            }
        }

        for (name, value) in [
            ("Car length", self.car_length),
            ("Obstacle and speed boost length", self.obstacle_and_speed_boost_length),
            ("Race distance", self.race_distance),
            ("Spawn spacing", self.spawn_spacing),
            ("Scenery tile length", self.scenery_tile_length),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                "{} must be positive and finite, got {}",
                name,
                value
            );
        }
        ensure!(
            self.clear_start_distance.is_finite() && self.lane_change_step.is_finite(),
            "Clear start distance and lane change step must be finite"
        );
        ensure!(
            self.race_distance / self.spawn_spacing <= MAX_TRACK_ROWS
                && self.race_distance / self.scenery_tile_length <= MAX_TRACK_ROWS,
            "Race distance {} needs more than {} track rows",
            self.race_distance,
            MAX_TRACK_ROWS
        );
        ensure!(
            (0.0..=1.0).contains(&self.obstacle_probability)
                && (0.0..=1.0).contains(&self.speed_boost_probability),
            "Spawn probabilities must lie in [0, 1]"
        );
        ensure!(
            self.boost_multiplier.is_finite() && self.boost_multiplier >= 1.0,
            "Boost multiplier must be finite and at least 1"
        );

        let steps = SpeedTier::ALL.map(|tier| self.speed_steps.step(tier));
        ensure!(
            steps.iter().all(|step| step.is_finite()),
            "Speed steps must be finite: {:?}",
            steps
        );
        ensure!(steps[0] >= 0.0, "Speed steps must not be negative");
        ensure!(
            steps.windows(2).all(|pair| pair[0] < pair[1]),
            "Speed steps must strictly increase from rest to high: {:?}",
            steps
        );

        // Front checks only see items at or ahead of the car's rear, so no
        // relative move per tick may exceed one car length.
        let max_step = self.speed_steps.high * self.boost_multiplier - self.speed_steps.rest;
        ensure!(
            max_step <= self.car_length,
            "Boosted high speed step {} would skip over obstacles",
            max_step
        );

        let players = self
            .car_starts
            .iter()
            .filter(|start| start.controller == Controller::Player)
            .count();
        ensure!(players == 1, "Expected exactly one player car, found {}", players);

        for start in &self.car_starts {
            ensure!(
                self.lanes.iter().any(|lane| lane.contains(start.x_position)),
                "Starting car at x={} is outside the track",
                start.x_position
            );
        }

        ensure!(
            !self.ai_car_images.is_empty() && !self.scenery_images.is_empty(),
            "Image lists must not be empty"
        );

        Ok(())
    }

    /// Distance a car in this tier covers per tick, boost included
    pub fn effective_step(&self, tier: SpeedTier, boosted: bool) -> f32 {
        let step = self.speed_steps.step(tier);
        if boosted {
            step * self.boost_multiplier
        } else {
            step
        }
    }
}
