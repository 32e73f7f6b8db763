//! Snapshots pushed to the display collaborator
//!
//! A snapshot is a self-contained copy of everything needed to draw a frame,
//! with track item positions already resolved to live y-positions.

use super::car::SimCar;
use super::lane::lane_of;
use super::parameters::Parameters;
use super::race::Race;
use super::types::{CarId, Controller, Lane, RaceStatus, SpeedTier};

#[derive(Debug, Clone, PartialEq)]
pub struct CarSnapshot {
    pub id: CarId,
    pub controller: Controller,
    pub lane: Lane,
    pub x_position: f32,
    pub y_position: f32,
    pub speed: SpeedTier,
    pub distance_travelled: f32,
    pub image_tag: String,
    pub speed_boost_active: bool,
}

impl CarSnapshot {
    fn capture(car: &SimCar, params: &Parameters) -> Self {
        Self {
            id: car.id,
            controller: car.controller,
            lane: car.lane(params),
            x_position: car.x_position,
            y_position: car.y_position,
            speed: car.speed,
            distance_travelled: car.distance_travelled,
            image_tag: car.image_tag.clone(),
            speed_boost_active: car.speed_boost_active,
        }
    }
}

/// An obstacle or speed boost as seen from the player's current position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackItemSnapshot {
    pub lane: Lane,
    pub x_position: f32,
    pub y_position: f32,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceSnapshot {
    pub status: RaceStatus,
    pub ticks: u64,
    pub race_distance: f32,
    pub player: CarSnapshot,
    pub ai_cars: Vec<CarSnapshot>,
    pub obstacles: Vec<TrackItemSnapshot>,
    /// Only boosts that have not been fetched yet
    pub speed_boosts: Vec<TrackItemSnapshot>,
    pub background_offset: f32,
    pub left_scenery: Vec<String>,
    pub right_scenery: Vec<String>,
}

impl RaceSnapshot {
    pub fn capture(race: &Race, params: &Parameters) -> Self {
        let travelled = race.player_car.distance_travelled;
        let item = |x_position: f32, distance: f32| TrackItemSnapshot {
            lane: lane_of(&params.lanes, x_position),
            x_position,
            y_position: distance - travelled,
            distance,
        };

        Self {
            status: race.status,
            ticks: race.ticks,
            race_distance: params.race_distance,
            player: CarSnapshot::capture(&race.player_car, params),
            ai_cars: race
                .ai_cars
                .iter()
                .map(|car| CarSnapshot::capture(car, params))
                .collect(),
            obstacles: race
                .obstacles
                .iter()
                .map(|o| item(o.x_position, o.distance))
                .collect(),
            speed_boosts: race
                .speed_boosts
                .iter()
                .filter(|b| !b.fetched)
                .map(|b| item(b.x_position, b.distance))
                .collect(),
            background_offset: race.background.y_offset,
            left_scenery: race.background.left_images.clone(),
            right_scenery: race.background.right_images.clone(),
        }
    }

    /// Fraction of the race distance covered by the player, clamped to 1
    pub fn progress(&self) -> f32 {
        (self.player.distance_travelled / self.race_distance).clamp(0.0, 1.0)
    }
}
