//! Static track items and scenery
//!
//! Obstacles and speed boosts never move. What the display sees is their
//! live y-position, which scrolls with the player's distance travelled.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::parameters::Parameters;

/// A hazard sitting at a fixed distance from the start line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x_position: f32,
    pub distance: f32,
}

impl Obstacle {
    pub fn live_y(&self, distance_travelled: f32) -> f32 {
        self.distance - distance_travelled
    }
}

/// A pickup that boosts the player once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBoost {
    pub x_position: f32,
    pub distance: f32,
    /// Set once the player has picked this boost up
    pub fetched: bool,
}

impl SpeedBoost {
    pub fn new(x_position: f32, distance: f32) -> Self {
        Self {
            x_position,
            distance,
            fetched: false,
        }
    }

    pub fn live_y(&self, distance_travelled: f32) -> f32 {
        self.distance - distance_travelled
    }
}

/// Scrolling scenery on both sides of the track
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub y_offset: f32,
    pub left_images: Vec<String>,
    pub right_images: Vec<String>,
}

impl Background {
    pub fn generate<R: Rng>(params: &Parameters, rng: &mut R) -> Self {
        let tiles = (params.race_distance / params.scenery_tile_length).ceil() as usize + 1;
        let pick = |rng: &mut R| -> Vec<String> {
            (0..tiles)
                .filter_map(|_| params.scenery_images.choose(rng).cloned())
                .collect()
        };
        let left_images = pick(rng);
        let right_images = pick(rng);

        Self {
            y_offset: 0.0,
            left_images,
            right_images,
        }
    }

    pub fn scroll_to(&mut self, distance_travelled: f32, params: &Parameters) {
        self.y_offset = distance_travelled.rem_euclid(params.scenery_tile_length);
    }
}

/// Place obstacles and speed boosts along the whole race length
///
/// Each row holds at most one obstacle, so a free lane always remains. A
/// boost never shares its lane with the obstacle of the same row.
pub fn generate_track_items<R: Rng>(
    params: &Parameters,
    rng: &mut R,
) -> (Vec<Obstacle>, Vec<SpeedBoost>) {
    let mut obstacles = Vec::new();
    let mut speed_boosts = Vec::new();

    let rows = (params.race_distance / params.spawn_spacing).floor() as usize;
    for row in 1..=rows {
        let distance = row as f32 * params.spawn_spacing;
        if distance < params.clear_start_distance || distance >= params.race_distance {
            continue;
        }

        let mut free_lanes: Vec<f32> = params.lanes.iter().map(|lane| lane.center()).collect();

        if rng.random_bool(params.obstacle_probability) {
            let index = rng.random_range(0..free_lanes.len());
            let x_position = free_lanes.remove(index);
            obstacles.push(Obstacle {
                x_position,
                distance,
            });
        }

        if rng.random_bool(params.speed_boost_probability) {
            if let Some(&x_position) = free_lanes.choose(rng) {
                speed_boosts.push(SpeedBoost::new(x_position, distance));
            }
        }
    }

    (obstacles, speed_boosts)
}
