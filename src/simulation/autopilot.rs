//! Simple driver for headless runs
//!
//! Reads snapshots like a display would and answers with the command a
//! careful player would press next.

use super::lane::lane_of;
use super::parameters::Parameters;
use super::snapshot::RaceSnapshot;
use super::types::{Command, Lane, RaceStatus, SpeedTier};

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Tier the driver accelerates to when the lane ahead is clear
    pub target_speed: SpeedTier,
    /// How far ahead of the player's front edge hazards are considered
    pub lookahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            target_speed: SpeedTier::High,
            lookahead: 250.0,
        }
    }
}

impl Autopilot {
    /// Next command for the player, if any
    pub fn decide(&self, snapshot: &RaceSnapshot, params: &Parameters) -> Option<Command> {
        if snapshot.status != RaceStatus::Ongoing {
            return None;
        }

        let player = &snapshot.player;
        let Lane::On(_) = player.lane else {
            return None;
        };

        if self.lane_blocked(snapshot, params, player.lane, false) {
            for (command, x_position) in [
                (Command::SteerLeft, player.x_position - params.lane_change_step),
                (Command::SteerRight, player.x_position + params.lane_change_step),
            ] {
                let lane = lane_of(&params.lanes, x_position);
                if lane != Lane::OutOfTrack && !self.lane_blocked(snapshot, params, lane, true) {
                    return Some(command);
                }
            }
            if player.speed > SpeedTier::Rest {
                return Some(Command::Slowdown);
            }
            return None;
        }

        if player.speed < self.target_speed {
            return Some(Command::Speedup);
        }

        None
    }

    /// Whether anything sits in `lane` in the band the player is about to drive through
    ///
    /// With `beside` set the band also covers one car length behind the
    /// player, which is what a lane change has to clear.
    fn lane_blocked(
        &self,
        snapshot: &RaceSnapshot,
        params: &Parameters,
        lane: Lane,
        beside: bool,
    ) -> bool {
        let player = &snapshot.player;
        let band_start = if beside {
            player.y_position - params.car_length
        } else {
            player.y_position
        };
        let band_end = player.y_position + params.car_length + self.lookahead;
        let in_band = |y: f32, length: f32| y + length >= band_start && y <= band_end;

        let cars = snapshot
            .ai_cars
            .iter()
            .filter(|car| car.lane == lane)
            .any(|car| in_band(car.y_position, params.car_length));
        let obstacles = snapshot
            .obstacles
            .iter()
            .filter(|obstacle| obstacle.lane == lane)
            .any(|obstacle| in_band(obstacle.y_position, params.obstacle_and_speed_boost_length));

        cars || obstacles
    }
}
