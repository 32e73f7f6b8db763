//! Standalone lane racing simulation
//!
//! Everything needed to run a race without a display: lane geometry, crash
//! detection, speed boosts, the race state and the engine that ticks it.

mod autopilot;
mod car;
mod controls;
mod crash;
mod engine;
mod lane;
mod parameters;
mod race;
mod snapshot;
mod speed_boost;
mod track;
mod types;

pub use autopilot::Autopilot;
pub use car::SimCar;
pub use controls::{candidate_for, Candidate};
pub use crash::crash;
pub use engine::{EngineHandle, EngineMessage, RaceEngine};
pub use lane::{contact, group_by_lane, lane_of, Contact};
pub use parameters::{
    CarStart, CrashPolicy, LaneBounds, Parameters, SpeedSteps, BOOST_DURATION_TICKS,
    BOOST_MULTIPLIER, CAR_LENGTH, LANE_CHANGE_STEP, MAX_TRACK_ROWS,
    OBSTACLE_AND_SPEED_BOOST_LENGTH, RACE_DISTANCE, SPAWN_SPACING,
};
pub use race::{CommandOutcome, Race, TickOutcome};
pub use snapshot::{CarSnapshot, RaceSnapshot, TrackItemSnapshot};
pub use speed_boost::enable_if_fetched;
pub use track::{generate_track_items, Background, Obstacle, SpeedBoost};
pub use types::{CarId, Command, Controller, Lane, LaneId, RaceStatus, Side, SpeedTier};
