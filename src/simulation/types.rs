//! Core types for the lane racing simulation
//!
//! Plain value types shared by every other module.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub usize);

/// Identifier of one of the drivable lanes, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneId(pub u8);

/// Result of resolving a lateral position against the lane table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Position falls inside this lane
    On(LaneId),
    /// Position is outside every configured lane
    OutOfTrack,
}

impl Lane {
    pub fn id(&self) -> Option<LaneId> {
        match self {
            Lane::On(id) => Some(*id),
            Lane::OutOfTrack => None,
        }
    }
}

/// Who drives a car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Player,
    Ai,
}

/// Discrete speed tiers, slowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedTier {
    Rest,
    Low,
    Moderate,
    High,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 4] = [
        SpeedTier::Rest,
        SpeedTier::Low,
        SpeedTier::Moderate,
        SpeedTier::High,
    ];

    /// Next tier up, saturating at `High`
    pub fn faster(self) -> Self {
        match self {
            SpeedTier::Rest => SpeedTier::Low,
            SpeedTier::Low => SpeedTier::Moderate,
            SpeedTier::Moderate | SpeedTier::High => SpeedTier::High,
        }
    }

    /// Next tier down, saturating at `Rest`
    pub fn slower(self) -> Self {
        match self {
            SpeedTier::Rest | SpeedTier::Low => SpeedTier::Rest,
            SpeedTier::Moderate => SpeedTier::Low,
            SpeedTier::High => SpeedTier::Moderate,
        }
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpeedTier::Rest => "rest",
            SpeedTier::Low => "low",
            SpeedTier::Moderate => "moderate",
            SpeedTier::High => "high",
        };
        f.write_str(name)
    }
}

/// Which side of a car a crash check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Left,
    Right,
}

/// Commands the display collaborator can send for the player car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Speedup,
    Slowdown,
    SteerLeft,
    SteerRight,
}

impl Command {
    /// The side that has to be clear for this command to be accepted
    pub fn side(&self) -> Side {
        match self {
            Command::Speedup | Command::Slowdown => Side::Front,
            Command::SteerLeft => Side::Left,
            Command::SteerRight => Side::Right,
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speedup" | "accelerate" => Ok(Command::Speedup),
            "slowdown" | "decelerate" => Ok(Command::Slowdown),
            "steer_left" | "left" => Ok(Command::SteerLeft),
            "steer_right" | "right" => Ok(Command::SteerRight),
            other => bail!("Unknown command '{}'", other),
        }
    }
}

/// Race lifecycle; `Aborted` and `Completed` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Idle,
    Ongoing,
    Aborted,
    Completed,
}

impl RaceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RaceStatus::Aborted | RaceStatus::Completed)
    }
}
