//! Candidate states for player commands
//!
//! Nothing here mutates the committed race. A command produces a candidate
//! race plus the view of the world crash detection should judge it by.

use super::parameters::Parameters;
use super::race::Race;
use super::types::Command;

/// A speculative race update waiting for crash validation
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The state committed if validation passes
    pub race: Race,
    /// The state crash detection looks at
    pub validation: Race,
}

/// Build the candidate for `command`, or `None` when the command changes nothing
///
/// Speed changes are validated against the world one tick ahead at the new
/// speed, since the position only changes on the next tick. Steering is
/// validated against the candidate itself.
pub fn candidate_for(race: &Race, command: Command, params: &Parameters) -> Option<Candidate> {
    let mut candidate = race.clone();
    let player = &mut candidate.player_car;

    match command {
        Command::Speedup | Command::Slowdown => {
            let tier = if command == Command::Speedup {
                player.speed.faster()
            } else {
                player.speed.slower()
            };
            if tier == player.speed {
                return None;
            }
            player.speed = tier;
            let validation = candidate.advanced(params);
            Some(Candidate {
                race: candidate,
                validation,
            })
        }
        Command::SteerLeft | Command::SteerRight => {
            if command == Command::SteerLeft {
                player.x_position -= params.lane_change_step;
            } else {
                player.x_position += params.lane_change_step;
            }
            Some(Candidate {
                validation: candidate.clone(),
                race: candidate,
            })
        }
    }
}
