//! Speed boost pickup
//!
//! Each boost can be fetched once. Fetching starts a boost window of a fixed
//! number of ticks on the player car; the window itself is counted down by
//! the race tick.

use log::info;

use super::lane::{contact, group_by_lane};
use super::parameters::Parameters;
use super::race::Race;
use super::track::SpeedBoost;
use super::types::Lane;

/// Return `race` with the player boosted if it reached an unfetched boost
///
/// Returns an equal race when nothing in the player's lane overlaps it.
pub fn enable_if_fetched(race: &Race, params: &Parameters) -> Race {
    let player = &race.player_car;
    let Lane::On(lane_id) = player.lane(params) else {
        return race.clone();
    };

    let travelled = player.distance_travelled;
    let indexed: Vec<(usize, &SpeedBoost)> = race
        .speed_boosts
        .iter()
        .enumerate()
        .filter(|(_, boost)| !boost.fetched)
        .collect();
    let by_lane = group_by_lane(&params.lanes, indexed.iter(), |entry: &(usize, &SpeedBoost)| {
        (entry.1.x_position, entry.1.live_y(travelled))
    });

    let reached: Vec<usize> = by_lane
        .get(&lane_id)
        .into_iter()
        .flat_map(|lane_boosts| lane_boosts.iter())
        .filter(|(live_y, _)| {
            contact(
                player.y_position,
                params.car_length,
                live_y.into_inner(),
                params.obstacle_and_speed_boost_length,
            )
            .is_some()
        })
        .flat_map(|(_, boosts)| boosts.iter().map(|(index, _)| *index))
        .collect();

    if reached.is_empty() {
        return race.clone();
    }

    let mut next = race.clone();
    for index in reached {
        next.speed_boosts[index].fetched = true;
        info!(
            "Speed boost fetched at distance {:.1}",
            next.speed_boosts[index].distance
        );
    }
    next.player_car.activate_boost(params.boost_duration_ticks);
    next
}
