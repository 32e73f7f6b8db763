//! Crash detection
//!
//! A pure query over a candidate race: would the querying car, where the
//! candidate puts it, touch or overlap another car or an obstacle?

use log::{debug, warn};
use ordered_float::OrderedFloat;
use std::ops::Bound;

use super::car::SimCar;
use super::lane::{contact, group_by_lane};
use super::parameters::Parameters;
use super::race::Race;
use super::track::Obstacle;
use super::types::{CarId, Lane, LaneId, Side};

/// Returns `true` when `car_id` crashes on `side` in the candidate `race`
///
/// Touching counts as a crash. Steering into `OutOfTrack` always crashes.
pub fn crash(race: &Race, car_id: CarId, side: Side, params: &Parameters) -> bool {
    let Some(car) = race.car(car_id) else {
        warn!("Crash check for unknown car {:?}", car_id);
        return false;
    };

    let lane_id = match car.lane(params) {
        Lane::On(lane_id) => lane_id,
        Lane::OutOfTrack => return side != Side::Front,
    };

    crashes_into_car(race, car, lane_id, side, params)
        || crashes_into_obstacle(race, car, lane_id, side, params)
}

/// Longitudinal window of other entities that matter for `side`
fn window(
    car: &SimCar,
    side: Side,
    params: &Parameters,
) -> (Bound<OrderedFloat<f32>>, Bound<OrderedFloat<f32>>) {
    match side {
        Side::Front => (Bound::Included(OrderedFloat(car.y_position)), Bound::Unbounded),
        Side::Left | Side::Right => (
            Bound::Included(OrderedFloat(car.y_position - params.car_length)),
            Bound::Included(OrderedFloat(car.y_position + params.car_length)),
        ),
    }
}

fn crashes_into_car(
    race: &Race,
    car: &SimCar,
    lane_id: LaneId,
    side: Side,
    params: &Parameters,
) -> bool {
    let by_lane = group_by_lane(&params.lanes, race.cars(), |c: &SimCar| {
        (c.x_position, c.y_position)
    });
    let Some(lane_cars) = by_lane.get(&lane_id) else {
        return false;
    };

    for (_, others) in lane_cars.range(window(car, side, params)) {
        for other in others.iter().filter(|other| other.id != car.id) {
            if let Some(kind) = contact(
                car.y_position,
                params.car_length,
                other.y_position,
                params.car_length,
            ) {
                debug!(
                    "Car {:?} crashes into car {:?} on {:?} ({:?})",
                    car.id, other.id, side, kind
                );
                return true;
            }
        }
    }

    false
}

fn crashes_into_obstacle(
    race: &Race,
    car: &SimCar,
    lane_id: LaneId,
    side: Side,
    params: &Parameters,
) -> bool {
    let travelled = race.player_car.distance_travelled;
    let by_lane = group_by_lane(&params.lanes, race.obstacles.iter(), |o: &Obstacle| {
        (o.x_position, o.live_y(travelled))
    });
    let Some(lane_obstacles) = by_lane.get(&lane_id) else {
        return false;
    };

    let range = match side {
        Side::Front => (Bound::Included(OrderedFloat(car.y_position)), Bound::Unbounded),
        Side::Left | Side::Right => (Bound::Unbounded, Bound::Unbounded),
    };

    for (live_y, obstacles) in lane_obstacles.range(range) {
        if let Some(kind) = contact(
            car.y_position,
            params.car_length,
            live_y.into_inner(),
            params.obstacle_and_speed_boost_length,
        ) {
            debug!(
                "Car {:?} crashes into obstacle at distance {:.1} on {:?} ({:?})",
                car.id, obstacles[0].distance, side, kind
            );
            return true;
        }
    }

    false
}
