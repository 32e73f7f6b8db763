//! Crash detection tests

use lane_racer::simulation::{
    crash, CarId, Controller, Obstacle, Parameters, Race, Side, SimCar, SpeedTier,
};

fn car(id: usize, controller: Controller, x: f32, y: f32) -> SimCar {
    SimCar::new(CarId(id), controller, x, y, SpeedTier::Rest, "test".to_string())
}

/// Player in lane 1 at y=100 and one AI car in lane 1 at `other_y`
fn two_car_race(other_y: f32) -> Race {
    Race::with_cars(
        car(0, Controller::Player, 30.0, 100.0),
        vec![car(1, Controller::Ai, 30.0, other_y)],
    )
}

#[test]
fn test_touching_cars_crash_lateral() {
    let params = Parameters::default();

    // B moves beside A so that A's front edge meets B's rear edge
    let race = two_car_race(210.0);
    assert!(crash(&race, CarId(1), Side::Left, &params));
    assert!(crash(&race, CarId(1), Side::Right, &params));

    let race = two_car_race(211.0);
    assert!(!crash(&race, CarId(1), Side::Left, &params));
    assert!(!crash(&race, CarId(1), Side::Right, &params));
}

#[test]
fn test_touching_cars_crash_front() {
    let params = Parameters::default();

    assert!(crash(&two_car_race(210.0), CarId(0), Side::Front, &params));
    assert!(!crash(&two_car_race(211.0), CarId(0), Side::Front, &params));
}

#[test]
fn test_front_crash_only_once_spans_meet() {
    let params = Parameters::default();

    // Close the gap one unit at a time; the crash appears exactly at touching
    let mut y = 300.0;
    while y >= 150.0 {
        let crashed = crash(&two_car_race(y), CarId(0), Side::Front, &params);
        assert_eq!(crashed, y <= 210.0, "unexpected crash result at y={}", y);
        y -= 1.0;
    }
}

#[test]
fn test_same_position_crashes() {
    let params = Parameters::default();
    let race = two_car_race(100.0);

    assert!(crash(&race, CarId(0), Side::Front, &params));
    assert!(crash(&race, CarId(1), Side::Left, &params));
}

#[test]
fn test_front_check_ignores_cars_behind() {
    let params = Parameters::default();

    // Car behind touches the player's rear edge
    let race = two_car_race(-10.0);
    assert!(!crash(&race, CarId(0), Side::Front, &params));
    // The same car is inside the lateral window
    assert!(crash(&race, CarId(0), Side::Left, &params));
}

#[test]
fn test_other_lanes_never_crash() {
    let params = Parameters::default();
    let race = Race::with_cars(
        car(0, Controller::Player, 30.0, 100.0),
        vec![car(1, Controller::Ai, 110.0, 100.0)],
    );

    assert!(!crash(&race, CarId(0), Side::Front, &params));
    assert!(!crash(&race, CarId(0), Side::Right, &params));
}

#[test]
fn test_out_of_track_is_lateral_crash() {
    let params = Parameters::default();

    for x in [-50.0, 60.5, 230.0, 270.0] {
        let race = Race::with_cars(car(0, Controller::Player, x, 0.0), Vec::new());
        assert!(crash(&race, CarId(0), Side::Left, &params), "x={}", x);
        assert!(crash(&race, CarId(0), Side::Right, &params), "x={}", x);
    }
}

#[test]
fn test_obstacle_uses_live_position() {
    let params = Parameters::default();
    let mut player = car(0, Controller::Player, 30.0, 0.0);
    player.distance_travelled = 500.0;

    let race_with = |distance: f32| {
        let mut race = Race::with_cars(player.clone(), Vec::new());
        race.obstacles.push(Obstacle {
            x_position: 30.0,
            distance,
        });
        race
    };

    // Live y 100: inside the player's span
    assert!(crash(&race_with(600.0), CarId(0), Side::Front, &params));
    // Live y 110: touching the player's front edge
    assert!(crash(&race_with(610.0), CarId(0), Side::Front, &params));
    // Live y 111: clear
    assert!(!crash(&race_with(611.0), CarId(0), Side::Front, &params));
}

#[test]
fn test_passed_obstacle_only_matters_laterally() {
    let params = Parameters::default();
    let mut player = car(0, Controller::Player, 30.0, 0.0);
    player.distance_travelled = 500.0;
    let mut race = Race::with_cars(player, Vec::new());
    // Live y -30: overlapping the player's rear
    race.obstacles.push(Obstacle {
        x_position: 30.0,
        distance: 470.0,
    });

    assert!(!crash(&race, CarId(0), Side::Front, &params));
    assert!(crash(&race, CarId(0), Side::Left, &params));
}

#[test]
fn test_obstacle_in_other_lane_is_ignored() {
    let params = Parameters::default();
    let mut race = Race::with_cars(car(0, Controller::Player, 30.0, 0.0), Vec::new());
    race.obstacles.push(Obstacle {
        x_position: 110.0,
        distance: 50.0,
    });

    assert!(!crash(&race, CarId(0), Side::Front, &params));
    assert!(!crash(&race, CarId(0), Side::Right, &params));
}

#[test]
fn test_unknown_car_never_crashes() {
    let params = Parameters::default();
    let race = two_car_race(100.0);
    assert!(!crash(&race, CarId(42), Side::Front, &params));
}
