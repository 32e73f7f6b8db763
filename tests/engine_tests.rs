//! Race engine actor tests

use std::sync::mpsc::Receiver;
use std::time::Duration;

use lane_racer::simulation::{
    CarStart, Command, Controller, LaneId, Lane, Parameters, Race, RaceEngine, RaceSnapshot,
    RaceStatus, SpeedTier,
};

const WAIT: Duration = Duration::from_secs(5);

/// Player alone on an empty track
fn solo_params(race_distance: f32, speed: SpeedTier) -> Parameters {
    Parameters {
        race_distance,
        obstacle_probability: 0.0,
        speed_boost_probability: 0.0,
        car_starts: vec![CarStart {
            controller: Controller::Player,
            x_position: 110.0,
            y_position: 0.0,
            speed,
        }],
        ..Parameters::default()
    }
}

fn next(snapshots: &Receiver<RaceSnapshot>) -> RaceSnapshot {
    snapshots
        .recv_timeout(WAIT)
        .expect("engine should publish a snapshot")
}

#[test]
fn test_commands_are_applied_in_order() {
    let params = solo_params(6000.0, SpeedTier::Rest);
    let race = Race::new_with_seed(&params, 3).expect("valid parameters");
    // Ticks far apart so only commands change the race
    let (engine, snapshots) =
        RaceEngine::spawn(race, params, Duration::from_secs(3600)).expect("engine starts");

    let first = next(&snapshots);
    assert_eq!(first.status, RaceStatus::Ongoing);
    assert_eq!(first.ticks, 0);

    assert!(engine.send(Command::Speedup));
    assert_eq!(next(&snapshots).player.speed, SpeedTier::Low);

    assert!(engine.send(Command::SteerLeft));
    assert_eq!(next(&snapshots).player.lane, Lane::On(LaneId(1)));

    // Rejected: publishes nothing, so the next snapshot comes from the speedup
    assert!(engine.send(Command::SteerLeft));
    assert!(engine.send(Command::Speedup));
    let snapshot = next(&snapshots);
    assert_eq!(snapshot.player.speed, SpeedTier::Moderate);
    assert_eq!(snapshot.player.lane, Lane::On(LaneId(1)));

    engine.stop();
    let race = engine.join().expect("engine thread joins");
    assert_eq!(race.ticks, 0);
    assert_eq!(race.status, RaceStatus::Ongoing);
    assert_eq!(race.player_car.x_position, 30.0);
    assert!(snapshots.recv_timeout(WAIT).is_err(), "no snapshot after stop");
}

#[test]
fn test_engine_runs_race_to_completion() {
    let params = solo_params(200.0, SpeedTier::High);
    let race = Race::new_with_seed(&params, 5).expect("valid parameters");
    let (engine, snapshots) =
        RaceEngine::spawn(race, params, Duration::from_millis(1)).expect("engine starts");

    let published: Vec<RaceSnapshot> = snapshots.iter().collect();
    let last = published.last().expect("at least one snapshot");

    assert_eq!(last.status, RaceStatus::Completed);
    assert_eq!(last.ticks, 17);
    assert!(last.progress() >= 1.0);
    assert_eq!(
        published
            .iter()
            .filter(|s| s.status == RaceStatus::Completed)
            .count(),
        1,
        "nothing is published after completion"
    );
    assert!(!engine.stop(), "a finished engine cannot be stopped again");

    let race = engine.join().expect("engine thread joins");
    assert_eq!(race.status, RaceStatus::Completed);
    assert_eq!(race.ticks, 17);
}

#[test]
fn test_stop_cancels_ticks() {
    let params = solo_params(1_000_000.0, SpeedTier::Low);
    let race = Race::new_with_seed(&params, 9).expect("valid parameters");
    let (engine, snapshots) =
        RaceEngine::spawn(race, params, Duration::from_millis(1)).expect("engine starts");

    let mut last_seen = next(&snapshots).ticks;
    while last_seen < 5 {
        last_seen = next(&snapshots).ticks;
    }
    engine.stop();
    let race = engine.join().expect("engine thread joins");

    // Every tick publishes, so the last snapshot is the final state
    let final_ticks = snapshots
        .try_iter()
        .last()
        .map(|s| s.ticks)
        .unwrap_or(last_seen);
    assert_eq!(final_ticks, race.ticks);
    assert_eq!(race.status, RaceStatus::Ongoing);
    assert!(snapshots.recv().is_err(), "snapshot stream closes after stop");
}

#[test]
fn test_dropping_handle_stops_engine() {
    let params = solo_params(1_000_000.0, SpeedTier::Low);
    let race = Race::new_with_seed(&params, 11).expect("valid parameters");
    let (engine, snapshots) =
        RaceEngine::spawn(race, params, Duration::from_millis(1)).expect("engine starts");

    next(&snapshots);
    drop(engine);

    // The stream ends once the engine notices the handle is gone
    let remaining = snapshots.iter().count();
    assert!(remaining < 1_000_000);
}

#[test]
fn test_invalid_engine_setup_rejected() {
    let params = Parameters::default();
    let race = Race::new_with_seed(&params, 1).expect("valid parameters");

    assert!(RaceEngine::spawn(race.clone(), params.clone(), Duration::ZERO).is_err());

    let mut broken = params;
    broken.car_length = 0.0;
    assert!(RaceEngine::spawn(race, broken, Duration::from_millis(1)).is_err());
}
