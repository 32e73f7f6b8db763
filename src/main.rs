use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};

use lane_racer::simulation::{
    Autopilot, CrashPolicy, Parameters, Race, RaceEngine, RaceSnapshot, RaceStatus,
};

#[derive(Clone, Copy, ValueEnum)]
enum CrashPolicyArg {
    /// Ignore a command that would crash
    Reject,
    /// Abort the race on a command that would crash
    End,
}

impl From<CrashPolicyArg> for CrashPolicy {
    fn from(arg: CrashPolicyArg) -> Self {
        match arg {
            CrashPolicyArg::Reject => CrashPolicy::RejectMove,
            CrashPolicyArg::End => CrashPolicy::EndRace,
        }
    }
}

#[derive(Parser)]
#[command(name = "lane_racer")]
#[command(about = "Headless lane racing simulation")]
struct Cli {
    /// Stop the race after this many ticks
    #[arg(long, default_value = "3000")]
    ticks: u64,

    /// Milliseconds between engine ticks
    #[arg(long, default_value = "2")]
    tick_ms: u64,

    /// Seed for a reproducible track
    #[arg(long)]
    seed: Option<u64>,

    /// Distance from start to finish
    #[arg(long)]
    race_distance: Option<f32>,

    /// What a command that would crash does
    #[arg(long, value_enum, default_value = "reject")]
    crash_policy: CrashPolicyArg,

    /// Do not drive the player car; it stays at rest
    #[arg(long)]
    no_autopilot: bool,

    /// Log progress every this many ticks (0 disables progress logging)
    #[arg(long, default_value = "250")]
    log_every: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut params = Parameters {
        crash_policy: cli.crash_policy.into(),
        ..Parameters::default()
    };
    if let Some(race_distance) = cli.race_distance {
        params.race_distance = race_distance;
    }
    params.validate().context("Invalid configuration")?;

    let race = match cli.seed {
        Some(seed) => Race::new_with_seed(&params, seed)?,
        None => Race::new(&params)?,
    };

    info!(
        "Running lane racer headless: max ticks {}, tick interval {}ms",
        cli.ticks, cli.tick_ms
    );

    let (engine, snapshots) =
        RaceEngine::spawn(race, params.clone(), Duration::from_millis(cli.tick_ms))?;
    let autopilot = (!cli.no_autopilot).then(Autopilot::default);

    let mut last_logged = None;
    let mut stop_sent = false;
    for snapshot in snapshots.iter() {
        if cli.log_every > 0
            && snapshot.ticks % cli.log_every == 0
            && last_logged != Some(snapshot.ticks)
        {
            last_logged = Some(snapshot.ticks);
            log_progress(&snapshot);
        }

        if snapshot.ticks >= cli.ticks && !stop_sent {
            info!("Tick limit reached, stopping race");
            engine.stop();
            stop_sent = true;
            continue;
        }

        if let Some(command) = autopilot.as_ref().and_then(|a| a.decide(&snapshot, &params)) {
            engine.send(command);
        }
    }

    let race = engine.join()?;

    info!("=== RACE FINISHED ===");
    info!("Final status: {:?}", race.status);
    info!("Ticks: {}", race.ticks);
    info!(
        "Distance travelled: {:.0} of {:.0}",
        race.player_car.distance_travelled, params.race_distance
    );
    info!(
        "Speed boosts fetched: {}",
        race.speed_boosts.iter().filter(|b| b.fetched).count()
    );
    info!("{}", race.summary(&params));
    println!("{}", race.draw_track(&params, 600.0, 50.0));

    if race.status == RaceStatus::Ongoing {
        info!("Race stopped before the finish line");
    }

    Ok(())
}

fn log_progress(snapshot: &RaceSnapshot) {
    info!(
        "Tick {}: {:?}, progress {:.1}%, player speed {}, lane {:?}",
        snapshot.ticks,
        snapshot.status,
        snapshot.progress() * 100.0,
        snapshot.player.speed,
        snapshot.player.lane
    );
}
