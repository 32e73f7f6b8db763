//! Race world state
//!
//! `Race` is the single source of truth for one tick: every car, every track
//! item, the background and the race status. Ticks and commands follow the
//! same pattern: build a candidate race, validate it, then commit or discard.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::car::SimCar;
use super::controls::candidate_for;
use super::crash::crash;
use super::lane::lane_of;
use super::parameters::{CrashPolicy, Parameters};
use super::snapshot::RaceSnapshot;
use super::speed_boost::enable_if_fetched;
use super::track::{generate_track_items, Background, Obstacle, SpeedBoost};
use super::types::{CarId, Command, Controller, Lane, RaceStatus, Side};

/// What a tick did to the race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Race is not ongoing, nothing changed
    Ignored,
    /// Positions advanced and the race continues
    Advanced,
    /// The player ran into something; the race is aborted
    Crashed,
    /// The player reached the finish line
    Completed,
}

/// What a player command did to the race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Race is not ongoing or the command changes nothing
    Ignored,
    /// Candidate was clear and is now the committed state
    Committed,
    /// Candidate would crash; committed state is unchanged
    Rejected,
}

/// Complete race state
#[derive(Debug, Clone, PartialEq)]
pub struct Race {
    pub player_car: SimCar,
    pub ai_cars: Vec<SimCar>,
    pub obstacles: Vec<Obstacle>,
    pub speed_boosts: Vec<SpeedBoost>,
    pub background: Background,
    pub status: RaceStatus,
    /// Ticks committed since the race started
    pub ticks: u64,
}

impl Race {
    /// Create a race with a randomly generated track
    pub fn new(params: &Parameters) -> Result<Self> {
        Self::generate(params, &mut rand::rng())
    }

    /// Create a race whose track is reproducible from `seed`
    pub fn new_with_seed(params: &Parameters, seed: u64) -> Result<Self> {
        Self::generate(params, &mut StdRng::seed_from_u64(seed))
    }

    fn generate<R: Rng>(params: &Parameters, rng: &mut R) -> Result<Self> {
        params.validate().context("Invalid race parameters")?;

        let mut player_car = None;
        let mut ai_cars = Vec::new();

        for (index, start) in params.car_starts.iter().enumerate() {
            let id = CarId(index);
            match start.controller {
                Controller::Player => {
                    player_car = Some(SimCar::new(
                        id,
                        Controller::Player,
                        start.x_position,
                        start.y_position,
                        start.speed,
                        params.player_car_image.clone(),
                    ));
                }
                Controller::Ai => {
                    let image_tag = params
                        .ai_car_images
                        .choose(rng)
                        .cloned()
                        .context("No AI car images configured")?;
                    ai_cars.push(SimCar::new(
                        id,
                        Controller::Ai,
                        start.x_position,
                        start.y_position,
                        start.speed,
                        image_tag,
                    ));
                }
            }
        }

        let player_car = player_car.context("No player car configured")?;
        let (obstacles, speed_boosts) = generate_track_items(params, rng);
        let background = Background::generate(params, rng);

        info!(
            "Race generated: {} AI cars, {} obstacles, {} speed boosts over {:.0}",
            ai_cars.len(),
            obstacles.len(),
            speed_boosts.len(),
            params.race_distance
        );

        Ok(Self {
            player_car,
            ai_cars,
            obstacles,
            speed_boosts,
            background,
            status: RaceStatus::Idle,
            ticks: 0,
        })
    }

    /// Build a race from explicit cars with an empty track
    pub fn with_cars(player_car: SimCar, ai_cars: Vec<SimCar>) -> Self {
        Self {
            player_car,
            ai_cars,
            obstacles: Vec::new(),
            speed_boosts: Vec::new(),
            background: Background {
                y_offset: 0.0,
                left_images: Vec::new(),
                right_images: Vec::new(),
            },
            status: RaceStatus::Idle,
            ticks: 0,
        }
    }

    /// All cars, player first
    pub fn cars(&self) -> impl Iterator<Item = &SimCar> {
        std::iter::once(&self.player_car).chain(self.ai_cars.iter())
    }

    pub fn car(&self, id: CarId) -> Option<&SimCar> {
        self.cars().find(|car| car.id == id)
    }

    pub fn car_mut(&mut self, id: CarId) -> Option<&mut SimCar> {
        if self.player_car.id == id {
            return Some(&mut self.player_car);
        }
        self.ai_cars.iter_mut().find(|car| car.id == id)
    }

    /// Move from `Idle` to `Ongoing`; any other status is left alone
    pub fn start(&mut self) -> bool {
        if self.status != RaceStatus::Idle {
            return false;
        }
        self.status = RaceStatus::Ongoing;
        info!("Race started");
        true
    }

    /// The race as it would look one tick from now
    ///
    /// AI cars always move; their y-position shifts by their own step minus
    /// the player's, since the frame scrolls with the player.
    pub fn advanced(&self, params: &Parameters) -> Race {
        let mut next = self.clone();
        let player_step = next.player_car.step(params);
        next.player_car.distance_travelled += player_step;

        for ai_car in &mut next.ai_cars {
            let step = ai_car.step(params);
            ai_car.y_position += step - player_step;
            ai_car.distance_travelled += step;
        }

        next
    }

    /// Advance the race by one tick
    pub fn tick(&mut self, params: &Parameters) -> TickOutcome {
        if self.status != RaceStatus::Ongoing {
            return TickOutcome::Ignored;
        }

        let candidate = self.advanced(params);
        if crash(&candidate, candidate.player_car.id, Side::Front, params) {
            info!(
                "Player crashed at distance {:.1} after {} ticks",
                self.player_car.distance_travelled, self.ticks
            );
            self.status = RaceStatus::Aborted;
            return TickOutcome::Crashed;
        }

        *self = candidate;
        self.ticks += 1;
        self.player_car.tick_boost();
        *self = enable_if_fetched(self, params);
        self.background
            .scroll_to(self.player_car.distance_travelled, params);

        if self.player_car.distance_travelled >= params.race_distance {
            self.status = RaceStatus::Completed;
            info!("Race completed in {} ticks", self.ticks);
            return TickOutcome::Completed;
        }

        TickOutcome::Advanced
    }

    /// Apply a player command if the resulting move is clear
    pub fn apply_command(&mut self, command: Command, params: &Parameters) -> CommandOutcome {
        if self.status != RaceStatus::Ongoing {
            return CommandOutcome::Ignored;
        }

        let Some(candidate) = candidate_for(self, command, params) else {
            return CommandOutcome::Ignored;
        };

        if crash(
            &candidate.validation,
            self.player_car.id,
            command.side(),
            params,
        ) {
            debug!("Rejected {:?}: move would crash", command);
            if params.crash_policy == CrashPolicy::EndRace {
                info!("Player crashed on {:?}, race aborted", command);
                self.status = RaceStatus::Aborted;
            }
            return CommandOutcome::Rejected;
        }

        *self = enable_if_fetched(&candidate.race, params);
        CommandOutcome::Committed
    }

    pub fn snapshot(&self, params: &Parameters) -> RaceSnapshot {
        RaceSnapshot::capture(self, params)
    }

    /// One-line human readable state
    pub fn summary(&self, params: &Parameters) -> String {
        let player = &self.player_car;
        format!(
            "Tick {} | {:?} | distance {:.0}/{:.0} | speed {}{} | lane {}",
            self.ticks,
            self.status,
            player.distance_travelled,
            params.race_distance,
            player.speed,
            if player.speed_boost_active {
                format!(" (boost {})", player.boost_ticks_remaining)
            } else {
                String::new()
            },
            match player.lane(params) {
                Lane::On(id) => id.0.to_string(),
                Lane::OutOfTrack => "-".to_string(),
            }
        )
    }

    /// Draw the visible stretch of track around the player in the terminal
    ///
    /// Rows run from `ahead` units in front of the player down to one car
    /// length behind it; `P` is the player, `A` an AI car, `#` an obstacle,
    /// `+` an unfetched speed boost. A non-positive `row_height` draws nothing.
    pub fn draw_track(&self, params: &Parameters, ahead: f32, row_height: f32) -> String {
        if !(row_height.is_finite() && row_height > 0.0 && ahead.is_finite()) {
            return String::new();
        }

        let player_y = self.player_car.y_position;
        let travelled = self.player_car.distance_travelled;
        let lane_count = params.lanes.len();
        let mut out = String::new();

        let mut row_top = player_y + ahead;
        while row_top > player_y - params.car_length {
            let row_bottom = row_top - row_height;
            let mut cells = vec![' '; lane_count];

            let mut mark = |x_position: f32, y: f32, length: f32, symbol: char| {
                let Lane::On(id) = lane_of(&params.lanes, x_position) else {
                    return;
                };
                if y < row_top && y + length > row_bottom {
                    if let Some(cell) = (id.0 as usize)
                        .checked_sub(1)
                        .and_then(|index| cells.get_mut(index))
                    {
                        *cell = symbol;
                    }
                }
            };

            for boost in self.speed_boosts.iter().filter(|b| !b.fetched) {
                mark(
                    boost.x_position,
                    boost.live_y(travelled),
                    params.obstacle_and_speed_boost_length,
                    '+',
                );
            }
            for obstacle in &self.obstacles {
                mark(
                    obstacle.x_position,
                    obstacle.live_y(travelled),
                    params.obstacle_and_speed_boost_length,
                    '#',
                );
            }
            for car in &self.ai_cars {
                mark(car.x_position, car.y_position, params.car_length, 'A');
            }
            mark(
                self.player_car.x_position,
                player_y,
                params.car_length,
                'P',
            );

            out.push('|');
            for cell in cells {
                out.push(' ');
                out.push(cell);
                out.push(' ');
                out.push('|');
            }
            out.push('\n');
            row_top = row_bottom;
        }

        out
    }
}
