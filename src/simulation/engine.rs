//! Race engine
//!
//! The engine runs on its own thread and is the only writer of the race.
//! Player commands and tick deadlines are handled one at a time, in arrival
//! order, and every committed change is pushed to the subscriber as a
//! snapshot.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::parameters::Parameters;
use super::race::{CommandOutcome, Race, TickOutcome};
use super::snapshot::RaceSnapshot;
use super::types::Command;

/// Messages accepted by the engine thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    Command(Command),
    Stop,
}

/// Handle used by the input side to talk to a running engine
pub struct EngineHandle {
    sender: Sender<EngineMessage>,
    thread: JoinHandle<Race>,
}

impl EngineHandle {
    /// Queue a player command; returns `false` once the engine has stopped
    pub fn send(&self, command: Command) -> bool {
        self.sender.send(EngineMessage::Command(command)).is_ok()
    }

    /// Ask the engine to stop; no tick fires after the request is handled
    ///
    /// Returns `false` when the engine had already stopped.
    pub fn stop(&self) -> bool {
        let delivered = self.sender.send(EngineMessage::Stop).is_ok();
        if !delivered {
            debug!("Stop requested but the race engine has already finished");
        }
        delivered
    }

    /// Wait for the engine thread to finish and return the final race
    pub fn join(self) -> Result<Race> {
        self.thread
            .join()
            .map_err(|_| anyhow!("Race engine thread panicked"))
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

/// Owner of the authoritative race state
pub struct RaceEngine {
    race: Race,
    params: Parameters,
    tick_interval: Duration,
    inbox: Receiver<EngineMessage>,
    subscriber: Sender<RaceSnapshot>,
    subscriber_gone: bool,
}

impl RaceEngine {
    /// Start `race` on a new engine thread ticking every `tick_interval`
    ///
    /// Returns the command handle and the receiving end of the snapshot
    /// stream. The first snapshot is the freshly started race.
    pub fn spawn(
        race: Race,
        params: Parameters,
        tick_interval: Duration,
    ) -> Result<(EngineHandle, Receiver<RaceSnapshot>)> {
        params
            .validate()
            .context("Refusing to start engine with invalid parameters")?;
        if tick_interval.is_zero() {
            anyhow::bail!("Tick interval must be greater than zero");
        }

        let (sender, inbox) = mpsc::channel();
        let (subscriber, snapshots) = mpsc::channel();

        let engine = RaceEngine {
            race,
            params,
            tick_interval,
            inbox,
            subscriber,
            subscriber_gone: false,
        };

        let thread = thread::Builder::new()
            .name("race-engine".to_string())
            .spawn(move || engine.run())
            .context("Failed to spawn race engine thread")?;

        Ok((EngineHandle { sender, thread }, snapshots))
    }

    fn run(mut self) -> Race {
        self.race.start();
        self.publish();

        let mut next_tick = Instant::now() + self.tick_interval;

        while !self.race.status.is_terminal() {
            let now = Instant::now();
            if now >= next_tick {
                next_tick += self.tick_interval;
                self.handle_tick();
                continue;
            }

            match self.inbox.recv_timeout(next_tick - now) {
                Ok(EngineMessage::Command(command)) => self.handle_command(command),
                Ok(EngineMessage::Stop) => {
                    info!("Race engine stopped on request");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    info!("All engine handles dropped, stopping race engine");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        info!(
            "Race engine finished: {:?} after {} ticks",
            self.race.status, self.race.ticks
        );
        self.race
    }

    fn handle_tick(&mut self) {
        match self.race.tick(&self.params) {
            TickOutcome::Ignored => {}
            TickOutcome::Advanced | TickOutcome::Crashed | TickOutcome::Completed => {
                self.publish()
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match self.race.apply_command(command, &self.params) {
            CommandOutcome::Committed => self.publish(),
            CommandOutcome::Rejected if self.race.status.is_terminal() => self.publish(),
            CommandOutcome::Rejected | CommandOutcome::Ignored => {
                debug!("Command {:?} left the race unchanged", command);
            }
        }
    }

    fn publish(&mut self) {
        if self.subscriber_gone {
            return;
        }
        if self
            .subscriber
            .send(self.race.snapshot(&self.params))
            .is_err()
        {
            warn!("Snapshot subscriber disconnected, race continues unobserved");
            self.subscriber_gone = true;
        }
    }
}
