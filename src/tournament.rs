use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::schedule::{Race, Schedule};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TournamentError {
    AlreadyFinished,
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::AlreadyFinished => write!(f, "All races have been run already."),
        }
    }
}

impl Error for TournamentError {}


// Walks through a schedule one race at a time. Results and standings are tracked by the caller;
// this only knows which race is up.
#[derive(Clone, Debug, Serialize)]
pub struct Tournament<P> {
    schedule: Schedule<P>,
    races_finished: usize,
}

impl<P> Tournament<P> {
    pub fn new(schedule: Schedule<P>) -> Self { Tournament { schedule, races_finished: 0 } }

    pub fn schedule(&self) -> &Schedule<P> { &self.schedule }
    pub fn races_finished(&self) -> usize { self.races_finished }
    pub fn races_total(&self) -> usize { self.schedule.len() }
    pub fn is_finished(&self) -> bool { self.races_finished >= self.schedule.len() }

    pub fn current_race(&self) -> Option<&Race<P>> { self.schedule.race(self.races_finished) }

    // The race after the current one, for the "up next" announcement.
    pub fn next_race(&self) -> Option<&Race<P>> { self.schedule.race(self.races_finished + 1) }

    // Marks the current race as run. Returns the race that is up now, if any.
    pub fn finish_race(&mut self) -> Result<Option<&Race<P>>, TournamentError> {
        if self.is_finished() {
            return Err(TournamentError::AlreadyFinished);
        }
        self.races_finished += 1;
        Ok(self.current_race())
    }
}
