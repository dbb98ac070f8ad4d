// Fair race scheduler.
//
// Builds a sequence of races so that every participant takes part in exactly the requested
// number of races. Each race is assembled greedily: participants who have raced the least go
// first, ties are broken by a fresh random permutation on every iteration. This keeps all
// tallies within one of each other, so with feasible inputs the construction never runs out of
// eligible participants. The attempt budget and `ScheduleError::ConstructionFailed` are there to
// guarantee termination no matter what.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use log::{debug, warn};
use rand::prelude::*;
use serde::Serialize;

use crate::feasibility::is_feasible;


// Attempt budget is `races × participants × ATTEMPT_BUDGET_FACTOR`.
pub const ATTEMPT_BUDGET_FACTOR: usize = 2;


// Participants in display order. Order carries no meaning for the scheduler: it is shuffled
// independently of the order in which racers were selected.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(transparent)]
pub struct Race<P> {
    racers: Vec<P>,
}

impl<P> Race<P> {
    pub fn racers(&self) -> &[P] { &self.racers }
    pub fn len(&self) -> usize { self.racers.len() }
    pub fn is_empty(&self) -> bool { self.racers.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &P> { self.racers.iter() }
    pub fn into_racers(self) -> Vec<P> { self.racers }
}

impl<P: PartialEq> Race<P> {
    pub fn contains(&self, participant: &P) -> bool { self.racers.contains(participant) }
}

impl<P: fmt::Display> fmt::Display for Race<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.racers.iter().join(", "))
    }
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Schedule<P> {
    races: Vec<Race<P>>,
}

impl<P> Schedule<P> {
    pub fn races(&self) -> &[Race<P>] { &self.races }
    pub fn len(&self) -> usize { self.races.len() }
    pub fn is_empty(&self) -> bool { self.races.is_empty() }
    pub fn race(&self, index: usize) -> Option<&Race<P>> { self.races.get(index) }
    pub fn into_races(self) -> Vec<Race<P>> { self.races }
}

impl<P: Eq + Hash> Schedule<P> {
    // How many races each participant takes part in.
    pub fn appearances(&self) -> HashMap<&P, usize> {
        self.races.iter().flat_map(|race| race.iter()).counts()
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScheduleError {
    // The numbers cannot produce full races. Expected to be caught by the caller upfront via
    // `valid_appearance_counts`.
    Infeasible {
        num_participants: usize,
        appearances: usize,
        group_size: usize,
    },
    // Randomized construction did not converge within the attempt budget.
    ConstructionFailed {
        attempts: usize,
        races_built: usize,
        races_needed: usize,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Infeasible { num_participants, appearances, group_size } => write!(
                f,
                "cannot split {num_participants} participants × {appearances} races each \
                 into full races of {group_size}"
            ),
            ScheduleError::ConstructionFailed { attempts, races_built, races_needed } => write!(
                f,
                "could not build a complete schedule: {races_built} of {races_needed} races \
                 after {attempts} attempts"
            ),
        }
    }
}

impl Error for ScheduleError {}


pub fn attempt_budget(num_participants: usize, num_races: usize) -> usize {
    num_races
        .saturating_mul(num_participants)
        .saturating_mul(ATTEMPT_BUDGET_FACTOR)
        .max(num_races)
}

// Builds a schedule where each of `participants` appears in exactly `appearances` races of
// `group_size`. Participants must be unique.
pub fn build_schedule<P, R>(
    participants: &[P], appearances: usize, group_size: usize, rng: &mut R,
) -> Result<Schedule<P>, ScheduleError>
where
    P: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    let num_races = required_races(participants.len(), appearances, group_size)?;
    let max_attempts = attempt_budget(participants.len(), num_races);
    build_schedule_within(participants, appearances, group_size, max_attempts, rng)
}

// Same as `build_schedule`, but with an explicit attempt budget. Each attempt produces at most one
// race, so a budget below the number of races always fails.
pub fn build_schedule_within<P, R>(
    participants: &[P], appearances: usize, group_size: usize, max_attempts: usize, rng: &mut R,
) -> Result<Schedule<P>, ScheduleError>
where
    P: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    assert!(participants.iter().all_unique(), "Participants must be unique");
    let num_races = required_races(participants.len(), appearances, group_size)?;

    let mut tally = vec![0; participants.len()];
    let mut order = (0..participants.len()).collect_vec();
    let mut races: Vec<Vec<usize>> = Vec::with_capacity(num_races);
    let mut attempts = 0;
    while races.len() < num_races {
        if attempts >= max_attempts {
            warn!(
                "Schedule construction gave up after {} attempts with {} of {} races",
                attempts,
                races.len(),
                num_races
            );
            return Err(ScheduleError::ConstructionFailed {
                attempts,
                races_built: races.len(),
                races_needed: num_races,
            });
        }
        attempts += 1;

        let Some(race) = add_race(&mut order, &mut tally, appearances, group_size, rng) else {
            warn!("Could not fill race {}, retrying", races.len() + 1);
            continue;
        };
        races.push(race);
    }
    debug!(
        "Built {} races for {} participants in {} attempts",
        num_races,
        participants.len(),
        attempts
    );

    assert!(
        tally.iter().all(|&t| t == appearances),
        "Unfair schedule: tally {:?}, expected {} each",
        tally,
        appearances
    );
    assert_eq!(races.len(), num_races);
    for race in &races {
        assert!(race.len() == group_size && race.iter().all_unique(), "Broken race: {race:?}");
    }

    let races = races
        .into_iter()
        .map(|race| Race {
            racers: race.into_iter().map(|i| participants[i].clone()).collect(),
        })
        .collect();
    Ok(Schedule { races })
}

// Picks racers for one race. The greedy pass takes only the least-raced tier; if that tier is
// too small, the remaining seats go to anyone else still eligible, in random order. Returns `None`
// if fewer than `group_size` participants are eligible at all.
//
// Expects `order` to be ranked by tally with ties in random order.
fn pick_race<R: Rng + ?Sized>(
    order: &[usize], tally: &[usize], appearances: usize, group_size: usize, rng: &mut R,
) -> Option<Vec<usize>> {
    let eligible = |i: usize| tally[i] < appearances;
    let min_tally = order.iter().copied().filter(|&i| eligible(i)).map(|i| tally[i]).min()?;
    let mut race = order
        .iter()
        .copied()
        .filter(|&i| eligible(i) && tally[i] == min_tally)
        .take(group_size)
        .collect_vec();
    if race.len() < group_size {
        let mut leftovers = order
            .iter()
            .copied()
            .filter(|&i| eligible(i) && !race.contains(&i))
            .collect_vec();
        leftovers.shuffle(rng);
        race.extend(leftovers.into_iter().take(group_size - race.len()));
    }
    (race.len() == group_size).then_some(race)
}

// Ranks participants, picks a race and records it in `tally`. The tally is left untouched when
// the race cannot be filled.
fn add_race<R: Rng + ?Sized>(
    order: &mut [usize], tally: &mut [usize], appearances: usize, group_size: usize, rng: &mut R,
) -> Option<Vec<usize>> {
    // Shuffle before the stable sort so that ties are broken randomly, anew on each iteration.
    order.shuffle(rng);
    order.sort_by_key(|&i| tally[i]);
    let mut race = pick_race(order, tally, appearances, group_size, rng)?;
    for &i in &race {
        tally[i] += 1;
    }
    race.shuffle(rng);
    Some(race)
}

// Caller-side policy: rebuild with fresh randomness when construction fails. Infeasible input is
// returned right away since retrying cannot help.
pub fn build_schedule_with_retries<P, R>(
    participants: &[P], appearances: usize, group_size: usize, max_builds: usize, rng: &mut R,
) -> Result<Schedule<P>, ScheduleError>
where
    P: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    let mut build = 1;
    loop {
        match build_schedule(participants, appearances, group_size, rng) {
            Ok(schedule) => return Ok(schedule),
            Err(err @ ScheduleError::Infeasible { .. }) => return Err(err),
            Err(err @ ScheduleError::ConstructionFailed { .. }) => {
                if build >= max_builds {
                    return Err(err);
                }
                warn!("Schedule build {} of {} failed: {}", build, max_builds, err);
                build += 1;
            }
        }
    }
}

fn required_races(
    num_participants: usize, appearances: usize, group_size: usize,
) -> Result<usize, ScheduleError> {
    if is_feasible(num_participants, appearances, group_size) {
        Ok(num_participants * appearances / group_size)
    } else {
        Err(ScheduleError::Infeasible { num_participants, appearances, group_size })
    }
}
