// Test utilities shared by unit tests, integration tests and the console stress test.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use rand::{Rng, SeedableRng};

use crate::schedule::Schedule;


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> impl Rng { rand::rngs::StdRng::from_seed([0; 32]) }

pub fn seeded_rng(seed: u64) -> impl Rng { rand::rngs::StdRng::seed_from_u64(seed) }

const SAMPLE_NAMES: &[&str] = &[
    "Mario", "Luigi", "Peach", "Toad", "Yoshi", "Bowser", "Daisy", "Wario", "Waluigi", "Rosalina",
    "Koopa", "Shy Guy",
];

// `n` distinct player names. Well-known names come first, then generated ones.
pub fn sample_players(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match SAMPLE_NAMES.get(i) {
            Some(name) => (*name).to_owned(),
            None => format!("Player {}", i + 1),
        })
        .collect()
}

// Panics unless `schedule` is a complete fair schedule for `participants`.
pub fn check_schedule<P: Eq + Hash + fmt::Debug>(
    schedule: &Schedule<P>, participants: &[P], appearances: usize, group_size: usize,
) {
    assert_eq!(schedule.len(), participants.len() * appearances / group_size);
    for race in schedule.races() {
        assert_eq!(race.len(), group_size, "{race:?}");
        assert!(race.iter().all_unique(), "{race:?}");
        assert!(race.iter().all(|p| participants.contains(p)), "{race:?}");
    }
    let counts = schedule.appearances();
    assert_eq!(counts.len(), participants.len());
    for p in participants {
        assert_eq!(counts.get(p).copied(), Some(appearances), "{p:?}");
    }
}

// Race compositions, ignoring the order of racers within each race.
pub fn race_compositions<P: Eq + Hash + Clone + Ord>(schedule: &Schedule<P>) -> Vec<Vec<P>> {
    schedule
        .races()
        .iter()
        .map(|race| race.iter().cloned().sorted().collect())
        .collect()
}

pub fn distinct<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> usize {
    items.into_iter().collect::<HashSet<_>>().len()
}
