use serde::{Deserialize, Serialize};

use crate::feasibility::is_feasible;


// Races always have four racers.
pub const RACE_SIZE: usize = 4;
pub const MIN_PLAYERS: usize = RACE_SIZE;

// Upper bound for the races-per-player choices offered to the user. Anything above that makes
// for a tournament nobody finishes.
pub const MAX_RACES_PER_PLAYER_TO_OFFER: usize = 12;

// How many times a caller should rebuild a schedule with fresh randomness before giving up.
pub const DEFAULT_BUILD_ATTEMPTS: usize = 3;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ScheduleRules {
    pub race_size: usize,
    pub races_per_player: usize,
}

impl ScheduleRules {
    pub fn new(races_per_player: usize) -> Self {
        ScheduleRules { race_size: RACE_SIZE, races_per_player }
    }

    pub fn is_feasible_for(&self, num_players: usize) -> bool {
        is_feasible(num_players, self.races_per_player, self.race_size)
    }

    // Total number of races, or `None` if the races cannot all be filled.
    pub fn num_races(&self, num_players: usize) -> Option<usize> {
        self.is_feasible_for(num_players)
            .then(|| num_players * self.races_per_player / self.race_size)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_races() {
        let rules = ScheduleRules::new(3);
        assert_eq!(rules.num_races(8), Some(6));
        assert_eq!(rules.num_races(4), Some(3));
        assert_eq!(rules.num_races(5), None);
        assert_eq!(rules.num_races(3), None);
    }

    #[test]
    fn default_race_size() {
        assert_eq!(ScheduleRules::new(1).race_size, 4);
    }
}
