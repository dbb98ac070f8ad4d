#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod feasibility;
pub mod roster;
pub mod rules;
pub mod schedule;
pub mod test_util;
pub mod tournament;

pub use feasibility::{is_feasible, valid_appearance_counts};
pub use roster::{Roster, RosterError};
pub use rules::{
    DEFAULT_BUILD_ATTEMPTS, MAX_RACES_PER_PLAYER_TO_OFFER, MIN_PLAYERS, RACE_SIZE, ScheduleRules,
};
pub use schedule::{Race, Schedule, ScheduleError, build_schedule, build_schedule_with_retries};
pub use tournament::{Tournament, TournamentError};
