use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::feasibility::valid_appearance_counts;
use crate::rules::{MAX_RACES_PER_PLAYER_TO_OFFER, MIN_PLAYERS, RACE_SIZE, ScheduleRules};
use crate::schedule::{Schedule, ScheduleError, build_schedule_with_retries};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RosterError {
    EmptyName,
    DuplicateName(String),
    NotEnoughPlayers { num_players: usize },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::EmptyName => write!(f, "Player name cannot be empty."),
            RosterError::DuplicateName(name) => write!(f, "Player \"{name}\" is listed twice."),
            RosterError::NotEnoughPlayers { num_players } => write!(
                f,
                "Need at least {MIN_PLAYERS} players for a race, got {num_players}."
            ),
        }
    }
}

impl Error for RosterError {}


// Player names as entered, trimmed. Guaranteed to be unique and non-empty, and numerous enough to
// fill a race.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Result<Self, RosterError> {
        let mut seen = HashSet::new();
        let mut players = vec![];
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(RosterError::EmptyName);
            }
            if !seen.insert(name.to_owned()) {
                return Err(RosterError::DuplicateName(name.to_owned()));
            }
            players.push(name.to_owned());
        }
        if players.len() < MIN_PLAYERS {
            return Err(RosterError::NotEnoughPlayers { num_players: players.len() });
        }
        Ok(Roster { players })
    }

    pub fn players(&self) -> &[String] { &self.players }
    pub fn len(&self) -> usize { self.players.len() }
    pub fn is_empty(&self) -> bool { self.players.is_empty() }

    // Races-per-player values that give every race a full grid.
    pub fn valid_races_per_player(&self) -> Vec<usize> {
        valid_appearance_counts(self.players.len(), RACE_SIZE, MAX_RACES_PER_PLAYER_TO_OFFER)
    }

    pub fn build_schedule<R: Rng + ?Sized>(
        &self, rules: ScheduleRules, max_builds: usize, rng: &mut R,
    ) -> Result<Schedule<String>, ScheduleError> {
        build_schedule_with_retries(
            &self.players,
            rules.races_per_player,
            rules.race_size,
            max_builds,
            rng,
        )
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = RosterError;
    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> { Roster::new(names) }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self { roster.players }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check_schedule, deterministic_rng};

    #[test]
    fn trims_names() {
        let roster = Roster::new([" Mario", "Luigi ", " Peach ", "Toad"]).unwrap();
        assert_eq!(roster.players(), ["Mario", "Luigi", "Peach", "Toad"]);
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(Roster::new(["Mario", "  ", "Peach", "Toad"]), Err(RosterError::EmptyName));
    }

    #[test]
    fn rejects_duplicates_after_trimming() {
        assert_eq!(
            Roster::new(["Mario", "Luigi", "Mario ", "Toad"]),
            Err(RosterError::DuplicateName("Mario".to_owned()))
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(Roster::new(["mario", "Mario", "MARIO", "Toad"]).is_ok());
    }

    #[test]
    fn rejects_small_roster() {
        assert_eq!(
            Roster::new(["Mario", "Luigi", "Peach"]),
            Err(RosterError::NotEnoughPlayers { num_players: 3 })
        );
    }

    #[test]
    fn valid_races_per_player() {
        let roster = Roster::new(["A", "B", "C", "D", "E", "F"]).unwrap();
        assert_eq!(roster.valid_races_per_player(), vec![2, 4, 6, 8, 10, 12]);
        let roster = Roster::new(["A", "B", "C", "D", "E", "F", "G"]).unwrap();
        assert_eq!(roster.valid_races_per_player(), vec![4, 8, 12]);
    }

    #[test]
    fn build_schedule() {
        let roster = Roster::new(["A", "B", "C", "D", "E", "F"]).unwrap();
        let rules = ScheduleRules::new(2);
        let schedule = roster.build_schedule(rules, 1, &mut deterministic_rng()).unwrap();
        check_schedule(&schedule, roster.players(), 2, RACE_SIZE);
        assert!(matches!(
            roster.build_schedule(ScheduleRules::new(3), 1, &mut deterministic_rng()),
            Err(ScheduleError::Infeasible { num_participants: 6, appearances: 3, group_size: 4 })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let roster: Roster = serde_json::from_str(r#"["A", "B", "C", "D"]"#).unwrap();
        assert_eq!(roster.len(), 4);
        assert!(serde_json::from_str::<Roster>(r#"["A", "B", "C", "C"]"#).is_err());
    }
}
