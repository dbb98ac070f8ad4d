use std::path::Path;

use anyhow::Context;
use race_tournament::{DEFAULT_BUILD_ATTEMPTS, Roster, ScheduleRules};
use serde::{Deserialize, Serialize};


// YAML-serialized tournament setup, e.g.
//
//   players: [Mario, Luigi, Peach, Toad, Yoshi, Bowser]
//   races_per_player: 2
//   seed: 17
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub players: Roster,
    pub races_per_player: usize,
    #[serde(default = "default_build_attempts")]
    pub build_attempts: usize,
    // Fixed seed makes the schedule reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_build_attempts() -> usize { DEFAULT_BUILD_ATTEMPTS }

// Command line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub build_attempts: Option<usize>,
    pub seed: Option<u64>,
}

impl TournamentConfig {
    pub fn rules(&self) -> ScheduleRules { ScheduleRules::new(self.races_per_player) }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        TournamentConfig {
            build_attempts: overrides.build_attempts.unwrap_or(self.build_attempts),
            seed: overrides.seed.or(self.seed),
            ..self
        }
    }
}

pub fn read_config_file(path: &Path) -> anyhow::Result<TournamentConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'.", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file '{}'.", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<TournamentConfig> {
    Ok(serde_yaml::from_str(contents)?)
}
