use std::io;
use std::path::PathBuf;

use log::info;
use race_tournament::{Roster, Schedule, ScheduleError, ScheduleRules};
use rand::prelude::*;

use crate::config::{ConfigOverrides, TournamentConfig, read_config_file};
use crate::render::{OutputFormat, render_schedule};


// Where the tournament setup comes from: a config file or command line arguments.
#[derive(Debug)]
pub enum TournamentSource {
    ConfigFile { path: PathBuf, overrides: ConfigOverrides },
    Inline(TournamentConfig),
}

pub struct ScheduleConfig {
    pub source: TournamentSource,
    pub format: OutputFormat,
}

pub fn load_tournament(source: TournamentSource) -> io::Result<TournamentConfig> {
    match source {
        TournamentSource::ConfigFile { path, overrides } => read_config_file(&path)
            .map(|config| config.with_overrides(overrides))
            .map_err(|err| {
                eprintln!("{err:#}");
                io::Error::new(io::ErrorKind::InvalidData, err)
            }),
        TournamentSource::Inline(config) => Ok(config),
    }
}

// Seeded when a seed is given, so that the same setup can be replayed.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

pub fn build(config: &TournamentConfig) -> io::Result<Schedule<String>> {
    let rules = config.rules();
    let mut rng = make_rng(config.seed);
    match config.players.build_schedule(rules, config.build_attempts, &mut rng) {
        Ok(schedule) => {
            info!(
                "Scheduled {} races for {} players, {} races each",
                schedule.len(),
                config.players.len(),
                rules.races_per_player
            );
            Ok(schedule)
        }
        Err(err) => {
            eprintln!("Cannot build schedule: {err}");
            if let ScheduleError::Infeasible { .. } = err {
                print_valid_options(&config.players, rules);
            }
            Err(io::Error::new(io::ErrorKind::InvalidInput, err))
        }
    }
}

fn print_valid_options(roster: &Roster, rules: ScheduleRules) {
    let options = roster.valid_races_per_player();
    if options.is_empty() {
        eprintln!(
            "No races-per-player value works for {} players in races of {}.",
            roster.len(),
            rules.race_size
        );
    } else {
        eprintln!(
            "Valid races per player for {} players: {}",
            roster.len(),
            itertools::join(options, ", ")
        );
    }
}

pub fn run(config: ScheduleConfig) -> io::Result<()> {
    let tournament = load_tournament(config.source)?;
    let schedule = build(&tournament)?;
    let out = render_schedule(&schedule, tournament.players.players(), config.format)
        .map_err(io::Error::other)?;
    print!("{out}");
    Ok(())
}
