// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod check_roster;
mod config;
mod play_main;
mod render;
mod schedule_main;

use std::io;
use std::path::PathBuf;

use clap::{ArgMatches, Command, arg};
use race_tournament::{DEFAULT_BUILD_ATTEMPTS, Roster, valid_appearance_counts};
use race_tournament::{MAX_RACES_PER_PLAYER_TO_OFFER, RACE_SIZE};

use config::{ConfigOverrides, TournamentConfig};
use render::OutputFormat;
use schedule_main::TournamentSource;


fn tournament_args(command: Command) -> Command {
    command
        .arg(
            arg!(-c --"config" <config_file> "Path to a yaml-serialized TournamentConfig.")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with_all(["races-per-player", "players"]),
        )
        .arg(
            arg!(-r --"races-per-player" <n> "Number of races each player takes part in")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"attempts" <n> "How many times to rebuild the schedule if construction fails")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--"seed" <seed> "Random seed for a reproducible schedule").value_parser(
            clap::value_parser!(u64),
        ))
        .arg(arg!([players] ... "Player names"))
}

fn tournament_source(matches: &ArgMatches) -> io::Result<TournamentSource> {
    let overrides = ConfigOverrides {
        build_attempts: matches.get_one::<usize>("attempts").copied(),
        seed: matches.get_one::<u64>("seed").copied(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        return Ok(TournamentSource::ConfigFile { path: path.clone(), overrides });
    }
    let names = matches.get_many::<String>("players").unwrap_or_default().collect::<Vec<_>>();
    let players = Roster::new(names).map_err(|err| {
        eprintln!("Invalid roster: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let Some(&races_per_player) = matches.get_one::<usize>("races-per-player") else {
        eprintln!(
            "Specify --races-per-player. Valid values for {} players: {:?}",
            players.len(),
            players.valid_races_per_player()
        );
        return Err(io::Error::from(io::ErrorKind::InvalidInput));
    };
    let config = TournamentConfig {
        players,
        races_per_player,
        build_attempts: DEFAULT_BUILD_ATTEMPTS,
        seed: None,
    };
    Ok(TournamentSource::Inline(config.with_overrides(overrides)))
}

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Race tournament")
        .version(clap::crate_version!())
        .about("Fair race schedules for party-game tournaments")
        .subcommand_required(true)
        .subcommand(
            tournament_args(Command::new("schedule").about("Build and print a race schedule"))
                .arg(
                    arg!(-f --"format" <format> "Output format")
                        .value_parser(["text", "json", "yaml"])
                        .default_value("text"),
                ),
        )
        .subcommand(tournament_args(
            Command::new("play").about("Announce races one by one, press Enter to advance"),
        ))
        .subcommand(
            Command::new("options")
                .about("List races-per-player values that fill every race")
                .arg(
                    arg!(<num_players> "Number of players")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max" <n> "Largest value to consider")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("check-roster")
                .about("Verifies that player names are valid and unique")
                .arg(arg!(<players> ... "Player names")),
        )
        .subcommand(
            Command::new("stress-test")
                .about("Build and verify schedules for random rosters")
                .arg(
                    arg!(-n --"batches" <n> "Number of batches; runs forever if omitted")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("schedule", sub_matches)) => schedule_main::run(schedule_main::ScheduleConfig {
            source: tournament_source(sub_matches)?,
            format: OutputFormat::parse(sub_matches.get_one::<String>("format").unwrap())
                .map_err(io::Error::other)?,
        }),
        Some(("play", sub_matches)) => play_main::run(play_main::PlayConfig {
            source: tournament_source(sub_matches)?,
        }),
        Some(("options", sub_matches)) => {
            let num_players = *sub_matches.get_one::<usize>("num_players").unwrap();
            let max = sub_matches
                .get_one::<usize>("max")
                .copied()
                .unwrap_or(MAX_RACES_PER_PLAYER_TO_OFFER);
            let options = valid_appearance_counts(num_players, RACE_SIZE, max);
            if options.is_empty() {
                println!("None: {num_players} players cannot fill races of {RACE_SIZE}.");
            }
            for races_per_player in options {
                println!(
                    "{} races per player ({} races total)",
                    races_per_player,
                    num_players * races_per_player / RACE_SIZE
                );
            }
            Ok(())
        }
        Some(("check-roster", sub_matches)) => check_roster::run(
            &sub_matches.get_many::<String>("players").unwrap().cloned().collect::<Vec<_>>(),
        ),
        Some(("stress-test", sub_matches)) => stress_test::run(stress_test::StressTestConfig {
            num_batches: sub_matches.get_one::<usize>("batches").copied(),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
