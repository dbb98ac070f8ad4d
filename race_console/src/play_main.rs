use std::io::{self, BufRead};

use race_tournament::Tournament;

use crate::schedule_main::{TournamentSource, build, load_tournament};


pub struct PlayConfig {
    pub source: TournamentSource,
}

// Announces races one by one. Press Enter after each race to move on.
pub fn run(config: PlayConfig) -> io::Result<()> {
    let setup = load_tournament(config.source)?;
    let mut tournament = Tournament::new(build(&setup)?);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Some(race) = tournament.current_race() {
        println!(
            "Race {} of {}: {}",
            tournament.races_finished() + 1,
            tournament.races_total(),
            race
        );
        if let Some(next) = tournament.next_race() {
            println!("  Up next: {next}");
        }
        if lines.next().transpose()?.is_none() {
            // Stdin closed: nobody is there to run the races.
            return Ok(());
        }
        tournament.finish_race().map_err(io::Error::other)?;
    }
    println!("All {} races done!", tournament.races_total());
    Ok(())
}
