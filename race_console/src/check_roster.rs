use std::io;

use itertools::Itertools;
use race_tournament::Roster;


pub fn run(names: &[String]) -> io::Result<()> {
    match Roster::new(names) {
        Ok(roster) => {
            let options = roster.valid_races_per_player();
            if options.is_empty() {
                println!("OK, but no races-per-player value fills every race.");
            } else {
                println!("OK. Races per player: {}", options.iter().join(", "));
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Invalid roster: {}", err);
            Err(io::Error::new(io::ErrorKind::InvalidData, err))
        }
    }
}
