// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use race_tournament::Schedule;


// Single-letter participants: "A", "B", ...
#[allow(dead_code)]
pub fn letters(n: usize) -> Vec<String> {
    assert!(n <= 26);
    (b'A'..).take(n).map(|ch| char::from(ch).to_string()).collect()
}

// Racers of every race, in display order.
#[allow(dead_code)]
pub fn race_lineups<P: Clone>(schedule: &Schedule<P>) -> Vec<Vec<P>> {
    schedule.races().iter().map(|race| race.racers().to_vec()).collect()
}
