use std::fmt::Write;
use std::str::FromStr;

use itertools::Itertools;
use race_tournament::Schedule;
use strum::{EnumIter, EnumString, IntoStaticStr};


#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        OutputFormat::from_str(s).map_err(|_| anyhow::anyhow!("Unknown output format '{s}'."))
    }
}

pub fn render_schedule(
    schedule: &Schedule<String>, players: &[String], format: OutputFormat,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => schedule_as_text(schedule, players),
        OutputFormat::Json => serde_json::to_string_pretty(schedule)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(schedule)?,
    })
}

// Races one per line, followed by per-player race counts in roster order.
pub fn schedule_as_text(schedule: &Schedule<String>, players: &[String]) -> String {
    let mut ret = String::new();
    let width = schedule.len().to_string().len();
    for (i, race) in schedule.races().iter().enumerate() {
        writeln!(ret, "Race {:>width$}: {}", i + 1, race).unwrap();
    }
    let appearances = schedule.appearances();
    let counts = players
        .iter()
        .map(|p| format!("{} × {}", p, appearances.get(p).copied().unwrap_or(0)))
        .join(", ");
    writeln!(ret, "Races per player: {counts}").unwrap();
    ret
}


#[cfg(test)]
mod tests {
    use indoc::formatdoc;
    use pretty_assertions::assert_eq;
    use race_tournament::build_schedule;
    use race_tournament::test_util::deterministic_rng;
    use strum::IntoEnumIterator;

    use super::*;

    fn players() -> Vec<String> {
        ["Mario", "Luigi", "Peach", "Toad"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn format_names() {
        let names = OutputFormat::iter().map(<&'static str>::from).collect_vec();
        assert_eq!(names, ["text", "json", "yaml"]);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("xml").is_err());
    }

    #[test]
    fn text_output_lists_every_race() {
        let players = players();
        let schedule = build_schedule(&players, 2, 4, &mut deterministic_rng()).unwrap();
        let text = schedule_as_text(&schedule, &players);
        let lines = text.lines().collect_vec();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Race 1: "));
        assert!(lines[1].starts_with("Race 2: "));
        assert_eq!(lines[2], "Races per player: Mario × 2, Luigi × 2, Peach × 2, Toad × 2");
    }

    #[test]
    fn race_numbers_are_aligned() {
        let players = (1..=12).map(|i| format!("P{i}")).collect_vec();
        let schedule = build_schedule(&players, 4, 4, &mut deterministic_rng()).unwrap();
        let text = schedule_as_text(&schedule, &players);
        assert!(text.starts_with("Race  1: "), "{text}");
        assert!(text.contains("\nRace 12: "), "{text}");
    }

    #[test]
    fn json_output_is_list_of_races() {
        let players = players();
        let schedule = build_schedule(&players, 1, 4, &mut deterministic_rng()).unwrap();
        let json = render_schedule(&schedule, &players, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let races = value["races"].as_array().unwrap();
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].as_array().unwrap().len(), 4);
    }

    #[test]
    fn yaml_output() {
        let players = players();
        let schedule = build_schedule(&players, 1, 4, &mut deterministic_rng()).unwrap();
        let yaml = render_schedule(&schedule, &players, OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let races = parsed["races"].as_sequence().unwrap();
        assert_eq!(races.len(), 1);
        let racers = races[0]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|racer| racer.as_str().unwrap())
            .collect_vec();
        assert_eq!(racers, schedule.races()[0].racers());
    }

    #[test]
    fn text_output_for_two_races() {
        let players = players();
        let schedule = build_schedule(&players, 2, 4, &mut deterministic_rng()).unwrap();
        let [first, second] = schedule.races() else {
            panic!("{schedule:?}");
        };
        assert_eq!(schedule_as_text(&schedule, &players), formatdoc! {"
            Race 1: {first}
            Race 2: {second}
            Races per player: Mario × 2, Luigi × 2, Peach × 2, Toad × 2
        "});
    }
}
