mod error;
mod parser;
mod schedule;
mod display;
mod export;
mod web;

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use export::{export_schedule, OutputFormat};
use parser::{load_teams, split_labels, teams_from_count, teams_from_labels, ByePolicy};
use schedule::{generate, GeneratorOptions, Team, Termination};

/// Round-robin match planner for team competitions
#[derive(Parser)]
#[clap(version, args_conflicts_with_subcommands = true)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
    /// Number of teams, labelled A, B, C, ...
    team_count: Option<usize>,
    /// Per-round priority index; the candidate pair at this index is tried first
    priorities: Vec<usize>,
    /// Comma separated team names; all positional numbers are then priority indices
    #[clap(long, conflicts_with = "teams_file")]
    teams: Option<String>,
    /// CSV file with a team name column; all positional numbers are then priority indices
    #[clap(long)]
    teams_file: Option<PathBuf>,
    /// Do not add a bye for an odd number of teams
    #[clap(long)]
    no_bye: bool,
    /// Stop at the first round without a real match, like older versions did
    #[clap(long)]
    legacy_termination: bool,
    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Write the schedule to this file instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve schedules over HTTP
    Web {
        #[clap(long, env = "SCHEDULE_PORT", default_value_t = 8080)]
        port: u16,
    },
}

impl Args {
    fn bye_policy(&self) -> ByePolicy {
        if self.no_bye { ByePolicy::Never } else { ByePolicy::Auto }
    }

    fn teams(&self) -> Result<Option<Vec<Team>>, error::Error> {
        let bye = self.bye_policy();
        if let Some(list) = &self.teams {
            return teams_from_labels(&split_labels(list), bye).map(Some);
        }
        if let Some(path) = &self.teams_file {
            return load_teams(path, bye).map(Some);
        }
        self.team_count.map(|count| teams_from_count(count, bye)).transpose()
    }

    fn named_teams(&self) -> bool {
        self.teams.is_some() || self.teams_file.is_some()
    }

    fn priorities(&self) -> Vec<usize> {
        if self.named_teams() {
            // The first positional number is not a team count here
            self.team_count.into_iter().chain(self.priorities.iter().copied()).collect()
        } else {
            self.priorities.clone()
        }
    }

    fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            priorities: self.priorities(),
            termination: if self.legacy_termination { Termination::Legacy } else { Termination::PoolExhausted },
            ..GeneratorOptions::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Some(Command::Web { port }) = args.command {
        log::info!("Starting web server on port {}", port);
        web::start_server(port).await?;
        return Ok(());
    }

    let Some(teams) = args.teams()? else {
        println!("Usage: team-rounds <team_count> [priority_index ...]");
        println!("       team-rounds --teams \"Team 1,Team 2,...\" [priority_index ...]");
        println!("       team-rounds web [--port PORT]");
        return Ok(());
    };

    log::debug!("Scheduling {} teams: {:?}", teams.len(), teams);
    let schedule = generate(&teams, &args.options());
    log::info!("Scheduled {} matches in {} rounds", schedule.match_count(), schedule.rounds.len());
    if !schedule.is_complete() {
        log::warn!("{} pairs are missing from the schedule", schedule.unscheduled.len());
    }

    export_schedule(&schedule, args.format, args.output.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_priorities() {
        let args = Args::parse_from(["team-rounds", "6", "3", "1"]);
        assert_eq!(args.team_count, Some(6));
        assert_eq!(args.options().priorities, vec![3, 1]);
        assert_eq!(args.teams().unwrap().unwrap().len(), 6);
    }

    #[test]
    fn test_missing_team_source() {
        let args = Args::parse_from(["team-rounds"]);
        assert!(args.teams().unwrap().is_none());
    }

    #[test]
    fn test_named_teams_without_bye() {
        let args = Args::parse_from(["team-rounds", "--teams", "Hoorn,Delft,Assen", "--no-bye", "--legacy-termination"]);
        assert_eq!(args.teams().unwrap().unwrap().len(), 3);
        assert_eq!(args.options().termination, Termination::Legacy);
    }

    #[test]
    fn test_named_teams_take_all_positionals_as_priorities() {
        let args = Args::parse_from(["team-rounds", "--teams", "Hoorn,Delft,Assen,Ede", "2", "0", "1"]);
        assert_eq!(args.teams().unwrap().unwrap().len(), 4);
        assert_eq!(args.options().priorities, vec![2, 0, 1]);
    }

    #[test]
    fn test_zero_teams_is_an_empty_field() {
        let args = Args::parse_from(["team-rounds", "0"]);
        let teams = args.teams().unwrap().unwrap();
        assert!(teams.is_empty());
        assert!(generate(&teams, &args.options()).rounds.is_empty());
    }

    #[test]
    fn test_named_field_limit_applies_to_cli() {
        let list = (0..=parser::MAX_NAMED_TEAMS).map(|i| format!("T{}", i)).collect::<Vec<_>>().join(",");
        let args = Args::parse_from(["team-rounds", "--teams", list.as_str()]);
        assert!(matches!(args.teams(), Err(error::Error::TooManyTeams { .. })));
    }

    #[test]
    fn test_web_subcommand() {
        let args = Args::parse_from(["team-rounds", "web", "--port", "9000"]);
        assert!(matches!(args.command, Some(Command::Web { port: 9000 })));
    }

    #[test]
    fn test_non_numeric_team_count_is_rejected() {
        assert!(Args::try_parse_from(["team-rounds", "six"]).is_err());
    }
}
