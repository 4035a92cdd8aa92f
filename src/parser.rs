use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use crate::error::{Error, Result};
use crate::schedule::{Team, MAX_ROUNDS};

/// Largest field that can be labelled with single letters
pub const MAX_LETTER_TEAMS: usize = 26;

/// Largest named field that fits in the round ceiling
pub const MAX_NAMED_TEAMS: usize = MAX_ROUNDS + 1;

/// Whether a bye is added to balance an odd field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByePolicy {
    #[default]
    Auto,
    Never,
}

impl ByePolicy {
    fn apply(self, mut teams: Vec<Team>) -> Vec<Team> {
        if self == ByePolicy::Auto && teams.len() % 2 == 1 {
            teams.push(Team::Bye);
        }
        teams
    }
}

/// Teams labelled A, B, C, ... for the given count. Zero teams is an empty field.
pub fn teams_from_count(count: usize, bye: ByePolicy) -> Result<Vec<Team>> {
    if count > MAX_LETTER_TEAMS {
        return Err(Error::InvalidTeamCount { count, max: MAX_LETTER_TEAMS });
    }
    let teams = (b'A'..=b'Z')
        .take(count)
        .map(|c| Team::real((c as char).to_string()))
        .collect();
    Ok(bye.apply(teams))
}

/// Teams from explicit labels, in the given order
pub fn teams_from_labels<S: AsRef<str>>(labels: &[S], bye: ByePolicy) -> Result<Vec<Team>> {
    if labels.len() > MAX_NAMED_TEAMS {
        return Err(Error::TooManyTeams { count: labels.len(), max: MAX_NAMED_TEAMS });
    }

    let mut seen = HashSet::new();
    let mut teams = Vec::with_capacity(labels.len() + 1);

    for (index, label) in labels.iter().enumerate() {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(Error::EmptyLabel(index + 1));
        }
        if !seen.insert(label.to_string()) {
            return Err(Error::DuplicateTeam(label.to_string()));
        }
        teams.push(Team::real(label));
    }

    if teams.is_empty() {
        return Err(Error::NoTeams("the team list".to_string()));
    }
    Ok(bye.apply(teams))
}

/// Splits a comma separated list such as `"Team 1, Team 2"`
pub fn split_labels(list: &str) -> Vec<String> {
    list.split(',').map(|label| label.trim().to_string()).collect()
}

/// Loads team names from a CSV file
pub fn load_teams<P: AsRef<Path>>(csv_path: P, bye: ByePolicy) -> Result<Vec<Team>> {
    let path = csv_path.as_ref();
    let file = std::fs::File::open(path)?;
    let labels = read_team_labels(file)?;
    if labels.is_empty() {
        return Err(Error::NoTeams(path.display().to_string()));
    }
    teams_from_labels(&labels, bye)
}

/// Reads the team column from CSV data. The column is the first whose header mentions
/// "team" or "name", or the first column otherwise.
pub fn read_team_labels<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?;
    let team_col = headers
        .iter()
        .position(|h| {
            let h = h.to_lowercase();
            h.contains("team") || h.contains("name")
        })
        .unwrap_or(0);

    let mut labels = Vec::new();
    for result in reader.records() {
        let record = result?;
        let label = record.get(team_col).unwrap_or("").trim();
        if label.is_empty() {
            continue; // Skip blank rows
        }
        labels.push(label.to_string());
    }
    Ok(labels)
}

/// Parses priority indices separated by commas or whitespace, e.g. `"1,0,2"`
pub fn parse_priorities(list: &str) -> Result<Vec<usize>> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().map_err(|_| Error::InvalidPriority(part.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teams_from_count_adds_bye_for_odd_fields() {
        let teams = teams_from_count(3, ByePolicy::Auto).unwrap();
        assert_eq!(teams, vec![Team::real("A"), Team::real("B"), Team::real("C"), Team::Bye]);

        let teams = teams_from_count(4, ByePolicy::Auto).unwrap();
        assert_eq!(teams.len(), 4);

        let teams = teams_from_count(5, ByePolicy::Never).unwrap();
        assert!(teams.iter().all(|t| !t.is_bye()));
    }

    #[test]
    fn test_teams_from_count_bounds() {
        assert!(teams_from_count(0, ByePolicy::Auto).unwrap().is_empty());
        assert!(matches!(teams_from_count(27, ByePolicy::Auto), Err(Error::InvalidTeamCount { .. })));
        assert_eq!(teams_from_count(26, ByePolicy::Never).unwrap().last(), Some(&Team::real("Z")));
    }

    #[test]
    fn test_labels_are_validated() {
        assert!(matches!(
            teams_from_labels(&["Ajax", " ", "PSV"], ByePolicy::Auto),
            Err(Error::EmptyLabel(2))
        ));
        assert!(matches!(
            teams_from_labels(&["Ajax", "Ajax "], ByePolicy::Auto),
            Err(Error::DuplicateTeam(_))
        ));
        let teams = teams_from_labels(&split_labels("z, y, x"), ByePolicy::Auto).unwrap();
        assert_eq!(teams, vec![Team::real("z"), Team::real("y"), Team::real("x"), Team::Bye]);
    }

    #[test]
    fn test_named_field_size_is_limited() {
        let labels: Vec<String> = (0..=MAX_NAMED_TEAMS).map(|i| format!("Team {}", i)).collect();
        assert!(matches!(
            teams_from_labels(&labels, ByePolicy::Auto),
            Err(Error::TooManyTeams { count: 100, max: 99 })
        ));
        assert_eq!(teams_from_labels(&labels[..MAX_NAMED_TEAMS], ByePolicy::Auto).unwrap().len(), 100);
    }

    #[test]
    fn test_read_team_labels_finds_team_column() {
        let data = "nr,Team name,region\n1,Hoorn,N\n2,,N\n3,Delft,Z\n";
        let labels = read_team_labels(data.as_bytes()).unwrap();
        assert_eq!(labels, vec!["Hoorn", "Delft"]);
    }

    #[test]
    fn test_read_team_labels_falls_back_to_first_column() {
        let data = "club,region\nHoorn,N\nDelft,Z\n";
        let labels = read_team_labels(data.as_bytes()).unwrap();
        assert_eq!(labels, vec!["Hoorn", "Delft"]);
    }

    #[test]
    fn test_parse_priorities() {
        assert_eq!(parse_priorities("1,0, 2").unwrap(), vec![1, 0, 2]);
        assert_eq!(parse_priorities("").unwrap(), Vec::<usize>::new());
        assert!(matches!(parse_priorities("1,x"), Err(Error::InvalidPriority(_))));
    }
}
