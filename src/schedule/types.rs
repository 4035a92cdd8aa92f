use std::fmt;
use serde::{Serialize, Deserialize};

/// A participant in a scheduling run. `Bye` pads an odd field and orders after every real team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Team {
    Real(String),
    Bye,
}

impl Team {
    pub fn real(label: impl Into<String>) -> Self {
        Team::Real(label.into())
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Team::Bye)
    }

}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Real(label) => f.write_str(label),
            Team::Bye => f.write_str("bye"),
        }
    }
}

impl From<Option<String>> for Team {
    fn from(label: Option<String>) -> Self {
        label.map_or(Team::Bye, Team::Real)
    }
}

impl From<Team> for Option<String> {
    fn from(team: Team) -> Self {
        match team {
            Team::Real(label) => Some(label),
            Team::Bye => None,
        }
    }
}

/// Unordered matchup. `first` precedes `second` in the input team order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair {
    pub first: Team,
    pub second: Team,
}

impl Pair {
    pub fn new(first: Team, second: Team) -> Self {
        Pair { first, second }
    }

    /// True when neither side is the bye.
    pub fn is_real(&self) -> bool {
        !self.first.is_bye() && !self.second.is_bye()
    }

    pub fn contains(&self, team: &Team) -> bool {
        self.first == *team || self.second == *team
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// One scheduling slot: the matches played and the real teams sitting out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: usize,
    pub matches: Vec<Pair>,
    pub free_teams: Vec<Team>,
}

/// Full output of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub teams: Vec<Team>,
    pub rounds: Vec<Round>,
    pub unscheduled: Vec<Pair>, // real pairs left in the pool when generation stopped
}

impl Schedule {
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    pub fn real_teams(&self) -> impl Iterator<Item = &Team> + Clone {
        self.teams.iter().filter(|team| !team.is_bye())
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|round| round.matches.len()).sum()
    }

    pub fn matches(&self) -> impl Iterator<Item = &Pair> {
        self.rounds.iter().flat_map(|round| &round.matches)
    }
}
