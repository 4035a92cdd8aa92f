use std::io;

/// Errors raised while reading team input or writing a schedule.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("team count must be at most {max}, got {count}")]
    InvalidTeamCount { count: usize, max: usize },
    #[error("{count} teams cannot be scheduled, the limit is {max}")]
    TooManyTeams { count: usize, max: usize },
    #[error("team label at position {0} is empty")]
    EmptyLabel(usize),
    #[error("team {0:?} is listed more than once")]
    DuplicateTeam(String),
    #[error("no teams found in {0}")]
    NoTeams(String),
    #[error("invalid priority index {0:?}")]
    InvalidPriority(String),
    #[error(transparent)] Csv(#[from] csv::Error),
    #[error(transparent)] Io(#[from] io::Error),
    #[error(transparent)] Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
