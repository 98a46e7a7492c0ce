use thiserror::Error;

use crate::constants::LEAGUE_SIZES;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Prediction {home}-{away} out of range: goals must be between 0 and {max}")]
    PredictionOutOfRange { home: u32, away: u32, max: u32 },

    #[error("Invalid league size {size}, allowed sizes are {allowed:?}")]
    InvalidLeagueSize { size: usize, allowed: &'static [usize] },

    #[error("Unknown competition: {0}")]
    UnknownCompetition(String),

    #[error("League is full ({capacity} participants)")]
    LeagueFull { capacity: usize },

    #[error("Participant already in league: {0}")]
    DuplicateParticipant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error on line {line}: {reason}")]
    CatalogParse { line: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeagueError {
    pub fn invalid_size(size: usize) -> Self {
        LeagueError::InvalidLeagueSize {
            size,
            allowed: &LEAGUE_SIZES,
        }
    }

    /// Whether the caller can fix the input and retry.
    pub fn is_user_error(&self) -> bool {
        match self {
            LeagueError::PredictionOutOfRange { .. } => true,
            LeagueError::InvalidLeagueSize { .. } => true,
            LeagueError::UnknownCompetition(_) => true,
            LeagueError::LeagueFull { .. } => true,
            LeagueError::DuplicateParticipant(_) => true,
            LeagueError::CatalogParse { .. } => true,
            LeagueError::Io(_) | LeagueError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
