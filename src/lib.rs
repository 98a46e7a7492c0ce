//! Fantabet Core - scheduling, scoring and standings for football prediction leagues.
//!
//! Championship leagues play a simulated round-robin between members;
//! tournament leagues rank members by how well they forecast real matches.
//! Everything here is a pure computation over plain records; storage,
//! identity and transport belong to the host application. Python bindings
//! are available behind the `python` feature.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod goals;
pub mod league;
pub mod participant;
#[cfg(feature = "python")]
mod python;
pub mod schedule;
pub mod scoring;
pub mod standings;

pub use catalog::{Competition, CompetitionCatalog, LeagueMode};
pub use constants::{LEAGUE_SIZES, MAX_PREDICTED_GOALS, MAX_PREDICTION_SCORE};
pub use error::{LeagueError, Result};
pub use fixture::{Fixture, MatchScore, Outcome};
pub use goals::points_to_virtual_goals;
pub use league::{generate_join_code, League, LeagueConfig, LeagueSettings};
pub use participant::Participant;
pub use schedule::{generate_schedule, round_pairings, rounds_per_cycle};
pub use scoring::{score_many, score_prediction, Prediction, RealResult, ScoreTier};
pub use standings::{
    build_standings, build_standings_batch, championship_standings, rank_standings,
    tournament_standings, PredictionRecord, StandingEntry, StandingsInput, StandingsTable,
};
