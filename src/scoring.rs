use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BONUS_POINTS, HIGH_TIER_MIN, MAX_PREDICTED_GOALS, MAX_PREDICTION_SCORE, MEDIUM_TIER_MIN,
    OUTCOME_POINTS, OVER_UNDER_LINE,
};
use crate::error::{LeagueError, Result};
use crate::fixture::MatchScore;

/// A participant's forecast for one match.
///
/// Use [`Prediction::new`] for values coming from users; the scorer itself
/// does not re-check the 0..=20 range.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prediction {
    pub home: u32,
    pub away: u32,
}

impl Prediction {
    pub fn new(home: u32, away: u32) -> Result<Self> {
        if home > MAX_PREDICTED_GOALS || away > MAX_PREDICTED_GOALS {
            return Err(LeagueError::PredictionOutOfRange {
                home,
                away,
                max: MAX_PREDICTED_GOALS,
            });
        }
        Ok(Prediction { home, away })
    }

    fn as_score(&self) -> MatchScore {
        MatchScore::new(self.home, self.away)
    }
}

/// Real result of a match; `None` on either side means not played yet.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealResult {
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl RealResult {
    pub fn played(home_goals: u32, away_goals: u32) -> Self {
        RealResult {
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
        }
    }

    pub fn pending() -> Self {
        RealResult::default()
    }

    pub fn final_score(&self) -> Option<MatchScore> {
        match (self.home_goals, self.away_goals) {
            (Some(home), Some(away)) => Some(MatchScore::new(home, away)),
            _ => None,
        }
    }
}

/// Score one prediction against a real result.
///
/// Returns `None` when there is no prediction or the match has not been
/// played; callers must leave such pairs out of any aggregate rather than
/// count them as zero. Otherwise the six rules add up independently:
///
/// * +5 when the outcome class (1 / X / 2) matches
/// * +1 for the exact home goals
/// * +1 for the exact away goals
/// * +1 for the exact goal difference
/// * +1 when both sides agree on over/under 2.5 total goals
/// * +1 when both sides agree on "both teams scored"
pub fn score_prediction(prediction: Option<&Prediction>, result: &RealResult) -> Option<u32> {
    let predicted = prediction?.as_score();
    let real = result.final_score()?;

    let rules = [
        (predicted.outcome() == real.outcome(), OUTCOME_POINTS),
        (predicted.home == real.home, BONUS_POINTS),
        (predicted.away == real.away, BONUS_POINTS),
        (predicted.goal_difference() == real.goal_difference(), BONUS_POINTS),
        (
            (predicted.total_goals() > OVER_UNDER_LINE) == (real.total_goals() > OVER_UNDER_LINE),
            BONUS_POINTS,
        ),
        (predicted.both_scored() == real.both_scored(), BONUS_POINTS),
    ];

    let points = rules
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, points)| points)
        .sum();
    Some(points)
}

/// Score many independent (prediction, result) pairs in parallel.
pub fn score_many(pairs: &[(Option<Prediction>, RealResult)]) -> Vec<Option<u32>> {
    pairs
        .par_iter()
        .map(|(prediction, result)| score_prediction(prediction.as_ref(), result))
        .collect()
}

/// Display band of a single scored prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Perfect,
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_points(points: u32) -> Self {
        if points >= MAX_PREDICTION_SCORE {
            ScoreTier::Perfect
        } else if points >= HIGH_TIER_MIN {
            ScoreTier::High
        } else if points >= MEDIUM_TIER_MIN {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}
