use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::participant::Participant;

/// Outcome class of a match, decided by strict goal comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl Outcome {
    pub fn from_goals(home: u32, away: u32) -> Self {
        match home.cmp(&away) {
            Ordering::Greater => Outcome::HomeWin,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::AwayWin,
        }
    }

    /// Conventional betting sign: 1, X or 2.
    pub fn sign(&self) -> &'static str {
        match self {
            Outcome::HomeWin => "1",
            Outcome::Draw => "X",
            Outcome::AwayWin => "2",
        }
    }
}

/// Final score of a played match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchScore {
    pub home: u32,
    pub away: u32,
}

impl MatchScore {
    pub fn new(home: u32, away: u32) -> Self {
        MatchScore { home, away }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_goals(self.home, self.away)
    }

    pub fn goal_difference(&self) -> i64 {
        self.home as i64 - self.away as i64
    }

    pub fn total_goals(&self) -> u64 {
        u64::from(self.home) + u64::from(self.away)
    }

    pub fn both_scored(&self) -> bool {
        self.home > 0 && self.away > 0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// One scheduled pairing.
///
/// Fixtures are produced unplayed by the schedule generator. The host records
/// the score later; `score` is the only "has been played" marker, so a
/// recorded 0-0 counts as a played draw.
///
/// On the wire the score is flattened into nullable `homeGoals` and
/// `awayGoals`; a fixture is played only when both are present.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FixtureRecord", into = "FixtureRecord")]
pub struct Fixture {
    pub round: u32,
    pub cycle: u32,
    pub home_id: String,
    pub away_id: String,
    pub home_name: String,
    pub away_name: String,
    pub score: Option<MatchScore>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureRecord {
    round: u32,
    cycle: u32,
    home_id: String,
    away_id: String,
    home_name: String,
    away_name: String,
    #[serde(default)]
    home_goals: Option<u32>,
    #[serde(default)]
    away_goals: Option<u32>,
}

impl From<FixtureRecord> for Fixture {
    fn from(record: FixtureRecord) -> Self {
        let score = match (record.home_goals, record.away_goals) {
            (Some(home), Some(away)) => Some(MatchScore::new(home, away)),
            _ => None,
        };
        Fixture {
            round: record.round,
            cycle: record.cycle,
            home_id: record.home_id,
            away_id: record.away_id,
            home_name: record.home_name,
            away_name: record.away_name,
            score,
        }
    }
}

impl From<Fixture> for FixtureRecord {
    fn from(fixture: Fixture) -> Self {
        FixtureRecord {
            round: fixture.round,
            cycle: fixture.cycle,
            home_id: fixture.home_id,
            away_id: fixture.away_id,
            home_name: fixture.home_name,
            away_name: fixture.away_name,
            home_goals: fixture.score.map(|s| s.home),
            away_goals: fixture.score.map(|s| s.away),
        }
    }
}

impl Fixture {
    pub fn new(round: u32, cycle: u32, home: &Participant, away: &Participant) -> Self {
        Fixture {
            round,
            cycle,
            home_id: home.id.clone(),
            away_id: away.id.clone(),
            home_name: home.display_name.clone(),
            away_name: away.display_name.clone(),
            score: None,
        }
    }

    /// Copy of this fixture with a recorded result.
    pub fn with_score(&self, home_goals: u32, away_goals: u32) -> Self {
        Fixture {
            score: Some(MatchScore::new(home_goals, away_goals)),
            ..self.clone()
        }
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, participant_id: &str) -> bool {
        self.home_id == participant_id || self.away_id == participant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_goals() {
        assert_eq!(Outcome::from_goals(2, 1), Outcome::HomeWin);
        assert_eq!(Outcome::from_goals(0, 0), Outcome::Draw);
        assert_eq!(Outcome::from_goals(0, 3), Outcome::AwayWin);
        assert_eq!(Outcome::from_goals(1, 1).sign(), "X");
    }

    #[test]
    fn test_with_score_keeps_original_unplayed() {
        let a = Participant::new("a", "Alice");
        let b = Participant::new("b", "Bob");
        let fixture = Fixture::new(1, 1, &a, &b);

        let played = fixture.with_score(0, 0);
        assert!(!fixture.is_played());
        assert!(played.is_played());
        assert_eq!(played.score, Some(MatchScore::new(0, 0)));
        assert_eq!(played.home_name, "Alice");
        assert!(played.involves("b"));
        assert!(!played.involves("c"));
    }

    #[test]
    fn test_deserialize_without_score() {
        let json = r#"{"round":3,"cycle":1,"homeId":"a","awayId":"b","homeName":"A","awayName":"B"}"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();
        assert_eq!(fixture.round, 3);
        assert!(fixture.score.is_none());

        let json = r#"{"round":1,"cycle":1,"homeId":"a","awayId":"b","homeName":"A","awayName":"B","homeGoals":null,"awayGoals":null}"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();
        assert!(!fixture.is_played());
    }

    #[test]
    fn test_deserialize_flat_goals() {
        let json = r#"{"round":1,"cycle":1,"homeId":"a","awayId":"b","homeName":"A","awayName":"B","homeGoals":2,"awayGoals":1}"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();
        assert_eq!(fixture.score, Some(MatchScore::new(2, 1)));

        let json = r#"{"round":1,"cycle":1,"homeId":"a","awayId":"b","homeName":"A","awayName":"B","homeGoals":0,"awayGoals":0}"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();
        assert!(fixture.is_played());

        // Half-recorded result stays unplayed
        let json = r#"{"round":1,"cycle":1,"homeId":"a","awayId":"b","homeName":"A","awayName":"B","homeGoals":3}"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();
        assert!(!fixture.is_played());
    }

    #[test]
    fn test_serialize_flat_goals() {
        let a = Participant::new("a", "Alice");
        let b = Participant::new("b", "Bob");
        let played = Fixture::new(2, 1, &a, &b).with_score(1, 3);

        let value = serde_json::to_value(&played).unwrap();
        assert_eq!(value["homeGoals"], 1);
        assert_eq!(value["awayGoals"], 3);
        assert_eq!(value["homeName"], "Alice");
        assert!(value.get("score").is_none());

        let back: Fixture = serde_json::from_value(value).unwrap();
        assert_eq!(back, played);

        let unplayed = serde_json::to_value(Fixture::new(2, 1, &a, &b)).unwrap();
        assert!(unplayed["homeGoals"].is_null());
    }

    #[test]
    fn test_total_goals_does_not_overflow() {
        let score = MatchScore::new(u32::MAX, 1);
        assert_eq!(score.total_goals(), u64::from(u32::MAX) + 1);
    }
}
