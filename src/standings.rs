use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::catalog::LeagueMode;
use crate::constants::{DRAW_POINTS, LOSS_POINTS, WIN_POINTS};
use crate::fixture::Fixture;
use crate::goals::points_to_virtual_goals;
use crate::participant::Participant;
use crate::scoring::{score_prediction, Prediction, RealResult};

/// One row of a standings table.
///
/// Championship mode fills every counter from played fixtures. Tournament
/// mode only fills `points` and `played` (number of scored predictions).
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub participant_id: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingEntry {
    pub fn new(participant_id: impl Into<String>) -> Self {
        StandingEntry {
            participant_id: participant_id.into(),
            ..Default::default()
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    pub fn virtual_goals(&self) -> u32 {
        points_to_virtual_goals(self.points as i64)
    }

    /// Add one played match seen from this participant's side.
    /// Counters saturate at `u32::MAX`.
    pub fn record_match(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        let (counter, points) = match scored.cmp(&conceded) {
            Ordering::Greater => (&mut self.wins, WIN_POINTS),
            Ordering::Equal => (&mut self.draws, DRAW_POINTS),
            Ordering::Less => (&mut self.losses, LOSS_POINTS),
        };
        *counter = counter.saturating_add(1);
        self.points = self.points.saturating_add(points);
    }

    /// Add one scored prediction.
    pub fn record_prediction(&mut self, points: u32) {
        self.played = self.played.saturating_add(1);
        self.points = self.points.saturating_add(points);
    }
}

/// Ranking order: points, then goal difference, then goals scored, all
/// descending.
pub fn compare_entries(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference().cmp(&a.goal_difference()))
        .then(b.goals_for.cmp(&a.goals_for))
}

/// Sort rows into ranking order. The sort is stable, so rows equal on all
/// three keys keep their relative order.
pub fn rank_standings(entries: &mut [StandingEntry]) {
    entries.sort_by(compare_entries);
}

/// Standings rows keyed by participant id, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct StandingsTable {
    entries: Vec<StandingEntry>,
    index: HashMap<String, usize>,
}

impl StandingsTable {
    pub fn new() -> Self {
        StandingsTable::default()
    }

    /// Table with a zero row for every member, in member order.
    pub fn with_members(members: &[Participant]) -> Self {
        let mut table = StandingsTable::new();
        for member in members {
            table.entry_mut(&member.id);
        }
        table
    }

    /// Row for `participant_id`, appended as a zero row if missing.
    pub fn entry_mut(&mut self, participant_id: &str) -> &mut StandingEntry {
        let position = match self.index.get(participant_id) {
            Some(&position) => position,
            None => {
                self.entries.push(StandingEntry::new(participant_id));
                self.index
                    .insert(participant_id.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position]
    }

    pub fn get(&self, participant_id: &str) -> Option<&StandingEntry> {
        self.index.get(participant_id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, participant_id: &str) -> bool {
        self.index.contains_key(participant_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandingEntry> {
        self.entries.iter()
    }

    /// Consume the table into ranked rows.
    pub fn into_ranked(self) -> Vec<StandingEntry> {
        let mut entries = self.entries;
        rank_standings(&mut entries);
        entries
    }
}

/// A participant's forecast for one real match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub participant_id: String,
    pub match_id: String,
    pub prediction: Prediction,
}

impl PredictionRecord {
    pub fn new(participant_id: impl Into<String>, match_id: impl Into<String>, prediction: Prediction) -> Self {
        PredictionRecord {
            participant_id: participant_id.into(),
            match_id: match_id.into(),
            prediction,
        }
    }
}

/// Tournament mode: sum prediction scores per league member.
///
/// Every member gets a row even without a single scored prediction.
/// Predictions for matches without a final result are left out, as are
/// predictions from participants who are not members. A participant holds
/// one prediction per match: when the same pair appears more than once, the
/// last record wins.
pub fn tournament_standings(
    members: &[Participant],
    predictions: &[PredictionRecord],
    results: &HashMap<String, RealResult>,
) -> Vec<StandingEntry> {
    let mut table = StandingsTable::with_members(members);
    let mut seen = HashSet::new();

    for record in predictions.iter().rev() {
        if !seen.insert((record.participant_id.as_str(), record.match_id.as_str())) {
            warn!(
                participant = %record.participant_id,
                match_id = %record.match_id,
                "superseded prediction skipped"
            );
            continue;
        }
        if !table.contains(&record.participant_id) {
            warn!(
                participant = %record.participant_id,
                match_id = %record.match_id,
                "prediction from non-member skipped"
            );
            continue;
        }
        let Some(result) = results.get(&record.match_id) else {
            warn!(match_id = %record.match_id, "prediction for unknown match skipped");
            continue;
        };
        if let Some(points) = score_prediction(Some(&record.prediction), result) {
            table.entry_mut(&record.participant_id).record_prediction(points);
        }
    }

    debug!(members = table.len(), predictions = predictions.len(), "built tournament standings");
    table.into_ranked()
}

/// Championship mode: classic 3/1/0 table from played fixtures.
///
/// Every participant appearing in `fixtures` gets a row, in order of first
/// appearance; fixtures without a recorded score are not counted.
pub fn championship_standings(fixtures: &[Fixture]) -> Vec<StandingEntry> {
    let mut table = StandingsTable::new();
    let mut played = 0;

    for fixture in fixtures {
        table.entry_mut(&fixture.home_id);
        table.entry_mut(&fixture.away_id);

        let Some(score) = fixture.score else {
            continue;
        };
        played += 1;
        table.entry_mut(&fixture.home_id).record_match(score.home, score.away);
        table.entry_mut(&fixture.away_id).record_match(score.away, score.home);
    }

    debug!(
        participants = table.len(),
        fixtures = fixtures.len(),
        played,
        "built championship standings"
    );
    table.into_ranked()
}

/// Input of [`build_standings`], one variant per league mode.
#[derive(Clone, Copy, Debug)]
pub enum StandingsInput<'a> {
    Tournament {
        members: &'a [Participant],
        predictions: &'a [PredictionRecord],
        results: &'a HashMap<String, RealResult>,
    },
    Championship {
        fixtures: &'a [Fixture],
    },
}

impl StandingsInput<'_> {
    pub fn mode(&self) -> LeagueMode {
        match self {
            StandingsInput::Tournament { .. } => LeagueMode::Tournament,
            StandingsInput::Championship { .. } => LeagueMode::Championship,
        }
    }
}

/// Build a ranked standings table for either league mode.
pub fn build_standings(input: &StandingsInput<'_>) -> Vec<StandingEntry> {
    match *input {
        StandingsInput::Tournament {
            members,
            predictions,
            results,
        } => tournament_standings(members, predictions, results),
        StandingsInput::Championship { fixtures } => championship_standings(fixtures),
    }
}

/// Build many independent tables in parallel, e.g. one per league.
pub fn build_standings_batch(inputs: &[StandingsInput<'_>]) -> Vec<Vec<StandingEntry>> {
    inputs.par_iter().map(build_standings).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(round: u32, home: &str, away: &str) -> Fixture {
        Fixture::new(
            round,
            1,
            &Participant::new(home, home.to_uppercase()),
            &Participant::new(away, away.to_uppercase()),
        )
    }

    fn ids(entries: &[StandingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.participant_id.as_str()).collect()
    }

    fn members(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| Participant::new(*n, *n)).collect()
    }

    #[test]
    fn test_championship_three_way() {
        let fixtures = vec![
            fixture(1, "a", "b").with_score(2, 1),
            fixture(2, "b", "c").with_score(0, 0),
            fixture(3, "a", "c").with_score(1, 1),
        ];

        let standings = championship_standings(&fixtures);
        assert_eq!(ids(&standings), vec!["a", "c", "b"]);

        let a = &standings[0];
        assert_eq!((a.points, a.wins, a.draws, a.losses), (4, 1, 1, 0));
        assert_eq!((a.goals_for, a.goals_against), (3, 2));

        let c = &standings[1];
        assert_eq!((c.points, c.draws, c.goals_for, c.goals_against), (2, 2, 1, 1));

        let b = &standings[2];
        assert_eq!((b.points, b.draws, b.losses), (1, 1, 1));
        assert_eq!((b.goals_for, b.goals_against), (1, 2));
        assert_eq!(b.played, 2);
    }

    #[test]
    fn test_goalless_draw_counts_as_played() {
        let fixtures = vec![fixture(1, "a", "b").with_score(0, 0)];
        let standings = championship_standings(&fixtures);
        assert!(standings.iter().all(|e| e.played == 1 && e.points == 1 && e.draws == 1));
    }

    #[test]
    fn test_unplayed_fixtures_skipped_but_listed() {
        let fixtures = vec![
            fixture(1, "a", "b").with_score(3, 0),
            fixture(1, "c", "d"),
        ];
        let standings = championship_standings(&fixtures);
        assert_eq!(ids(&standings), vec!["a", "c", "d", "b"]);
        assert_eq!(standings[1].played, 0);
        assert_eq!(standings[1].draws, 0);
    }

    #[test]
    fn test_tie_breakers() {
        // Equal points; x has the better difference, y and z tie on difference
        // and are split by goals scored.
        let mut entries = vec![
            StandingEntry { participant_id: "z".into(), points: 3, goals_for: 2, goals_against: 1, ..Default::default() },
            StandingEntry { participant_id: "y".into(), points: 3, goals_for: 4, goals_against: 3, ..Default::default() },
            StandingEntry { participant_id: "x".into(), points: 3, goals_for: 3, goals_against: 0, ..Default::default() },
            StandingEntry { participant_id: "w".into(), points: 4, ..Default::default() },
        ];
        rank_standings(&mut entries);
        assert_eq!(ids(&entries), vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let make = |id: &str| StandingEntry { participant_id: id.into(), points: 5, goals_for: 2, ..Default::default() };
        let original = vec![make("q"), make("p"), make("r")];

        for _ in 0..3 {
            let mut entries = original.clone();
            rank_standings(&mut entries);
            assert_eq!(ids(&entries), vec!["q", "p", "r"]);
        }
    }

    #[test]
    fn test_tournament_sums_scored_predictions() {
        let members = members(&["anna", "bruno", "carla"]);
        let mut results = HashMap::new();
        results.insert("m1".to_string(), RealResult::played(2, 1));
        results.insert("m2".to_string(), RealResult::played(0, 0));
        results.insert("m3".to_string(), RealResult::pending());

        let predictions = vec![
            PredictionRecord::new("anna", "m1", Prediction { home: 2, away: 1 }),
            PredictionRecord::new("anna", "m2", Prediction { home: 1, away: 0 }),
            PredictionRecord::new("anna", "m3", Prediction { home: 1, away: 0 }),
            PredictionRecord::new("bruno", "m1", Prediction { home: 0, away: 0 }),
            PredictionRecord::new("bruno", "m2", Prediction { home: 0, away: 0 }),
        ];

        let standings = tournament_standings(&members, &predictions, &results);
        assert_eq!(ids(&standings), vec!["anna", "bruno", "carla"]);

        // m1 exact (10) + m2 1-0 vs 0-0 (away goals, under, both scored = 3)
        assert_eq!(standings[0].points, 13);
        assert_eq!(standings[0].played, 2);
        // m1 0-0 vs 2-1 misses every rule, m2 exact (10)
        assert_eq!(standings[1].points, 10);
        assert_eq!(standings[1].played, 2);

        let carla = &standings[2];
        assert_eq!((carla.points, carla.played), (0, 0));
    }

    #[test]
    fn test_tournament_skips_non_members_and_unknown_matches() {
        let members = members(&["anna"]);
        let mut results = HashMap::new();
        results.insert("m1".to_string(), RealResult::played(1, 0));

        let predictions = vec![
            PredictionRecord::new("intruder", "m1", Prediction { home: 1, away: 0 }),
            PredictionRecord::new("anna", "m9", Prediction { home: 1, away: 0 }),
        ];

        let standings = tournament_standings(&members, &predictions, &results);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].points, 0);
    }

    #[test]
    fn test_build_standings_dispatch() {
        let fixtures = vec![fixture(1, "a", "b").with_score(1, 0)];
        let championship = StandingsInput::Championship { fixtures: &fixtures };
        assert_eq!(championship.mode(), LeagueMode::Championship);
        assert_eq!(build_standings(&championship), championship_standings(&fixtures));

        let members = members(&["a"]);
        let results = HashMap::new();
        let tournament = StandingsInput::Tournament {
            members: &members,
            predictions: &[],
            results: &results,
        };
        assert_eq!(tournament.mode(), LeagueMode::Tournament);

        let batch = build_standings_batch(&[championship, tournament]);
        assert_eq!(batch.len(), 2);
        assert_eq!(ids(&batch[0]), vec!["a", "b"]);
        assert_eq!(ids(&batch[1]), vec!["a"]);
    }

    #[test]
    fn test_table_insertion_order() {
        let mut table = StandingsTable::new();
        table.entry_mut("b").points = 1;
        table.entry_mut("a");
        table.entry_mut("b").points += 1;

        let order: Vec<&str> = table.iter().map(|e| e.participant_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(table.get("b").map(|e| e.points), Some(2));
        assert!(!table.contains("c"));
    }

    #[test]
    fn test_tournament_counts_one_prediction_per_match() {
        let members = members(&["anna", "bruno"]);
        let mut results = HashMap::new();
        results.insert("m1".to_string(), RealResult::played(2, 1));
        results.insert("m2".to_string(), RealResult::played(0, 0));

        let predictions = vec![
            PredictionRecord::new("anna", "m1", Prediction { home: 0, away: 3 }),
            PredictionRecord::new("bruno", "m1", Prediction { home: 2, away: 1 }),
            PredictionRecord::new("anna", "m2", Prediction { home: 0, away: 0 }),
            // later record for anna on m1 replaces the first one
            PredictionRecord::new("anna", "m1", Prediction { home: 2, away: 1 }),
            PredictionRecord::new("bruno", "m1", Prediction { home: 2, away: 1 }),
        ];

        let standings = tournament_standings(&members, &predictions, &results);
        assert_eq!(ids(&standings), vec!["anna", "bruno"]);
        assert_eq!((standings[0].points, standings[0].played), (20, 2));
        assert_eq!((standings[1].points, standings[1].played), (10, 1));
    }

    #[test]
    fn test_record_match_saturates() {
        let mut entry = StandingEntry::new("a");
        entry.record_match(u32::MAX, 0);
        entry.record_match(5, 1);
        assert_eq!(entry.goals_for, u32::MAX);
        assert_eq!(entry.goals_against, 1);
        assert_eq!((entry.played, entry.wins, entry.points), (2, 2, 6));

        entry.points = u32::MAX - 1;
        entry.record_match(1, 1);
        assert_eq!(entry.points, u32::MAX);
        entry.record_prediction(10);
        assert_eq!(entry.points, u32::MAX);

        let fixtures = vec![fixture(1, "a", "b").with_score(u32::MAX, u32::MAX)];
        let standings = championship_standings(&fixtures);
        assert!(standings.iter().all(|e| e.draws == 1 && e.goals_for == u32::MAX));
    }

    #[test]
    fn test_championship_from_json_fixtures() {
        let json = r#"[
            {"round":1,"cycle":1,"homeId":"a","awayId":"b","homeName":"A","awayName":"B","homeGoals":2,"awayGoals":1},
            {"round":2,"cycle":1,"homeId":"b","awayId":"a","homeName":"B","awayName":"A","homeGoals":null,"awayGoals":null}
        ]"#;
        let fixtures: Vec<Fixture> = serde_json::from_str(json).unwrap();

        let standings = championship_standings(&fixtures);
        assert_eq!(ids(&standings), vec!["a", "b"]);
        assert_eq!((standings[0].played, standings[0].points), (1, 3));
        assert_eq!((standings[1].played, standings[1].losses), (1, 1));
    }

    #[test]
    fn test_virtual_goals_on_row() {
        let entry = StandingEntry { participant_id: "a".into(), points: 44, ..Default::default() };
        assert_eq!(entry.virtual_goals(), 2);
    }
}
