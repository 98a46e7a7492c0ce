use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

use crate::catalog::CompetitionCatalog;
use crate::constants::{LEAGUE_SIZES, MAX_PREDICTED_GOALS, MAX_PREDICTION_SCORE};
use crate::error::LeagueError;
use crate::fixture::Fixture;
use crate::participant::Participant;
use crate::scoring::{Prediction, RealResult};
use crate::standings::{PredictionRecord, StandingEntry};

impl From<LeagueError> for PyErr {
    fn from(err: LeagueError) -> PyErr {
        match err {
            LeagueError::Io(e) => PyIOError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

#[pymethods]
impl Participant {
    #[new]
    fn py_new(id: String, display_name: String) -> Self {
        Participant::new(id, display_name)
    }

    #[getter]
    fn id(&self) -> &str {
        &self.id
    }

    #[getter]
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn __repr__(&self) -> String {
        format!("Participant({:?}, {:?})", self.id, self.display_name)
    }
}

#[pymethods]
impl Fixture {
    #[getter]
    fn round(&self) -> u32 {
        self.round
    }

    #[getter]
    fn cycle(&self) -> u32 {
        self.cycle
    }

    #[getter]
    fn home_id(&self) -> &str {
        &self.home_id
    }

    #[getter]
    fn away_id(&self) -> &str {
        &self.away_id
    }

    #[getter]
    fn home_name(&self) -> &str {
        &self.home_name
    }

    #[getter]
    fn away_name(&self) -> &str {
        &self.away_name
    }

    #[getter]
    fn home_goals(&self) -> Option<u32> {
        self.score.map(|s| s.home)
    }

    #[getter]
    fn away_goals(&self) -> Option<u32> {
        self.score.map(|s| s.away)
    }

    #[getter(played)]
    fn py_played(&self) -> bool {
        self.is_played()
    }

    #[pyo3(name = "with_score")]
    fn py_with_score(&self, home_goals: u32, away_goals: u32) -> Self {
        self.with_score(home_goals, away_goals)
    }

    fn __repr__(&self) -> String {
        let score = self.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        format!(
            "Fixture(round={}, cycle={}, {} vs {}, {})",
            self.round, self.cycle, self.home_id, self.away_id, score
        )
    }
}

#[pymethods]
impl Prediction {
    #[new]
    fn py_new(home: u32, away: u32) -> PyResult<Self> {
        Ok(Prediction::new(home, away)?)
    }

    #[getter]
    fn home(&self) -> u32 {
        self.home
    }

    #[getter]
    fn away(&self) -> u32 {
        self.away
    }

    fn __repr__(&self) -> String {
        format!("Prediction({}, {})", self.home, self.away)
    }
}

#[pymethods]
impl RealResult {
    #[new]
    #[pyo3(signature = (home_goals = None, away_goals = None))]
    fn py_new(home_goals: Option<u32>, away_goals: Option<u32>) -> Self {
        RealResult {
            home_goals,
            away_goals,
        }
    }

    #[getter]
    fn home_goals(&self) -> Option<u32> {
        self.home_goals
    }

    #[getter]
    fn away_goals(&self) -> Option<u32> {
        self.away_goals
    }

    fn __repr__(&self) -> String {
        format!("RealResult({:?}, {:?})", self.home_goals, self.away_goals)
    }
}

#[pymethods]
impl StandingEntry {
    #[getter]
    fn participant_id(&self) -> &str {
        &self.participant_id
    }

    #[getter]
    fn played(&self) -> u32 {
        self.played
    }

    #[getter]
    fn wins(&self) -> u32 {
        self.wins
    }

    #[getter]
    fn draws(&self) -> u32 {
        self.draws
    }

    #[getter]
    fn losses(&self) -> u32 {
        self.losses
    }

    #[getter]
    fn goals_for(&self) -> u32 {
        self.goals_for
    }

    #[getter]
    fn goals_against(&self) -> u32 {
        self.goals_against
    }

    #[getter]
    fn points(&self) -> u32 {
        self.points
    }

    #[getter(goal_difference)]
    fn py_goal_difference(&self) -> i64 {
        self.goal_difference()
    }

    #[getter(virtual_goals)]
    fn py_virtual_goals(&self) -> u32 {
        self.virtual_goals()
    }

    fn __repr__(&self) -> String {
        format!(
            "StandingEntry({}, pts={}, W{} D{} L{}, {}:{})",
            self.participant_id,
            self.points,
            self.wins,
            self.draws,
            self.losses,
            self.goals_for,
            self.goals_against
        )
    }
}

#[pymethods]
impl CompetitionCatalog {
    #[new]
    fn py_new() -> Self {
        CompetitionCatalog::builtin()
    }

    #[pyo3(name = "read_from_file")]
    fn py_read_from_file(&mut self, filepath: &str) -> PyResult<()> {
        Ok(self.read_from_file(filepath)?)
    }

    #[pyo3(name = "max_rounds")]
    fn py_max_rounds(&self, name: &str) -> Option<u32> {
        self.max_rounds(name)
    }

    #[pyo3(name = "mode")]
    fn py_mode(&self, name: &str) -> Option<String> {
        self.mode(name).map(|m| m.to_string())
    }

    fn names(&self) -> Vec<String> {
        self.iter().map(|c| c.name.clone()).collect()
    }

    fn __len__(&self) -> usize {
        self.len()
    }

    fn __repr__(&self) -> String {
        format!("CompetitionCatalog({} competitions)", self.len())
    }
}

#[pyfunction]
#[pyo3(name = "generate_schedule")]
fn py_generate_schedule(participants: Vec<Participant>, max_rounds: u32) -> Vec<Fixture> {
    crate::schedule::generate_schedule(&participants, max_rounds)
}

#[pyfunction]
#[pyo3(name = "score_prediction", signature = (prediction, result))]
fn py_score_prediction(prediction: Option<Prediction>, result: RealResult) -> Option<u32> {
    crate::scoring::score_prediction(prediction.as_ref(), &result)
}

#[pyfunction]
#[pyo3(name = "points_to_virtual_goals")]
fn py_points_to_virtual_goals(points: i64) -> u32 {
    crate::goals::points_to_virtual_goals(points)
}

#[pyfunction]
#[pyo3(name = "championship_standings")]
fn py_championship_standings(fixtures: Vec<Fixture>) -> Vec<StandingEntry> {
    crate::standings::championship_standings(&fixtures)
}

/// `predictions` are (participant_id, match_id, Prediction) tuples.
#[pyfunction]
#[pyo3(name = "tournament_standings")]
fn py_tournament_standings(
    members: Vec<Participant>,
    predictions: Vec<(String, String, Prediction)>,
    results: HashMap<String, RealResult>,
) -> Vec<StandingEntry> {
    let records: Vec<PredictionRecord> = predictions
        .into_iter()
        .map(|(participant_id, match_id, prediction)| PredictionRecord::new(participant_id, match_id, prediction))
        .collect();
    crate::standings::tournament_standings(&members, &records, &results)
}

#[pyfunction]
#[pyo3(name = "generate_join_code", signature = (seed = None))]
fn py_generate_join_code(seed: Option<u64>) -> String {
    crate::league::generate_join_code(seed)
}

/// Python module definition
#[pymodule]
fn fantabet_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // A host that already installed a subscriber keeps it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    // Classes
    m.add_class::<Participant>()?;
    m.add_class::<Fixture>()?;
    m.add_class::<Prediction>()?;
    m.add_class::<RealResult>()?;
    m.add_class::<StandingEntry>()?;
    m.add_class::<CompetitionCatalog>()?;

    // Functions
    m.add_function(wrap_pyfunction!(py_generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_score_prediction, m)?)?;
    m.add_function(wrap_pyfunction!(py_points_to_virtual_goals, m)?)?;
    m.add_function(wrap_pyfunction!(py_championship_standings, m)?)?;
    m.add_function(wrap_pyfunction!(py_tournament_standings, m)?)?;
    m.add_function(wrap_pyfunction!(py_generate_join_code, m)?)?;

    // Constants
    m.add("MAX_PREDICTION_SCORE", MAX_PREDICTION_SCORE)?;
    m.add("MAX_PREDICTED_GOALS", MAX_PREDICTED_GOALS)?;
    m.add("LEAGUE_SIZES", LEAGUE_SIZES.to_vec())?;

    Ok(())
}
