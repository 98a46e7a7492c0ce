use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{LeagueError, Result};

/// How a league turns real football into standings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueMode {
    /// Members play simulated head-to-head fixtures against each other.
    Championship,
    /// Members collect prediction points in a single table.
    Tournament,
}

impl FromStr for LeagueMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "championship" | "campionato" => Ok(LeagueMode::Championship),
            "tournament" | "torneo" => Ok(LeagueMode::Tournament),
            other => Err(format!("unknown league mode '{}'", other)),
        }
    }
}

impl fmt::Display for LeagueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeagueMode::Championship => write!(f, "championship"),
            LeagueMode::Tournament => write!(f, "tournament"),
        }
    }
}

/// A real competition a league can follow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub name: String,
    pub mode: LeagueMode,
    /// Number of matchdays available to schedule.
    pub rounds: u32,
}

impl Competition {
    pub fn new(name: impl Into<String>, mode: LeagueMode, rounds: u32) -> Self {
        Competition {
            name: name.into(),
            mode,
            rounds,
        }
    }
}

/// Lookup table from competition name to league mode and round count.
///
/// Names are matched case-insensitively; adding a competition that already
/// exists replaces it in place.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompetitionCatalog {
    competitions: Vec<Competition>,
}

impl Default for CompetitionCatalog {
    fn default() -> Self {
        CompetitionCatalog::builtin()
    }
}

impl CompetitionCatalog {
    pub fn empty() -> Self {
        CompetitionCatalog {
            competitions: Vec::new(),
        }
    }

    /// The competitions offered out of the box.
    pub fn builtin() -> Self {
        use LeagueMode::{Championship, Tournament};

        let mut catalog = CompetitionCatalog::empty();
        for (name, mode, rounds) in [
            ("Serie A", Championship, 38),
            ("Premier League", Championship, 38),
            ("Bundesliga", Championship, 34),
            ("La Liga", Championship, 38),
            ("Ligue 1", Championship, 34),
            ("Champions League", Tournament, 8),
            ("Europa League", Tournament, 8),
            ("Mondiali", Tournament, 8),
            ("Europei", Tournament, 7),
        ] {
            catalog.add_competition(Competition::new(name, mode, rounds));
        }
        catalog
    }

    /// Parse a JSON array of competitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let competitions: Vec<Competition> = serde_json::from_str(json)?;
        let mut catalog = CompetitionCatalog::empty();
        for competition in competitions {
            catalog.add_competition(competition);
        }
        Ok(catalog)
    }

    /// Read competitions from a CSV file and merge them into the catalog.
    /// Format: name,mode,rounds
    pub fn read_from_file(&mut self, filepath: impl AsRef<Path>) -> Result<()> {
        let file = File::open(filepath.as_ref())?;
        let reader = BufReader::new(file);

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() != 3 {
                continue;
            }

            let name = parts[0].trim();
            let mode: LeagueMode = parts[1].parse().map_err(|reason| LeagueError::CatalogParse {
                line: number + 1,
                reason,
            })?;
            let rounds: u32 = parts[2].trim().parse().map_err(|e| LeagueError::CatalogParse {
                line: number + 1,
                reason: format!("invalid round count: {}", e),
            })?;

            self.add_competition(Competition::new(name, mode, rounds));
        }

        debug!(competitions = self.competitions.len(), "catalog loaded");
        Ok(())
    }

    /// Add or replace a competition.
    pub fn add_competition(&mut self, competition: Competition) {
        match self.position(&competition.name) {
            Some(i) => self.competitions[i] = competition,
            None => self.competitions.push(competition),
        }
    }

    pub fn remove_competition(&mut self, name: &str) -> Option<Competition> {
        self.position(name).map(|i| self.competitions.remove(i))
    }

    pub fn get(&self, name: &str) -> Option<&Competition> {
        self.position(name).map(|i| &self.competitions[i])
    }

    /// Round horizon to hand to the schedule generator.
    pub fn max_rounds(&self, name: &str) -> Option<u32> {
        self.get(name).map(|c| c.rounds)
    }

    pub fn mode(&self, name: &str) -> Option<LeagueMode> {
        self.get(name).map(|c| c.mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Competition> {
        self.competitions.iter()
    }

    pub fn len(&self) -> usize {
        self.competitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.competitions
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}
