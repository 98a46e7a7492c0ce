use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{CompetitionCatalog, LeagueMode};
use crate::constants::{JOIN_CODE_ALPHABET, JOIN_CODE_LEN, LEAGUE_SIZES};
use crate::error::{LeagueError, Result};
use crate::fixture::Fixture;
use crate::participant::Participant;
use crate::schedule::generate_schedule;
use crate::standings::{build_standings, StandingEntry, StandingsInput};

/// What a league creator picks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueConfig {
    pub name: String,
    pub competition: String,
    pub max_participants: usize,
}

/// Settings implied by a valid config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettings {
    pub mode: LeagueMode,
    pub max_rounds: u32,
}

impl LeagueConfig {
    pub fn new(name: impl Into<String>, competition: impl Into<String>, max_participants: usize) -> Self {
        LeagueConfig {
            name: name.into(),
            competition: competition.into(),
            max_participants,
        }
    }

    /// Check the league size and resolve the competition in `catalog`.
    pub fn validate(&self, catalog: &CompetitionCatalog) -> Result<LeagueSettings> {
        if !LEAGUE_SIZES.contains(&self.max_participants) {
            return Err(LeagueError::invalid_size(self.max_participants));
        }
        let competition = catalog
            .get(&self.competition)
            .ok_or_else(|| LeagueError::UnknownCompetition(self.competition.clone()))?;

        Ok(LeagueSettings {
            mode: competition.mode,
            max_rounds: competition.rounds,
        })
    }
}

/// Draw a join code from `A-Z0-9`.
///
/// With a seed the code is reproducible, otherwise the generator is seeded
/// from entropy.
pub fn generate_join_code(seed: Option<u64>) -> String {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    (0..JOIN_CODE_LEN)
        .map(|_| JOIN_CODE_ALPHABET[rng.gen_range(0..JOIN_CODE_ALPHABET.len())] as char)
        .collect()
}

/// An in-memory league: config, resolved settings, join code and members in
/// join order. Member order is the seeding order used for the schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub config: LeagueConfig,
    pub settings: LeagueSettings,
    pub code: String,
    members: Vec<Participant>,
}

impl League {
    pub fn create(config: LeagueConfig, catalog: &CompetitionCatalog, seed: Option<u64>) -> Result<Self> {
        let settings = config.validate(catalog)?;
        let code = generate_join_code(seed);
        info!(
            league = %config.name,
            competition = %config.competition,
            mode = %settings.mode,
            code = %code,
            "league created"
        );

        Ok(League {
            config,
            settings,
            code,
            members: Vec::new(),
        })
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn mode(&self) -> LeagueMode {
        self.settings.mode
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.config.max_participants
    }

    /// Case-insensitive comparison with a code typed by a user.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    pub fn join(&mut self, participant: Participant) -> Result<()> {
        if self.members.iter().any(|m| m.id == participant.id) {
            return Err(LeagueError::DuplicateParticipant(participant.id));
        }
        if self.is_full() {
            return Err(LeagueError::LeagueFull {
                capacity: self.config.max_participants,
            });
        }

        info!(league = %self.config.name, participant = %participant.id, "participant joined");
        self.members.push(participant);
        Ok(())
    }

    /// Fixture list for championship leagues; tournament leagues have none.
    pub fn schedule(&self) -> Vec<Fixture> {
        match self.settings.mode {
            LeagueMode::Championship => generate_schedule(&self.members, self.settings.max_rounds),
            LeagueMode::Tournament => Vec::new(),
        }
    }

    pub fn standings(&self, input: &StandingsInput<'_>) -> Vec<StandingEntry> {
        if input.mode() != self.settings.mode {
            warn!(
                league = %self.config.name,
                league_mode = %self.settings.mode,
                input_mode = %input.mode(),
                "standings input does not match league mode"
            );
        }
        build_standings(input)
    }
}
