//! Tournament configuration.
//!
//! A configuration is plain JSON data: the iteration count, an optional
//! seed, an optional payoff matrix and the strategies to register. Values
//! arrive unchecked (signed counts, integer choice codes) and are
//! validated here, before anything is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::descriptor::StrategyDescriptor;
use crate::error::{DilemmaError, Result};
use crate::payoff::PayoffTable;
use crate::random::Entropy;
use crate::strategy::{Choice, Probability, Script, StrategyKind};
use crate::tournament::Tournament;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] DilemmaError),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TournamentConfig {
    /// Rounds per match.
    pub iterations: i64,

    /// Seed for probabilistic strategies. Absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Payoff matrix `[[ss, sc], [cs, cc]]`. Absent means the classic table.
    #[serde(default)]
    pub payoff: Option<Vec<Vec<(u32, u32)>>>,

    /// Strategies in registration order.
    pub strategies: Vec<StrategyEntry>,
}

/// One strategy to register
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StrategyEntry {
    pub label: String,
    #[serde(flatten)]
    pub spec: StrategySpec,
}

/// Unchecked strategy parameters, as written in the file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategySpec {
    /// Choice code: 0 = Silent, 1 = Confess
    Fixed { choice: u8 },
    OneStepRecall,
    /// Absent or null limit means the window never closes
    ForgivenessWindow {
        #[serde(default)]
        limit: Option<i64>,
    },
    Probabilistic { confess_probability: f64 },
    /// Choice codes, replayed cyclically
    Scripted { script: Vec<u8> },
}

impl StrategySpec {
    /// Validate into a strategy kind
    pub fn to_kind(&self) -> Result<StrategyKind> {
        Ok(match self {
            StrategySpec::Fixed { choice } => StrategyKind::Fixed {
                choice: Choice::try_from(*choice)?,
            },
            StrategySpec::OneStepRecall => StrategyKind::OneStepRecall,
            StrategySpec::ForgivenessWindow { limit } => StrategyKind::ForgivenessWindow {
                limit: limit.map(|l| non_negative("forgiveness limit", l)).transpose()?,
            },
            StrategySpec::Probabilistic {
                confess_probability,
            } => StrategyKind::Probabilistic {
                confess_probability: Probability::new(*confess_probability)?,
            },
            StrategySpec::Scripted { script } => StrategyKind::Scripted {
                script: Script::from_codes(script)?,
            },
        })
    }
}

impl TournamentConfig {
    /// Three-strategy demonstration: tit-for-tat, the plain always-confess
    /// strategy and mutually assured destruction, ten rounds per match on
    /// the classic table.
    pub fn classic() -> Self {
        Self {
            iterations: 10,
            seed: None,
            payoff: None,
            strategies: vec![
                StrategyEntry {
                    label: "TitForTat".to_string(),
                    spec: StrategySpec::OneStepRecall,
                },
                StrategyEntry {
                    label: "Plain".to_string(),
                    spec: StrategySpec::Fixed { choice: 1 },
                },
                StrategyEntry {
                    label: "MutuallyAssuredDestruction".to_string(),
                    spec: StrategySpec::ForgivenessWindow { limit: None },
                },
            ],
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rounds per match, checked to be non-negative
    pub fn iterations(&self) -> Result<u32> {
        non_negative("iteration count", self.iterations)
    }

    pub fn entropy(&self) -> Entropy {
        self.seed.map_or(Entropy::System, Entropy::Seeded)
    }

    pub fn payoff_table(&self) -> Result<PayoffTable> {
        match &self.payoff {
            Some(rows) => PayoffTable::from_matrix(rows),
            None => Ok(PayoffTable::classic()),
        }
    }

    /// Validate everything and register the strategies, in order.
    ///
    /// Nothing is played here, so every configuration error surfaces
    /// before the first match.
    pub fn build_tournament(&self) -> Result<Tournament> {
        self.iterations()?;
        let mut tournament = Tournament::new(self.payoff_table()?);
        let entropy = self.entropy();

        for (index, entry) in self.strategies.iter().enumerate() {
            let kind = entry.spec.to_kind()?;
            tournament.add_strategy(StrategyDescriptor::from_kind(
                entry.label.clone(),
                kind,
                entropy.derive(index as u64),
            ));
        }

        Ok(tournament)
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self::classic()
    }
}

fn non_negative(what: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        DilemmaError::InvalidArgument(format!(
            "{} must be between 0 and {}, got {}",
            what,
            u32::MAX,
            value
        ))
    })
}
