//! Dilemma Logic for the Iterated Dilemma Arena
//!
//! Core engine for the iterated two-party dilemma: strategies, the
//! round loop and the round-robin schedule.
//! This crate is compiled to:
//! - Native (for the command-line arena)
//! - WASM (for frontend match replay)

mod config;
mod descriptor;
mod error;
mod game;
mod observer;
mod pairing;
mod payoff;
mod random;
mod strategy;
mod tournament;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{ConfigError, StrategyEntry, StrategySpec, TournamentConfig};
pub use descriptor::StrategyDescriptor;
pub use error::{DilemmaError, Result};
pub use game::{run_match, run_match_with, MatchLabel, MatchResult, RoundOutcome};
pub use observer::{LogObserver, MatchObserver, Quiet};
pub use pairing::{match_index_of, pairing_count, pairing_for_match, round_robin_pairs};
pub use payoff::{PayoffTable, PenaltyPair};
pub use random::{Entropy, RandomSource};
pub use strategy::{
    Choice, Fixed, ForgivenessWindow, OneStepRecall, Probabilistic, Probability, Script, Scripted,
    Strategy, StrategyKind,
};
pub use tournament::Tournament;
