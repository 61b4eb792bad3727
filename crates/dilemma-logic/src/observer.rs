//! Match observers
//!
//! The engine never prints. Banners, per-round penalties and anything
//! else a caller wants to see go through a [`MatchObserver`].

use crate::game::{MatchLabel, MatchResult, RoundOutcome};

/// Side channel for match progress. Every hook defaults to a no-op.
pub trait MatchObserver {
    fn match_started(&mut self, _label: &MatchLabel, _rounds: u32) {}

    fn round_played(&mut self, _label: &MatchLabel, _outcome: &RoundOutcome) {}

    fn match_finished(&mut self, _label: &MatchLabel, _result: &MatchResult) {}
}

/// Any `(label, outcome)` closure is a per-round observer
impl<F> MatchObserver for F
where
    F: FnMut(&MatchLabel, &RoundOutcome),
{
    fn round_played(&mut self, label: &MatchLabel, outcome: &RoundOutcome) {
        self(label, outcome)
    }
}

/// Observer that ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct Quiet;

impl MatchObserver for Quiet {}

/// Reports through the `log` facade: a banner per match at info level,
/// the penalty pair of every round at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl MatchObserver for LogObserver {
    fn match_started(&mut self, label: &MatchLabel, rounds: u32) {
        log::info!("---- {} ({} rounds) ----", label, rounds);
    }

    fn round_played(&mut self, label: &MatchLabel, outcome: &RoundOutcome) {
        log::debug!(
            "{} round {}: {:?}/{:?} -> ({}, {})",
            label,
            outcome.round,
            outcome.first_choice,
            outcome.second_choice,
            outcome.first_penalty,
            outcome.second_penalty,
        );
    }

    fn match_finished(&mut self, label: &MatchLabel, result: &MatchResult) {
        log::info!(
            "{:<32}{:>8}{:>8}",
            label.to_string(),
            result.total_first,
            result.total_second
        );
    }
}
