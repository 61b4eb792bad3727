//! Round-robin tournament over registered strategies

use crate::descriptor::StrategyDescriptor;
use crate::error::{DilemmaError, Result};
use crate::game::{run_match, MatchResult};
use crate::observer::MatchObserver;
use crate::pairing::{match_index_of, pairing_count, round_robin_pairs};
use crate::payoff::PayoffTable;

/// Registered strategies plus the payoff table they all play under
#[derive(Debug)]
pub struct Tournament {
    table: PayoffTable,
    strategies: Vec<StrategyDescriptor>,
}

impl Tournament {
    pub fn new(table: PayoffTable) -> Self {
        Self {
            table,
            strategies: Vec::new(),
        }
    }

    /// Register a strategy. Registration order fixes its schedule index.
    pub fn add_strategy(&mut self, descriptor: StrategyDescriptor) {
        log::debug!(
            "registered strategy {} as #{}",
            descriptor.label(),
            self.strategies.len()
        );
        self.strategies.push(descriptor);
    }

    pub fn strategies(&self) -> &[StrategyDescriptor] {
        &self.strategies
    }

    /// Number of matches a round robin would run right now
    pub fn match_count(&self) -> usize {
        pairing_count(self.strategies.len())
    }

    /// Play one pair: `first` in the first role, `second` in the second,
    /// both freshly instantiated.
    ///
    /// Random streams are keyed on the pair's place in the schedule, so a
    /// seeded scheduled pair replays exactly what the round robin played,
    /// however often and in whatever order it is called. A mirrored pair
    /// shares the match index of its scheduled counterpart.
    pub fn play(
        &self,
        first: usize,
        second: usize,
        rounds: u32,
        observer: &mut dyn MatchObserver,
    ) -> Result<MatchResult> {
        let registered = self.strategies.len();
        let lookup = |index: usize| {
            self.strategies.get(index).ok_or_else(|| {
                DilemmaError::InvalidArgument(format!(
                    "strategy index {} out of range ({} registered)",
                    index, registered
                ))
            })
        };
        let first_descriptor = lookup(first)?;
        let second_descriptor = lookup(second)?;
        let match_index = match_index_of(registered, first.max(second), first.min(second))
            .ok_or_else(|| {
                DilemmaError::InvariantViolation(format!(
                    "pair ({}, {}) missing from the schedule",
                    first, second
                ))
            })?;

        Ok(run_match(
            first_descriptor,
            second_descriptor,
            match_index as u64,
            rounds,
            &self.table,
            observer,
        ))
    }

    /// Run every scheduled pair in order.
    ///
    /// Fails before playing anything if fewer than two strategies are
    /// registered. Any failure aborts the rest of the schedule.
    pub fn run_round_robin(
        &self,
        iterations_per_match: u32,
        observer: &mut dyn MatchObserver,
    ) -> Result<()> {
        let registered = self.strategies.len();
        if registered < 2 {
            log::warn!("round robin refused: {} strategy(ies) registered", registered);
            return Err(DilemmaError::InsufficientParticipants { registered });
        }

        log::info!(
            "round robin: {} strategies, {} matches, {} rounds each",
            registered,
            self.match_count(),
            iterations_per_match
        );

        for (first, second) in round_robin_pairs(registered) {
            self.play(first, second, iterations_per_match, observer)?;
        }

        Ok(())
    }
}
