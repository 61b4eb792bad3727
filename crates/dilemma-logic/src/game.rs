//! Match execution engine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::StrategyDescriptor;
use crate::observer::MatchObserver;
use crate::payoff::{PayoffTable, PenaltyPair};
use crate::strategy::{Choice, Strategy};

/// Which two strategies a match is between, first role first
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchLabel {
    pub first: String,
    pub second: String,
}

impl MatchLabel {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

/// Result of a single round, seen from the first role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub first_choice: Choice,
    pub second_choice: Choice,
    pub first_penalty: u32,
    pub second_penalty: u32,
}

impl RoundOutcome {
    pub fn new(
        round: u32,
        first_choice: Choice,
        second_choice: Choice,
        penalty: PenaltyPair,
    ) -> Self {
        Self {
            round,
            first_choice,
            second_choice,
            first_penalty: penalty.first(),
            second_penalty: penalty.second(),
        }
    }

    pub fn penalty(&self) -> PenaltyPair {
        PenaltyPair::new(self.first_penalty, self.second_penalty)
    }
}

/// Result of a complete match. Totals cover this match only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub label: MatchLabel,
    pub rounds: Vec<RoundOutcome>,
    pub total_first: u64,
    pub total_second: u64,
}

impl MatchResult {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

/// Run a complete match between fresh instances of two descriptors
///
/// # Arguments
/// * `first` - Strategy in the first role (row of the payoff table)
/// * `second` - Strategy in the second role
/// * `match_index` - Position of this match in the schedule; with the
///   role it selects each instance's random stream
/// * `rounds` - Number of rounds to play
/// * `table` - Payoff table resolving every round
/// * `observer` - Receives the banner, every round and the totals
pub fn run_match(
    first: &StrategyDescriptor,
    second: &StrategyDescriptor,
    match_index: u64,
    rounds: u32,
    table: &PayoffTable,
    observer: &mut dyn MatchObserver,
) -> MatchResult {
    let label = MatchLabel::new(first.label(), second.label());
    let mut player_first = first.instantiate(role_stream(match_index, 0));
    let mut player_second = second.instantiate(role_stream(match_index, 1));

    play_rounds(
        label,
        player_first.as_mut(),
        player_second.as_mut(),
        rounds,
        table,
        observer,
    )
}

/// Run a match between instances the caller already holds.
///
/// Both are refreshed first, so an instance replayed across matches
/// starts each one from its initial condition. Passing the same
/// instance for both roles is ruled out by the borrow checker.
pub fn run_match_with(
    label: MatchLabel,
    first: &mut dyn Strategy,
    second: &mut dyn Strategy,
    rounds: u32,
    table: &PayoffTable,
    observer: &mut dyn MatchObserver,
) -> MatchResult {
    first.refresh();
    second.refresh();
    play_rounds(label, first, second, rounds, table, observer)
}

/// Random stream for one role of one match
fn role_stream(match_index: u64, role: u64) -> u64 {
    match_index.wrapping_mul(2).wrapping_add(role)
}

fn play_rounds(
    label: MatchLabel,
    first: &mut dyn Strategy,
    second: &mut dyn Strategy,
    rounds: u32,
    table: &PayoffTable,
    observer: &mut dyn MatchObserver,
) -> MatchResult {
    observer.match_started(&label, rounds);

    let mut outcomes: Vec<RoundOutcome> = Vec::with_capacity(rounds as usize);
    let mut total_first = 0u64;
    let mut total_second = 0u64;

    for round in 0..rounds {
        // Both choose before either learns anything about this round
        let choice_first = first.choose();
        let choice_second = second.choose();

        let penalty = table.penalty(choice_first, choice_second);
        total_first += penalty.first() as u64;
        total_second += penalty.second() as u64;

        first.remember(choice_first, choice_second);
        second.remember(choice_second, choice_first);

        let outcome = RoundOutcome::new(round, choice_first, choice_second, penalty);
        observer.round_played(&label, &outcome);
        outcomes.push(outcome);
    }

    let result = MatchResult {
        label,
        rounds: outcomes,
        total_first,
        total_second,
    };
    observer.match_finished(&result.label, &result);
    result
}
