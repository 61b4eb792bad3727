//! Strategy definitions and execution

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};
use crate::random::{Entropy, RandomSource};

/// A choice in the dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Keep quiet (code 0)
    Silent,
    /// Confess, i.e. defect on the other party (code 1)
    Confess,
}

impl Choice {
    pub const ALL: [Choice; 2] = [Choice::Silent, Choice::Confess];

    /// Row/column index in a payoff table
    pub fn index(self) -> usize {
        self.code() as usize
    }

    /// Integer code used at the external boundary
    pub fn code(self) -> u8 {
        match self {
            Choice::Silent => 0,
            Choice::Confess => 1,
        }
    }
}

impl TryFrom<u8> for Choice {
    type Error = DilemmaError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Choice::Silent),
            1 => Ok(Choice::Confess),
            other => Err(DilemmaError::InvariantViolation(format!(
                "choice code {} is neither 0 (Silent) nor 1 (Confess)",
                other
            ))),
        }
    }
}

/// Stateful decision-maker for one side of a match.
///
/// The match loop calls `choose` on both sides, resolves the round, then
/// calls `remember` exactly once on both sides before the next `choose`.
pub trait Strategy {
    /// Pick this round's choice. Must not alter memory; a probabilistic
    /// strategy only advances its random source.
    fn choose(&mut self) -> Choice;

    /// Update memory once the round is resolved
    fn remember(&mut self, mine: Choice, opponent: Choice);

    /// Return to the initial condition
    fn refresh(&mut self);
}

/// Always plays the same choice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixed {
    choice: Choice,
}

impl Fixed {
    pub fn new(choice: Choice) -> Self {
        Self { choice }
    }
}

impl Strategy for Fixed {
    fn choose(&mut self) -> Choice {
        self.choice
    }

    fn remember(&mut self, _mine: Choice, _opponent: Choice) {}

    fn refresh(&mut self) {}
}

/// Tit-for-tat: echo the opponent's last choice, start silent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneStepRecall {
    last_opponent: Choice,
}

impl OneStepRecall {
    pub fn new() -> Self {
        Self {
            last_opponent: Choice::Silent,
        }
    }
}

impl Default for OneStepRecall {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for OneStepRecall {
    fn choose(&mut self) -> Choice {
        self.last_opponent
    }

    fn remember(&mut self, _mine: Choice, opponent: Choice) {
        self.last_opponent = opponent;
    }

    fn refresh(&mut self) {
        self.last_opponent = Choice::Silent;
    }
}

/// Retaliate for `limit` rounds after each opponent confession.
///
/// A confession re-arms the countdown to `limit`; any other round
/// decrements it, floored at zero. `limit = None` never counts down,
/// which is grim trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForgivenessWindow {
    limit: Option<u32>,
    countdown: u32,
}

impl ForgivenessWindow {
    pub fn new(limit: Option<u32>) -> Self {
        Self { limit, countdown: 0 }
    }

    /// Permanent retaliation after the first opponent confession
    pub fn grim_trigger() -> Self {
        Self::new(None)
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }
}

impl Strategy for ForgivenessWindow {
    fn choose(&mut self) -> Choice {
        if self.countdown > 0 {
            Choice::Confess
        } else {
            Choice::Silent
        }
    }

    fn remember(&mut self, _mine: Choice, opponent: Choice) {
        match (opponent, self.limit) {
            (Choice::Confess, Some(limit)) => self.countdown = limit,
            (Choice::Confess, None) => self.countdown = u32::MAX,
            (Choice::Silent, Some(_)) => self.countdown = self.countdown.saturating_sub(1),
            (Choice::Silent, None) => {}
        }
    }

    fn refresh(&mut self) {
        self.countdown = 0;
    }
}

/// Probability in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    pub fn new(p: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&p) {
            Ok(Self(p))
        } else {
            Err(DilemmaError::InvalidArgument(format!(
                "probability {} is outside [0, 1]",
                p
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = DilemmaError;

    fn try_from(p: f64) -> Result<Self> {
        Self::new(p)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.0
    }
}

/// Confess with a fixed probability, one independent draw per round
pub struct Probabilistic {
    confess: Probability,
    rng: RandomSource,
}

impl Probabilistic {
    pub fn new(confess: Probability, rng: RandomSource) -> Self {
        Self { confess, rng }
    }
}

impl Strategy for Probabilistic {
    fn choose(&mut self) -> Choice {
        if self.rng.random_bool(self.confess.value()) {
            Choice::Confess
        } else {
            Choice::Silent
        }
    }

    fn remember(&mut self, _mine: Choice, _opponent: Choice) {}

    fn refresh(&mut self) {}
}

/// Non-empty sequence of choices
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Choice>", into = "Vec<Choice>")]
pub struct Script(Vec<Choice>);

impl Script {
    pub fn new(choices: Vec<Choice>) -> Result<Self> {
        if choices.is_empty() {
            return Err(DilemmaError::InvalidArgument(
                "script needs at least one choice".to_string(),
            ));
        }
        Ok(Self(choices))
    }

    /// Decode integer choice codes
    pub fn from_codes(codes: &[u8]) -> Result<Self> {
        let choices = codes
            .iter()
            .map(|&code| Choice::try_from(code))
            .collect::<Result<Vec<_>>>()?;
        Self::new(choices)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Choice for a 0-indexed round, wrapping around at the end
    pub fn at(&self, round: usize) -> Choice {
        self.0[round % self.0.len()]
    }
}

impl TryFrom<Vec<Choice>> for Script {
    type Error = DilemmaError;

    fn try_from(choices: Vec<Choice>) -> Result<Self> {
        Self::new(choices)
    }
}

impl From<Script> for Vec<Choice> {
    fn from(script: Script) -> Vec<Choice> {
        script.0
    }
}

/// Play a fixed script of choices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scripted {
    script: Script,
    cursor: usize,
}

impl Scripted {
    pub fn new(script: Script) -> Self {
        Self { script, cursor: 0 }
    }
}

impl Strategy for Scripted {
    fn choose(&mut self) -> Choice {
        self.script.at(self.cursor)
    }

    fn remember(&mut self, _mine: Choice, _opponent: Choice) {
        self.cursor += 1;
    }

    fn refresh(&mut self) {
        self.cursor = 0;
    }
}

/// Strategy kind together with its configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    Fixed { choice: Choice },
    OneStepRecall,
    ForgivenessWindow { limit: Option<u32> },
    Probabilistic { confess_probability: Probability },
    Scripted { script: Script },
}

impl StrategyKind {
    /// The plain strategy: confess every round
    pub fn always_confess() -> Self {
        StrategyKind::Fixed {
            choice: Choice::Confess,
        }
    }

    /// Grim trigger, a.k.a. mutually assured destruction
    pub fn grim_trigger() -> Self {
        StrategyKind::ForgivenessWindow { limit: None }
    }

    /// Build a fresh instance. `stream` selects the random stream for
    /// kinds that draw; deterministic kinds ignore both arguments.
    pub fn build(&self, entropy: &Entropy, stream: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Fixed { choice } => Box::new(Fixed::new(*choice)),
            StrategyKind::OneStepRecall => Box::new(OneStepRecall::new()),
            StrategyKind::ForgivenessWindow { limit } => Box::new(ForgivenessWindow::new(*limit)),
            StrategyKind::Probabilistic { confess_probability } => Box::new(Probabilistic::new(
                *confess_probability,
                entropy.source(stream),
            )),
            StrategyKind::Scripted { script } => Box::new(Scripted::new(script.clone())),
        }
    }

    /// Human-readable description of a strategy kind
    pub fn describe(&self) -> String {
        match self {
            StrategyKind::Fixed { choice } => format!("Always plays {:?}.", choice),
            StrategyKind::OneStepRecall => {
                "Echoes the opponent's last choice. Starts silent.".to_string()
            }
            StrategyKind::ForgivenessWindow { limit: None } => {
                "Stays silent until the opponent confesses, then confesses forever.".to_string()
            }
            StrategyKind::ForgivenessWindow { limit: Some(limit) } => format!(
                "Confesses for {} round(s) after each opponent confession.",
                limit
            ),
            StrategyKind::Probabilistic { confess_probability } => format!(
                "Confesses with probability {}.",
                confess_probability.value()
            ),
            StrategyKind::Scripted { script } => {
                format!("Replays a script of {} choice(s).", script.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Choice::{Confess, Silent};

    /// Own choices over `rounds` rounds against a scripted opponent
    fn play_against(
        strategy: &mut dyn Strategy,
        opponent: &[Choice],
        rounds: usize,
    ) -> Vec<Choice> {
        let mut own = Vec::with_capacity(rounds);
        for round in 0..rounds {
            let mine = strategy.choose();
            own.push(mine);
            if let Some(&theirs) = opponent.get(round) {
                strategy.remember(mine, theirs);
            }
        }
        own
    }

    #[test]
    fn test_choice_codes() {
        assert_eq!(Choice::try_from(0).unwrap(), Silent);
        assert_eq!(Choice::try_from(1).unwrap(), Confess);
        assert_eq!(Silent.code(), 0);
        assert_eq!(Confess.code(), 1);
    }

    #[test]
    fn test_invalid_choice_code() {
        let err = Choice::try_from(2).unwrap_err();
        assert!(matches!(err, DilemmaError::InvariantViolation(_)));
    }

    #[test]
    fn test_fixed() {
        let mut confessor = Fixed::new(Confess);
        assert_eq!(play_against(&mut confessor, &[Silent; 10], 10), vec![Confess; 10]);

        let mut quiet = Fixed::new(Silent);
        assert_eq!(play_against(&mut quiet, &[Confess; 10], 10), vec![Silent; 10]);
    }

    #[test]
    fn test_one_step_recall_echoes() {
        let mut tft = OneStepRecall::new();
        let own = play_against(&mut tft, &[Confess, Silent, Confess], 4);
        assert_eq!(own, vec![Silent, Confess, Silent, Confess]);
    }

    #[test]
    fn test_one_step_recall_refresh() {
        let mut tft = OneStepRecall::new();
        tft.remember(Silent, Confess);
        assert_eq!(tft.choose(), Confess);

        tft.refresh();
        assert_eq!(tft, OneStepRecall::new());
        assert_eq!(tft.choose(), Silent);
    }

    #[test]
    fn test_choose_does_not_change_memory() {
        let mut tft = OneStepRecall::new();
        tft.remember(Silent, Confess);
        for _ in 0..5 {
            assert_eq!(tft.choose(), Confess);
        }

        let mut window = ForgivenessWindow::new(Some(3));
        window.remember(Silent, Confess);
        for _ in 0..5 {
            assert_eq!(window.choose(), Confess);
        }
        assert_eq!(window.countdown(), 3);
    }

    #[test]
    fn test_forgiveness_window() {
        let mut window = ForgivenessWindow::new(Some(2));
        let own = play_against(&mut window, &[Silent, Confess, Silent, Silent, Silent], 5);
        assert_eq!(own, vec![Silent, Silent, Confess, Confess, Silent]);
    }

    #[test]
    fn test_forgiveness_window_rearms() {
        let mut window = ForgivenessWindow::new(Some(2));
        let own = play_against(&mut window, &[Confess, Silent, Confess, Silent, Silent], 6);
        assert_eq!(own, vec![Silent, Confess, Confess, Confess, Confess, Silent]);
    }

    #[test]
    fn test_window_of_one_matches_recall() {
        let opponent = [Confess, Silent, Silent, Confess, Confess, Silent, Confess];
        let mut window = ForgivenessWindow::new(Some(1));
        let mut tft = OneStepRecall::new();
        assert_eq!(
            play_against(&mut window, &opponent, 8),
            play_against(&mut tft, &opponent, 8)
        );
    }

    #[test]
    fn test_window_of_zero_never_retaliates() {
        let mut window = ForgivenessWindow::new(Some(0));
        assert_eq!(play_against(&mut window, &[Confess; 6], 6), vec![Silent; 6]);
    }

    #[test]
    fn test_grim_trigger() {
        let mut grim = ForgivenessWindow::grim_trigger();
        let mut opponent = vec![Silent, Silent, Confess];
        opponent.extend(std::iter::repeat(Silent).take(50));

        let own = play_against(&mut grim, &opponent, opponent.len());
        assert!(own[..3].iter().all(|c| *c == Silent));
        assert!(own[3..].iter().all(|c| *c == Confess));

        grim.refresh();
        assert_eq!(grim.choose(), Silent);
    }

    #[test]
    fn test_probability_bounds() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(1.0).is_ok());
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Probability::new(bad),
                Err(DilemmaError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_probabilistic_degenerate_bounds() {
        let mut always =
            Probabilistic::new(Probability::new(1.0).unwrap(), Entropy::Seeded(7).source(0));
        let mut never =
            Probabilistic::new(Probability::new(0.0).unwrap(), Entropy::Seeded(7).source(1));

        for _ in 0..1000 {
            assert_eq!(always.choose(), Confess);
            assert_eq!(never.choose(), Silent);
        }
    }

    #[test]
    fn test_probabilistic_statistical() {
        let mut coin =
            Probabilistic::new(Probability::new(0.3).unwrap(), Entropy::Seeded(42).source(0));
        let confessions = (0..10_000).filter(|_| coin.choose() == Confess).count();
        assert!(confessions > 2_500 && confessions < 3_500, "got {}", confessions);
    }

    #[test]
    fn test_probabilistic_seeded_is_reproducible() {
        let p = Probability::new(0.5).unwrap();
        let mut a = Probabilistic::new(p, Entropy::Seeded(9).source(3));
        let mut b = Probabilistic::new(p, Entropy::Seeded(9).source(3));
        let seq_a: Vec<_> = (0..64).map(|_| a.choose()).collect();
        let seq_b: Vec<_> = (0..64).map(|_| b.choose()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut script = Scripted::new(Script::from_codes(&[0, 1, 1]).unwrap());
        let own = play_against(&mut script, &[Silent; 7], 7);
        assert_eq!(own, vec![Silent, Confess, Confess, Silent, Confess, Confess, Silent]);

        script.refresh();
        assert_eq!(script.choose(), Silent);
    }

    #[test]
    fn test_scripted_rejects_bad_code() {
        assert!(matches!(
            Script::from_codes(&[0, 3]),
            Err(DilemmaError::InvariantViolation(_))
        ));
        assert!(matches!(
            Script::from_codes(&[]),
            Err(DilemmaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_kind_build_and_describe() {
        let entropy = Entropy::Seeded(1);
        let mut plain = StrategyKind::always_confess().build(&entropy, 0);
        assert_eq!(plain.choose(), Confess);

        let mut grim = StrategyKind::grim_trigger().build(&entropy, 0);
        assert_eq!(grim.choose(), Silent);
        grim.remember(Silent, Confess);
        assert_eq!(grim.choose(), Confess);

        assert!(StrategyKind::OneStepRecall.describe().contains("last choice"));
        assert!(StrategyKind::grim_trigger().describe().contains("forever"));
    }

    #[test]
    fn test_empty_script_rejected_in_json() {
        let kind = serde_json::from_str::<StrategyKind>(r#"{"kind": "scripted", "script": []}"#);
        assert!(kind.is_err());
    }

    #[test]
    fn test_kind_json() {
        let json = r#"{"kind": "probabilistic", "confess_probability": 0.25}"#;
        let kind: StrategyKind = serde_json::from_str(json).unwrap();
        assert_eq!(
            kind,
            StrategyKind::Probabilistic {
                confess_probability: Probability::new(0.25).unwrap()
            }
        );

        let bad = serde_json::from_str::<StrategyKind>(
            r#"{"kind": "probabilistic", "confess_probability": 1.25}"#,
        );
        assert!(bad.is_err());
    }

    mod window_properties {
        use super::play_against;
        use crate::strategy::{Choice, ForgivenessWindow};
        use proptest::prelude::*;
        use Choice::{Confess, Silent};

        proptest! {
            #[test]
            fn prop_window_confesses_within_limit(
                limit in 0u32..6,
                opponent in proptest::collection::vec(any::<bool>(), 0..40),
            ) {
                let opponent: Vec<Choice> = opponent
                    .into_iter()
                    .map(|c| if c { Confess } else { Silent })
                    .collect();
                let mut window = ForgivenessWindow::new(Some(limit));
                let own = play_against(&mut window, &opponent, opponent.len() + 1);

                for (t, mine) in own.iter().enumerate() {
                    let provoked = opponent[..t]
                        .iter()
                        .enumerate()
                        .any(|(j, c)| *c == Confess && t - j <= limit as usize);
                    prop_assert_eq!(*mine == Confess, provoked);
                }
                prop_assert!(window.countdown() <= limit);
            }
        }
    }
}
