//! Registered strategies
//!
//! A tournament holds descriptors, never live instances: every match
//! asks the descriptor for a fresh instance so both sides start clean.
//! The caller names the random stream each instance draws from, so the
//! same match position always replays the same draws.

use std::fmt;

use crate::random::Entropy;
use crate::strategy::{Strategy, StrategyKind};

type Factory = Box<dyn Fn(u64) -> Box<dyn Strategy>>;

/// Label plus factory for one strategy
pub struct StrategyDescriptor {
    label: String,
    kind: Option<StrategyKind>,
    factory: Factory,
}

impl StrategyDescriptor {
    /// Wrap an arbitrary zero-argument factory. It ignores the stream.
    pub fn new<F>(label: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Strategy> + 'static,
    {
        Self {
            label: label.into(),
            kind: None,
            factory: Box::new(move |_: u64| factory()),
        }
    }

    /// Factory for a built-in kind, drawing from `entropy`
    pub fn from_kind(label: impl Into<String>, kind: StrategyKind, entropy: Entropy) -> Self {
        let blueprint = kind.clone();
        let factory = move |stream: u64| blueprint.build(&entropy, stream);

        Self {
            label: label.into(),
            kind: Some(kind),
            factory: Box::new(factory),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Built-in kind, if the descriptor came from one
    pub fn kind(&self) -> Option<&StrategyKind> {
        self.kind.as_ref()
    }

    /// Build a fresh instance in its initial condition. Equal streams
    /// give equal random draws.
    pub fn instantiate(&self, stream: u64) -> Box<dyn Strategy> {
        (self.factory)(stream)
    }
}

impl fmt::Debug for StrategyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyDescriptor")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
