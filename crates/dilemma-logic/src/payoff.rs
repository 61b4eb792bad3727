//! Payoff table for the iterated dilemma
//!
//! Penalties are costs: lower is better for the party that serves them.

use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};
use crate::strategy::Choice;

/// Cost each party incurs for one round's pair of choices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyPair {
    first: u32,
    second: u32,
}

impl PenaltyPair {
    pub const fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// Cost for the party whose choice indexes the row
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Cost for the opposing party
    pub fn second(&self) -> u32 {
        self.second
    }
}

impl From<(u32, u32)> for PenaltyPair {
    fn from((first, second): (u32, u32)) -> Self {
        Self::new(first, second)
    }
}

/// Fixed 2×2 lookup from `[own choice][opponent choice]` to a penalty pair.
///
/// Every constructor guarantees all four combinations are present, so
/// [`PayoffTable::penalty`] is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffTable {
    cells: [[PenaltyPair; 2]; 2],
}

impl PayoffTable {
    /// The classic dilemma: silence together costs a little, a lone
    /// confessor walks free, mutual confession costs almost the maximum.
    pub fn classic() -> Self {
        Self {
            cells: [
                [PenaltyPair::new(1, 1), PenaltyPair::new(10, 0)],
                [PenaltyPair::new(0, 10), PenaltyPair::new(9, 9)],
            ],
        }
    }

    /// Build from explicit `(own, opponent) -> penalties` entries.
    ///
    /// Fails if any of the four combinations is missing or given twice.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((Choice, Choice), PenaltyPair)>,
    {
        let mut slots: [[Option<PenaltyPair>; 2]; 2] = [[None; 2]; 2];

        for ((own, other), pair) in entries {
            let slot = &mut slots[own.index()][other.index()];
            if slot.is_some() {
                return Err(DilemmaError::Configuration(format!(
                    "combination ({:?}, {:?}) given more than once",
                    own, other
                )));
            }
            *slot = Some(pair);
        }

        let mut cells = [[PenaltyPair::new(0, 0); 2]; 2];
        for own in Choice::ALL {
            for other in Choice::ALL {
                cells[own.index()][other.index()] = slots[own.index()][other.index()]
                    .ok_or_else(|| {
                        DilemmaError::Configuration(format!(
                            "combination ({:?}, {:?}) is missing",
                            own, other
                        ))
                    })?;
            }
        }

        Ok(Self { cells })
    }

    /// Build from the nested-list layout `[[ss, sc], [cs, cc]]`, rows and
    /// columns indexed by choice code (0 = Silent, 1 = Confess).
    pub fn from_matrix(rows: &[Vec<(u32, u32)>]) -> Result<Self> {
        if rows.len() != 2 {
            return Err(DilemmaError::Configuration(format!(
                "expected 2 rows, got {}",
                rows.len()
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != 2) {
            return Err(DilemmaError::Configuration(format!(
                "row {} has {} entries, expected 2",
                i,
                row.len()
            )));
        }

        Self::from_entries(Choice::ALL.into_iter().flat_map(|own| {
            Choice::ALL.into_iter().map(move |other| {
                (
                    (own, other),
                    PenaltyPair::from(rows[own.index()][other.index()]),
                )
            })
        }))
    }

    /// Penalties for one round: `.first()` is paid by the party that chose
    /// `own`, `.second()` by the party that chose `other`.
    pub fn penalty(&self, own: Choice, other: Choice) -> PenaltyPair {
        self.cells[own.index()][other.index()]
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::classic()
    }
}
