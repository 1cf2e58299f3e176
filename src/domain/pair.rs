//! Query pairs, choices, and recorded comparisons

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::Item;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid choice index {0}: expected 0 or 1")]
pub struct InvalidChoice(pub u8);

/// Two items presented together, in presentation order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub first: Item,
    pub second: Item,
}

impl Pair {
    pub fn new(first: Item, second: Item) -> Self {
        Self { first, second }
    }

    /// Resolves a choice into a comparison: the chosen item goes first
    pub fn resolve(&self, choice: Choice) -> Comparison {
        match choice {
            Choice::First => Comparison::new(self.first.clone(), self.second.clone()),
            Choice::Second => Comparison::new(self.second.clone(), self.first.clone()),
        }
    }

    /// Returns true if the pair holds the same two items, in either order
    pub fn same_items(&self, other: &Pair) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

/// Which item of the in-flight pair comes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// The left (index 0) item comes first
    First,
    /// The right (index 1) item comes first
    Second,
}

impl TryFrom<u8> for Choice {
    type Error = InvalidChoice;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Choice::First),
            1 => Ok(Choice::Second),
            other => Err(InvalidChoice(other)),
        }
    }
}

/// A directly answered comparison: `first` precedes `second`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub first: Item,
    pub second: Item,
}

impl Comparison {
    pub fn new(first: Item, second: Item) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} before {}", self.first, self.second)
    }
}
