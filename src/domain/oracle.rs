//! Oracle seam
//!
//! An oracle is whatever answers "which of these comes first?": a person at
//! a prompt, a terminal UI, or a fixed ranking in tests. [`sort_with`] runs
//! an engine to completion against one.

use thiserror::Error;

use super::engine::{EngineError, OrderEngine, Progress, Query};
use super::item::Item;
use super::pair::{Choice, Pair};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Oracle input failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Oracle failed: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SortError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// An oracle's reply to one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Choose(Choice),
    /// Stop the session without an order
    Abandon,
}

/// How a driven session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    Completed(Vec<Item>),
    Abandoned,
}

/// Source of binary precedence answers
pub trait Oracle {
    /// Decides which item of `pair` comes first
    fn choose(&mut self, pair: &Pair, progress: Progress) -> Result<Decision, OracleError>;
}

impl<F> Oracle for F
where
    F: FnMut(&Pair) -> Choice,
{
    fn choose(&mut self, pair: &Pair, _progress: Progress) -> Result<Decision, OracleError> {
        Ok(Decision::Choose(self(pair)))
    }
}

/// Asks `oracle` until nothing is left, then finalizes
pub fn sort_with<O: Oracle + ?Sized>(
    engine: &mut OrderEngine,
    oracle: &mut O,
) -> Result<SortOutcome, SortError> {
    while let Query::Compare(pair) = engine.next_query() {
        match oracle.choose(&pair, engine.progress())? {
            Decision::Choose(choice) => {
                engine.answer(choice)?;
            }
            Decision::Abandon => return Ok(SortOutcome::Abandoned),
        }
    }

    let order = engine.finalize()?;
    Ok(SortOutcome::Completed(order))
}
