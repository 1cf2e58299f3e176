//! Interactive ordering engine
//!
//! Builds a total order over distinct items from binary "which comes
//! first?" answers. Pairs whose order already follows from earlier answers
//! are skipped, so a consistent oracle is asked far fewer than n(n-1)/2
//! questions.
//!
//! The engine is a strict request/response protocol:
//!
//! ```text
//! Collecting --(no undetermined pairs left)--> Finalizing --finalize()--> Done
//!                                                          \-----------> Contradiction
//! ```

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use super::graph::{format_cycle, GraphError, PrecedenceGraph};
use super::item::{dedupe, Item};
use super::pair::{Choice, Comparison, InvalidChoice, Pair};

/// Caller misuse of the query/answer protocol
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("No query is in flight")]
    NoQueryInFlight,

    #[error("A query is in flight and must be answered first")]
    QueryInFlight,

    #[error("Pairs remain undetermined; keep asking until next_query reports done")]
    QueriesOutstanding,

    #[error("Session is already finalized")]
    SessionClosed,
}

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Inconsistent ordering: answers form a cycle ({})", format_cycle(.cycle))]
    InconsistentOrdering { cycle: Vec<Item> },

    #[error(transparent)]
    InvalidChoice(#[from] InvalidChoice),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Lifecycle of an ordering session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Queries are being issued and answers accepted
    Collecting,
    /// No pairs left; waiting for `finalize`
    Finalizing,
    /// The final order was produced
    Done,
    /// The answers could not be linearized
    Contradiction,
}

impl Phase {
    pub fn is_closed(self) -> bool {
        matches!(self, Phase::Done | Phase::Contradiction)
    }
}

/// Result of asking the engine what to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Ask the oracle about this pair
    Compare(Pair),
    /// Nothing left to ask
    Done,
}

/// Resolved vs. total pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    /// Pairs answered directly or skipped as implied
    pub resolved: usize,
    /// `resolved` plus the pairs still undetermined
    pub total: usize,
}

impl Progress {
    /// Fraction complete in `0.0..=1.0`; an empty session counts as complete
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.resolved as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resolved, self.total)
    }
}

/// Counters describing a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub seed: u64,
    pub items: usize,
    pub asked: usize,
    pub pruned: usize,
    pub given: usize,
}

/// The ordering session state
#[derive(Debug)]
pub struct OrderEngine {
    seed: u64,

    /// Distinct items in presentation (shuffled) order
    items: Vec<Item>,

    /// Direct "before" edges
    graph: PrecedenceGraph,

    /// Index pairs into `items`; the in-flight pair, if any, is at the front
    undetermined: VecDeque<(usize, usize)>,

    in_flight: Option<(usize, usize)>,

    /// Direct answers, in the order they were given
    comparisons: Vec<Comparison>,

    /// Orderings supplied up front rather than asked
    given: Vec<Comparison>,

    pruned: usize,
    phase: Phase,
}

impl OrderEngine {
    /// Creates a session with a random seed
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        Self::with_seed(items, rand::random())
    }

    /// Creates a reproducible session: the same items and seed give the
    /// same presentation order and the same questions.
    pub fn with_seed<I>(items: I, seed: u64) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut items = dedupe(items);
        items.shuffle(&mut rng);

        let n = items.len();
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push((i, j));
            }
        }
        pairs.shuffle(&mut rng);

        let phase = if pairs.is_empty() {
            Phase::Finalizing
        } else {
            Phase::Collecting
        };

        Self {
            seed,
            graph: PrecedenceGraph::with_items(&items),
            items,
            undetermined: pairs.into(),
            in_flight: None,
            comparisons: Vec::new(),
            given: Vec::new(),
            pruned: 0,
            phase,
        }
    }

    /// Records an ordering known in advance, without asking for it
    ///
    /// Pairs it implies are skipped later. Given orderings are not checked
    /// for consistency here; a contradiction surfaces at `finalize`.
    pub fn record(&mut self, before: &Item, after: &Item) -> Result<bool, EngineError> {
        if self.phase.is_closed() {
            return Err(ProtocolError::SessionClosed.into());
        }
        if self.in_flight.is_some() {
            return Err(ProtocolError::QueryInFlight.into());
        }

        let added = self.graph.add_precedence(before, after)?;
        if added {
            self.given.push(Comparison::new(before.clone(), after.clone()));
        }
        Ok(added)
    }

    /// Returns the next pair to ask about, or `Query::Done`
    ///
    /// Calling this again before answering returns the same pair.
    pub fn next_query(&mut self) -> Query {
        if self.phase != Phase::Collecting {
            return Query::Done;
        }

        if let Some((i, j)) = self.in_flight {
            return Query::Compare(self.pair(i, j));
        }

        while let Some(&(i, j)) = self.undetermined.front() {
            if self.is_implied(i, j) {
                self.undetermined.pop_front();
                self.pruned += 1;
                continue;
            }

            self.in_flight = Some((i, j));
            return Query::Compare(self.pair(i, j));
        }

        self.phase = Phase::Finalizing;
        Query::Done
    }

    /// Answers the in-flight query with a position
    pub fn answer(&mut self, choice: Choice) -> Result<Comparison, EngineError> {
        if self.phase.is_closed() {
            return Err(ProtocolError::SessionClosed.into());
        }

        let (i, j) = self
            .in_flight
            .take()
            .ok_or(ProtocolError::NoQueryInFlight)?;

        let comparison = self.pair(i, j).resolve(choice);
        self.graph
            .add_precedence(&comparison.first, &comparison.second)?;

        debug_assert_eq!(self.undetermined.front(), Some(&(i, j)));
        self.undetermined.pop_front();
        self.comparisons.push(comparison.clone());

        if self.undetermined.is_empty() {
            self.phase = Phase::Finalizing;
        }

        Ok(comparison)
    }

    /// Answers the in-flight query with an index: 0 for the first item, 1 for the second
    pub fn answer_index(&mut self, index: u8) -> Result<Comparison, EngineError> {
        let choice = Choice::try_from(index)?;
        self.answer(choice)
    }

    /// Produces the final order once nothing is left to ask
    ///
    /// Consumes the session state either way: the precedence graph is
    /// dropped whether the sort succeeds or finds a cycle.
    pub fn finalize(&mut self) -> Result<Vec<Item>, EngineError> {
        match self.phase {
            Phase::Collecting => return Err(ProtocolError::QueriesOutstanding.into()),
            Phase::Done | Phase::Contradiction => return Err(ProtocolError::SessionClosed.into()),
            Phase::Finalizing => {}
        }

        let graph = std::mem::take(&mut self.graph);
        self.undetermined.clear();

        let err = match graph.topological_order() {
            Ok(order) => {
                self.phase = Phase::Done;
                return Ok(order);
            }
            Err(err) => err,
        };

        // The graph is gone either way; any failure closes the session
        self.phase = Phase::Contradiction;
        match err {
            GraphError::CycleDetected(cycle) => Err(EngineError::InconsistentOrdering { cycle }),
            other => Err(other.into()),
        }
    }

    fn pair(&self, i: usize, j: usize) -> Pair {
        Pair::new(self.items[i].clone(), self.items[j].clone())
    }

    fn is_implied(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.items[i], &self.items[j]);
        self.graph.reaches(a, b) || self.graph.reaches(b, a)
    }

    /// Returns the pair awaiting an answer, if any
    pub fn in_flight(&self) -> Option<Pair> {
        self.in_flight.map(|(i, j)| self.pair(i, j))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Distinct items in presentation order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Direct answers so far
    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    /// Orderings recorded with [`OrderEngine::record`]
    pub fn given(&self) -> &[Comparison] {
        &self.given
    }

    pub fn progress(&self) -> Progress {
        let resolved = self.comparisons.len() + self.pruned;
        Progress {
            resolved,
            total: resolved + self.undetermined.len(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            seed: self.seed,
            items: self.items.len(),
            asked: self.comparisons.len(),
            pruned: self.pruned,
            given: self.given.len(),
        }
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Worst-case number of comparisons for `n` items: every pair
pub fn max_comparisons(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Information-theoretic minimum comparisons to sort `n` items: ceil(log2(n!))
pub fn min_comparisons(n: usize) -> usize {
    let bits: f64 = (2..=n).map(|k| (k as f64).log2()).sum();
    (bits - 1e-9).ceil().max(0.0) as usize
}
