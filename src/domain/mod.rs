//! Domain models for pairsort
//!
//! Contains the ordering logic without any I/O concerns.

mod item;
mod pair;
mod graph;
mod engine;
mod oracle;

pub use item::{dedupe, Item};
pub use pair::{Choice, Comparison, InvalidChoice, Pair};
pub use graph::{format_cycle, GraphError, PrecedenceGraph};
pub use engine::{
    max_comparisons, min_comparisons, EngineError, OrderEngine, Phase, Progress, ProtocolError,
    Query, SessionStats,
};
pub use oracle::{sort_with, Decision, Oracle, OracleError, SortError, SortOutcome};
