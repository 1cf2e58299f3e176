//! pairsort - Interactive pairwise sorting
//!
//! Builds a total order over a list of items by asking "which of these two
//! comes first?" and skipping every question whose answer already follows
//! from earlier ones.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Choice, Item, OrderEngine, Pair, Query};
