//! Precedence graph for items
//!
//! Holds the "A before B" edges learned from direct answers, with
//! reachability queries, cycle reporting, and topological ordering.
//! Uses petgraph for graph storage and strongly connected components.

use std::collections::{HashMap, VecDeque};

use petgraph::algo::{astar, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::Direction;
use thiserror::Error;

use super::item::Item;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Precedence cycle detected: {}", format_cycle(.0))]
    CycleDetected(Vec<Item>),

    #[error("Item not found: {0}")]
    ItemNotFound(Item),

    #[error("An item cannot precede itself: {0}")]
    SelfPrecedence(Item),
}

/// Renders a cycle as `a -> b -> c -> a`
pub fn format_cycle(cycle: &[Item]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(Item::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.as_str());
    }
    parts.join(" -> ")
}

/// A directed graph where an edge A -> B means "A was chosen before B"
///
/// Cycles are allowed while answers are being collected; they only become
/// an error when a total order is requested.
#[derive(Debug, Default)]
pub struct PrecedenceGraph {
    /// The underlying directed graph
    graph: DiGraph<Item, ()>,

    /// Map from item to node index
    node_map: HashMap<Item, NodeIndex>,
}

impl PrecedenceGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds an edgeless graph over the given items, in order
    pub fn with_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut graph = Self::new();
        for item in items {
            graph.add_item(item.clone());
        }
        graph
    }

    /// Adds an item to the graph. Adding a known item is a no-op.
    pub fn add_item(&mut self, item: Item) {
        if !self.node_map.contains_key(&item) {
            let idx = self.graph.add_node(item.clone());
            self.node_map.insert(item, idx);
        }
    }

    fn index(&self, item: &Item) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(item)
            .copied()
            .ok_or_else(|| GraphError::ItemNotFound(item.clone()))
    }

    /// Adds the edge `before -> after`
    ///
    /// Returns false if the edge was already present.
    pub fn add_precedence(&mut self, before: &Item, after: &Item) -> Result<bool, GraphError> {
        if before == after {
            return Err(GraphError::SelfPrecedence(before.clone()));
        }

        let from = self.index(before)?;
        let to = self.index(after)?;

        if self.graph.find_edge(from, to).is_some() {
            return Ok(false);
        }

        self.graph.add_edge(from, to, ());
        Ok(true)
    }

    /// Returns true if `to` can be reached from `from` by following edges
    ///
    /// Breadth-first. An item always reaches itself; unknown items reach nothing.
    pub fn reaches(&self, from: &Item, to: &Item) -> bool {
        let (Some(&start), Some(&target)) = (self.node_map.get(from), self.node_map.get(to)) else {
            return false;
        };

        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(node) = bfs.next(&self.graph) {
            if node == target {
                return true;
            }
        }
        false
    }

    /// Shortest path by edge count, both ends included
    fn path_between(&self, start: NodeIndex, target: NodeIndex) -> Option<Vec<Item>> {
        let (_, nodes) = astar(&self.graph, start, |n| n == target, |_| 1usize, |_| 0)?;
        Some(nodes.into_iter().map(|idx| self.graph[idx].clone()).collect())
    }

    /// Finds one cycle, listed in edge order without repeating the start
    pub fn find_cycle(&self) -> Option<Vec<Item>> {
        let component = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .min_by_key(|scc| scc.iter().min().copied())?;

        let start = *component.iter().min()?;
        let next = self
            .graph
            .neighbors_directed(start, Direction::Outgoing)
            .filter(|n| component.contains(n))
            .min()?;

        // A shortest path next -> start stays inside the component
        let mut cycle = vec![self.graph[start].clone()];
        let back = self.path_between(next, start)?;
        cycle.extend(back.into_iter().take_while(|item| item != &self.graph[start]));
        Some(cycle)
    }

    /// Returns all items in an order consistent with every edge
    ///
    /// Kahn's algorithm. Ties between ready items are broken by insertion
    /// order, so the result is reproducible for the same inputs.
    pub fn topological_order(&self) -> Result<Vec<Item>, GraphError> {
        let mut in_degree: HashMap<NodeIndex, usize> =
            self.graph.node_indices().map(|idx| (idx, 0)).collect();
        for edge in self.graph.raw_edges() {
            *in_degree.entry(edge.target()).or_default() += 1;
        }

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(node) = queue.pop_front() {
            order.push(self.graph[node].clone());

            let mut ready: Vec<NodeIndex> = Vec::new();
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                let Some(degree) = in_degree.get_mut(&next) else {
                    continue;
                };
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.push(next);
                }
            }
            ready.sort();
            queue.extend(ready);
        }

        if order.len() < self.len() {
            let cycle = self.find_cycle().unwrap_or_default();
            return Err(GraphError::CycleDetected(cycle));
        }

        Ok(order)
    }

    /// Returns true if the graph contains the item
    pub fn contains(&self, item: &Item) -> bool {
        self.node_map.contains_key(item)
    }

    /// Returns the number of items in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Returns the number of direct precedence edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
