//! Time windows used to slice a follow graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// An inclusive range of unix seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}

impl TimeWindow {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Returns whether the timestamp falls within the window, both bounds included.
    ///
    /// A window with `start > end` contains nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::window::TimeWindow;
    ///
    /// let window = TimeWindow::new(10, 20);
    /// assert!(window.contains(10));
    /// assert!(window.contains(20));
    /// assert!(!window.contains(21));
    /// assert!(!TimeWindow::new(20, 10).contains(15));
    /// ```
    pub fn contains(&self, timestamp: u64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Derives the window spanning every timestamp of the graph restricted to `known`: the
    /// registration times of the known nodes and the follow times of the edges between them.
    ///
    /// Returns `(0, 0)` when there is no such timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    /// use followgraph::graph::Graph;
    /// use followgraph::identity::{known_ids, Identity};
    /// use followgraph::window::TimeWindow;
    ///
    /// let identities = vec![Identity::new("alice", 1, 50), Identity::new("bob", 2, 70)];
    /// let graph = Graph::build(&identities, &[FollowEdge::new(1, 2, 300)]);
    ///
    /// let window = TimeWindow::spanning(&graph, &known_ids(&identities));
    /// assert_eq!(window, TimeWindow::new(50, 300));
    /// ```
    pub fn spanning(graph: &Graph, known: &BTreeSet<u64>) -> Self {
        let timestamps = timestamps(graph, known);

        match (timestamps.first(), timestamps.last()) {
            (Some(start), Some(end)) => Self::new(*start, *end),
            _ => Self::default(),
        }
    }
}

/// Returns every timestamp considered when deriving a default window, in ascending order.
pub fn timestamps(graph: &Graph, known: &BTreeSet<u64>) -> Vec<u64> {
    let registrations = graph
        .nodes()
        .filter(|(id, _)| known.contains(id))
        .map(|(_, node)| node.registered_at());
    let follows = graph
        .edges()
        .iter()
        .filter(|edge| known.contains(&edge.source()) && known.contains(&edge.target()))
        .map(|edge| edge.followed_at());

    let mut timestamps: Vec<u64> = registrations.chain(follows).collect();
    timestamps.sort_unstable();

    timestamps
}
