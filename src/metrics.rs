//! Structural metrics of a time-windowed follow graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{compute::MIN_NUM_THREADS, graph::Graph, window::TimeWindow};

/// Per-vertex measurements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// Neighbour count in the undirected projection.
    pub degree: u32,
    pub in_degree: u32,
    pub out_degree: u32,
    pub clustering_coefficient: f64,
    /// Unnormalized directed betweenness.
    pub betweenness_centrality: f64,
}

/// Graph-level and per-vertex measurements of a filtered graph.
///
/// Both matrices are indexed by ascending vertex id. The default value is the result for a graph
/// without vertices or without edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub density: f64,
    pub avg_clustering: f64,
    pub node_metrics: BTreeMap<u64, NodeMetrics>,
    pub adjacency_matrix: Vec<Vec<u8>>,
    /// Hop counts, `None` where no directed path exists.
    pub shortest_path_matrix: Vec<Vec<Option<u32>>>,
}

impl GraphMetrics {
    /// Returns whether this is the result for an empty filtered graph.
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }
}

/// Filters the graph down to the `known` vertices and the follows within the window, then
/// measures the result.
///
/// # Examples
///
/// ```
/// use followgraph::edge::FollowEdge;
/// use followgraph::graph::Graph;
/// use followgraph::identity::{known_ids, Identity};
/// use followgraph::metrics::compute_metrics;
/// use followgraph::window::TimeWindow;
///
/// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
/// let graph = Graph::build(&identities, &[FollowEdge::new(1, 2, 100)]);
///
/// let metrics = compute_metrics(&graph, &TimeWindow::new(0, 200), &known_ids(&identities));
/// assert_eq!(metrics.density, 0.5);
/// assert_eq!(metrics.adjacency_matrix, vec![vec![0, 1], vec![0, 0]]);
/// assert_eq!(metrics.shortest_path_matrix, vec![vec![Some(0), Some(1)], vec![None, Some(0)]]);
///
/// let metrics = compute_metrics(&graph, &TimeWindow::new(500, 600), &known_ids(&identities));
/// assert!(metrics.is_empty());
/// ```
pub fn compute_metrics(graph: &Graph, window: &TimeWindow, known: &BTreeSet<u64>) -> GraphMetrics {
    compute_metrics_with_threads(graph, window, known, MIN_NUM_THREADS)
}

/// Same as [`compute_metrics`], spreading the path searches over `num_threads` worker threads.
pub fn compute_metrics_with_threads(
    graph: &Graph,
    window: &TimeWindow,
    known: &BTreeSet<u64>,
    num_threads: usize,
) -> GraphMetrics {
    let mut filtered = graph.filter(window, known);

    let num_nodes = filtered.vertex_count();
    let num_edges = filtered.edge_count();

    if num_nodes == 0 || num_edges == 0 {
        warn!(
            start = window.start,
            end = window.end,
            nodes = num_nodes,
            edges = num_edges,
            "filtered graph is empty, check the time range and data"
        );
        return GraphMetrics::default();
    }

    let adjacency_matrix: Vec<Vec<u8>> = filtered
        .adjacency_matrix()
        .row_iter()
        .map(|row| row.iter().map(|val| *val as u8).collect())
        .collect();

    let degree = filtered.degree_centrality();
    let in_degree = filtered.in_degree_centrality();
    let out_degree = filtered.out_degree_centrality();
    let clustering = filtered.clustering_coefficients();
    let betweenness = filtered.betweenness_centrality(num_threads);

    let node_metrics = filtered
        .ordering()
        .into_iter()
        .map(|id| {
            let metrics = NodeMetrics {
                degree: degree.get(&id).copied().unwrap_or_default(),
                in_degree: in_degree.get(&id).copied().unwrap_or_default(),
                out_degree: out_degree.get(&id).copied().unwrap_or_default(),
                clustering_coefficient: clustering.get(&id).copied().unwrap_or_default(),
                betweenness_centrality: betweenness.get(&id).copied().unwrap_or_default(),
            };
            (id, metrics)
        })
        .collect();

    GraphMetrics {
        num_nodes,
        num_edges,
        density: filtered.density(),
        avg_clustering: filtered.average_clustering(),
        node_metrics,
        adjacency_matrix,
        shortest_path_matrix: filtered.shortest_path_matrix(num_threads),
    }
}
