//! Assembly of the payload returned to the caller.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::AnalysisConfig,
    edge::FollowEdge,
    error::Error,
    graph::Graph,
    identity::{known_ids, Identity},
    metrics::{compute_metrics_with_threads, GraphMetrics},
    structure::{serialize, GraphStructure},
    window::{timestamps, TimeWindow},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
    /// Metrics of the graph within the window.
    pub graph_metrics: GraphMetrics,
    /// Every known node and link, regardless of the window.
    pub graph_structure: GraphStructure,
    /// The timestamps the default window is derived from, ascending.
    pub timestamps: Vec<u64>,
    pub start_time: u64,
    pub end_time: u64,
}

/// The payload returned in place of a [`GraphResponse`] when a request fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Builds the follow graph of the identities and measures it over the configured window, or over
/// the window spanning all of its timestamps when none is configured.
///
/// # Examples
///
/// ```
/// use followgraph::config::AnalysisConfig;
/// use followgraph::edge::FollowEdge;
/// use followgraph::identity::Identity;
/// use followgraph::response::analyse;
///
/// let identities = vec![Identity::new("alice", 1, 50), Identity::new("bob", 2, 60)];
/// let edges = vec![FollowEdge::new(1, 2, 100), FollowEdge::new(2, 99, 150)];
///
/// let response = analyse(&identities, &edges, &AnalysisConfig::default());
/// assert_eq!((response.start_time, response.end_time), (50, 100));
/// assert_eq!(response.timestamps, vec![50, 60, 100]);
/// assert_eq!(response.graph_metrics.num_edges, 1);
/// ```
pub fn analyse(
    identities: &[Identity],
    edges: &[FollowEdge],
    config: &AnalysisConfig,
) -> GraphResponse {
    let known = known_ids(identities);
    let graph = Graph::build(identities, edges);

    let window = config
        .window
        .unwrap_or_else(|| TimeWindow::spanning(&graph, &known));

    let graph_metrics = compute_metrics_with_threads(&graph, &window, &known, config.num_threads);

    info!(
        identities = identities.len(),
        start = window.start,
        end = window.end,
        nodes = graph_metrics.num_nodes,
        edges = graph_metrics.num_edges,
        "analysed follow graph"
    );

    GraphResponse {
        graph_metrics,
        graph_structure: serialize(&graph, &known),
        timestamps: timestamps(&graph, &known),
        start_time: window.start,
        end_time: window.end,
    }
}
