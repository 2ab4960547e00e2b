//! Followgraph turns the follow relations between a handful of social-network accounts into a
//! directed graph and measures it over a window of time.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure which is built from the
//! resolved [`Identity`](identity::Identity) records (the vertices) and the
//! [`FollowEdge`](edge::FollowEdge) records fetched for them. Edges towards accounts outside the
//! identity set are dropped. Once built, the graph can be measured over a
//! [`TimeWindow`](window::TimeWindow) and listed for transmission.
//!
//! ```rust
//! use followgraph::edge::FollowEdge;
//! use followgraph::graph::Graph;
//! use followgraph::identity::{known_ids, Identity};
//! use followgraph::metrics::compute_metrics;
//! use followgraph::structure::serialize;
//! use followgraph::window::TimeWindow;
//!
//! // The resolved accounts, with their registration times.
//! let identities = vec![
//!     Identity::new("alice", 1, 1_700_000_000),
//!     Identity::new("bob", 2, 1_700_000_100),
//! ];
//!
//! // The follows fetched for them, the one towards 99 is outside the set.
//! let edges = vec![
//!     FollowEdge::new(1, 2, 1_700_000_200),
//!     FollowEdge::new(1, 99, 1_700_000_300),
//! ];
//!
//! let graph = Graph::build(&identities, &edges);
//! let known = known_ids(&identities);
//!
//! // Measure the graph over the window spanning its timestamps.
//! let window = TimeWindow::spanning(&graph, &known);
//! let metrics = compute_metrics(&graph, &window, &known);
//!
//! assert_eq!(metrics.num_edges, 1);
//! assert_eq!(metrics.density, 0.5);
//!
//! // List the nodes and links.
//! let structure = serialize(&graph, &known);
//! assert_eq!(structure.links.len(), 1);
//! ```
//!
//! The [`response`] module composes these steps into the payload returned to a caller, and the
//! [`upstream`] module decodes the name registry and hub payloads into identities and edges.
//!
//! Events are emitted through [`tracing`], the embedding application installs the subscriber.

mod betweenness;
mod compute;
pub mod config;
pub mod edge;
pub mod error;
pub mod graph;
pub mod identity;
pub mod metrics;
mod paths;
pub mod response;
pub mod structure;
pub mod upstream;
pub mod window;

pub use error::{Error, Result};
