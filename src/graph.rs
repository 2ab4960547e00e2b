//! A module for working with follow graphs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;
use nalgebra::DMatrix;
use tracing::debug;

use crate::{
    betweenness::compute_betweenness, edge::FollowEdge, identity::Identity,
    paths::compute_distances, window::TimeWindow,
};

/// Index type used in the adjacency lists handed to the search workers.
pub type GraphIndex = u32;

/// The annotations carried by a vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    handle: String,
    registered_at: u64,
    avatar_url: Option<String>,
}

impl Node {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn registered_at(&self) -> u64 {
        self.registered_at
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

impl From<&Identity> for Node {
    fn from(identity: &Identity) -> Self {
        Self {
            handle: identity.handle().to_owned(),
            registered_at: identity.registered_at(),
            avatar_url: identity.avatar_url().map(ToOwned::to_owned),
        }
    }
}

/// A directed follow graph over a closed set of vertices.
///
/// Every follow is kept, including repeated follows between the same ordered pair; the matrices
/// only record whether a pair is connected.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The vertices keyed by account id.
    nodes: BTreeMap<u64, Node>,
    /// The edges in the graph, both endpoints are always in `nodes`.
    edges: Vec<FollowEdge>,
    /// A mapping of vertices to their indices to be used when constructing the various matrices
    /// representing the graph.
    ///
    /// The `BTreeMap` keeps the vertices in ascending id order, which is the row and column order
    /// of every matrix.
    index: Option<BTreeMap<u64, usize>>,
    /// Cache the adjacency matrix when possible.
    adjacency_matrix: Option<DMatrix<f64>>,
    /// Cache the adjacency matrix of the undirected projection when possible.
    undirected_matrix: Option<DMatrix<f64>>,
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::graph::Graph;
    ///
    /// let graph = Graph::new();
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a graph with one vertex per identity, keeping only the edges between two of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    /// use followgraph::graph::Graph;
    /// use followgraph::identity::Identity;
    ///
    /// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
    /// let edges = vec![FollowEdge::new(1, 2, 100), FollowEdge::new(1, 99, 100)];
    ///
    /// let graph = Graph::build(&identities, &edges);
    /// assert_eq!(graph.vertex_count(), 2);
    /// assert_eq!(graph.edges(), &[FollowEdge::new(1, 2, 100)]);
    /// ```
    pub fn build(identities: &[Identity], edges: &[FollowEdge]) -> Self {
        let mut graph = Self::new();

        for identity in identities {
            graph.add_node(identity);
        }

        let mut retained = 0;
        for edge in edges {
            if graph.insert(edge.clone()) {
                retained += 1;
            }
        }

        debug!(
            nodes = graph.vertex_count(),
            retained,
            dropped = edges.len() - retained,
            "built follow graph"
        );

        graph
    }

    /// Adds a vertex for the identity, replacing the annotations of an existing vertex with the
    /// same id. Returns whether the vertex is new.
    pub fn add_node(&mut self, identity: &Identity) -> bool {
        let is_new = self
            .nodes
            .insert(identity.id(), Node::from(identity))
            .is_none();

        if is_new {
            self.clear_cache();
        }

        is_new
    }

    /// Inserts an edge into the graph, edges with an endpoint outside the vertex set are
    /// rejected. Returns whether the edge was inserted.
    pub fn insert(&mut self, edge: FollowEdge) -> bool {
        if !self.contains_node(edge.source()) || !self.contains_node(edge.target()) {
            return false;
        }

        self.edges.push(edge);

        // Delete the cached objects because we can't reliably update them from the new
        // connection alone.
        self.clear_cache();

        true
    }

    /// Checks if the graph contains the vertex.
    pub fn contains_node(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the vertex with the given id.
    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterates over the vertices in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (u64, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Returns every edge, in insertion order.
    pub fn edges(&self) -> &[FollowEdge] {
        &self.edges
    }

    /// Returns the vertex count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the edge count of the graph, repeated follows between the same ordered pair
    /// count once.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    /// use followgraph::graph::Graph;
    /// use followgraph::identity::Identity;
    ///
    /// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
    /// let edges = vec![
    ///     FollowEdge::new(1, 2, 100),
    ///     FollowEdge::new(1, 2, 200),
    ///     FollowEdge::new(2, 1, 300),
    /// ];
    ///
    /// assert_eq!(Graph::build(&identities, &edges).edge_count(), 2);
    /// ```
    pub fn edge_count(&self) -> usize {
        self.edges
            .iter()
            .map(|edge| (edge.source(), edge.target()))
            .unique()
            .count()
    }

    /// Returns the subgraph made of the `known` vertices and of the edges between them whose
    /// follow time falls within the window. Known vertices keep their place even when no edge
    /// remains.
    pub fn filter(&self, window: &TimeWindow, known: &BTreeSet<u64>) -> Self {
        let mut filtered = Self::new();
        filtered.nodes = self
            .nodes
            .iter()
            .filter(|(id, _)| known.contains(*id))
            .map(|(id, node)| (*id, node.clone()))
            .collect();
        filtered.edges = self
            .edges
            .iter()
            .filter(|edge| {
                window.contains(edge.followed_at())
                    && known.contains(&edge.source())
                    && known.contains(&edge.target())
            })
            .cloned()
            .collect();

        debug!(
            start = window.start,
            end = window.end,
            nodes = filtered.vertex_count(),
            edges = filtered.edge_count(),
            "filtered follow graph"
        );

        filtered
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// directed edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    /// use followgraph::graph::Graph;
    /// use followgraph::identity::Identity;
    ///
    /// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
    /// let mut graph = Graph::build(&identities, &[]);
    ///
    /// graph.insert(FollowEdge::new(1, 2, 0));
    /// assert_eq!(graph.density(), 0.5);
    ///
    /// graph.insert(FollowEdge::new(2, 1, 0));
    /// assert_eq!(graph.density(), 1.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.vertex_count() as f64;
        let ec = self.edge_count() as f64;

        if vc <= 1.0 {
            return 0.0;
        }

        // Actual edges divided by the possible edges gives the density.
        ec / (vc * (vc - 1.0))
    }

    /// Returns the vertex ids in matrix order.
    pub fn ordering(&mut self) -> Vec<u64> {
        self.index().keys().copied().collect()
    }

    /// Constructs the adjacency matrix for this graph, entry `(i, j)` is 1 when `i` follows `j`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use followgraph::edge::FollowEdge;
    /// use followgraph::graph::Graph;
    /// use followgraph::identity::Identity;
    ///
    /// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
    /// let mut graph = Graph::build(&identities, &[FollowEdge::new(1, 2, 0)]);
    ///
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              0.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&mut self) -> DMatrix<f64> {
        // Check the cache.
        if let Some(matrix) = self.adjacency_matrix.clone() {
            return matrix;
        }

        let index = self.index().clone();
        let n = index.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // Repeated follows of the same pair collapse to a single entry.
        for edge in &self.edges {
            if let (Some(i), Some(j)) = (index.get(&edge.source()), index.get(&edge.target())) {
                matrix[(*i, *j)] = 1.0;
            }
        }

        // Cache the matrix.
        self.adjacency_matrix = Some(matrix.clone());

        matrix
    }

    /// Constructs the adjacency matrix of the undirected projection: `i` and `j` are linked when
    /// either follows the other. Self-follows are left out.
    pub fn undirected_matrix(&mut self) -> DMatrix<f64> {
        // Check the cache.
        if let Some(matrix) = self.undirected_matrix.clone() {
            return matrix;
        }

        let adjacency_matrix = self.adjacency_matrix();
        let mut matrix = (&adjacency_matrix + adjacency_matrix.transpose()).map(|v| v.min(1.0));
        matrix.fill_diagonal(0.0);

        // Cache the matrix.
        self.undirected_matrix = Some(matrix.clone());

        matrix
    }

    /// Returns a mapping of vertices to their number of neighbours in the undirected projection.
    pub fn degree_centrality(&mut self) -> HashMap<u64, u32> {
        let matrix = self.undirected_matrix();
        self.map_rows(matrix.row_iter().map(|row| row.sum() as u32))
    }

    /// Returns a mapping of vertices to the number of accounts they follow.
    pub fn out_degree_centrality(&mut self) -> HashMap<u64, u32> {
        let matrix = self.adjacency_matrix();
        self.map_rows(matrix.row_iter().map(|row| row.sum() as u32))
    }

    /// Returns a mapping of vertices to the number of accounts following them.
    pub fn in_degree_centrality(&mut self) -> HashMap<u64, u32> {
        let matrix = self.adjacency_matrix();
        self.map_rows(matrix.column_iter().map(|column| column.sum() as u32))
    }

    /// Returns a mapping of vertices to their local clustering coefficient in the undirected
    /// projection: the share of pairs of neighbours which are linked themselves, 0 for vertices
    /// with fewer than two neighbours.
    pub fn clustering_coefficients(&mut self) -> HashMap<u64, f64> {
        let coefficients = self.clustering_rows();
        self.map_rows(coefficients)
    }

    /// Returns the mean of the local clustering coefficients, 0 for an empty graph.
    pub fn average_clustering(&mut self) -> f64 {
        let coefficients = self.clustering_rows();

        if coefficients.is_empty() {
            return 0.0;
        }

        coefficients.iter().sum::<f64>() / coefficients.len() as f64
    }

    /// Returns the matrix of directed shortest path lengths in hops, `None` where no path exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    /// use followgraph::graph::Graph;
    /// use followgraph::identity::Identity;
    ///
    /// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
    /// let mut graph = Graph::build(&identities, &[FollowEdge::new(1, 2, 0)]);
    ///
    /// assert_eq!(
    ///     graph.shortest_path_matrix(1),
    ///     vec![vec![Some(0), Some(1)], vec![None, Some(0)]]
    /// );
    /// ```
    pub fn shortest_path_matrix(&mut self, num_threads: usize) -> Vec<Vec<Option<u32>>> {
        let indices = self.adjacency_list();
        compute_distances(&indices, num_threads)
    }

    /// Returns a mapping of vertices to their unnormalized directed betweenness centrality.
    pub fn betweenness_centrality(&mut self, num_threads: usize) -> HashMap<u64, f64> {
        // B(v) = sum (shortest paths between s and t through v / total num of shortest paths
        // between s and t)
        let indices = self.adjacency_list();
        let betweenness = compute_betweenness(&indices, num_threads);

        self.map_rows(betweenness)
    }

    //
    // Private
    //

    /// Clears the computed state.
    ///
    /// This should be called every time the graph is mutated since the cached state won't
    /// correspond to the new graph.
    fn clear_cache(&mut self) {
        self.index = None;
        self.adjacency_matrix = None;
        self.undirected_matrix = None;
    }

    /// Returns the index of vertices, constructing and storing it first if needed.
    fn index(&mut self) -> &BTreeMap<u64, usize> {
        self.index.get_or_insert_with(|| {
            self.nodes
                .keys()
                .enumerate()
                .map(|(i, &vertex)| (vertex, i))
                .collect()
        })
    }

    /// Computes the local clustering coefficients in matrix order.
    fn clustering_rows(&mut self) -> Vec<f64> {
        let matrix = self.undirected_matrix();

        matrix
            .row_iter()
            .map(|row| {
                let neighbours: Vec<usize> = row
                    .iter()
                    .enumerate()
                    .filter(|(_, &val)| val == 1.0)
                    .map(|(n, _)| n)
                    .collect();

                let k = neighbours.len();
                if k < 2 {
                    return 0.0;
                }

                let links = neighbours
                    .iter()
                    .tuple_combinations()
                    .filter(|(a, b)| matrix[(**a, **b)] == 1.0)
                    .count();

                links as f64 / (k * (k - 1) / 2) as f64
            })
            .collect()
    }

    /// Zips per-row values with the vertices they belong to.
    fn map_rows<V>(&mut self, values: impl IntoIterator<Item = V>) -> HashMap<u64, V> {
        self.index().keys().copied().zip(values).collect()
    }

    /// Constructs the directed adjacency lists, one list of followed indices per vertex.
    fn adjacency_list(&mut self) -> Vec<Vec<GraphIndex>> {
        let matrix = self.adjacency_matrix();

        matrix
            .row_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &val)| val == 1.0)
                    .map(|(n, _)| n as GraphIndex)
                    .collect()
            })
            .collect()
    }
}
