//! Node and link lists of a follow graph, ready for transmission.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    pub username: String,
    /// Registration time, unix seconds.
    pub timestamp: u64,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: u64,
    pub target: u64,
    /// Follow time, unix seconds.
    pub timestamp: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStructure {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

/// Lists the `known` vertices of the graph and the edges between them.
///
/// Nodes come in ascending id order, links in ascending `(source, target, timestamp)` order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use followgraph::edge::FollowEdge;
/// use followgraph::graph::Graph;
/// use followgraph::identity::Identity;
/// use followgraph::structure::serialize;
///
/// let identities = vec![Identity::new("alice", 1, 0), Identity::new("bob", 2, 0)];
/// let graph = Graph::build(&identities, &[FollowEdge::new(1, 2, 100)]);
///
/// let structure = serialize(&graph, &BTreeSet::from([1]));
/// assert_eq!(structure.nodes.len(), 1);
/// assert!(structure.links.is_empty());
/// ```
pub fn serialize(graph: &Graph, known: &BTreeSet<u64>) -> GraphStructure {
    let nodes = graph
        .nodes()
        .filter(|(id, _)| known.contains(id))
        .map(|(id, node)| NodeRecord {
            id,
            username: node.handle().to_owned(),
            timestamp: node.registered_at(),
            avatar_url: node.avatar_url().map(ToOwned::to_owned),
        })
        .collect();

    let mut edges: Vec<_> = graph
        .edges()
        .iter()
        .filter(|edge| known.contains(&edge.source()) && known.contains(&edge.target()))
        .collect();
    edges.sort();

    let links = edges
        .into_iter()
        .map(|edge| LinkRecord {
            source: edge.source(),
            target: edge.target(),
            timestamp: edge.followed_at(),
        })
        .collect();

    GraphStructure { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        edge::FollowEdge,
        identity::{known_ids, Identity},
    };

    fn fixture() -> (Vec<Identity>, Graph) {
        let identities = vec![
            Identity::new("carol", 3, 30),
            Identity::new("alice", 1, 10).with_avatar("https://example.com/alice.png"),
            Identity::new("bob", 2, 20),
        ];
        let edges = vec![
            FollowEdge::new(2, 3, 200),
            FollowEdge::new(1, 2, 150),
            FollowEdge::new(1, 2, 100),
            FollowEdge::new(3, 1, 50),
            FollowEdge::new(1, 99, 10),
        ];
        let graph = Graph::build(&identities, &edges);

        (identities, graph)
    }

    #[test]
    fn every_known_node_and_link() {
        let (identities, graph) = fixture();

        let structure = serialize(&graph, &known_ids(&identities));

        assert_eq!(
            structure.nodes.iter().map(|node| node.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            structure.links,
            vec![
                LinkRecord {
                    source: 1,
                    target: 2,
                    timestamp: 100,
                },
                LinkRecord {
                    source: 1,
                    target: 2,
                    timestamp: 150,
                },
                LinkRecord {
                    source: 2,
                    target: 3,
                    timestamp: 200,
                },
                LinkRecord {
                    source: 3,
                    target: 1,
                    timestamp: 50,
                },
            ]
        );
    }

    #[test]
    fn node_annotations() {
        let (identities, graph) = fixture();

        let structure = serialize(&graph, &known_ids(&identities));

        assert_eq!(
            structure.nodes[0],
            NodeRecord {
                id: 1,
                username: "alice".to_owned(),
                timestamp: 10,
                avatar_url: Some("https://example.com/alice.png".to_owned()),
            }
        );
        assert_eq!(structure.nodes[1].avatar_url, None);
    }

    #[test]
    fn restricted_to_known_ids() {
        let (_, graph) = fixture();

        let known = BTreeSet::from([1, 2, 42]);
        let structure = serialize(&graph, &known);

        // 42 is known but not in the graph, 3 is in the graph but not known.
        assert_eq!(
            structure.nodes.iter().map(|node| node.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(structure
            .links
            .iter()
            .all(|link| known.contains(&link.source) && known.contains(&link.target)));
        assert_eq!(structure.links.len(), 2);
    }

    #[test]
    fn deterministic() {
        let (identities, graph) = fixture();
        let known = known_ids(&identities);

        assert_eq!(serialize(&graph, &known), serialize(&graph, &known));
    }

    #[test]
    fn wire_shape() {
        let (identities, graph) = fixture();

        let value = serde_json::to_value(serialize(&graph, &known_ids(&identities))).unwrap();

        assert_eq!(
            value["nodes"][1],
            serde_json::json!({"id": 2, "username": "bob", "timestamp": 20, "avatar_url": null})
        );
        assert_eq!(
            value["links"][0],
            serde_json::json!({"source": 1, "target": 2, "timestamp": 100})
        );
    }
}
