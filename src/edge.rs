//! A module for working with follow edges.

use serde::{Deserialize, Serialize};

/// Offset between the network's epoch (2021-01-01T00:00:00Z) and the unix epoch, in seconds.
pub const NETWORK_EPOCH: u64 = 1_609_459_200;

/// A directed, timestamped follow relation: `source` began following `target` at `followed_at`.
///
/// Unlike an undirected pair, `(a, b)` and `(b, a)` are distinct edges.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FollowEdge {
    source: u64,
    target: u64,
    followed_at: u64,
}

impl FollowEdge {
    /// Creates a new edge, `followed_at` is in unix seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    ///
    /// let edge = FollowEdge::new(1, 2, 100);
    /// assert_ne!(edge, FollowEdge::new(2, 1, 100));
    /// ```
    pub fn new(source: u64, target: u64, followed_at: u64) -> Self {
        Self {
            source,
            target,
            followed_at,
        }
    }

    /// Creates a new edge from a timestamp expressed in seconds since the network epoch.
    ///
    /// Returns `None` when the timestamp can't be expressed in unix seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::{FollowEdge, NETWORK_EPOCH};
    ///
    /// let edge = FollowEdge::from_network_time(1, 2, 10).unwrap();
    /// assert_eq!(edge.followed_at(), NETWORK_EPOCH + 10);
    ///
    /// assert_eq!(FollowEdge::from_network_time(1, 2, u64::MAX), None);
    /// ```
    pub fn from_network_time(source: u64, target: u64, network_timestamp: u64) -> Option<Self> {
        let followed_at = network_timestamp.checked_add(NETWORK_EPOCH)?;
        Some(Self::new(source, target, followed_at))
    }

    /// Returns the follower.
    pub fn source(&self) -> u64 {
        self.source
    }

    /// Returns the followed account.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Returns the unix time the follow happened at.
    pub fn followed_at(&self) -> u64 {
        self.followed_at
    }

    /// Returns whether the edge contains the given vertex at either end.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::edge::FollowEdge;
    ///
    /// let edge = FollowEdge::new(1, 2, 0);
    ///
    /// assert_eq!(edge.contains(1), true);
    /// assert_eq!(edge.contains(2), true);
    /// assert_eq!(edge.contains(3), false);
    /// ```
    pub fn contains(&self, vertex: u64) -> bool {
        self.source == vertex || self.target == vertex
    }

    /// Returns whether the edge follows its own source.
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}
