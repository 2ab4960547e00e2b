//! Resolved accounts, the vertices of a follow graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An account resolved from a username.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    handle: String,
    id: u64,
    registered_at: u64,
    avatar_url: Option<String>,
}

impl Identity {
    /// Creates a new identity, `registered_at` is in unix seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::identity::Identity;
    ///
    /// let alice = Identity::new("alice", 1, 1_700_000_000);
    /// assert_eq!(alice.id(), 1);
    /// assert_eq!(alice.avatar_url(), None);
    /// ```
    pub fn new(handle: impl Into<String>, id: u64, registered_at: u64) -> Self {
        Self {
            handle: handle.into(),
            id,
            registered_at,
            avatar_url: None,
        }
    }

    /// Attaches a profile picture url.
    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn registered_at(&self) -> u64 {
        self.registered_at
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

/// Collects the ids of a batch of identities, the set all graph output is restricted to.
///
/// # Examples
///
/// ```
/// use followgraph::identity::{known_ids, Identity};
///
/// let ids = known_ids(&[Identity::new("bob", 2, 0), Identity::new("alice", 1, 0)]);
/// assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2]);
/// ```
pub fn known_ids(identities: &[Identity]) -> BTreeSet<u64> {
    identities.iter().map(Identity::id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_avatar() {
        let alice = Identity::new("alice", 1, 0).with_avatar("https://i.imgur.com/a.png");

        assert_eq!(alice.avatar_url(), Some("https://i.imgur.com/a.png"));
        assert_eq!(alice.handle(), "alice");
    }

    #[test]
    fn known_ids_are_unique() {
        let ids = known_ids(&[
            Identity::new("alice", 1, 0),
            Identity::new("alice", 1, 0),
            Identity::new("carol", 3, 0),
        ]);

        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&1));
        assert!(ids.contains(&3));
    }
}
