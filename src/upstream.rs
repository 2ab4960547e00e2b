//! Decoding of the name registry and hub payloads into identities and follow edges.
//!
//! Fetching the payloads is left to the caller, a failed lookup should simply leave the
//! identity (or its edges) out of the batch handed to [`Graph::build`](crate::graph::Graph::build).

use serde::Deserialize;
use tracing::warn;

use crate::{
    edge::FollowEdge,
    error::{Error, Result},
    identity::Identity,
};

const LINK_ADD: &str = "MESSAGE_TYPE_LINK_ADD";
const FOLLOW: &str = "follow";

/// Splits a list of usernames separated by commas and/or whitespace.
///
/// # Examples
///
/// ```
/// use followgraph::upstream::parse_usernames;
///
/// assert_eq!(parse_usernames(" alice, bob\ncarol,,"), vec!["alice", "bob", "carol"]);
/// ```
pub fn parse_usernames(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|username| !username.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Deserialize)]
struct TransferResponse {
    transfer: Option<Transfer>,
}

#[derive(Debug, Deserialize)]
struct Transfer {
    to: Option<u64>,
    #[serde(default)]
    timestamp: u64,
}

/// Decodes the name registry's current transfer of `username` into an identity, the
/// registration time being the transfer time.
///
/// # Examples
///
/// ```
/// use followgraph::upstream::decode_transfer;
///
/// let json = r#"{"transfer": {"id": 7, "timestamp": 1700000000,
///     "username": "alice", "from": 0, "to": 42}}"#;
/// let alice = decode_transfer("alice", json).unwrap();
///
/// assert_eq!(alice.id(), 42);
/// assert_eq!(alice.registered_at(), 1_700_000_000);
/// ```
pub fn decode_transfer(username: &str, json: &str) -> Result<Identity> {
    let response: TransferResponse = serde_json::from_str(json)?;

    let transfer = response.transfer.ok_or_else(|| Error::MissingField {
        username: username.to_owned(),
        field: "transfer",
    })?;
    let id = transfer.to.ok_or_else(|| Error::MissingField {
        username: username.to_owned(),
        field: "transfer.to",
    })?;

    Ok(Identity::new(username, id, transfer.timestamp))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDataResponse {
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserData {
    user_data_body: Option<UserDataBody>,
}

#[derive(Debug, Deserialize)]
struct UserDataBody {
    value: Option<String>,
}

/// Decodes the hub's profile picture entry, `None` when the account has none set.
pub fn decode_avatar(json: &str) -> Result<Option<String>> {
    let response: UserDataResponse = serde_json::from_str(json)?;

    Ok(response
        .data
        .and_then(|data| data.user_data_body)
        .and_then(|body| body.value)
        .filter(|url| !url.is_empty()))
}

#[derive(Debug, Deserialize)]
struct LinksResponse {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    data: Option<MessageData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageData {
    #[serde(rename = "type")]
    kind: String,
    /// Seconds since the network epoch.
    #[serde(default)]
    timestamp: u64,
    link_body: Option<LinkBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkBody {
    #[serde(rename = "type")]
    kind: String,
    target_fid: Option<u64>,
}

/// Decodes the hub's link messages authored by `fid` into follow edges, keeping only link
/// additions of the `follow` type.
///
/// # Examples
///
/// ```
/// use followgraph::edge::{FollowEdge, NETWORK_EPOCH};
/// use followgraph::upstream::decode_links;
///
/// let json = r#"{"messages": [
///     {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "fid": 1, "timestamp": 100,
///               "linkBody": {"type": "follow", "targetFid": 2}}}
/// ]}"#;
///
/// assert_eq!(
///     decode_links(1, json).unwrap(),
///     vec![FollowEdge::new(1, 2, NETWORK_EPOCH + 100)]
/// );
/// ```
pub fn decode_links(fid: u64, json: &str) -> Result<Vec<FollowEdge>> {
    let response: LinksResponse = serde_json::from_str(json)?;

    let mut edges = Vec::with_capacity(response.messages.len());
    for message in response.messages {
        let Some(data) = message.data else {
            warn!(fid, "skipping link message without data");
            continue;
        };

        if data.kind != LINK_ADD {
            continue;
        }

        let Some(link) = data.link_body else {
            warn!(fid, "skipping link addition without a body");
            continue;
        };

        if link.kind != FOLLOW {
            continue;
        }

        let Some(target) = link.target_fid else {
            warn!(fid, "skipping follow without a target");
            continue;
        };

        match FollowEdge::from_network_time(fid, target, data.timestamp) {
            Some(edge) => edges.push(edge),
            None => warn!(
                fid,
                timestamp = data.timestamp,
                "skipping follow with an out of range timestamp"
            ),
        }
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::NETWORK_EPOCH;

    #[test]
    fn parse_usernames_separators() {
        assert_eq!(
            parse_usernames("balajis,dexhunter feides"),
            vec!["balajis", "dexhunter", "feides"]
        );
        assert_eq!(parse_usernames("a ,\t, b"), vec!["a", "b"]);
    }

    #[test]
    fn parse_usernames_empty() {
        assert!(parse_usernames("").is_empty());
        assert!(parse_usernames(" , ,\n").is_empty());
    }

    #[test]
    fn transfer_without_transfer() {
        let err = decode_transfer("ghost", r#"{}"#).unwrap_err();

        assert!(matches!(err, Error::MissingField { field: "transfer", .. }));
        assert_eq!(err.to_string(), "payload for ghost is missing transfer");
    }

    #[test]
    fn transfer_without_target() {
        let err = decode_transfer("ghost", r#"{"transfer": {"timestamp": 1}}"#).unwrap_err();

        assert!(matches!(err, Error::MissingField { field: "transfer.to", .. }));
    }

    #[test]
    fn transfer_malformed() {
        assert!(matches!(decode_transfer("alice", "not json"), Err(Error::Decode(_))));
    }

    #[test]
    fn avatar() {
        let json = r#"{"data": {"type": "MESSAGE_TYPE_USER_DATA_ADD",
            "userDataBody": {"type": "USER_DATA_TYPE_PFP",
                             "value": "https://i.imgur.com/x.png"}}}"#;

        assert_eq!(
            decode_avatar(json).unwrap(),
            Some("https://i.imgur.com/x.png".to_owned())
        );
    }

    #[test]
    fn avatar_missing() {
        assert_eq!(decode_avatar(r#"{}"#).unwrap(), None);
        assert_eq!(
            decode_avatar(r#"{"data": {"userDataBody": {"value": ""}}}"#).unwrap(),
            None
        );
    }

    #[test]
    fn links_keep_follow_additions_only() {
        let json = r#"{"messages": [
            {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "timestamp": 10,
                      "linkBody": {"type": "follow", "targetFid": 2}}},
            {"data": {"type": "MESSAGE_TYPE_LINK_REMOVE", "timestamp": 20,
                      "linkBody": {"type": "follow", "targetFid": 3}}},
            {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "timestamp": 30,
                      "linkBody": {"type": "block", "targetFid": 4}}},
            {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "timestamp": 40,
                      "linkBody": {"type": "follow"}}},
            {"hash": "0xdead"},
            {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "timestamp": 50,
                      "linkBody": {"type": "follow", "targetFid": 5}}}
        ], "nextPageToken": ""}"#;

        assert_eq!(
            decode_links(1, json).unwrap(),
            vec![
                FollowEdge::new(1, 2, NETWORK_EPOCH + 10),
                FollowEdge::new(1, 5, NETWORK_EPOCH + 50),
            ]
        );
    }

    #[test]
    fn links_skip_out_of_range_timestamps() {
        let json = r#"{"messages": [
            {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "timestamp": 18446744073709551615,
                      "linkBody": {"type": "follow", "targetFid": 2}}},
            {"data": {"type": "MESSAGE_TYPE_LINK_ADD", "timestamp": 7,
                      "linkBody": {"type": "follow", "targetFid": 3}}}
        ]}"#;

        assert_eq!(
            decode_links(1, json).unwrap(),
            vec![FollowEdge::new(1, 3, NETWORK_EPOCH + 7)]
        );
    }

    #[test]
    fn links_empty() {
        assert!(decode_links(1, r#"{"messages": []}"#).unwrap().is_empty());
        assert!(decode_links(1, r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn links_malformed() {
        assert!(matches!(decode_links(1, r#"{"messages": 3}"#), Err(Error::Decode(_))));
    }
}
