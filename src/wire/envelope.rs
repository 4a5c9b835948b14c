//! The response envelope and the internal result bundle.
//!
//! `ApiResponse` is the outer wire document every peer reply is wrapped in.
//! Its JSON serialization is the compatibility contract of the network: the
//! same bytes are served over HTTP and read straight off the on-disk caches,
//! so field names, nesting and the 0-indexed pagination must never drift.
//!
//! `Response` is the internal bundle a database query produces: seven entity
//! slices plus seven index slices, any subset populated. The paginator splits
//! it into pages with at most one slice populated each.

use crate::config::Config;
use crate::error::{AgoraError, Result};
use crate::wire::entities::{Address, Board, Key, Post, Thread, Truststate, Vote};
use crate::wire::indexes::{
    BoardIndex, KeyIndex, PostIndex, ThreadIndex, TruststateIndex, VoteIndex,
};
use crate::wire::types::{EntityKind, Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};

/// A bundle of query results, at most one slice per kind.
///
/// Address entities double as their own index records, so `address_indexes`
/// holds `Address` values rather than a dedicated index type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boards: Vec<Board>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<Thread>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<Vote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<Key>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub truststates: Vec<Truststate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub board_indexes: Vec<BoardIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thread_indexes: Vec<ThreadIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_indexes: Vec<PostIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vote_indexes: Vec<VoteIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_indexes: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_indexes: Vec<KeyIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub truststate_indexes: Vec<TruststateIndex>,
}

impl Response {
    /// Returns true if no slice is populated.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
            && self.threads.is_empty()
            && self.posts.is_empty()
            && self.votes.is_empty()
            && self.addresses.is_empty()
            && self.keys.is_empty()
            && self.truststates.is_empty()
            && self.board_indexes.is_empty()
            && self.thread_indexes.is_empty()
            && self.post_indexes.is_empty()
            && self.vote_indexes.is_empty()
            && self.address_indexes.is_empty()
            && self.key_indexes.is_empty()
            && self.truststate_indexes.is_empty()
    }

    /// Returns the first populated entity slice in the fixed priority order,
    /// or `None` when only index slices (or nothing) are populated.
    pub fn dominant_kind(&self) -> Option<EntityKind> {
        if !self.boards.is_empty() {
            Some(EntityKind::Boards)
        } else if !self.threads.is_empty() {
            Some(EntityKind::Threads)
        } else if !self.posts.is_empty() {
            Some(EntityKind::Posts)
        } else if !self.votes.is_empty() {
            Some(EntityKind::Votes)
        } else if !self.addresses.is_empty() {
            Some(EntityKind::Addresses)
        } else if !self.keys.is_empty() {
            Some(EntityKind::Keys)
        } else if !self.truststates.is_empty() {
            Some(EntityKind::Truststates)
        } else {
            None
        }
    }
}

/// One request filter: a type tag plus its values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// 0-indexed pagination state of a response page.
///
/// `pages` carries the highest page number (`count - 1`) on cache pages but
/// the total page count on multipart POST page files; both conventions are
/// load-bearing for peers and reproduced exactly by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub pages: u64,
    pub current_page: u64,
}

/// A cache-link pointer into the responder's static artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCache {
    /// Folder name of the artifact, relative to the serving root.
    pub response_url: String,
    #[serde(default)]
    pub starts_from: Timestamp,
    #[serde(default)]
    pub ends_at: Timestamp,
}

/// Cache provenance metadata stamped onto served pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Caching {
    pub served_from_cache: bool,
    #[serde(default)]
    pub current_cache_url: String,
    #[serde(default)]
    pub cache_scope: String,
}

/// The outer wire document wrapping every reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Fingerprint of the responding node.
    pub node_id: Fingerprint,
    /// The responding node's own address, version blocks included.
    pub address: Address,
    /// String tag of the dominant entity kind, or `"node"`.
    pub entity: String,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultCache>,
    pub pagination: Pagination,
    pub caching: Caching,
    #[serde(default, skip_serializing_if = "Response::is_empty")]
    pub response_body: Response,
}

impl ApiResponse {
    /// Constructs an envelope prefilled with the local node's identity,
    /// address and version blocks from the configuration snapshot.
    pub fn prefilled(config: &Config) -> Self {
        let mut resp = ApiResponse::default();
        resp.node_id = config.node.node_id.clone();
        resp.address.location_type = config.node.location_type;
        resp.address.port = config.node.port;
        resp.address.protocol = config.node.protocol.clone();
        resp.address.client = config.node.client.clone();
        resp
    }

    /// Serializes the envelope to its wire JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            AgoraError::serialization(format!(
                "this response failed to convert to JSON: {} (endpoint: {}, entity: {})",
                e, self.endpoint, self.entity
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_empty_response_is_empty() {
        assert!(Response::default().is_empty());
        let resp = Response {
            keys: vec![Key::default()],
            ..Default::default()
        };
        assert!(!resp.is_empty());
    }

    #[test]
    fn test_dominant_kind_priority_order() {
        let mut resp = Response::default();
        assert_eq!(resp.dominant_kind(), None);
        resp.truststates.push(Truststate::default());
        assert_eq!(resp.dominant_kind(), Some(EntityKind::Truststates));
        resp.votes.push(Vote::default());
        assert_eq!(resp.dominant_kind(), Some(EntityKind::Votes));
        resp.boards.push(Board::default());
        assert_eq!(resp.dominant_kind(), Some(EntityKind::Boards));
        // Index slices never dominate.
        let indexes_only = Response {
            board_indexes: vec![BoardIndex::default()],
            ..Default::default()
        };
        assert_eq!(indexes_only.dominant_kind(), None);
    }

    #[test]
    fn test_prefilled_envelope_carries_node_identity() {
        let mut config = Config::default();
        config.node.node_id = "nodefp".into();
        config.node.port = 49_999;
        config.node.client.name = "agora-core".to_string();
        let resp = ApiResponse::prefilled(&config);
        assert_eq!(resp.node_id.as_str(), "nodefp");
        assert_eq!(resp.address.port, 49_999);
        assert_eq!(resp.address.client.name, "agora-core");
        assert!(resp.entity.is_empty());
        assert_eq!(resp.pagination, Pagination::default());
    }

    #[test]
    fn test_wire_json_shape() {
        let mut resp = ApiResponse::default();
        resp.entity = "boards".to_string();
        resp.endpoint = "entity".to_string();
        resp.timestamp = 1_000;
        resp.response_body.boards.push(Board {
            fingerprint: "bfp".into(),
            name: "general".to_string(),
            ..Default::default()
        });
        let json: serde_json::Value =
            serde_json::from_slice(&resp.to_json().unwrap()).unwrap();
        assert_eq!(json["entity"], "boards");
        assert_eq!(json["endpoint"], "entity");
        assert_eq!(json["pagination"]["current_page"], 0);
        assert_eq!(json["response_body"]["boards"][0]["fingerprint"], "bfp");
        // Unpopulated slices and filter lists stay off the wire.
        assert!(json["response_body"].get("threads").is_none());
        assert!(json.get("filters").is_none());
    }

    #[test]
    fn test_envelope_roundtrip() {
        let mut resp = ApiResponse::default();
        resp.results.push(ResultCache {
            response_url: "cache_abc".to_string(),
            starts_from: 10,
            ends_at: 20,
        });
        resp.caching.served_from_cache = true;
        resp.caching.cache_scope = "day".to_string();
        let bytes = resp.to_json().unwrap();
        let back: ApiResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, resp);
    }
}
