//! Core wire types shared by every entity and envelope.
//!
//! This module contains the small building blocks of the network protocol:
//! - `Timestamp`: Unix-seconds timestamps as they appear on the wire
//! - `Fingerprint`: opaque content-addressed entity identifier
//! - `EntityKind`: discriminator for the seven first-class entity types
//! - `QueryKind`: dispatch target of a peer POST query

use crate::error::AgoraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unix timestamp in seconds, signed as it is on the wire.
pub type Timestamp = i64;

/// Returns the current Unix time in seconds.
pub fn unix_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as Timestamp)
        .unwrap_or(0)
}

/// Opaque content-addressed identifier of an entity.
///
/// Fingerprints are produced by the entity-minting side of the network and
/// treated as opaque strings everywhere in this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Creates a fingerprint from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the fingerprint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the fingerprint is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Discriminator for the seven first-class entity types.
///
/// The string forms are wire- and path-critical: they name the per-kind cache
/// directories on disk and the `entity` tag in response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Boards,
    Threads,
    Posts,
    Votes,
    Addresses,
    Keys,
    Truststates,
}

impl EntityKind {
    /// All entity kinds in the fixed order the cache driver walks them.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Boards,
        EntityKind::Threads,
        EntityKind::Posts,
        EntityKind::Votes,
        EntityKind::Addresses,
        EntityKind::Keys,
        EntityKind::Truststates,
    ];

    /// Returns the wire string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Boards => "boards",
            EntityKind::Threads => "threads",
            EntityKind::Posts => "posts",
            EntityKind::Votes => "votes",
            EntityKind::Addresses => "addresses",
            EntityKind::Keys => "keys",
            EntityKind::Truststates => "truststates",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = AgoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boards" => Ok(EntityKind::Boards),
            "threads" => Ok(EntityKind::Threads),
            "posts" => Ok(EntityKind::Posts),
            "votes" => Ok(EntityKind::Votes),
            "addresses" => Ok(EntityKind::Addresses),
            "keys" => Ok(EntityKind::Keys),
            "truststates" => Ok(EntityKind::Truststates),
            other => Err(AgoraError::UnknownKind(other.to_string())),
        }
    }
}

/// Dispatch target of a peer POST query.
///
/// Peers either ask about the node itself or about one entity kind. The
/// transport layer parses the endpoint path into this type; unknown strings
/// fail there, before any generator code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// A query about the responding node itself.
    Node,
    /// A filtered query over one entity kind.
    Entity(EntityKind),
}

impl QueryKind {
    /// Returns the wire string for this query target.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Node => "node",
            QueryKind::Entity(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = AgoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "node" {
            return Ok(QueryKind::Node);
        }
        EntityKind::from_str(s).map(QueryKind::Entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_entity_kind_order() {
        let names: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "boards",
                "threads",
                "posts",
                "votes",
                "addresses",
                "keys",
                "truststates"
            ]
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "gizmos".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, AgoraError::UnknownKind(ref s) if s == "gizmos"));
    }

    #[test]
    fn test_query_kind_parses_node() {
        assert_eq!("node".parse::<QueryKind>().unwrap(), QueryKind::Node);
        assert_eq!(
            "posts".parse::<QueryKind>().unwrap(),
            QueryKind::Entity(EntityKind::Posts)
        );
        assert!("gadgets".parse::<QueryKind>().is_err());
    }

    #[test]
    fn test_fingerprint_display() {
        let fp = Fingerprint::new("abc123");
        assert_eq!(fp.to_string(), "abc123");
        assert_eq!(fp.as_str(), "abc123");
        assert!(!fp.is_empty());
        assert!(Fingerprint::default().is_empty());
    }

    #[test]
    fn test_unix_now_is_recent() {
        // Sanity bound: after 2024-01-01, before 2100.
        let now = unix_now();
        assert!(now > 1_704_067_200);
        assert!(now < 4_102_444_800);
    }
}
