//! The seven first-class entity types exchanged by the network.
//!
//! Every entity carries a stable `Fingerprint` assigned at minting time and a
//! `creation` timestamp; mutable entities also carry `last_update`. Parent
//! references (`board`, `thread`, `target`) are fingerprints of other
//! entities. The struct fields here are the wire format: peers parse the JSON
//! serialization of these types directly.
//!
//! `Address` is the odd one out. It has no fingerprint (addresses are
//! queryable only by time window), it embeds the `Protocol` and `Client`
//! version blocks, and the same type doubles as the local-node address
//! stamped into every response envelope.

use crate::wire::types::{Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};

/// Network protocol version block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    pub version_major: u8,
    pub version_minor: u16,
    /// Names of protocol extensions this node understands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

/// Client software version block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub version_major: u8,
    pub version_minor: u16,
    pub version_patch: u16,
    /// Human-readable client name, e.g. `"agora-core"`.
    pub name: String,
}

/// A discussion board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub fingerprint: Fingerprint,
    pub name: String,
    pub description: String,
    /// Fingerprint of the key that owns this board.
    pub owner: Fingerprint,
    pub creation: Timestamp,
    pub last_update: Timestamp,
}

/// A thread within a board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub fingerprint: Fingerprint,
    /// Parent board.
    pub board: Fingerprint,
    pub name: String,
    pub body: String,
    pub owner: Fingerprint,
    pub creation: Timestamp,
}

/// A post within a thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub fingerprint: Fingerprint,
    /// Parent board.
    pub board: Fingerprint,
    /// Parent thread.
    pub thread: Fingerprint,
    /// Direct parent: the thread root or another post.
    pub parent: Fingerprint,
    pub body: String,
    pub owner: Fingerprint,
    pub creation: Timestamp,
}

/// A vote cast on a board, thread or post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    /// The entity the vote applies to.
    pub target: Fingerprint,
    pub owner: Fingerprint,
    #[serde(rename = "type")]
    pub vote_type: u8,
    pub creation: Timestamp,
    pub last_update: Timestamp,
}

/// A network address of a node.
///
/// Addresses have no fingerprint and no index form; the entity is compact
/// enough to serve as its own index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Hostname or IP literal.
    pub location: String,
    /// Sub-path or onion descriptor, empty for plain hosts.
    pub sublocation: String,
    pub location_type: u8,
    pub port: u16,
    pub creation: Timestamp,
    pub last_online: Timestamp,
    pub protocol: Protocol,
    pub client: Client,
}

/// A public key identity on the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub fingerprint: Fingerprint,
    #[serde(rename = "type")]
    pub key_type: String,
    /// The key material itself, in its serialized form.
    pub key: String,
    pub name: String,
    pub creation: Timestamp,
    pub last_update: Timestamp,
}

/// A trust declaration from one key about another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Truststate {
    pub fingerprint: Fingerprint,
    /// The key this trust state is about.
    pub target: Fingerprint,
    pub owner: Fingerprint,
    #[serde(rename = "type")]
    pub trust_type: u8,
    pub creation: Timestamp,
    pub last_update: Timestamp,
}
