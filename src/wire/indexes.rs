//! Compact index projections of the full entity types.
//!
//! An index record is what goes into the `index/` pages of a cache: enough to
//! decide whether the full entity is worth fetching (fingerprint, timestamps,
//! parent references) plus `page_number`, the zero-based entity page within
//! the same cache where the full record lives.
//!
//! There is no `AddressIndex`: the address entity is its own index.

use crate::wire::entities::{Board, Key, Post, Thread, Truststate, Vote};
use crate::wire::types::{Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};

/// Index record for a board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardIndex {
    pub fingerprint: Fingerprint,
    pub creation: Timestamp,
    pub last_update: Timestamp,
    /// Zero-based entity page within the same cache holding the full record.
    pub page_number: usize,
}

impl BoardIndex {
    /// Projects an index record from the full entity.
    pub fn from_entity(entity: &Board, page_number: usize) -> Self {
        Self {
            fingerprint: entity.fingerprint.clone(),
            creation: entity.creation,
            last_update: entity.last_update,
            page_number,
        }
    }
}

/// Index record for a thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadIndex {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub creation: Timestamp,
    pub page_number: usize,
}

impl ThreadIndex {
    /// Projects an index record from the full entity.
    pub fn from_entity(entity: &Thread, page_number: usize) -> Self {
        Self {
            fingerprint: entity.fingerprint.clone(),
            board: entity.board.clone(),
            creation: entity.creation,
            page_number,
        }
    }
}

/// Index record for a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostIndex {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    pub creation: Timestamp,
    pub page_number: usize,
}

impl PostIndex {
    /// Projects an index record from the full entity.
    pub fn from_entity(entity: &Post, page_number: usize) -> Self {
        Self {
            fingerprint: entity.fingerprint.clone(),
            board: entity.board.clone(),
            thread: entity.thread.clone(),
            creation: entity.creation,
            page_number,
        }
    }
}

/// Index record for a vote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteIndex {
    pub fingerprint: Fingerprint,
    pub board: Fingerprint,
    pub thread: Fingerprint,
    pub target: Fingerprint,
    pub creation: Timestamp,
    pub last_update: Timestamp,
    pub page_number: usize,
}

impl VoteIndex {
    /// Projects an index record from the full entity.
    pub fn from_entity(entity: &Vote, page_number: usize) -> Self {
        Self {
            fingerprint: entity.fingerprint.clone(),
            board: entity.board.clone(),
            thread: entity.thread.clone(),
            target: entity.target.clone(),
            creation: entity.creation,
            last_update: entity.last_update,
            page_number,
        }
    }
}

/// Index record for a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyIndex {
    pub fingerprint: Fingerprint,
    pub creation: Timestamp,
    pub last_update: Timestamp,
    pub page_number: usize,
}

impl KeyIndex {
    /// Projects an index record from the full entity.
    pub fn from_entity(entity: &Key, page_number: usize) -> Self {
        Self {
            fingerprint: entity.fingerprint.clone(),
            creation: entity.creation,
            last_update: entity.last_update,
            page_number,
        }
    }
}

/// Index record for a trust state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TruststateIndex {
    pub fingerprint: Fingerprint,
    pub target: Fingerprint,
    pub creation: Timestamp,
    pub last_update: Timestamp,
    pub page_number: usize,
}

impl TruststateIndex {
    /// Projects an index record from the full entity.
    pub fn from_entity(entity: &Truststate, page_number: usize) -> Self {
        Self {
            fingerprint: entity.fingerprint.clone(),
            target: entity.target.clone(),
            creation: entity.creation,
            last_update: entity.last_update,
            page_number,
        }
    }
}
