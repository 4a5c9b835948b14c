//! Process-wide configuration snapshot.
//!
//! One `Config` is built at startup and shared read-only (behind an `Arc`)
//! with every component that generates responses. The only mutable cell is
//! the cache-generation watermark, which the periodic cache driver advances;
//! it is atomic so the snapshot stays `Sync` without locks, but the driver
//! itself must not run concurrently with itself.

use crate::error::{AgoraError, Result};
use crate::wire::entities::{Client, Protocol};
use crate::wire::types::{Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

/// Identity and version data of the local node, stamped into every envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Fingerprint of this node.
    pub node_id: Fingerprint,
    pub location_type: u8,
    /// Port this node serves on.
    pub port: u16,
    pub protocol: Protocol,
    pub client: Client,
}

/// Page sizes per entity kind and per index kind.
///
/// Every size must be positive. Index pages hold compact records, so their
/// sizes run several times larger than the entity pages they point into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    pub boards: usize,
    pub threads: usize,
    pub posts: usize,
    pub votes: usize,
    pub addresses: usize,
    pub keys: usize,
    pub truststates: usize,
    pub board_indexes: usize,
    pub thread_indexes: usize,
    pub post_indexes: usize,
    pub vote_indexes: usize,
    pub address_indexes: usize,
    pub key_indexes: usize,
    pub truststate_indexes: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            boards: 200,
            threads: 400,
            posts: 800,
            votes: 1600,
            addresses: 1000,
            keys: 800,
            truststates: 1600,
            board_indexes: 800,
            thread_indexes: 1600,
            post_indexes: 3200,
            vote_indexes: 6400,
            address_indexes: 4000,
            key_indexes: 3200,
            truststate_indexes: 6400,
        }
    }
}

/// The process-wide configuration snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node: NodeConfig,
    pub page_sizes: PageSizes,
    /// Root of the local node's data directory; multipart POST responses
    /// land under `<user_directory>/statics/responses/`.
    pub user_directory: PathBuf,
    /// Root of the precomputed caches; each entity kind gets a subdirectory.
    pub caches_location: PathBuf,
    /// How long a persisted multipart POST response stays servable.
    pub post_response_expiry_minutes: i64,
    /// Unix time of the last completed cache generation run. Advanced only
    /// by the cache driver; not to be written from anywhere else.
    pub last_cache_generation: AtomicI64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            page_sizes: PageSizes::default(),
            user_directory: PathBuf::from("agora_data"),
            caches_location: PathBuf::from("agora_data/statics/caches"),
            post_response_expiry_minutes: 60,
            last_cache_generation: AtomicI64::new(0),
        }
    }
}

impl Config {
    /// Loads a configuration snapshot from a JSON file.
    ///
    /// Absent fields fall back to their defaults, so a minimal file with just
    /// the node identity is enough to get a working node.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref()).map_err(|e| {
            AgoraError::config(format!(
                "failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AgoraError::config(format!(
                "failed to parse config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Returns the cache-generation watermark.
    pub fn last_cache_generation(&self) -> Timestamp {
        self.last_cache_generation.load(Ordering::SeqCst)
    }

    /// Advances the cache-generation watermark.
    pub fn set_last_cache_generation(&self, ts: Timestamp) {
        self.last_cache_generation.store(ts, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_page_sizes_positive() {
        let sizes = PageSizes::default();
        let all = [
            sizes.boards,
            sizes.threads,
            sizes.posts,
            sizes.votes,
            sizes.addresses,
            sizes.keys,
            sizes.truststates,
            sizes.board_indexes,
            sizes.thread_indexes,
            sizes.post_indexes,
            sizes.vote_indexes,
            sizes.address_indexes,
            sizes.key_indexes,
            sizes.truststate_indexes,
        ];
        assert!(all.iter().all(|&s| s > 0));
    }

    #[test]
    fn test_index_pages_hold_more_records_than_entity_pages() {
        let sizes = PageSizes::default();
        assert!(sizes.board_indexes >= sizes.boards);
        assert!(sizes.thread_indexes >= sizes.threads);
        assert!(sizes.post_indexes >= sizes.posts);
        assert!(sizes.vote_indexes >= sizes.votes);
        assert!(sizes.address_indexes >= sizes.addresses);
        assert!(sizes.key_indexes >= sizes.keys);
        assert!(sizes.truststate_indexes >= sizes.truststates);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"node": {"node_id": "abc", "port": 49200}, "post_response_expiry_minutes": 15}"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.node.node_id.as_str(), "abc");
        assert_eq!(config.node.port, 49200);
        assert_eq!(config.post_response_expiry_minutes, 15);
        // Untouched knobs keep their defaults.
        assert_eq!(config.page_sizes.boards, PageSizes::default().boards);
        assert_eq!(config.last_cache_generation(), 0);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load("/nonexistent/agora.json").unwrap_err();
        assert!(matches!(err, AgoraError::Config(_)));
    }

    #[test]
    fn test_watermark_advances() {
        let config = Config::default();
        assert_eq!(config.last_cache_generation(), 0);
        config.set_last_cache_generation(1_700_000_000);
        assert_eq!(config.last_cache_generation(), 1_700_000_000);
    }
}
