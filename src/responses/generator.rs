//! The response generator: the two top-level flows of the backend.
//!
//! `ResponseGenerator` owns the configuration snapshot and the persistence
//! handle and composes the smaller pieces (filter parsing, pagination, index
//! projection, artifact writing) into:
//!
//! - [`ResponseGenerator::generate_post_response`]: the synchronous reply to
//!   a peer's filtered query, inline for one page or redirecting through
//!   persisted cache links for many;
//! - [`ResponseGenerator::generate_caches`]: the periodic daily
//!   materialization of every entity kind into on-disk caches.
//!
//! Operations run to completion on the calling thread; the generator spawns
//! nothing and performs no internal fan-out.

use crate::config::Config;
use crate::error::{AgoraError, Result};
use crate::responses::filters::FilterSet;
use crate::responses::naming;
use crate::responses::paginate::{paginate_entities, paginate_indexes};
use crate::responses::project::project_indexes;
use crate::responses::writer;
use crate::store::Store;
use crate::wire::envelope::{ApiResponse, Response};
use crate::wire::types::{unix_now, EntityKind, QueryKind, Timestamp};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Minimum age of the previous cache generation before a new one runs.
const CACHE_GENERATION_INTERVAL_SECS: i64 = 24 * 60 * 60;

/// A fully paginated cache for one `(kind, time window)` pair, ready to be
/// written to disk. Index pages are empty for addresses.
#[derive(Debug, Clone)]
pub struct CacheResponse {
    /// Folder name the cache will live under, `cache_<hash>`.
    pub cache_name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub entity_pages: Vec<Response>,
    pub index_pages: Vec<Response>,
}

/// Generates peer-facing responses and on-disk caches from the local store.
pub struct ResponseGenerator<S> {
    config: Arc<Config>,
    store: S,
    /// Serializes the read-modify-rewrite of the per-kind catalogs. Within
    /// one process two concurrent cache creations can no longer drop each
    /// other's entries; cross-process callers still need a single writer.
    catalog_lock: Mutex<()>,
}

impl<S: Store> ResponseGenerator<S> {
    /// Creates a generator over the given configuration and store.
    pub fn new(config: Arc<Config>, store: S) -> Self {
        Self {
            config,
            store,
            catalog_lock: Mutex::new(()),
        }
    }

    /// Answers a peer's POST query with the wire JSON of the reply.
    ///
    /// The request's filters are parsed, the store queried, and the result
    /// paginated. One page is returned inline; more than one is persisted
    /// under `statics/responses/` and the reply carries cache links instead.
    /// Database failures are wrapped with the request context and returned;
    /// the transport answers those with an empty body.
    pub fn generate_post_response(&self, kind: QueryKind, req: &ApiResponse) -> Result<Vec<u8>> {
        let filters = FilterSet::from_request(req);
        let mut resp = match kind {
            QueryKind::Node => ApiResponse::prefilled(&self.config),
            QueryKind::Entity(EntityKind::Addresses) => {
                // Addresses carry no fingerprints; only the time window from
                // the filters applies.
                let addresses = self
                    .store
                    .read_addresses("", "", 0, filters.time_start, filters.time_end, 0, 0, 0)
                    .map_err(|e| {
                        AgoraError::database(format!(
                            "the remote's query failed in the local database: {e} \
                             (kind: addresses, window: {}..{})",
                            filters.time_start, filters.time_end
                        ))
                    })?;
                let local = Response {
                    addresses,
                    ..Default::default()
                };
                let mut resp = self.paginate_and_bake(&local)?;
                resp.endpoint = "entity".to_string();
                resp
            }
            QueryKind::Entity(entity_kind) => {
                let local = self
                    .store
                    .read(
                        entity_kind,
                        &filters.fingerprints,
                        &filters.embeds,
                        filters.time_start,
                        filters.time_end,
                    )
                    .map_err(|e| {
                        AgoraError::database(format!(
                            "the remote's query failed in the local database: {e} \
                             (kind: {entity_kind}, fingerprints: {}, window: {}..{})",
                            filters.fingerprints.len(),
                            filters.time_start,
                            filters.time_end
                        ))
                    })?;
                self.paginate_and_bake(&local)?
            }
        };
        resp.entity = kind.as_str().to_string();
        resp.timestamp = unix_now();
        resp.to_json()
    }

    fn paginate_and_bake(&self, local: &Response) -> Result<ApiResponse> {
        let pages = paginate_entities(local, &self.config.page_sizes);
        let wrapped = writer::wrap_pages(&pages, &self.config);
        writer::bake_post_response(&wrapped, &self.config)
    }

    /// Builds the in-memory cache for one kind over one time window.
    ///
    /// Non-address kinds get entity pages, projected indexes, and index
    /// pages; addresses get entity pages only.
    pub fn generate_cache_response(
        &self,
        kind: EntityKind,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<CacheResponse> {
        let db_err = |e: AgoraError| {
            AgoraError::database(format!(
                "cache generation failed in the local database: {e} \
                 (kind: {kind}, window: {start}..{end})"
            ))
        };
        match kind {
            EntityKind::Addresses => {
                let addresses = self
                    .store
                    .read_addresses("", "", 0, start, end, 0, 0, 0)
                    .map_err(db_err)?;
                let local = Response {
                    addresses,
                    ..Default::default()
                };
                Ok(CacheResponse {
                    cache_name: naming::cache_name(),
                    start,
                    end,
                    entity_pages: paginate_entities(&local, &self.config.page_sizes),
                    index_pages: Vec::new(),
                })
            }
            _ => {
                let local = self.store.read(kind, &[], &[], start, end).map_err(db_err)?;
                let entity_pages = paginate_entities(&local, &self.config.page_sizes);
                let indexes = project_indexes(&entity_pages);
                let index_pages = paginate_indexes(&indexes, &self.config.page_sizes);
                Ok(CacheResponse {
                    cache_name: naming::cache_name(),
                    start,
                    end,
                    entity_pages,
                    index_pages,
                })
            }
        }
    }

    /// Materializes one cache on disk and registers it in the kind catalog.
    ///
    /// Pages are fully written before the catalog is updated, so a peer that
    /// consults `index.json` first never sees a dangling cache link.
    pub fn create_cache(&self, kind: EntityKind, start: Timestamp, end: Timestamp) -> Result<()> {
        let cache = self.generate_cache_response(kind, start, end)?;
        let kind_dir = self.config.caches_location.join(kind.as_str());
        writer::write_cache(&kind_dir, &cache, kind, &self.config)?;
        let _guard = self
            .catalog_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer::update_kind_index(&kind_dir, &cache, &self.config)
    }

    /// Runs the periodic daily cache generation.
    ///
    /// A no-op until more than 24 hours have passed since the previous run.
    /// Each kind is attempted in the fixed order; a failing kind is logged
    /// and skipped so it cannot block the others, and the watermark advances
    /// regardless. Callers must not run this concurrently with itself.
    pub fn generate_caches(&self) {
        let now = unix_now();
        let last = self.config.last_cache_generation();
        if now - last <= CACHE_GENERATION_INTERVAL_SECS {
            return;
        }
        info!("generating daily caches for window {last}..{now}");
        for kind in EntityKind::ALL {
            if let Err(e) = self.create_cache(kind, last, now) {
                warn!("cache generation for {kind} failed, moving on: {e}");
            }
        }
        self.config.set_last_cache_generation(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::wire::Board;
    use std::fs;
    use tempfile::TempDir;

    fn generator_in(dir: &TempDir, data: Response) -> ResponseGenerator<MemoryStore> {
        let mut config = Config::default();
        config.user_directory = dir.path().to_path_buf();
        config.caches_location = dir.path().join("statics/caches");
        config.node.node_id = "localnode".into();
        ResponseGenerator::new(Arc::new(config), MemoryStore::with_data(data))
    }

    #[test]
    fn test_node_response() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir, Response::default());
        let bytes = generator
            .generate_post_response(QueryKind::Node, &ApiResponse::default())
            .unwrap();
        let resp: ApiResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(resp.entity, "node");
        assert!(resp.endpoint.is_empty());
        assert_eq!(resp.node_id.as_str(), "localnode");
        assert!(resp.timestamp > 0);
    }

    #[test]
    fn test_generate_caches_walks_every_kind() {
        let dir = TempDir::new().unwrap();
        let mut data = Response::default();
        data.boards.push(Board {
            fingerprint: "b1".into(),
            creation: 100,
            ..Default::default()
        });
        let generator = generator_in(&dir, data);
        generator.config.set_last_cache_generation(1);

        generator.generate_caches();
        let after = generator.config.last_cache_generation();
        assert!(after > 1);
        for kind in EntityKind::ALL {
            let kind_dir = dir.path().join("statics/caches").join(kind.as_str());
            assert!(kind_dir.join("index.json").exists(), "{kind}");
            let caches = fs::read_dir(&kind_dir)
                .unwrap()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with("cache_"))
                .count();
            assert_eq!(caches, 1, "{kind}");
        }

        // A fresh watermark makes the next run a no-op.
        generator.generate_caches();
        assert_eq!(generator.config.last_cache_generation(), after);
        let boards_dir = dir.path().join("statics/caches/boards");
        let caches = fs::read_dir(&boards_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("cache_"))
            .count();
        assert_eq!(caches, 1);
    }

    #[test]
    fn test_cache_response_for_addresses_has_no_index_pages() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir, Response::default());
        let cache = generator
            .generate_cache_response(EntityKind::Addresses, 0, 100)
            .unwrap();
        assert!(cache.cache_name.starts_with("cache_"));
        assert_eq!(cache.entity_pages.len(), 1);
        assert!(cache.index_pages.is_empty());
    }
}
