//! Persisting response pages as static artifacts.
//!
//! Two artifact families live on disk. Multipart POST responses go under
//! `<user_directory>/statics/responses/<expiry>_<hash>/` and are pointed at
//! by cache links in the synchronous reply. Day caches go under
//! `<caches_location>/<kind>/cache_<hash>/`, with index pages in an `index/`
//! subdirectory and a per-kind `index.json` cataloguing every cache.
//!
//! Files are the wire format: peers fetch them byte-for-byte. Every write
//! goes to a `.tmp` sibling first and is renamed into place so a peer
//! fetching mid-generation never sees a torn page.

use crate::config::Config;
use crate::error::Result;
use crate::responses::generator::CacheResponse;
use crate::responses::naming;
use crate::wire::envelope::{ApiResponse, Response, ResultCache};
use crate::wire::types::{unix_now, EntityKind};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, info, warn};

/// Permission bits for artifact files and directories.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o755;

#[cfg(unix)]
fn set_mode(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Creates a directory (and parents) with the artifact permission bits.
fn create_path(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    set_mode(path)
}

/// Writes an artifact file atomically: tmp sibling, then rename.
fn save_file(dir: &Path, filename: &str, contents: &[u8]) -> io::Result<()> {
    let tmp = dir.join(format!("{filename}.tmp"));
    fs::write(&tmp, contents)?;
    set_mode(&tmp)?;
    fs::rename(tmp, dir.join(filename))
}

/// Wraps raw pages into envelopes, stamping the POST pagination convention:
/// `pages` is the highest page number (`count - 1`), `current_page` the
/// page's own position.
pub(crate) fn wrap_pages(pages: &[Response], config: &Config) -> Vec<ApiResponse> {
    let highest = (pages.len() as u64).saturating_sub(1);
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let mut resp = ApiResponse::prefilled(config);
            resp.response_body = page.clone();
            resp.pagination.pages = highest;
            resp.pagination.current_page = i as u64;
            resp
        })
        .collect()
}

/// Bakes wrapped pages into the final POST reply.
///
/// A single page is returned inline as a `singular_post_response`. Multiple
/// pages are persisted under an expiry-stamped folder and the reply becomes a
/// `multipart_post_response` carrying one cache link per file written. Page
/// files are restamped with `pages = count` (total, not highest; peers
/// depend on this asymmetry against the inline convention).
///
/// # Panics
///
/// Panics when called with zero pages; the paginator always produces at
/// least one, so an empty slice is a bug in the caller.
pub(crate) fn bake_post_response(pages: &[ApiResponse], config: &Config) -> Result<ApiResponse> {
    let mut resp = ApiResponse::prefilled(config);
    match pages.len() {
        0 => {
            error!("a POST request produced no result pages at all");
            panic!("bake_post_response called with zero pages");
        }
        1 => {
            resp.pagination.pages = 0;
            resp.pagination.current_page = 0;
            resp.entity = pages[0]
                .response_body
                .dominant_kind()
                .map(|k| k.as_str().to_string())
                .unwrap_or_default();
            resp.endpoint = "singular_post_response".to_string();
            resp.response_body = pages[0].response_body.clone();
        }
        count => {
            let folder = naming::post_response_folder(config.post_response_expiry_minutes);
            let response_dir = config
                .user_directory
                .join("statics")
                .join("responses")
                .join(&folder);
            create_path(&response_dir)?;
            let now = unix_now();
            let mut jsons = Vec::with_capacity(count);
            for (i, page) in pages.iter().enumerate() {
                let mut page = page.clone();
                let entity = page
                    .response_body
                    .dominant_kind()
                    .map(|k| k.as_str())
                    .unwrap_or("");
                page.pagination.pages = count as u64;
                page.pagination.current_page = i as u64;
                page.timestamp = now;
                page.entity = entity.to_string();
                page.endpoint = format!("{entity}_post");
                match page.to_json() {
                    Ok(json) => jsons.push(json),
                    Err(e) => info!(
                        "one page of a multipart POST response failed to convert to JSON, \
                         omitting it: {e}"
                    ),
                }
            }
            for (i, json) in jsons.iter().enumerate() {
                save_file(&response_dir, &format!("{i}.json"), json)?;
                resp.results.push(ResultCache {
                    response_url: folder.clone(),
                    ..Default::default()
                });
            }
            resp.endpoint = "multipart_post_response".to_string();
        }
    }
    Ok(resp)
}

/// Writes a whole cache (entity pages plus, for non-address kinds, index
/// pages) under `entity_cache_dir/<cache_name>/`.
///
/// File names come from each page's own `current_page`, so the basename of
/// every artifact equals the page number it declares.
pub(crate) fn write_cache(
    entity_cache_dir: &Path,
    cache: &CacheResponse,
    kind: EntityKind,
    config: &Config,
) -> Result<()> {
    let cache_dir = entity_cache_dir.join(&cache.cache_name);
    create_path(&cache_dir)?;
    let now = unix_now();

    if kind != EntityKind::Addresses {
        let index_dir = cache_dir.join("index");
        create_path(&index_dir)?;
        let mut index_pages = wrap_pages(&cache.index_pages, config);
        for page in &mut index_pages {
            stamp_cache_page(page, "entity_index", kind, &cache.cache_name, now);
            let json = page.to_json()?;
            save_file(
                &index_dir,
                &format!("{}.json", page.pagination.current_page),
                &json,
            )?;
        }
    }

    let mut entity_pages = wrap_pages(&cache.entity_pages, config);
    for page in &mut entity_pages {
        stamp_cache_page(page, "entity", kind, &cache.cache_name, now);
        let json = page.to_json()?;
        save_file(
            &cache_dir,
            &format!("{}.json", page.pagination.current_page),
            &json,
        )?;
    }
    Ok(())
}

fn stamp_cache_page(
    page: &mut ApiResponse,
    endpoint: &str,
    kind: EntityKind,
    cache_name: &str,
    now: i64,
) {
    page.endpoint = endpoint.to_string();
    page.entity = kind.as_str().to_string();
    page.timestamp = now;
    page.caching.served_from_cache = true;
    page.caching.current_cache_url = cache_name.to_string();
    page.caching.cache_scope = "day".to_string();
}

/// Appends a cache link to the per-kind catalog, `<kind_dir>/index.json`,
/// creating the catalog on first use.
///
/// A missing catalog is normal (first cache for this kind). An unparseable
/// one is replaced with a fresh envelope rather than poisoning every future
/// cache run.
pub(crate) fn update_kind_index(
    kind_dir: &Path,
    cache: &CacheResponse,
    config: &Config,
) -> Result<()> {
    let index_path = kind_dir.join("index.json");
    let mut index = match fs::read(&index_path) {
        Ok(bytes) => match serde_json::from_slice::<ApiResponse>(&bytes) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    "kind catalog {} is unreadable, starting a fresh one: {e}",
                    index_path.display()
                );
                ApiResponse::prefilled(config)
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => ApiResponse::prefilled(config),
        Err(e) => return Err(e.into()),
    };

    index.results.push(ResultCache {
        response_url: cache.cache_name.clone(),
        starts_from: cache.start,
        ends_at: cache.end,
    });
    index.timestamp = unix_now();
    index.caching.served_from_cache = true;
    index.caching.cache_scope = "day".to_string();

    let json = index.to_json()?;
    save_file(kind_dir, "index.json", &json)?;
    Ok(())
}
