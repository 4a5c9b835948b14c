//! Persistence seam for the response generator.
//!
//! The database itself lives in another part of the backend; the response
//! generator only ever pulls result bundles through the [`Store`] trait.
//! Bound sanitization (end before start, future timestamps) is the store's
//! job, not the caller's.
//!
//! [`MemoryStore`] is a small in-memory implementation with fingerprint and
//! time-window filtering. The test suites run against it, and embedders can
//! use it to serve a fixed corpus without a database.

use crate::error::Result;
use crate::wire::envelope::Response;
use crate::wire::types::{EntityKind, Fingerprint, Timestamp};
use crate::wire::Address;

/// Read access to the local entity database.
pub trait Store {
    /// Reads entities of one kind matching the given filters.
    ///
    /// Empty `fingerprints` means no fingerprint filter; a zero time bound
    /// means that side of the window is open. `embeds` names related kinds
    /// the caller wants pulled in alongside the primary results.
    fn read(
        &self,
        kind: EntityKind,
        fingerprints: &[Fingerprint],
        embeds: &[String],
        time_start: Timestamp,
        time_end: Timestamp,
    ) -> Result<Response>;

    /// Reads addresses matching the given filters.
    ///
    /// Addresses carry no fingerprints, so they are queryable only by
    /// location and time window. `max_results` of zero means unbounded;
    /// `address_type` of zero means any location type.
    #[allow(clippy::too_many_arguments)]
    fn read_addresses(
        &self,
        location: &str,
        sublocation: &str,
        port: u16,
        time_start: Timestamp,
        time_end: Timestamp,
        max_results: usize,
        offset: usize,
        address_type: u8,
    ) -> Result<Vec<Address>>;
}

/// Returns true when an entity's effective timestamp falls inside the window.
///
/// The effective timestamp is `last_update` when set, `creation` otherwise.
/// A window with both bounds at zero is inactive and admits everything.
fn in_window(creation: Timestamp, last_update: Timestamp, start: Timestamp, end: Timestamp) -> bool {
    if start <= 0 && end <= 0 {
        return true;
    }
    let ts = if last_update > 0 { last_update } else { creation };
    (start <= 0 || ts >= start) && (end <= 0 || ts <= end)
}

fn matches_fp(fingerprints: &[Fingerprint], fp: &Fingerprint) -> bool {
    fingerprints.is_empty() || fingerprints.contains(fp)
}

/// An in-memory [`Store`] over a fixed corpus.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Response,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store serving the given corpus.
    pub fn with_data(data: Response) -> Self {
        Self { data }
    }
}

impl Store for MemoryStore {
    fn read(
        &self,
        kind: EntityKind,
        fingerprints: &[Fingerprint],
        _embeds: &[String],
        time_start: Timestamp,
        time_end: Timestamp,
    ) -> Result<Response> {
        let mut out = Response::default();
        match kind {
            EntityKind::Boards => {
                out.boards = self
                    .data
                    .boards
                    .iter()
                    .filter(|b| matches_fp(fingerprints, &b.fingerprint))
                    .filter(|b| in_window(b.creation, b.last_update, time_start, time_end))
                    .cloned()
                    .collect();
            }
            EntityKind::Threads => {
                out.threads = self
                    .data
                    .threads
                    .iter()
                    .filter(|t| matches_fp(fingerprints, &t.fingerprint))
                    .filter(|t| in_window(t.creation, 0, time_start, time_end))
                    .cloned()
                    .collect();
            }
            EntityKind::Posts => {
                out.posts = self
                    .data
                    .posts
                    .iter()
                    .filter(|p| matches_fp(fingerprints, &p.fingerprint))
                    .filter(|p| in_window(p.creation, 0, time_start, time_end))
                    .cloned()
                    .collect();
            }
            EntityKind::Votes => {
                out.votes = self
                    .data
                    .votes
                    .iter()
                    .filter(|v| matches_fp(fingerprints, &v.fingerprint))
                    .filter(|v| in_window(v.creation, v.last_update, time_start, time_end))
                    .cloned()
                    .collect();
            }
            EntityKind::Addresses => {
                out.addresses = self.read_addresses("", "", 0, time_start, time_end, 0, 0, 0)?;
            }
            EntityKind::Keys => {
                out.keys = self
                    .data
                    .keys
                    .iter()
                    .filter(|k| matches_fp(fingerprints, &k.fingerprint))
                    .filter(|k| in_window(k.creation, k.last_update, time_start, time_end))
                    .cloned()
                    .collect();
            }
            EntityKind::Truststates => {
                out.truststates = self
                    .data
                    .truststates
                    .iter()
                    .filter(|t| matches_fp(fingerprints, &t.fingerprint))
                    .filter(|t| in_window(t.creation, t.last_update, time_start, time_end))
                    .cloned()
                    .collect();
            }
        }
        Ok(out)
    }

    fn read_addresses(
        &self,
        location: &str,
        sublocation: &str,
        port: u16,
        time_start: Timestamp,
        time_end: Timestamp,
        max_results: usize,
        offset: usize,
        address_type: u8,
    ) -> Result<Vec<Address>> {
        let filtered: Vec<Address> = self
            .data
            .addresses
            .iter()
            .filter(|a| location.is_empty() || a.location == location)
            .filter(|a| sublocation.is_empty() || a.sublocation == sublocation)
            .filter(|a| port == 0 || a.port == port)
            .filter(|a| address_type == 0 || a.location_type == address_type)
            .filter(|a| in_window(a.creation, a.last_online, time_start, time_end))
            .cloned()
            .collect();

        let end = if max_results == 0 {
            filtered.len()
        } else {
            (offset + max_results).min(filtered.len())
        };
        let start = offset.min(filtered.len());
        Ok(filtered[start..end.max(start)].to_vec())
    }
}
