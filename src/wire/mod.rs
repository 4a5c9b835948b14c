//! Wire format of the Agora network.
//!
//! Everything in this module serializes to the JSON peers exchange. The
//! on-disk cache format and the wire format are the same bytes: caches are
//! read straight off disk and served as static artifacts, so these types are
//! the interoperability contract of the network.
//!
//! ## Layout
//!
//! - [`types`]: fingerprints, timestamps, entity-kind discriminators
//! - [`entities`]: the seven first-class entity types
//! - [`indexes`]: compact index projections with page pointers
//! - [`envelope`]: the `ApiResponse` outer document and the internal
//!   `Response` bundle

pub mod entities;
pub mod envelope;
pub mod indexes;
pub mod types;

pub use entities::{Address, Board, Client, Key, Post, Protocol, Thread, Truststate, Vote};
pub use envelope::{ApiResponse, Caching, Filter, Pagination, Response, ResultCache};
pub use indexes::{BoardIndex, KeyIndex, PostIndex, ThreadIndex, TruststateIndex, VoteIndex};
pub use types::{unix_now, EntityKind, Fingerprint, QueryKind, Timestamp};
