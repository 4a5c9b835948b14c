//! # Agora - peer-to-peer forum network backend
//!
//! The backend core of the Agora network: a decentralized forum where
//! boards, threads, posts, votes, keys and trust states are exchanged
//! between nodes as content-addressed JSON documents.
//!
//! This crate is the **response generator**: it materializes local database
//! query results into the paginated wire-format pages peers consume, and it
//! precomputes daily on-disk caches of entity data so that most queries can
//! be served as static artifacts. The on-disk cache format *is* the wire
//! format; peers read the same JSON straight off disk.
//!
//! ## Features
//!
//! - **Polymorphic pagination**: seven entity kinds and seven index kinds,
//!   each split into fixed-size single-kind pages
//! - **Index projection**: compact catalog records pointing at the entity
//!   page holding the full record
//! - **Static artifacts**: expiry-stamped POST responses and daily caches
//!   under a deterministic directory layout, written atomically
//! - **Pluggable persistence**: everything reads through the [`store::Store`]
//!   trait; [`store::MemoryStore`] serves a fixed corpus without a database
//!
//! ## Example
//!
//! ```rust,no_run
//! use agora::config::Config;
//! use agora::responses::ResponseGenerator;
//! use agora::store::MemoryStore;
//! use agora::wire::{ApiResponse, QueryKind};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(Config::load("agora.json")?);
//! let generator = ResponseGenerator::new(config, MemoryStore::new());
//!
//! // Answer a peer's query about this node.
//! let request = ApiResponse::default();
//! let reply = generator.generate_post_response(QueryKind::Node, &request)?;
//! println!("{} bytes of wire JSON", reply.len());
//!
//! // Materialize the daily caches if they are due.
//! generator.generate_caches();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod responses;
pub mod store;
pub mod wire;

pub use error::{AgoraError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
