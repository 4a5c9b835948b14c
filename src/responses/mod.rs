//! Response generation: turning store queries into wire pages and caches.
//!
//! A peer query flows request → filter parsing → store → pagination →
//! envelope wrapping → bake: one page is answered inline, several are
//! persisted and answered with cache links. The periodic cache driver runs
//! the same pagination per entity kind over a daily time window, projects
//! index pages, and materializes everything as static artifacts a peer can
//! fetch without touching the database.
//!
//! [`generator::ResponseGenerator`] is the entry point; the submodules are
//! its moving parts.

pub mod filters;
pub mod generator;
pub mod paginate;
pub mod project;

mod naming;
mod writer;

pub use filters::FilterSet;
pub use generator::{CacheResponse, ResponseGenerator};
pub use paginate::{pages_of, paginate_entities, paginate_indexes};
pub use project::project_indexes;
