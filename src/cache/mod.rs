// file: src/cache/mod.rs
// description: enrichment cache module exports
// reference: internal module structure

pub mod store;

pub use store::{CacheEntry, CacheStore};
