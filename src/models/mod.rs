// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod enrichment;
pub mod listing;
pub mod repository;

pub use enrichment::{EnrichmentResult, UNCLASSIFIED};
pub use listing::{CategorizedListing, ListingEntry};
pub use repository::RepositoryRecord;
