// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod cache;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use cache::{CacheEntry, CacheStore};
pub use config::{Config, GitHubConfig, LlmConfig, OutputConfig, PipelineConfig};
pub use enrichment::{Enricher, EnrichmentClient, RetryPolicy, parse_enrichment};
pub use error::{PipelineError, Result};
pub use exporter::{MarkdownRenderer, write_document};
pub use models::{CategorizedListing, EnrichmentResult, ListingEntry, RepositoryRecord};
pub use pipeline::{PipelineOrchestrator, ProgressTracker, RunOptions, RunOutcome, RunSummary};
pub use repository::{GitHubClient, RepositorySource};
pub use utils::Validator;
