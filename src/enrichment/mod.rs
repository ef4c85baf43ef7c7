// file: src/enrichment/mod.rs
// description: llm enrichment module exports
// reference: internal module structure

pub mod client;
pub mod prompt;
pub mod response;
pub mod retry;

pub use client::EnrichmentClient;
pub use prompt::build_prompt;
pub use response::{extract_fenced_block, parse_enrichment};
pub use retry::RetryPolicy;

use crate::models::EnrichmentResult;

/// Produces a category and polished description for one repository.
///
/// Implementations never fail: any problem degrades to
/// [`EnrichmentResult::fallback`].
#[allow(async_fn_in_trait)]
pub trait Enricher {
    async fn enrich(
        &self,
        name: &str,
        description: Option<&str>,
        readme_excerpt: &str,
    ) -> EnrichmentResult;
}
