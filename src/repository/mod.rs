// file: src/repository/mod.rs
// description: Repository listing and readme retrieval module exports
// reference: Internal module structure

pub mod github;

pub use github::{GitHubClient, decode_readme};

use crate::models::RepositoryRecord;

/// Where the orchestrator gets repositories and their README text from.
///
/// Both operations swallow failures: a broken listing yields the pages
/// gathered so far, a broken README fetch yields an empty string.
#[allow(async_fn_in_trait)]
pub trait RepositorySource {
    async fn list_repositories(&self, account: &str) -> Vec<RepositoryRecord>;

    async fn fetch_readme(&self, account: &str, repository: &str) -> String;
}
