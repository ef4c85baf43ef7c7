// file: src/pipeline/orchestrator.rs
// description: sequences listing, cache lookup, enrichment, rendering and persistence
// reference: orchestrates the sequential generation workflow

use crate::cache::{CacheEntry, CacheStore};
use crate::config::Config;
use crate::enrichment::{Enricher, EnrichmentClient};
use crate::error::Result;
use crate::exporter::{MarkdownRenderer, write_document};
use crate::models::{CategorizedListing, ListingEntry};
use crate::pipeline::progress::{ProgressTracker, RunSummary};
use crate::repository::{GitHubClient, RepositorySource};
use crate::utils::Validator;
use chrono::Local;
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{error, info, warn};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Enrich every repository even when its cache entry is still valid.
    pub force_refresh: bool,
    /// Render only; neither the cache nor the README is written.
    pub dry_run: bool,
    /// Drop cache entries for repositories that are no longer listed.
    pub prune_stale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No usable account configured; nothing was fetched or written.
    MissingAccount,
    /// The listing came back empty; nothing was written.
    NoRepositories,
    Completed {
        summary: RunSummary,
        document: String,
    },
}

pub struct PipelineOrchestrator<S, E> {
    config: Config,
    source: S,
    enricher: E,
    show_progress: bool,
    colored_progress: bool,
}

impl PipelineOrchestrator<GitHubClient, EnrichmentClient> {
    pub fn from_config(config: Config) -> Result<Self> {
        let source = GitHubClient::new(&config.github, config.pipeline.readme_excerpt_chars)?;
        let enricher = EnrichmentClient::new(&config.llm)?;
        Ok(Self::new(config, source, enricher))
    }
}

impl<S: RepositorySource, E: Enricher> PipelineOrchestrator<S, E> {
    pub fn new(config: Config, source: S, enricher: E) -> Self {
        Self {
            config,
            source,
            enricher,
            show_progress: false,
            colored_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored_progress = colored;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn enricher(&self) -> &E {
        &self.enricher
    }

    /// Only failures writing the cache or the README surface as errors;
    /// network and data problems degrade to defaults along the way.
    pub async fn run(&self, options: RunOptions) -> Result<RunOutcome> {
        let Some(account) = self.config.github.account() else {
            error!("GITHUB_USERNAME is not set; nothing to do");
            return Ok(RunOutcome::MissingAccount);
        };

        if let Err(e) = Validator::validate_account_name(account) {
            error!("GITHUB_USERNAME is unusable ({}); nothing to do", e);
            return Ok(RunOutcome::MissingAccount);
        }

        let mut cache = CacheStore::load(&self.config.output.cache_path).await;

        let repositories = self.source.list_repositories(account).await;
        if repositories.is_empty() {
            warn!("No repositories found for {}", account);
            return Ok(RunOutcome::NoRepositories);
        }

        info!("Found {} repositories. Processing...", repositories.len());

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let pause = self.config.pipeline.enrichment_pause();
        let progress =
            ProgressTracker::new(repositories.len(), self.show_progress, self.colored_progress);

        let mut listing = CategorizedListing::new();
        let mut cache_dirty = false;

        for repository in &repositories {
            progress.set_message(repository.name.clone());
            let description = repository.description.as_deref();

            let cached = if options.force_refresh {
                None
            } else {
                cache
                    .lookup(&repository.name, description)
                    .map(|entry| entry.enrichment.clone())
            };

            let enrichment = match cached {
                Some(enrichment) => {
                    progress.inc_cache_hit();
                    enrichment
                }
                None => {
                    info!("Analyzing new/updated repo: {}", repository.name);
                    let readme = self.source.fetch_readme(account, &repository.name).await;
                    let enrichment = self
                        .enricher
                        .enrich(&repository.name, description, &readme)
                        .await;

                    cache.put(
                        repository.name.clone(),
                        CacheEntry::new(
                            repository.description.clone(),
                            enrichment.clone(),
                            timestamp.clone(),
                        ),
                    );
                    cache_dirty = true;
                    progress.inc_enriched();

                    if !pause.is_zero() {
                        sleep(pause).await;
                    }
                    enrichment
                }
            };

            if enrichment.is_unclassified() {
                progress.inc_unclassified();
            }

            listing.push(
                &enrichment.category,
                ListingEntry::from_parts(repository, &enrichment),
            );
        }

        progress.finish();
        let mut summary = progress.summary(repositories.len());
        summary.categories = listing.category_count();

        if options.prune_stale {
            let listed: HashSet<&str> = repositories.iter().map(|r| r.name.as_str()).collect();
            summary.cache_entries_pruned = cache.retain_names(&listed);
            if summary.cache_entries_pruned > 0 {
                info!("Pruned {} stale cache entries", summary.cache_entries_pruned);
                cache_dirty = true;
            }
        }

        let document =
            MarkdownRenderer::from_config(&self.config.output).render(&listing, &timestamp);

        if options.dry_run {
            info!("Dry run: leaving cache and README untouched");
        } else {
            if cache_dirty {
                cache.save().await?;
                summary.cache_written = true;
            }
            write_document(&self.config.output.readme_path, &document).await?;
            summary.readme_written = true;
            info!("README updated successfully");
        }

        Ok(RunOutcome::Completed { summary, document })
    }
}
