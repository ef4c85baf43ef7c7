// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for a generation run
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub repositories_listed: usize,
    pub cache_hits: usize,
    pub enriched: usize,
    pub unclassified: usize,
    pub categories: usize,
    pub cache_entries_pruned: usize,
    pub cache_written: bool,
    pub readme_written: bool,
    pub duration_secs: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_hit_rate(&self) -> f64 {
        if self.repositories_listed == 0 {
            return 0.0;
        }
        (self.cache_hits as f64 / self.repositories_listed as f64) * 100.0
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    cache_hits: AtomicUsize,
    enriched: AtomicUsize,
    unclassified: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    /// A hidden tracker still counts; it just never draws. `colored` only
    /// picks the bar style.
    pub fn new(total_repositories: usize, visible: bool, colored: bool) -> Self {
        let bar = if visible {
            create_progress_bar(total_repositories as u64, colored)
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            cache_hits: AtomicUsize::new(0),
            enriched: AtomicUsize::new(0),
            unclassified: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn inc_enriched(&self) {
        self.enriched.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn inc_unclassified(&self) {
        self.unclassified.fetch_add(1, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn summary(&self, repositories_listed: usize) -> RunSummary {
        RunSummary {
            repositories_listed,
            cache_hits: self.cache_hits.load(Ordering::SeqCst),
            enriched: self.enriched.load(Ordering::SeqCst),
            unclassified: self.unclassified.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
            ..RunSummary::default()
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
    };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" })),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}
