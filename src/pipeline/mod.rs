// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;

pub use orchestrator::{PipelineOrchestrator, RunOptions, RunOutcome, TIMESTAMP_FORMAT};
pub use progress::{ProgressTracker, RunSummary};
