// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use repo_showcase::utils::logging::{format_error, format_info, format_success, format_warning};
use repo_showcase::{CacheStore, Config, PipelineOrchestrator, RunOptions, RunOutcome};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "repo_showcase")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Categorized profile README generator for GitHub accounts", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = repo_showcase::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Hide the progress bar
    #[arg(long, action = ArgAction::SetTrue)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Whether to draw the progress bar, and whether to draw it in color.
    fn progress(&self) -> (bool, bool) {
        (!self.no_progress, self.color)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List repositories, enrich new or changed ones and write the README
    Generate {
        /// Re-enrich every repository, ignoring cached results
        #[arg(long)]
        force: bool,

        /// Print the document instead of writing the README and cache
        #[arg(long)]
        dry_run: bool,

        /// Remove cache entries for repositories that no longer exist
        #[arg(long)]
        prune: bool,
    },

    /// Show cached enrichment results
    Cache,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    repo_showcase::utils::logging::init_logger(cli.color, cli.verbose);

    if !cli.config.exists() {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
    }

    let config =
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;

    let progress = cli.progress();

    match cli.command {
        Commands::Generate {
            force,
            dry_run,
            prune,
        } => {
            let options = RunOptions {
                force_refresh: force,
                dry_run,
                prune_stale: prune,
            };
            cmd_generate(config, options, progress).await?;
        }
        Commands::Cache => {
            cmd_cache(&config).await;
        }
    }

    Ok(())
}

async fn cmd_generate(
    config: Config,
    options: RunOptions,
    (show_progress, colored): (bool, bool),
) -> Result<()> {
    info!("Generating repository showcase");

    if config.llm.api_key.is_none() {
        warn!("LLM_API_KEY is not set; repositories will be listed as Unclassified");
    }

    let readme_path = config.output.readme_path.clone();
    let orchestrator = PipelineOrchestrator::from_config(config)
        .context("Failed to create API clients")?
        .with_progress(show_progress, colored);

    match orchestrator.run(options).await? {
        RunOutcome::MissingAccount => {
            println!(
                "{}",
                format_error("GITHUB_USERNAME is not set or is not a valid account name.")
            );
        }
        RunOutcome::NoRepositories => {
            println!("{}", format_warning("No repositories found."));
        }
        RunOutcome::Completed { summary, document } => {
            if options.dry_run {
                println!("{}", document);
            }

            println!(
                "{}",
                format_info(&format!(
                    "{} repositories in {} categories ({} cached, {} enriched, {:.0}% cache hits)",
                    summary.repositories_listed,
                    summary.categories,
                    summary.cache_hits,
                    summary.enriched,
                    summary.cache_hit_rate()
                ))
            );

            if summary.cache_entries_pruned > 0 {
                println!(
                    "{}",
                    format_info(&format!(
                        "Pruned {} stale cache entries",
                        summary.cache_entries_pruned
                    ))
                );
            }

            if summary.readme_written {
                println!(
                    "{}",
                    format_success(&format!("{} updated successfully", readme_path.display()))
                );
            }
        }
    }

    Ok(())
}

async fn cmd_cache(config: &Config) {
    let store = CacheStore::load(&config.output.cache_path).await;

    if store.is_empty() {
        println!(
            "{}",
            format_warning(&format!(
                "No cached enrichments in {}",
                store.path().display()
            ))
        );
        return;
    }

    println!("\nCached enrichments in {}\n", store.path().display());
    println!("{:<32} {:<16} {:<20}", "REPOSITORY", "CATEGORY", "LAST UPDATED");
    println!("{}", "=".repeat(70));

    for (name, entry) in store.entries() {
        let timestamp = if entry.timestamp.is_empty() {
            "-"
        } else {
            entry.timestamp.as_str()
        };
        println!(
            "{:<32} {:<16} {:<20}",
            name, entry.enrichment.category, timestamp
        );
    }

    println!("\n{} entries", store.len());
}
