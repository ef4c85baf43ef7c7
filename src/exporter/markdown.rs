// file: src/exporter/markdown.rs
// description: categorized markdown table rendering for the profile readme

use crate::config::OutputConfig;
use crate::error::{PipelineError, Result};
use crate::models::CategorizedListing;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    title: String,
    intro: String,
}

impl MarkdownRenderer {
    pub fn new(title: impl Into<String>, intro: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            intro: intro.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.title.clone(), config.intro.clone())
    }

    /// Deterministic for a given listing and timestamp.
    pub fn render(&self, listing: &CategorizedListing, timestamp: &str) -> String {
        let mut content = String::new();

        let _ = write!(content, "# {}\n\n", self.title);
        if self.intro.trim().is_empty() {
            let _ = write!(content, "Last updated: {}\n\n", timestamp);
        } else {
            let _ = write!(
                content,
                "{} Last updated: {}\n\n",
                self.intro.trim(),
                timestamp
            );
        }

        for (category, entries) in listing.categories() {
            let _ = write!(content, "## {}\n\n", category);
            content.push_str("| Repository | Description |\n");
            content.push_str("| ---------- | ----------- |\n");
            for entry in entries {
                let description = if entry.description.trim().is_empty() {
                    "-".to_string()
                } else {
                    escape_cell(&entry.description)
                };
                let _ = writeln!(
                    content,
                    "| [{}]({}) | {} |",
                    escape_cell(&entry.name),
                    entry.url,
                    description
                );
            }
            content.push('\n');
        }

        content
    }
}

/// Pipes would end the cell and newlines the row.
fn escape_cell(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// Overwrites `path`, creating missing parent directories.
pub async fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| PipelineError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(path, content)
        .await
        .map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
