// file: src/repository/github.rs
// description: GitHub REST client for paginated repository listing and readme contents
// reference: https://docs.github.com/en/rest/repos/contents#get-a-repository-readme

use crate::config::GitHubConfig;
use crate::error::{PipelineError, Result};
use crate::models::RepositoryRecord;
use crate::repository::RepositorySource;
use crate::utils::Validator;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
struct ReadmeResponse {
    #[serde(default)]
    content: Option<String>,
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
    per_page: u32,
    readme_max_chars: usize,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, readme_max_chars: usize) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            per_page: config.per_page,
            readme_max_chars,
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url).header("Accept", ACCEPT_HEADER);
        match &self.token {
            Some(token) => request.header("Authorization", format!("token {}", token)),
            None => request,
        }
    }

    pub async fn fetch_page(&self, account: &str, page: u32) -> Result<Vec<RepositoryRecord>> {
        let url = format!(
            "{}/users/{}/repos?per_page={}&page={}",
            self.api_base, account, self.per_page, page
        );

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::GitHub(format!("Failed to send listing request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::GitHub(format!(
                "Listing failed with status {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PipelineError::GitHub(format!("Failed to parse listing page: {}", e)))
    }

    /// `Ok(None)` when the repository has no README.
    pub async fn try_fetch_readme(&self, account: &str, repository: &str) -> Result<Option<String>> {
        let url = format!("{}/repos/{}/{}/readme", self.api_base, account, repository);

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::GitHub(format!("Failed to send readme request: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(PipelineError::GitHub(format!(
                "Readme request failed with status {}",
                response.status()
            )));
        }

        let readme: ReadmeResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::GitHub(format!("Failed to parse readme payload: {}", e)))?;

        readme
            .content
            .map(|content| decode_readme(&content, self.readme_max_chars))
            .transpose()
    }
}

impl RepositorySource for GitHubClient {
    async fn list_repositories(&self, account: &str) -> Vec<RepositoryRecord> {
        let mut repositories = Vec::new();
        let mut page = 1;

        loop {
            info!("Fetching page {} from GitHub...", page);
            match self.fetch_page(account, page).await {
                Ok(records) if records.is_empty() => break,
                Ok(records) => {
                    debug!("Page {} returned {} repositories", page, records.len());
                    repositories.extend(records);
                    page += 1;
                }
                Err(e) => {
                    warn!("Stopping repository listing at page {}: {}", page, e);
                    break;
                }
            }
        }

        repositories
    }

    async fn fetch_readme(&self, account: &str, repository: &str) -> String {
        match self.try_fetch_readme(account, repository).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("No README for {}", repository);
                String::new()
            }
            Err(e) => {
                warn!("Error fetching README for {}: {}", repository, e);
                String::new()
            }
        }
    }
}

/// Decodes the base64 `content` field of the contents API and keeps at most
/// `max_chars` characters. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_readme(content: &str, max_chars: usize) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| PipelineError::Decode(e.to_string()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(Validator::truncate_chars(&text, max_chars))
}
