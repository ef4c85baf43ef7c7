// file: src/enrichment/client.rs
// description: OpenAI-compatible chat-completion client for repository enrichment
// reference: https://platform.openai.com/docs/api-reference/chat/create

use crate::config::LlmConfig;
use crate::enrichment::{Enricher, RetryPolicy, build_prompt, parse_enrichment};
use crate::error::{PipelineError, Result};
use crate::models::EnrichmentResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct EnrichmentClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    temperature: f32,
    retry: RetryPolicy,
}

impl EnrichmentClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            endpoint: config.chat_completions_url(),
            model: config.model.clone(),
            temperature: config.temperature,
            retry: config.retry_policy(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Like [`Enricher::enrich`] but keeps the failure, so callers can tell
    /// an unreachable model ([`PipelineError::LlmRequest`],
    /// [`PipelineError::LlmTimeout`], [`PipelineError::LlmStatus`]) from a
    /// badly formatted answer ([`PipelineError::LlmResponse`]). Only
    /// timeouts and error statuses are retried.
    pub async fn try_enrich(
        &self,
        name: &str,
        description: Option<&str>,
        readme_excerpt: &str,
    ) -> Result<EnrichmentResult> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PipelineError::Config("no LLM API key configured".to_string()))?;

        let prompt = build_prompt(name, description, readme_excerpt);
        let prompt = prompt.as_str();

        let content = self
            .retry
            .execute(move |attempt| self.request_completion(api_key, prompt, attempt))
            .await?;

        parse_enrichment(&content)
    }

    async fn request_completion(&self, api_key: &str, prompt: &str, attempt: u32) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        debug!(
            "Requesting completion from {} (attempt {}, {} prompt chars)",
            self.endpoint,
            attempt,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::LlmTimeout
                } else {
                    PipelineError::LlmRequest(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!("LLM error body: {}", error_text);
            return Err(PipelineError::LlmStatus {
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            PipelineError::LlmResponse(format!("unexpected completion envelope: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::LlmResponse("completion has no content".to_string()))
    }
}

impl Enricher for EnrichmentClient {
    async fn enrich(
        &self,
        name: &str,
        description: Option<&str>,
        readme_excerpt: &str,
    ) -> EnrichmentResult {
        if !self.is_enabled() {
            info!("Skipping enrichment for {}: no LLM API key", name);
            return EnrichmentResult::fallback(description);
        }

        match self.try_enrich(name, description, readme_excerpt).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Enrichment failed for {}: {}", name, e);
                EnrichmentResult::fallback(description)
            }
        }
    }
}
