// file: src/enrichment/response.rs
// description: strict extraction of the enrichment object from model output
// reference: https://docs.rs/regex

use crate::error::{PipelineError, Result};
use crate::models::EnrichmentResult;
use lazy_static::lazy_static;
use regex::Regex;

// An unterminated fence runs to the end of the output.
lazy_static! {
    static ref JSON_FENCE: Regex = Regex::new(r"(?is)```json[ \t]*\r?\n?(.*?)(?:```|\z)")
        .expect("JSON_FENCE regex is valid");

    static ref ANY_FENCE: Regex =
        Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)(?:```|\z)")
            .expect("ANY_FENCE regex is valid");
}

/// Direct JSON decode first, then the first fenced block (a `json`-tagged
/// fence wins over an untagged one). Anything else is an
/// [`PipelineError::LlmResponse`].
pub fn parse_enrichment(content: &str) -> Result<EnrichmentResult> {
    let trimmed = content.trim();

    if let Ok(result) = serde_json::from_str::<EnrichmentResult>(trimmed) {
        return Ok(result.normalized());
    }

    let block = extract_fenced_block(trimmed).ok_or_else(|| {
        PipelineError::LlmResponse("output is neither JSON nor a fenced block".to_string())
    })?;

    serde_json::from_str::<EnrichmentResult>(block)
        .map(EnrichmentResult::normalized)
        .map_err(|e| PipelineError::LlmResponse(format!("fenced block is not valid JSON: {}", e)))
}

pub fn extract_fenced_block(content: &str) -> Option<&str> {
    JSON_FENCE
        .captures(content)
        .or_else(|| ANY_FENCE.captures(content))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
}
