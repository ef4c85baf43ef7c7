// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::enrichment::RetryPolicy;
use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub github: GitHubConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    pub api_base: String,
    pub per_page: u32,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub readme_path: PathBuf,
    pub cache_path: PathBuf,
    pub title: String,
    pub intro: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub readme_excerpt_chars: usize,
    pub enrichment_pause_ms: u64,
}

impl Config {
    /// Layers built-in defaults, the optional TOML file, `REPO_SHOWCASE__*`
    /// variables and finally the well-known variables (`GITHUB_USERNAME`,
    /// `GITHUB_TOKEN`, `LLM_API_KEY`, `LLM_API_BASE`, `LLM_MODEL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let settings = config::Config::builder()
            .set_default("github.api_base", defaults.github.api_base)
            .and_then(|b| b.set_default("github.per_page", i64::from(defaults.github.per_page)))
            .and_then(|b| b.set_default("github.user_agent", defaults.github.user_agent))
            .and_then(|b| b.set_default("llm.api_base", defaults.llm.api_base))
            .and_then(|b| b.set_default("llm.model", defaults.llm.model))
            .and_then(|b| b.set_default("llm.temperature", f64::from(defaults.llm.temperature)))
            .and_then(|b| b.set_default("llm.timeout_secs", defaults.llm.timeout_secs))
            .and_then(|b| b.set_default("llm.max_attempts", i64::from(defaults.llm.max_attempts)))
            .and_then(|b| b.set_default("llm.retry_delay_ms", defaults.llm.retry_delay_ms))
            .and_then(|b| {
                b.set_default(
                    "output.readme_path",
                    defaults.output.readme_path.display().to_string(),
                )
            })
            .and_then(|b| {
                b.set_default(
                    "output.cache_path",
                    defaults.output.cache_path.display().to_string(),
                )
            })
            .and_then(|b| b.set_default("output.title", defaults.output.title))
            .and_then(|b| b.set_default("output.intro", defaults.output.intro))
            .and_then(|b| {
                b.set_default(
                    "pipeline.readme_excerpt_chars",
                    defaults.pipeline.readme_excerpt_chars as u64,
                )
            })
            .and_then(|b| {
                b.set_default(
                    "pipeline.enrichment_pause_ms",
                    defaults.pipeline.enrichment_pause_ms,
                )
            })
            .map_err(|e| PipelineError::Config(e.to_string()))?
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("REPO_SHOWCASE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("github.username", env_var("GITHUB_USERNAME"))
            .and_then(|b| b.set_override_option("github.token", env_var("GITHUB_TOKEN")))
            .and_then(|b| b.set_override_option("llm.api_key", env_var("LLM_API_KEY")))
            .and_then(|b| b.set_override_option("llm.api_base", env_var("LLM_API_BASE")))
            .and_then(|b| b.set_override_option("llm.model", env_var("LLM_MODEL")))
            .map_err(|e| PipelineError::Config(e.to_string()))?
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            github: GitHubConfig {
                username: None,
                token: None,
                api_base: "https://api.github.com".to_string(),
                per_page: 100,
                user_agent: concat!("repo_showcase/", env!("CARGO_PKG_VERSION")).to_string(),
            },
            llm: LlmConfig {
                api_key: None,
                api_base: "https://api.z.ai/api/paas/v4/".to_string(),
                model: "glm-4.5-flash".to_string(),
                temperature: 0.5,
                timeout_secs: 30,
                max_attempts: 3,
                retry_delay_ms: 2_000,
            },
            output: OutputConfig {
                readme_path: PathBuf::from("profile/README.md"),
                cache_path: PathBuf::from("repo_data.json"),
                title: "My Mirrored Repositories".to_string(),
                intro: "Automatically mirrored from Gitcode and other sources.".to_string(),
            },
            pipeline: PipelineConfig {
                readme_excerpt_chars: 2000,
                enrichment_pause_ms: 1_000,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(PipelineError::Config(
                "github.per_page must be between 1 and 100".to_string(),
            ));
        }

        if self.llm.max_attempts == 0 {
            return Err(PipelineError::Config(
                "llm.max_attempts must be greater than 0".to_string(),
            ));
        }

        Validator::validate_url(&self.github.api_base)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Validator::validate_url(&self.llm.api_base)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(())
    }
}

impl GitHubConfig {
    /// The configured account, ignoring blank values.
    pub fn account(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl LlmConfig {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

impl PipelineConfig {
    pub fn enrichment_pause(&self) -> Duration {
        Duration::from_millis(self.enrichment_pause_ms)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.max_attempts, 3);
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.pipeline.readme_excerpt_chars, 2000);
    }

    #[test]
    fn test_chat_completions_url_tolerates_trailing_slash() {
        let mut config = Config::default_config();
        assert_eq!(
            config.llm.chat_completions_url(),
            "https://api.z.ai/api/paas/v4/chat/completions"
        );

        config.llm.api_base = "http://localhost:8080/v1".to_string();
        assert_eq!(
            config.llm.chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_blank_account_is_ignored() {
        let mut config = Config::default_config();
        config.github.username = Some("   ".to_string());
        assert_eq!(config.github.account(), None);

        config.github.username = Some("octocat".to_string());
        assert_eq!(config.github.account(), Some("octocat"));
    }

    #[test]
    fn test_malformed_account_is_not_a_config_error() {
        let mut config = Config::default_config();
        config.github.username = Some("bad/name".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.github.account(), Some("bad/name"));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = Config::default_config();
        config.llm.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_base() {
        let mut config = Config::default_config();
        config.llm.api_base = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("showcase.toml");
        std::fs::write(
            &path,
            "[output]\ntitle = \"Projects\"\n\n[pipeline]\nenrichment_pause_ms = 0\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.output.title, "Projects");
        assert_eq!(config.pipeline.enrichment_pause_ms, 0);
        assert_eq!(config.github.per_page, 100);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = Config::default_config();
        let policy = config.llm.retry_policy();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay(), Duration::from_secs(2));
    }
}
