//! Environment-driven settings.
//!
//! Loaded once at startup (after `dotenv`). The external model endpoint
//! is optional; without it the rule-based pipeline handles every turn.

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::AppError;
use crate::llm::LlmClient;

const DEFAULT_MODEL: &str = "studymate-default";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of an OpenAI-style chat-completion endpoint, if any.
    pub llm_endpoint: Option<String>,
    /// Bearer token for the endpoint.
    pub llm_api_key: Option<String>,
    /// Model identifier sent with each completion request.
    pub llm_model: String,
    /// Override for the exported-document directory.
    pub export_dir: Option<PathBuf>,
    /// Override for the SQLite database file.
    pub db_path: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the environment. A present but unparsable
    /// endpoint URL is a configuration error rather than a silent
    /// fallback to rule-based replies.
    pub fn from_env() -> Result<Self, AppError> {
        let llm_endpoint = env::var("STUDYMATE_LLM_ENDPOINT").ok().filter(|s| !s.is_empty());

        if let Some(endpoint) = &llm_endpoint {
            Url::parse(endpoint)?;
        }

        Ok(Self {
            llm_endpoint,
            llm_api_key: env::var("STUDYMATE_LLM_API_KEY").ok().filter(|s| !s.is_empty()),
            llm_model: env::var("STUDYMATE_LLM_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            export_dir: env::var("STUDYMATE_EXPORT_DIR").ok().map(PathBuf::from),
            db_path: env::var("STUDYMATE_DB_PATH").ok().map(PathBuf::from),
        })
    }

    /// Build the LLM client when an endpoint is configured.
    pub fn llm_client(&self) -> Result<Option<LlmClient>, AppError> {
        match &self.llm_endpoint {
            Some(endpoint) => Ok(Some(LlmClient::new(
                endpoint,
                self.llm_api_key.clone(),
                self.llm_model.clone(),
            )?)),
            None => Ok(None),
        }
    }
}
