use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_MAX_CONTEXT_BYTES, DEFAULT_MAX_TOKENS_LIMIT};
use crate::domain::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::infrastructure::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT};
use crate::infrastructure::observability::DEFAULT_LOG_FILTER;
use crate::infrastructure::text_processing::DEFAULT_PDF_TIMEOUT;

use super::{ConfigurationError, Environment};

pub const DEFAULT_API_KEY_ENV: &str = "CO_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub generation: GenerationSettings,
    pub context: ContextSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub default_temperature: f32,
    pub default_max_tokens: u32,
    pub max_tokens_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextSettings {
    pub max_total_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub pdf_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ExtractionSettings {
    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_secs(self.pdf_timeout_secs)
    }
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{env}.toml` and `APP_*` variables
    /// (`__` separates sections, e.g. `APP_CONTEXT__MAX_TOTAL_BYTES=8000`).
    pub fn load(environment: Environment) -> Result<Self, ConfigurationError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_bytes", 25_u64 * 1024 * 1024)?
            .set_default("llm.base_url", DEFAULT_BASE_URL)?
            .set_default("llm.model", DEFAULT_MODEL)?
            .set_default("llm.timeout_secs", DEFAULT_REQUEST_TIMEOUT.as_secs())?
            .set_default("llm.api_key_env", DEFAULT_API_KEY_ENV)?
            .set_default(
                "generation.default_temperature",
                f64::from(DEFAULT_TEMPERATURE),
            )?
            .set_default("generation.default_max_tokens", u64::from(DEFAULT_MAX_TOKENS))?
            .set_default("generation.max_tokens_limit", u64::from(DEFAULT_MAX_TOKENS_LIMIT))?
            .set_default("context.max_total_bytes", DEFAULT_MAX_CONTEXT_BYTES as u64)?
            .set_default(
                "extraction.pdf_timeout_secs",
                DEFAULT_PDF_TIMEOUT.as_secs(),
            )?
            .set_default("logging.level", DEFAULT_LOG_FILTER)?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
