mod credentials;
mod environment;
mod settings;

pub use credentials::ApiCredential;
pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ContextSettings, DEFAULT_API_KEY_ENV, ExtractionSettings, GenerationSettings, LlmSettings,
    LoggingSettings, ServerSettings, Settings,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("API key not found. Please set the {0} environment variable.")]
    MissingCredential(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] config::ConfigError),
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
}
