pub const DEFAULT_LOG_FILTER: &str = "info,docqa=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: &str, json_format: bool, default_filter: &str) -> Self {
        let default_filter = if default_filter.trim().is_empty() {
            DEFAULT_LOG_FILTER
        } else {
            default_filter
        };

        Self {
            environment: environment.to_string(),
            json_format,
            default_filter: default_filter.to_string(),
        }
    }
}
