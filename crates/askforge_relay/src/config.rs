//! Relay configuration, loaded from environment variables at startup.

/// Runtime configuration for the relay.
///
/// Every field except the API key has a workable default, so a local build
/// only needs `OPENROUTER_API_KEY` set.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// TCP address the relay binds (default: `"127.0.0.1:8787"`).
    pub bind_address: String,

    /// Base URL of the OpenAI-compatible provider
    /// (default: `"https://openrouter.ai/api/v1"`). Overridable so tests can
    /// point the relay at a mock upstream.
    pub upstream_base: String,

    /// Bearer token for the provider.
    pub api_key: String,

    /// Sent as the `HTTP-Referer` identification header.
    pub site_url: String,

    /// Sent as the `X-Title` identification header.
    pub site_name: String,

    /// Model identifier named in every completion request.
    pub model: String,
}

impl RelayConfig {
    /// Build [`RelayConfig`] from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("ASKFORGE_BIND", "127.0.0.1:8787"),
            upstream_base: env_or("ASKFORGE_UPSTREAM_URL", "https://openrouter.ai/api/v1"),
            api_key: env_or("OPENROUTER_API_KEY", ""),
            site_url: env_or("YOUR_SITE_URL", ""),
            site_name: env_or("YOUR_SITE_NAME", ""),
            model: env_or("ASKFORGE_MODEL", "deepseek/deepseek-r1-0528:free"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
