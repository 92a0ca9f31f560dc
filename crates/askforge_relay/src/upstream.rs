//! Streaming client for the OpenAI-compatible completion provider.

use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::policy::system_message;

/// A role/content pair as it appears on the wire, both in the relay's own
/// endpoint and in the upstream completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    stream: bool,
}

/// Issues streamed chat-completion requests. Stateless across calls.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: RelayConfig,
}

impl CompletionClient {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Sends `[system policy prompt] + history` upstream with `stream: true`
    /// and hands back the open response for chunk-by-chunk consumption.
    ///
    /// A connection failure or a non-success status is an upstream error;
    /// there is no retry.
    pub async fn stream_completion(
        &self,
        history: Vec<WireMessage>,
    ) -> Result<reqwest::Response, RelayError> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(system_message());
        messages.extend(history);

        let url = format!(
            "{}/chat/completions",
            self.config.upstream_base.trim_end_matches('/')
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.site_name)
            .json(&CompletionRequest {
                model: &self.config.model,
                messages: &messages,
                stream: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}
