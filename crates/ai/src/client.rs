//! HTTP client for the Anthropic Messages API.
//!
//! All generation calls in Jobflow go through this client. Retries on 429
//! and 5xx with exponential backoff; the request timeout is the caller's
//! latency budget and is never retried past.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GenerationError;
use crate::TextGenerator;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// The model used for all generation calls.
pub const MODEL: &str = "claude-sonnet-4-5";

const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl MessagesResponse {
    /// The text of the first text block, if any.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API key for the upstream provider.
    pub api_key: String,
    /// Hard per-request latency budget.
    pub budget: Duration,
}

/// The production [`TextGenerator`]: wraps the Anthropic Messages API with
/// bounded retries and a hard latency budget.
#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    config: GenerationConfig,
}

impl GenerationClient {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(config.budget).build()?;
        Ok(Self { client, config })
    }

    /// Call the messages API, retrying on 429 and 5xx with exponential
    /// backoff (1s, 2s). A timed-out request fails immediately: the latency
    /// budget is already spent.
    async fn call(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Generation attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(API_URL)
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", API_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) if e.is_timeout() => {
                    return Err(GenerationError::Timeout {
                        budget_secs: self.config.budget.as_secs(),
                    });
                }
                Err(e) => {
                    last_error = Some(GenerationError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response
                    .json::<ApiError>()
                    .await
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| status.to_string());
                last_error = Some(GenerationError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response
                    .json::<ApiError>()
                    .await
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| status.to_string());
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: MessagesResponse = response.json().await?;
            return match parsed.text() {
                Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
                _ => Err(GenerationError::EmptyContent),
            };
        }

        Err(last_error.unwrap_or(GenerationError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait::async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        self.call(system, prompt).await
    }
}
