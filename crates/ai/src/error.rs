use thiserror::Error;

/// Failure modes of the generation collaborator.
///
/// Every variant is retryable from the caller's point of view; none of them
/// corrupts session state because generation never writes to the store.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Generation exceeded the {budget_secs}s latency budget")]
    Timeout { budget_secs: u64 },

    #[error("Generator returned empty content")]
    EmptyContent,
}
