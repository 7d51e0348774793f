//! AI content-generation collaborator boundary.
//!
//! The orchestrator treats generation as an opaque text producer with a
//! latency budget and a retryable failure mode. Nothing in this crate
//! reads or writes session state.

pub mod client;
pub mod error;
pub mod prompts;

pub use client::{GenerationClient, GenerationConfig};
pub use error::GenerationError;

/// An opaque text producer. The API layer holds one behind `Arc<dyn ...>`
/// so tests can substitute a stub.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce text for a prompt under a system instruction.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}
