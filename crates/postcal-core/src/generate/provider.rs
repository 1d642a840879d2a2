//! TextProvider trait definition.
//!
//! The single abstraction the generator needs from a text-generation
//! backend: one prompt in, one completion out. Uses native async fn in
//! traits (RPITIT); implementations live in postcal-infra.

use postcal_types::generate::{PromptSpec, ProviderError};

/// Trait for text-generation backends.
pub trait TextProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a completion request and return the raw generated text.
    fn complete(
        &self,
        spec: &PromptSpec,
    ) -> impl std::future::Future<Output = Result<String, ProviderError>> + Send;
}
