//! Generator service: topic in, candidate posts out.

use postcal_types::generate::CandidatePost;
use postcal_types::preferences::Preferences;

use super::box_provider::BoxTextProvider;
use super::fallback::fallback_candidates;
use super::parser::{parse_candidates, topic_label};
use super::persona::{Persona, build_prompt};
use super::provider::TextProvider;
use super::MAX_CANDIDATES;

/// Turns a free-text topic into a small ordered list of candidate posts.
///
/// Holds the configured text provider, if any; with no provider (no API
/// credential at startup) every request takes the fallback path directly.
pub struct GeneratorService {
    provider: Option<BoxTextProvider>,
}

impl GeneratorService {
    pub fn new(provider: Option<BoxTextProvider>) -> Self {
        Self { provider }
    }

    /// Whether a real backend is configured (false means template-only).
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate candidates for `topic` under the user's preferences.
    ///
    /// Infallible by design: any provider failure falls back to the fixed
    /// templates, so the result is never empty.
    pub async fn generate(&self, topic: &str, preferences: &Preferences) -> Vec<CandidatePost> {
        let label = topic_label(topic);
        let count = (preferences.post_count.max(1) as usize).min(MAX_CANDIDATES);

        let Some(provider) = &self.provider else {
            tracing::debug!("no text provider configured, using template fallback");
            return fallback_candidates(&label);
        };

        let persona = Persona::classify(topic);
        let spec = build_prompt(topic, persona, preferences.tone, count);

        match provider.complete(&spec).await {
            Ok(raw) => {
                let candidates = parse_candidates(&raw, &label, MAX_CANDIDATES);
                if candidates.is_empty() {
                    tracing::warn!(
                        provider = provider.name(),
                        "completion parsed to zero candidates, using template fallback"
                    );
                    fallback_candidates(&label)
                } else {
                    candidates
                }
            }
            Err(err) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %err,
                    "generation failed, using template fallback"
                );
                fallback_candidates(&label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcal_types::generate::{PromptSpec, ProviderError};
    use postcal_types::post::MAX_POST_CHARS;

    struct ScriptedProvider {
        response: Result<&'static str, ()>,
    }

    impl TextProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _spec: &PromptSpec) -> Result<String, ProviderError> {
            match self.response {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(ProviderError::Http("connection refused".to_string())),
            }
        }
    }

    fn service_with(response: Result<&'static str, ()>) -> GeneratorService {
        GeneratorService::new(Some(BoxTextProvider::new(ScriptedProvider { response })))
    }

    #[tokio::test]
    async fn test_generate_parses_provider_output() {
        let service = service_with(Ok("first draft\nsecond draft\nthird draft"));
        let posts = service.generate("rust, tooling", &Preferences::default()).await;
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].content, "first draft");
        assert!(posts.iter().all(|p| p.topic == "rust"));
    }

    #[tokio::test]
    async fn test_generate_truncates_to_five() {
        let service = service_with(Ok("a\nb\nc\nd\ne\nf\ng"));
        let posts = service.generate("topic", &Preferences::default()).await;
        assert_eq!(posts.len(), 5);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_templates() {
        let service = service_with(Err(()));
        let posts = service.generate("gardening", &Preferences::default()).await;
        assert_eq!(posts.len(), 5);
        for post in &posts {
            assert!(!post.content.is_empty());
            assert!(post.content.chars().count() <= MAX_POST_CHARS);
            assert!(post.content.contains("gardening"));
        }
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back() {
        // Only blank lines: parses to nothing, so templates take over.
        let service = service_with(Ok("\n\n\n"));
        let posts = service.generate("tea", &Preferences::default()).await;
        assert_eq!(posts.len(), 5);
    }

    #[tokio::test]
    async fn test_no_provider_uses_fallback() {
        let service = GeneratorService::new(None);
        assert!(!service.has_provider());
        let posts = service.generate("x", &Preferences::default()).await;
        assert_eq!(posts.len(), 5);
    }
}
