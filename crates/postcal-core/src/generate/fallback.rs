//! Deterministic template fallback.
//!
//! When the external call fails for any reason (missing credential,
//! network error, malformed response), the adapter returns these fixed
//! templates instead, parameterized by the topic label. The UI never
//! blocks on generation failure.

use postcal_types::generate::CandidatePost;

/// Number of posts the fallback always produces.
pub const FALLBACK_COUNT: usize = 5;

/// Longest topic segment substituted into a template. Keeps every
/// rendered template under the 280-character post limit.
const MAX_TOPIC_SEGMENT: usize = 100;

const TEMPLATES: [&str; FALLBACK_COUNT] = [
    "Here's a thought on {topic}: the field moves fast, and staying sharp means carving out time to learn something new every week. What has your attention right now?",
    "Just went down a rabbit hole on {topic}. The best insights came from unexpected places. Sometimes the adjacent field has already solved your problem.",
    "Working on {topic} today. The challenges are real, but so are the opportunities. Every obstacle is a chance to sharpen the approach.",
    "Most hot takes about {topic} age badly. The fundamentals don't. Learn those first and the trends become easy to evaluate.",
    "Getting started with {topic}? Start smaller than feels reasonable. Consistency beats intensity every time.",
];

/// Render the template set for a topic label.
///
/// Always returns exactly [`FALLBACK_COUNT`] non-empty candidates, each
/// within the post length limit.
pub fn fallback_candidates(topic: &str) -> Vec<CandidatePost> {
    let segment: String = topic.chars().take(MAX_TOPIC_SEGMENT).collect();
    TEMPLATES
        .iter()
        .map(|template| {
            CandidatePost::new(template.replace("{topic}", &segment), topic.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcal_types::post::MAX_POST_CHARS;

    #[test]
    fn test_fallback_returns_exactly_five() {
        assert_eq!(fallback_candidates("rust").len(), FALLBACK_COUNT);
    }

    #[test]
    fn test_fallback_posts_reference_topic() {
        for post in fallback_candidates("urban gardening") {
            assert!(post.content.contains("urban gardening"));
            assert!(!post.content.is_empty());
        }
    }

    #[test]
    fn test_fallback_posts_stay_within_limit_for_long_topics() {
        let long_topic = "a".repeat(400);
        for post in fallback_candidates(&long_topic) {
            assert!(post.content.chars().count() <= MAX_POST_CHARS);
        }
    }

    #[test]
    fn test_fallback_is_deterministic_in_content() {
        let a: Vec<String> = fallback_candidates("tea").into_iter().map(|p| p.content).collect();
        let b: Vec<String> = fallback_candidates("tea").into_iter().map(|p| p.content).collect();
        assert_eq!(a, b);
    }
}
