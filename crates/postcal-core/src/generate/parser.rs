//! Completion parsing: raw generated text to candidate posts.
//!
//! One post per line. Blank lines and lines over the 280-character limit
//! are discarded; leading list markers are stripped since models number
//! their output even when told not to.

use postcal_types::generate::CandidatePost;
use postcal_types::post::{DEFAULT_TOPIC, MAX_POST_CHARS};

/// The topic label for a free-text input: its first comma-separated
/// segment, trimmed, or "General" when that leaves nothing.
pub fn topic_label(input: &str) -> String {
    let segment = input.split(',').next().unwrap_or("").trim();
    if segment.is_empty() {
        DEFAULT_TOPIC.to_string()
    } else {
        segment.to_string()
    }
}

/// Split a raw completion into at most `limit` candidates labeled `topic`.
pub fn parse_candidates(raw: &str, topic: &str, limit: usize) -> Vec<CandidatePost> {
    raw.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .filter(|line| line.chars().count() <= MAX_POST_CHARS)
        .take(limit)
        .map(|line| CandidatePost::new(line.to_string(), topic.to_string()))
        .collect()
}

/// Trim a line and drop a leading bullet or "1." / "2)" style marker.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let unmarked = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .unwrap_or(line);

    // "12. text" or "3) text"
    let digits = unmarked.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &unmarked[digits..];
        if let Some(stripped) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return stripped.trim();
        }
    }
    unmarked.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_label_takes_first_segment() {
        assert_eq!(topic_label("rust, systems, async"), "rust");
        assert_eq!(topic_label("  coffee culture  "), "coffee culture");
    }

    #[test]
    fn test_topic_label_empty_input_is_general() {
        assert_eq!(topic_label(""), "General");
        assert_eq!(topic_label("  , tea"), "General");
    }

    #[test]
    fn test_parse_discards_blank_lines() {
        let raw = "first post\n\n\nsecond post\n";
        let posts = parse_candidates(raw, "t", 5);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].content, "first post");
        assert_eq!(posts[1].content, "second post");
    }

    #[test]
    fn test_parse_discards_overlong_lines() {
        let long = "x".repeat(281);
        let raw = format!("short one\n{long}\nanother short");
        let posts = parse_candidates(&raw, "t", 5);
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_parse_keeps_line_at_exactly_280() {
        let exact = "y".repeat(280);
        let posts = parse_candidates(&exact, "t", 5);
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_parse_truncates_to_limit() {
        let raw = (1..=9).map(|i| format!("post {i}")).collect::<Vec<_>>().join("\n");
        let posts = parse_candidates(&raw, "t", 5);
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[4].content, "post 5");
    }

    #[test]
    fn test_parse_strips_list_markers() {
        let raw = "1. numbered\n- dashed\n* starred\n2) parened";
        let posts = parse_candidates(raw, "t", 5);
        let contents: Vec<&str> = posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["numbered", "dashed", "starred", "parened"]);
    }

    #[test]
    fn test_parse_labels_every_candidate() {
        let posts = parse_candidates("a\nb", "rust", 5);
        assert!(posts.iter().all(|p| p.topic == "rust"));
    }

    #[test]
    fn test_bare_number_line_survives() {
        // A line that is only digits is content, not a marker.
        let posts = parse_candidates("42", "t", 5);
        assert_eq!(posts[0].content, "42");
    }
}
