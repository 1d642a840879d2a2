use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Maximum number of interest tags a user may keep.
pub const MAX_INTERESTS: usize = 5;

/// Default number of candidate posts to generate per topic.
pub const DEFAULT_POST_COUNT: u8 = 5;

/// Writing tone applied to generated posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Humorous,
    Inspirational,
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Professional
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Casual => write!(f, "casual"),
            Tone::Humorous => write!(f, "humorous"),
            Tone::Inspirational => write!(f, "inspirational"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "humorous" => Ok(Tone::Humorous),
            "inspirational" => Ok(Tone::Inspirational),
            other => Err(format!("invalid tone: '{other}'")),
        }
    }
}

/// Per-user generation preferences: interest tags, tone, and desired
/// candidate count. One record per user, upserted on save and substituted
/// with defaults when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Ordered interest tags, at most [`MAX_INTERESTS`] entries.
    pub interests: Vec<String>,
    pub tone: Tone,
    pub post_count: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            tone: Tone::default(),
            post_count: DEFAULT_POST_COUNT,
        }
    }
}

/// Preferences payload as received from the client. Absent fields keep
/// their current (or default) values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub interests: Option<Vec<String>>,
    pub tone: Option<Tone>,
    pub post_count: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(prefs.interests.is_empty());
        assert_eq!(prefs.tone, Tone::Professional);
        assert_eq!(prefs.post_count, 5);
    }

    #[test]
    fn test_tone_roundtrip() {
        for tone in [Tone::Professional, Tone::Casual, Tone::Humorous, Tone::Inspirational] {
            let parsed: Tone = tone.to_string().parse().unwrap();
            assert_eq!(parsed, tone);
        }
    }

    #[test]
    fn test_preferences_wire_shape() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(json["postCount"], 5);
        assert_eq!(json["tone"], "professional");
    }

    #[test]
    fn test_update_accepts_partial_payload() {
        let update: PreferencesUpdate =
            serde_json::from_str(r#"{"postCount": 3}"#).unwrap();
        assert_eq!(update.post_count, Some(3));
        assert!(update.interests.is_none());
        assert!(update.tone.is_none());
    }
}
