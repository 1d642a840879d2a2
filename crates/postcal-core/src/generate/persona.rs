//! Persona selection by keyword matching on the topic text.
//!
//! Each persona maps to a fixed instruction template plus sampling
//! parameters. Matching is case-insensitive substring containment; the
//! first matching set wins, in the order morning, motivational, supportive.

use postcal_types::generate::PromptSpec;
use postcal_types::preferences::Tone;

/// Token budget for a batch of short posts.
const MAX_TOKENS: u32 = 600;

const MORNING_KEYWORDS: &[&str] = &["morning", "greeting", "sunrise", "rise and shine"];

const MOTIVATIONAL_KEYWORDS: &[&str] = &[
    "pep talk",
    "motivation",
    "motivational",
    "encouragement",
    "inspire",
];

const SUPPORTIVE_KEYWORDS: &[&str] = &[
    "mental health",
    "anxiety",
    "stress",
    "mindfulness",
    "self-care",
    "self care",
    "burnout",
    "wellbeing",
    "well-being",
];

/// Prompt/style template selected from the user's topic input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// Warm start-of-day greetings.
    Morning,
    /// Energetic pep-talk posts.
    Motivational,
    /// Gentle, grounded posts around mental wellbeing.
    Supportive,
    /// Neutral, informative default.
    Factual,
}

impl Persona {
    /// Classify a topic by case-insensitive keyword containment.
    pub fn classify(topic: &str) -> Persona {
        let lower = topic.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if matches(MORNING_KEYWORDS) {
            Persona::Morning
        } else if matches(MOTIVATIONAL_KEYWORDS) {
            Persona::Motivational
        } else if matches(SUPPORTIVE_KEYWORDS) {
            Persona::Supportive
        } else {
            Persona::Factual
        }
    }

    /// The instruction template for this persona.
    fn instruction(&self) -> &'static str {
        match self {
            Persona::Morning => {
                "You write warm, bright morning posts that help people start \
                 their day. Keep them friendly and energizing without being \
                 saccharine."
            }
            Persona::Motivational => {
                "You write punchy motivational posts. Direct, confident, \
                 action-oriented. No empty platitudes."
            }
            Persona::Supportive => {
                "You write gentle, grounded posts about wellbeing. Validate \
                 before advising, never diagnose, and keep the tone calm."
            }
            Persona::Factual => {
                "You write clear, informative posts that share one concrete \
                 idea or fact per post."
            }
        }
    }

    /// Sampling temperature: creative personas run hotter.
    fn temperature(&self) -> f64 {
        match self {
            Persona::Morning | Persona::Motivational => 0.9,
            Persona::Supportive => 0.7,
            Persona::Factual => 0.6,
        }
    }
}

/// Build the completion request for a topic under the selected persona.
pub fn build_prompt(topic: &str, persona: Persona, tone: Tone, count: usize) -> PromptSpec {
    let system = format!(
        "{} Overall tone: {tone}. Write exactly one post per line, plain \
         text only, no numbering, no hashtags unless they fit naturally, \
         and keep every post under 280 characters.",
        persona.instruction()
    );

    PromptSpec {
        system,
        prompt: format!("Write {count} short social media posts about: {topic}"),
        max_tokens: MAX_TOKENS,
        temperature: persona.temperature(),
    }
}
