//! Tone detection and compatibility tables
//!
//! A [`Tone`] is a coarse affect label attached to a text span. User tone is
//! detected from punctuation density, uppercase ratio, the classifier's
//! emotion label, and small excited/sad lexicons; candidate tone comes from
//! a lexicon-based classifier over the reply text.
//!
//! The compatible/conflicting tone sets and the emotion/intent tables are
//! fixed, hand-authored. Two tones falling into neither set get no bonus and
//! no penalty.

use crate::lexicon::PhraseBank;
use crate::text::PhraseMatcher;
use serde::{Deserialize, Serialize};

/// Coarse affect label for a text span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Supportive,
    Enthusiastic,
    Helpful,
    Humorous,
    Questioning,
    Serious,
    /// Brushing the user off; only ever attached upstream, never classified
    Dismissive,
    Neutral,
}

/// Tones that blend well together when not identical
const COMPATIBLE_TONES: [Tone; 3] = [Tone::Neutral, Tone::Helpful, Tone::Supportive];

/// Tones that clash when paired
const CONFLICTING_TONES: [Tone; 2] = [Tone::Enthusiastic, Tone::Serious];

/// Emotion labels treated as negative affect
const NEGATIVE_EMOTIONS: [&str; 6] = ["sad", "angry", "frustrated", "anxious", "upset", "stressed"];

/// Emotion labels treated as positive affect
const POSITIVE_EMOTIONS: [&str; 4] = ["happy", "excited", "joyful", "proud"];

/// Emotion labels signalling confusion or curiosity
const CURIOUS_EMOTIONS: [&str; 3] = ["confused", "curious", "uncertain"];

impl Tone {
    /// Lowercase label for this tone
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supportive => "supportive",
            Self::Enthusiastic => "enthusiastic",
            Self::Helpful => "helpful",
            Self::Humorous => "humorous",
            Self::Questioning => "questioning",
            Self::Serious => "serious",
            Self::Dismissive => "dismissive",
            Self::Neutral => "neutral",
        }
    }

    /// Parse an upstream tone label; unknown labels fall into no bucket
    pub fn from_label(label: &str) -> Option<Tone> {
        match label.to_lowercase().as_str() {
            "supportive" => Some(Self::Supportive),
            "enthusiastic" => Some(Self::Enthusiastic),
            "helpful" => Some(Self::Helpful),
            "humorous" => Some(Self::Humorous),
            "questioning" => Some(Self::Questioning),
            "serious" => Some(Self::Serious),
            "dismissive" => Some(Self::Dismissive),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Lexicon-backed tone classifier
///
/// Matchers are compiled once from the phrase bank at construction.
pub struct ToneClassifier {
    supportive: PhraseMatcher,
    enthusiastic: PhraseMatcher,
    helpful: PhraseMatcher,
    humorous: PhraseMatcher,
    excited: PhraseMatcher,
    sad: PhraseMatcher,
}

impl ToneClassifier {
    /// Build a classifier from the phrase bank
    pub fn new(bank: &PhraseBank) -> Self {
        Self {
            supportive: PhraseMatcher::new(&bank.supportive_words),
            enthusiastic: PhraseMatcher::new(&bank.enthusiastic_words),
            helpful: PhraseMatcher::new(&bank.helpful_words),
            humorous: PhraseMatcher::new(&bank.humorous_words),
            excited: PhraseMatcher::new(&bank.excited_words),
            sad: PhraseMatcher::new(&bank.sad_words),
        }
    }

    /// Classify a candidate reply's tone from its text
    pub fn classify_reply(&self, text: &str) -> Tone {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Tone::Neutral;
        }
        if trimmed.contains('?') {
            return Tone::Questioning;
        }
        if self.humorous.is_match(trimmed) {
            return Tone::Humorous;
        }
        if self.supportive.is_match(trimmed) {
            return Tone::Supportive;
        }
        if self.enthusiastic.is_match(trimmed) || trimmed.contains('!') {
            return Tone::Enthusiastic;
        }
        if self.helpful.is_match(trimmed) {
            return Tone::Helpful;
        }
        Tone::Neutral
    }

    /// Detect the user's tone from input text and the detected emotion label
    pub fn detect_user_tone(&self, input: &str, emotion: Option<&str>) -> Tone {
        let trimmed = input.trim();
        let emotion = emotion.map(|e| e.to_lowercase());
        let emotion = emotion.as_deref();

        if is_negative_emotion(emotion) || self.sad.is_match(trimmed) {
            return Tone::Serious;
        }
        if is_positive_emotion(emotion)
            || self.excited.is_match(trimmed)
            || exclamation_count(trimmed) >= 2
            || uppercase_ratio(trimmed) > 0.3
        {
            return Tone::Enthusiastic;
        }
        if trimmed.contains('?') {
            return Tone::Questioning;
        }
        Tone::Neutral
    }
}

/// Bonus or penalty for pairing the user's tone with a candidate's tone
///
/// Exact match +0.3; both in the compatible set +0.15; both in the
/// conflicting set -0.2; anything else 0.
pub fn tone_match_adjustment(user: Tone, candidate: Tone) -> f64 {
    if user == candidate {
        return 0.3;
    }
    if COMPATIBLE_TONES.contains(&user) && COMPATIBLE_TONES.contains(&candidate) {
        return 0.15;
    }
    if CONFLICTING_TONES.contains(&user) && CONFLICTING_TONES.contains(&candidate) {
        return -0.2;
    }
    0.0
}

/// Whether a candidate tone suits the declared user intent
///
/// Unknown intents fall into a generic bucket that accepts only neutral.
pub fn intent_allows_tone(intent: &str, tone: Tone) -> bool {
    let allowed: &[Tone] = match intent.to_lowercase().as_str() {
        "question" => &[Tone::Helpful, Tone::Questioning, Tone::Neutral],
        "information" | "help" => &[Tone::Helpful, Tone::Neutral],
        "venting" | "emotional_support" => &[Tone::Supportive, Tone::Neutral],
        "casual" | "joke" => &[Tone::Humorous, Tone::Enthusiastic],
        "greeting" => &[Tone::Enthusiastic, Tone::Neutral],
        _ => &[Tone::Neutral],
    };
    allowed.contains(&tone)
}

/// Compatibility of a candidate tone with the user's detected emotion
///
/// `Some(true)` is compatible, `Some(false)` incompatible, `None` means the
/// pairing is outside the hand-authored table: no bonus, no penalty.
pub fn emotion_tone_compatibility(emotion: &str, tone: Tone) -> Option<bool> {
    let emotion = emotion.to_lowercase();
    let tone = tone.as_str();
    if NEGATIVE_EMOTIONS.contains(&emotion.as_str()) {
        return Some(tone == "supportive" || tone == "neutral");
    }
    if POSITIVE_EMOTIONS.contains(&emotion.as_str()) {
        if tone == "dismissive" {
            return Some(false);
        }
        if matches!(tone, "enthusiastic" | "humorous" | "supportive") {
            return Some(true);
        }
        return None;
    }
    if CURIOUS_EMOTIONS.contains(&emotion.as_str()) {
        return Some(tone == "helpful" || tone == "neutral");
    }
    None
}

fn is_negative_emotion(emotion: Option<&str>) -> bool {
    emotion.is_some_and(|e| NEGATIVE_EMOTIONS.contains(&e))
}

fn is_positive_emotion(emotion: Option<&str>) -> bool {
    emotion.is_some_and(|e| POSITIVE_EMOTIONS.contains(&e))
}

fn exclamation_count(text: &str) -> usize {
    text.chars().filter(|c| *c == '!').count()
}

fn uppercase_ratio(text: &str) -> f64 {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return 0.0;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters.len() as f64
}
