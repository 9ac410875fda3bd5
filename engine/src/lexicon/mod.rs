//! Immutable phrase-bank tables
//!
//! All hardcoded wording the engine relies on (greetings, acknowledgments,
//! transition templates, elaborations, tone lexicons) lives here as one
//! [`PhraseBank`] value, loaded once at startup and shared read-only behind
//! an `Arc`. Keeping wording out of the algorithms keeps scoring and
//! blending testable independent of phrasing.
//!
//! A TOML file can override any table; fields left out of the file keep the
//! compiled-in defaults. Transition templates accept `{from}` and `{to}`
//! placeholders.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One immutable set of phrase tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseBank {
    /// Greeting openers recognized in candidate and user texts
    pub greetings: Vec<String>,
    /// Farewell closers recognized in candidate texts
    pub farewells: Vec<String>,
    /// Markers in user input that signal the conversation is closing
    pub closing_markers: Vec<String>,
    /// Acknowledgment phrases ("i see", "that makes sense")
    pub acknowledgments: Vec<String>,
    /// Logical connectives ("because", "however", "therefore")
    pub logical_connectives: Vec<String>,
    /// Discourse connectives/anaphors tying a reply to the previous turn
    pub discourse_markers: Vec<String>,
    /// Words signalling excitement in user input
    pub excited_words: Vec<String>,
    /// Words signalling sadness or distress in user input
    pub sad_words: Vec<String>,
    /// Emotion keywords used by the complexity estimator
    pub emotion_keywords: Vec<String>,
    /// Multi-clause connectors used by the complexity estimator
    pub clause_connectors: Vec<String>,
    /// Supportive-tone lexicon
    pub supportive_words: Vec<String>,
    /// Enthusiastic-tone lexicon
    pub enthusiastic_words: Vec<String>,
    /// Helpful-tone lexicon
    pub helpful_words: Vec<String>,
    /// Humorous-tone lexicon
    pub humorous_words: Vec<String>,
    /// Same-topic continuation phrases
    pub continuation_phrases: Vec<String>,
    /// Templates bridging related topics
    pub related_templates: Vec<String>,
    /// Templates bridging unrelated topics
    pub shift_templates: Vec<String>,
    /// Short closers appended before a transition when a thought trails off
    pub closing_connectives: Vec<String>,
    /// Filler words stripped from the head of a bridged segment
    pub filler_words: Vec<String>,
    /// Elaboration sentences appended when a reply runs too short
    pub elaborations: Vec<String>,
}

impl Default for PhraseBank {
    fn default() -> Self {
        Self {
            greetings: strings(&[
                "hello",
                "hi",
                "hey",
                "good morning",
                "good afternoon",
                "good evening",
                "greetings",
            ]),
            farewells: strings(&[
                "bye",
                "goodbye",
                "see you",
                "take care",
                "farewell",
                "talk soon",
            ]),
            closing_markers: strings(&["bye", "goodbye", "see you"]),
            acknowledgments: strings(&[
                "i see",
                "that makes sense",
                "got it",
                "fair enough",
                "good point",
                "understood",
            ]),
            logical_connectives: strings(&[
                "because",
                "however",
                "therefore",
                "although",
                "consequently",
                "as a result",
                "so that",
            ]),
            discourse_markers: strings(&[
                "this", "that", "it", "they", "so", "then", "also",
            ]),
            excited_words: strings(&[
                "amazing",
                "awesome",
                "fantastic",
                "great",
                "wonderful",
                "excited",
                "love",
            ]),
            sad_words: strings(&[
                "sad", "tired", "upset", "terrible", "awful", "lonely", "worried",
            ]),
            emotion_keywords: strings(&[
                "feel", "happy", "sad", "angry", "worried", "excited", "scared",
            ]),
            clause_connectors: strings(&["and", "but", "however"]),
            supportive_words: strings(&[
                "sorry",
                "here for you",
                "understand",
                "that sounds hard",
                "you're not alone",
            ]),
            enthusiastic_words: strings(&[
                "amazing",
                "awesome",
                "fantastic",
                "wonderful",
                "can't wait",
                "love",
            ]),
            helpful_words: strings(&[
                "you could",
                "try",
                "one way",
                "suggest",
                "recommend",
                "might help",
            ]),
            humorous_words: strings(&["haha", "lol", "funny", "joke", "kidding", "hilarious"]),
            continuation_phrases: strings(&[
                "Also,",
                "On top of that,",
                "And another thing,",
                "Speaking of which,",
                "Plus,",
            ]),
            related_templates: strings(&[
                "That reminds me of {to}.",
                "Speaking of {from}, {to} comes to mind.",
                "On a related note, about {to}:",
                "Which ties into {to}.",
            ]),
            shift_templates: strings(&[
                "By the way, about {to}:",
                "On a different note, {to}:",
                "Anyway, turning to {to}:",
                "Changing gears to {to},",
            ]),
            closing_connectives: strings(&["Right.", "Okay.", "So."]),
            filler_words: strings(&[
                "well", "so", "um", "uh", "like", "basically", "actually", "the", "a", "an",
            ]),
            elaborations: strings(&[
                "Let me add a bit more detail.",
                "There is more to it than that.",
                "I can expand on that a little.",
                "A little more context might help.",
            ]),
        }
    }
}

impl PhraseBank {
    /// Load a phrase bank from a TOML file
    ///
    /// Tables missing from the file keep their compiled-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read phrase bank at {:?}", path))?;
        let bank: PhraseBank = toml::from_str(&content)
            .with_context(|| format!("Failed to parse phrase bank at {:?}", path))?;
        info!("Loaded phrase bank from {:?}", path);
        Ok(bank)
    }

    /// Load from a path if given, otherwise use the compiled-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(p) => match Self::load(p) {
                Ok(bank) => bank,
                Err(e) => {
                    tracing::warn!("Falling back to built-in phrase bank: {:#}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// Substitute `{from}` and `{to}` placeholders in a transition template
pub fn fill_template(template: &str, from: &str, to: &str) -> String {
    template.replace("{from}", from).replace("{to}", to)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
