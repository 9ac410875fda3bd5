//! Output complexity matching
//!
//! Estimates how complex the user's input is and shrinks or elaborates the
//! final reply to match. Simplification keeps leading sentences until the
//! word budget runs out; elaboration appends one phrase-bank sentence and,
//! when a persona collaborator offers one, a single clarifying question.

use crate::lexicon::PhraseBank;
use crate::text::{self, PhraseMatcher};
use sdk::capability::{PersonaHandle, PickerHandle};
use std::sync::Arc;

/// Number of indicators the estimate averages over
const INDICATOR_COUNT: f64 = 5.0;

/// An embedded question longer than this many characters counts as complex
const LONG_QUESTION_CHARS: usize = 50;

/// Adapts reply length to the estimated input complexity
pub struct ComplexityAdapter {
    bank: Arc<PhraseBank>,
    emotion_keywords: PhraseMatcher,
    connectors: PhraseMatcher,
    picker: PickerHandle,
    persona: Option<PersonaHandle>,
}

impl ComplexityAdapter {
    /// Create an adapter over the given phrase bank and picker
    pub fn new(bank: Arc<PhraseBank>, picker: PickerHandle) -> Self {
        let emotion_keywords = PhraseMatcher::new(&bank.emotion_keywords);
        let connectors = PhraseMatcher::new(&bank.clause_connectors);
        Self {
            bank,
            emotion_keywords,
            connectors,
            picker,
            persona: None,
        }
    }

    /// Attach the optional persona collaborator
    pub fn with_persona(mut self, persona: PersonaHandle) -> Self {
        self.persona = Some(persona);
        self
    }

    /// Estimate input complexity in `[0, 1]`
    ///
    /// Five indicators, summed and divided by five: emotion-keyword hits
    /// (half a point each, capped at one), a multi-clause connector, an
    /// embedded question over 50 characters, more than 20 words, and more
    /// than 50 words.
    pub fn estimate(&self, user_input: &str) -> f64 {
        let input = user_input.trim();
        if input.is_empty() {
            return 0.0;
        }

        let mut indicators = 0.0;

        let emotion_hits = self.emotion_keywords.count(input);
        indicators += (emotion_hits as f64 * 0.5).min(1.0);

        if self.connectors.is_match(input) {
            indicators += 1.0;
        }

        if has_long_question(input) {
            indicators += 1.0;
        }

        let word_count = text::word_count(input);
        if word_count > 20 {
            indicators += 1.0;
        }
        if word_count > 50 {
            indicators += 1.0;
        }

        (indicators / INDICATOR_COUNT).min(1.0)
    }

    /// Shrink or elaborate `response` toward the complexity-scaled target
    ///
    /// The word target is `current * (0.5 + complexity)`. Longer replies are
    /// simplified by retaining leading sentences within the target; shorter
    /// ones gain exactly one elaboration sentence plus, optionally, one
    /// persona clarifying question.
    pub fn adjust(&self, response: &str, complexity: f64) -> String {
        let current = text::word_count(response);
        if current == 0 {
            return response.to_string();
        }
        let complexity = complexity.clamp(0.0, 1.0);
        let target = current as f64 * (0.5 + complexity);

        if (current as f64) > target {
            self.simplify(response, target)
        } else if (current as f64) < target {
            self.elaborate(response)
        } else {
            response.to_string()
        }
    }

    /// Keep leading sentences while the cumulative word count fits the target
    fn simplify(&self, response: &str, target_words: f64) -> String {
        let sentences = text::split_sentences(response);
        let mut kept: Vec<String> = Vec::new();
        let mut word_total = 0usize;
        for sentence in sentences {
            let sentence_words = text::word_count(&sentence);
            if !kept.is_empty() && (word_total + sentence_words) as f64 > target_words {
                break;
            }
            word_total += sentence_words;
            kept.push(sentence);
        }
        text::join_sentences(&kept)
    }

    /// Append one elaboration sentence and, optionally, a clarifying question
    fn elaborate(&self, response: &str) -> String {
        let mut out = text::ensure_terminal_punctuation(response);
        if let Some(elaboration) = self.picker.pick(&self.bank.elaborations) {
            out.push(' ');
            out.push_str(&text::ensure_terminal_punctuation(elaboration));
        }
        if let Some(persona) = &self.persona {
            if persona.should_ask_question() {
                if let Some(question) = persona.clarifying_question() {
                    let question = question.trim();
                    if !question.is_empty() {
                        out.push(' ');
                        out.push_str(question);
                        if !question.ends_with('?') {
                            out.push('?');
                        }
                    }
                }
            }
        }
        out
    }
}

/// Whether any embedded question runs past the long-question threshold
fn has_long_question(input: &str) -> bool {
    text::split_sentences(input)
        .iter()
        .any(|s| s.ends_with('?') && s.len() > LONG_QUESTION_CHARS)
}
