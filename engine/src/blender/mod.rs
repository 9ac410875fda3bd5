//! Multi-candidate text blending
//!
//! Merges several full candidate texts into one deduplicated, well-ordered
//! reply. Segments are classified by lexicon lookup (greeting, farewell,
//! question) and assembled as greeting, then content, then question, then
//! farewell. Cleanup collapses whitespace and drops case-insensitive
//! duplicate sentences, keeping first occurrences.

use crate::lexicon::PhraseBank;
use crate::scorer::tone::ToneClassifier;
use crate::text::{self, PhraseMatcher};
use sdk::capability::PersonaHandle;
use sdk::types::{BlendResult, TurnContext};
use std::collections::HashMap;
use std::sync::Arc;

/// Merged length between these fractions of the summed source length earns
/// the compactness bonus
const COMPACT_BAND: (f64, f64) = (0.4, 0.8);

/// One classified input segment
struct Segment {
    index: usize,
    text: String,
    greeting: bool,
    farewell: bool,
    question: bool,
    word_len: usize,
    tone: &'static str,
}

/// Merges candidate texts into one reply
pub struct Blender {
    tones: ToneClassifier,
    greetings: PhraseMatcher,
    farewells: PhraseMatcher,
    closings: PhraseMatcher,
    connectives: PhraseMatcher,
    styler: Option<PersonaHandle>,
}

impl Blender {
    /// Create a blender over the given phrase bank
    pub fn new(bank: Arc<PhraseBank>) -> Self {
        Self {
            tones: ToneClassifier::new(&bank),
            greetings: PhraseMatcher::new(&bank.greetings),
            farewells: PhraseMatcher::new(&bank.farewells),
            closings: PhraseMatcher::new(&bank.closing_markers),
            connectives: PhraseMatcher::new(&bank.logical_connectives),
            styler: None,
        }
    }

    /// Attach the optional persona styling collaborator
    pub fn with_styler(mut self, styler: PersonaHandle) -> Self {
        self.styler = Some(styler);
        self
    }

    /// Merge candidate texts into one deduplicated reply
    ///
    /// Zero inputs yield an empty result with score 0.0; a single input is
    /// passed through unchanged with score 1.0.
    pub fn blend(&self, texts: &[String], ctx: &TurnContext) -> BlendResult {
        if texts.is_empty() {
            return BlendResult::empty();
        }
        if texts.len() == 1 {
            let mut metadata = HashMap::new();
            metadata.insert(
                "tone".to_string(),
                self.tones.classify_reply(&texts[0]).as_str().to_string(),
            );
            metadata.insert("original_count".to_string(), "1".to_string());
            return BlendResult {
                text: texts[0].clone(),
                sources: vec!["candidate_0".to_string()],
                metadata,
                blend_score: 1.0,
            };
        }

        let segments: Vec<Segment> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| self.classify(index, text))
            .collect();
        let used = self.assemble(&segments, ctx);

        let merged = used
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let cleaned = self.clean(&merged);
        let styled = match &self.styler {
            Some(styler) => styler.style_text(&cleaned),
            None => cleaned,
        };

        let sources = used
            .iter()
            .map(|s| format!("candidate_{}", s.index))
            .collect();
        let mut metadata = HashMap::new();
        metadata.insert("tone".to_string(), dominant_tone(&used).to_string());
        metadata.insert("original_count".to_string(), texts.len().to_string());

        let summed_len: usize = texts.iter().map(|t| t.len()).sum();
        let blend_score = self.score(&styled, summed_len);

        BlendResult {
            text: styled,
            sources,
            metadata,
            blend_score,
        }
    }

    fn classify(&self, index: usize, raw: &str) -> Segment {
        let text = text::collapse_whitespace(raw);
        Segment {
            index,
            greeting: self.greetings.is_match(&text),
            farewell: self.farewells.is_match(&text),
            question: text.contains('?'),
            word_len: text::word_count(&text),
            tone: self.tones.classify_reply(&text).as_str(),
            text,
        }
    }

    /// Pick segments in reply order: greeting, content, question, farewell
    fn assemble<'a>(&self, segments: &'a [Segment], ctx: &TurnContext) -> Vec<&'a Segment> {
        let mut used: Vec<&Segment> = Vec::new();

        // Only open with a greeting when the user did not greet first
        if !self.greetings.is_match(&ctx.user_input) {
            if let Some(greeting) = segments.iter().find(|s| s.greeting && !s.farewell) {
                used.push(greeting);
            }
        }

        // The two longest segments that are neither greeting nor farewell
        let mut content: Vec<&Segment> = segments
            .iter()
            .filter(|s| !s.greeting && !s.farewell)
            .collect();
        content.sort_by(|a, b| b.word_len.cmp(&a.word_len));
        content.truncate(2);
        content.sort_by_key(|s| s.index);
        used.extend(content);

        // Nothing classified as content: fall back to the longest segment
        if used.is_empty() {
            if let Some(longest) = segments.iter().max_by_key(|s| s.word_len) {
                used.push(longest);
            }
        }

        // Keep a question if the reply still lacks one
        let has_question = used.iter().any(|s| s.question);
        if !has_question {
            if let Some(question) = segments
                .iter()
                .find(|s| s.question && !used.iter().any(|u| u.index == s.index))
            {
                used.push(question);
            }
        }

        // Close only when the user signalled closing
        if self.closings.is_match(&ctx.user_input) {
            if let Some(farewell) = segments
                .iter()
                .find(|s| s.farewell && !used.iter().any(|u| u.index == s.index))
            {
                used.push(farewell);
            }
        }

        used
    }

    /// Collapse whitespace, drop duplicate sentences, restore punctuation
    fn clean(&self, merged: &str) -> String {
        let collapsed = text::collapse_whitespace(merged);
        let sentences = text::split_sentences(&collapsed);
        let deduped = text::dedup_sentences(sentences);
        text::join_sentences(&deduped)
    }

    fn score(&self, merged: &str, summed_source_len: usize) -> f64 {
        let mut score = 0.5;
        if summed_source_len > 0 {
            let ratio = merged.len() as f64 / summed_source_len as f64;
            if ratio >= COMPACT_BAND.0 && ratio <= COMPACT_BAND.1 {
                score += 0.2;
            }
        }
        if merged.contains('?') {
            score += 0.1;
        }
        if self.connectives.is_match(merged) {
            score += 0.1;
        }
        if self.greetings.is_match(merged) || self.farewells.is_match(merged) {
            score += 0.1;
        }
        text::clamp_score(score)
    }
}

/// Most frequent tone label among the used segments; first one wins ties
fn dominant_tone(used: &[&Segment]) -> &'static str {
    let mut best: &'static str = "neutral";
    let mut best_count = 0;
    for segment in used {
        let count = used.iter().filter(|s| s.tone == segment.tone).count();
        if count > best_count {
            best = segment.tone;
            best_count = count;
        }
    }
    best
}
