//! Transition-phrase synthesis between topics
//!
//! Generates the connective phrase inserted when a reply moves between two
//! discourse topics (or response types, using their names as topic labels).
//! Topic pairs are classified as same, related, or unrelated against a
//! fixed symmetric table; each class has its own phrase set and smoothness.

use crate::lexicon::{fill_template, PhraseBank};
use sdk::capability::PickerHandle;
use sdk::types::TransitionPhrase;
use std::sync::Arc;

/// Smoothness for continuing the same topic
const SMOOTHNESS_SAME: f64 = 0.9;

/// Smoothness for bridging related topics
const SMOOTHNESS_RELATED: f64 = 0.8;

/// Smoothness for an outright topic shift
const SMOOTHNESS_SHIFT: f64 = 0.6;

/// Bucket for absent topics
const GENERAL_TOPIC: &str = "general";

/// Hand-authored related-topic pairs; symmetry is handled at lookup
const RELATED_PAIRS: [(&str, &str); 10] = [
    ("work", "career"),
    ("work", "stress"),
    ("school", "homework"),
    ("school", "friends"),
    ("music", "movies"),
    ("food", "cooking"),
    ("sports", "exercise"),
    ("family", "home"),
    ("travel", "plans"),
    ("weather", "plans"),
];

/// Generates connective phrases between discourse topics
pub struct TransitionGenerator {
    bank: Arc<PhraseBank>,
    picker: PickerHandle,
}

impl TransitionGenerator {
    /// Create a generator over the given phrase bank and picker
    pub fn new(bank: Arc<PhraseBank>, picker: PickerHandle) -> Self {
        Self { bank, picker }
    }

    /// Produce a transition phrase from one topic to another
    ///
    /// Absent topics default to "general". Same topic yields a continuation
    /// phrase (smoothness 0.9); a pair in the related table yields a filled
    /// related template (0.8); anything else a topic-shift template (0.6).
    pub fn generate(&self, from: Option<&str>, to: Option<&str>) -> TransitionPhrase {
        let from = normalize_topic(from);
        let to = normalize_topic(to);

        let (text, smoothness) = if from == to {
            (
                self.pick_or_default(&self.bank.continuation_phrases, "Also,"),
                SMOOTHNESS_SAME,
            )
        } else if are_related(&from, &to) {
            let template = self.pick_or_default(&self.bank.related_templates, "Speaking of {to},");
            (fill_template(&template, &from, &to), SMOOTHNESS_RELATED)
        } else {
            let template = self.pick_or_default(&self.bank.shift_templates, "By the way, {to}:");
            (fill_template(&template, &from, &to), SMOOTHNESS_SHIFT)
        };

        TransitionPhrase {
            text,
            from_topic: from,
            to_topic: to,
            smoothness,
        }
    }

    /// Join two text segments across a topic change
    ///
    /// Closes the first segment if it trails off, inserts the generated
    /// transition, then appends the second segment with leading filler
    /// words stripped.
    pub fn create_bridge(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        from_text: &str,
        to_text: &str,
    ) -> String {
        let mut out = from_text.trim().to_string();
        if out.is_empty() {
            return self.strip_fillers(to_text);
        }
        if !out.ends_with('?') && !out.ends_with('!') {
            if !out.ends_with('.') {
                out.push('.');
            }
            let closer = self.pick_or_default(&self.bank.closing_connectives, "Right.");
            out.push(' ');
            out.push_str(&closer);
        }

        let transition = self.generate(from, to);
        out.push(' ');
        out.push_str(&transition.text);

        let stripped = self.strip_fillers(to_text);
        if !stripped.is_empty() {
            out.push(' ');
            out.push_str(&stripped);
        }
        out
    }

    /// Remove leading filler words and articles from a segment
    fn strip_fillers(&self, text: &str) -> String {
        let mut remaining = text.trim();
        loop {
            let Some(first_word) = remaining.split_whitespace().next() else {
                return String::new();
            };
            let bare = first_word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            let is_filler = self
                .bank
                .filler_words
                .iter()
                .any(|f| f.eq_ignore_ascii_case(&bare));
            if !is_filler {
                break;
            }
            remaining = remaining[first_word.len()..]
                .trim_start()
                .trim_start_matches(',')
                .trim_start();
        }
        remaining.to_string()
    }

    fn pick_or_default(&self, phrases: &[String], fallback: &str) -> String {
        self.picker
            .pick(phrases)
            .unwrap_or(fallback)
            .to_string()
    }
}

fn normalize_topic(topic: Option<&str>) -> String {
    match topic.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => GENERAL_TOPIC.to_string(),
    }
}

fn are_related(a: &str, b: &str) -> bool {
    RELATED_PAIRS
        .iter()
        .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TransitionGenerator {
        TransitionGenerator::new(Arc::new(PhraseBank::default()), PickerHandle::first())
    }

    #[test]
    fn test_same_topic_smoothness() {
        let phrase = generator().generate(Some("sports"), Some("sports"));
        assert_eq!(phrase.smoothness, 0.9);
        assert_eq!(phrase.from_topic, "sports");
        assert_eq!(phrase.to_topic, "sports");
        assert!(!phrase.text.is_empty());
    }

    #[test]
    fn test_related_topics_smoothness() {
        let phrase = generator().generate(Some("work"), Some("career"));
        assert_eq!(phrase.smoothness, 0.8);
    }

    #[test]
    fn test_related_table_is_symmetric() {
        let forward = generator().generate(Some("school"), Some("homework"));
        let backward = generator().generate(Some("homework"), Some("school"));
        assert_eq!(forward.smoothness, 0.8);
        assert_eq!(backward.smoothness, 0.8);
    }

    #[test]
    fn test_unrelated_topics_smoothness() {
        let phrase = generator().generate(Some("gaming"), Some("homework"));
        assert_eq!(phrase.smoothness, 0.6);
    }

    #[test]
    fn test_missing_topics_default_to_general() {
        let phrase = generator().generate(None, None);
        assert_eq!(phrase.from_topic, "general");
        assert_eq!(phrase.to_topic, "general");
        // general == general counts as same topic
        assert_eq!(phrase.smoothness, 0.9);
    }

    #[test]
    fn test_templates_are_filled() {
        let phrase = generator().generate(Some("work"), Some("career"));
        assert!(!phrase.text.contains("{to}"));
        assert!(!phrase.text.contains("{from}"));
        assert!(phrase.text.contains("career"));
    }

    #[test]
    fn test_topics_are_case_insensitive() {
        let phrase = generator().generate(Some("Sports"), Some("SPORTS"));
        assert_eq!(phrase.smoothness, 0.9);
    }

    #[test]
    fn test_bridge_closes_trailing_thought() {
        let bridged = generator().create_bridge(
            Some("work"),
            Some("travel"),
            "The project wrapped up",
            "the trip starts monday",
        );
        // closed with a period and connective before the transition
        assert!(bridged.starts_with("The project wrapped up. Right."));
        assert!(bridged.ends_with("trip starts monday"));
    }

    #[test]
    fn test_bridge_keeps_question_ending() {
        let bridged = generator().create_bridge(
            Some("work"),
            Some("travel"),
            "Did it go well?",
            "about that trip",
        );
        assert!(bridged.starts_with("Did it go well? "));
        assert!(!bridged.contains("? Right."));
    }

    #[test]
    fn test_bridge_strips_leading_fillers() {
        let bridged = generator().create_bridge(
            Some("a"),
            Some("b"),
            "Done.",
            "well, actually the plan changed",
        );
        assert!(bridged.ends_with("plan changed"));
        assert!(!bridged.to_lowercase().contains("well, actually the plan"));
    }

    #[test]
    fn test_bridge_empty_from_text() {
        let bridged = generator().create_bridge(None, None, "  ", "so here we are");
        assert_eq!(bridged, "here we are");
    }
}
