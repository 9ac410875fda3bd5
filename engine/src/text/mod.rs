//! Shared text helpers
//!
//! Sentence splitting, word counting, whitespace collapsing, duplicate
//! removal, and lexicon matching used across the blending and scoring
//! modules. Everything here is pure string computation.

use regex::Regex;

/// Case-insensitive, word-boundary matcher for a fixed phrase list
///
/// Compiled once per component from the phrase bank. An empty phrase list
/// (or the pathological case of a failed compile) matches nothing rather
/// than erroring.
pub struct PhraseMatcher {
    re: Option<Regex>,
}

impl PhraseMatcher {
    /// Build a matcher for the given phrases
    pub fn new(phrases: &[String]) -> Self {
        let escaped: Vec<String> = phrases
            .iter()
            .map(|p| regex::escape(p.trim()))
            .filter(|p| !p.is_empty())
            .collect();
        if escaped.is_empty() {
            return Self { re: None };
        }
        let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
        Self {
            re: Regex::new(&pattern).ok(),
        }
    }

    /// Whether any phrase occurs in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.re.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Number of phrase occurrences in `text`
    pub fn count(&self, text: &str) -> usize {
        self.re
            .as_ref()
            .map(|re| re.find_iter(text).count())
            .unwrap_or(0)
    }
}

/// Collapse all whitespace runs into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercase alphanumeric word tokens
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Split text into sentences, keeping each sentence's terminal mark
///
/// Splits on `.`, `!`, and `?`. Fragments without a terminal mark (trailing
/// text) are kept as-is. Empty fragments are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// Normalized form used for duplicate detection: lowercase word tokens
fn sentence_key(sentence: &str) -> String {
    words(sentence).join(" ")
}

/// Drop case-insensitive duplicate sentences, keeping the first occurrence
pub fn dedup_sentences(sentences: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut kept = Vec::new();
    for sentence in sentences {
        let key = sentence_key(&sentence);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        kept.push(sentence);
    }
    kept
}

/// Join sentences back into one reply
///
/// Sentences keep their own `?`/`!` terminators; declarative sentences get a
/// single trailing period. The result always ends with terminal punctuation.
pub fn join_sentences(sentences: &[String]) -> String {
    let mut parts = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let s = sentence.trim().trim_end_matches('.');
        if s.is_empty() {
            continue;
        }
        if s.ends_with('?') || s.ends_with('!') {
            parts.push(s.to_string());
        } else {
            parts.push(format!("{}.", s));
        }
    }
    parts.join(" ")
}

/// Append a period if the text lacks terminal punctuation
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.ends_with('.') || trimmed.ends_with('!') || trimmed.ends_with('?') {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

/// Fraction of `a`'s distinct words that also appear in `b`
///
/// Returns 0.0 when `a` has no words. Used for near-duplicate detection
/// against conversation history.
pub fn overlap_ratio(a: &str, b: &str) -> f64 {
    let a_words = {
        let mut w = words(a);
        w.sort_unstable();
        w.dedup();
        w
    };
    if a_words.is_empty() {
        return 0.0;
    }
    let b_words = words(b);
    let shared = a_words.iter().filter(|w| b_words.contains(w)).count();
    shared as f64 / a_words.len() as f64
}

/// Clamp a score into `[0, 1]`
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n b\t c  "), "a b c");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_split_sentences_keeps_marks() {
        let sentences = split_sentences("Hello there. How are you? Great!");
        assert_eq!(sentences, vec!["Hello there.", "How are you?", "Great!"]);
    }

    #[test]
    fn test_split_sentences_trailing_fragment() {
        let sentences = split_sentences("Done. and then some");
        assert_eq!(sentences, vec!["Done.", "and then some"]);
    }

    #[test]
    fn test_split_sentences_drops_bare_punctuation() {
        let sentences = split_sentences("Okay... fine.");
        assert_eq!(sentences, vec!["Okay.", "fine."]);
    }

    #[test]
    fn test_dedup_sentences_case_insensitive() {
        let input = vec![
            "I am happy.".to_string(),
            "i am HAPPY.".to_string(),
            "Something else.".to_string(),
        ];
        let deduped = dedup_sentences(input);
        assert_eq!(deduped, vec!["I am happy.", "Something else."]);
    }

    #[test]
    fn test_join_sentences_preserves_questions() {
        let joined = join_sentences(&[
            "Hello there.".to_string(),
            "How are you?".to_string(),
            "no punctuation".to_string(),
        ]);
        assert_eq!(joined, "Hello there. How are you? no punctuation.");
    }

    #[test]
    fn test_ensure_terminal_punctuation() {
        assert_eq!(ensure_terminal_punctuation("hello"), "hello.");
        assert_eq!(ensure_terminal_punctuation("hello?"), "hello?");
        assert_eq!(ensure_terminal_punctuation("hello!  "), "hello!");
        assert_eq!(ensure_terminal_punctuation("   "), "");
    }

    #[test]
    fn test_overlap_ratio_full_overlap() {
        assert!((overlap_ratio("the cat sat", "the cat sat down") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_ratio_disjoint() {
        assert_eq!(overlap_ratio("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_overlap_ratio_empty_text() {
        assert_eq!(overlap_ratio("", "anything"), 0.0);
    }

    #[test]
    fn test_phrase_matcher_word_boundaries() {
        let matcher = PhraseMatcher::new(&["i see".to_string(), "got it".to_string()]);
        assert!(matcher.is_match("Well, I see what you mean"));
        assert!(!matcher.is_match("poised to seek"));
    }

    #[test]
    fn test_phrase_matcher_counts() {
        let matcher = PhraseMatcher::new(&["sad".to_string()]);
        assert_eq!(matcher.count("sad and sad again, but not sadly"), 2);
    }

    #[test]
    fn test_phrase_matcher_empty_list() {
        let matcher = PhraseMatcher::new(&[]);
        assert!(!matcher.is_match("anything at all"));
        assert_eq!(matcher.count("anything"), 0);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(1.3), 1.0);
        assert_eq!(clamp_score(-0.2), 0.0);
        assert_eq!(clamp_score(0.7), 0.7);
    }
}
