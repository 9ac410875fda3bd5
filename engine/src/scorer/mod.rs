//! Four-dimensional candidate scoring
//!
//! The [`Scorer`] computes a [`ScoreVector`] for one candidate reply given
//! the turn context. Scoring is pure and side-effect-free: identical inputs
//! always produce identical scores. Each dimension starts from a 0.5
//! baseline, accumulates fixed bonuses and penalties, and is clamped to
//! `[0, 1]`.
//!
//! - **context**: topic mention, tone/emotion compatibility, mirrored
//!   questions, acknowledgment phrases
//! - **persona**: tag consistency with the active disposition, question
//!   appetite, catchphrase hits (neutral 0.5 without a persona collaborator)
//! - **tone**: detected user tone vs. candidate tone, intent fit, length
//!   proportionality
//! - **coherence**: discourse links to the previous turn, resolved
//!   references, logical connectives, near-duplicate penalty

pub mod tone;

use crate::lexicon::PhraseBank;
use crate::text::{self, PhraseMatcher};
use sdk::capability::{PersonaHandle, ReferenceHandle};
use sdk::types::{Candidate, ScoreVector, ScoreWeights, TurnContext};
use std::sync::Arc;
use tone::{
    emotion_tone_compatibility, intent_allows_tone, tone_match_adjustment, Tone, ToneClassifier,
};

/// Tag marking a candidate that deliberately changes the subject
const TOPIC_TRANSITION_TAG: &str = "topic-transition";

/// Content overlap with a prior turn at or above this ratio counts as a
/// near-duplicate
const NEAR_DUPLICATE_THRESHOLD: f64 = 0.8;

/// Candidate-to-input word-ratio band considered proportionate
const LENGTH_RATIO_BAND: (f64, f64) = (0.5, 2.0);

/// Combined cap for catchphrase and habitual-phrase bonuses
const PHRASE_BONUS_CAP: f64 = 0.1;

/// Pure scorer for candidate replies
pub struct Scorer {
    bank: Arc<PhraseBank>,
    tones: ToneClassifier,
    acknowledgments: PhraseMatcher,
    connectives: PhraseMatcher,
    persona: Option<PersonaHandle>,
    references: Option<ReferenceHandle>,
}

impl Scorer {
    /// Create a scorer over the given phrase bank
    pub fn new(bank: Arc<PhraseBank>) -> Self {
        let tones = ToneClassifier::new(&bank);
        let acknowledgments = PhraseMatcher::new(&bank.acknowledgments);
        let connectives = PhraseMatcher::new(&bank.logical_connectives);
        Self {
            bank,
            tones,
            acknowledgments,
            connectives,
            persona: None,
            references: None,
        }
    }

    /// Attach the optional persona collaborator
    pub fn with_persona(mut self, persona: PersonaHandle) -> Self {
        self.persona = Some(persona);
        self
    }

    /// Attach the optional reference-resolution collaborator
    pub fn with_references(mut self, references: ReferenceHandle) -> Self {
        self.references = Some(references);
        self
    }

    /// Score one candidate against the turn context
    ///
    /// Empty candidate text degrades to the neutral 0.5 vector rather than
    /// erroring.
    pub fn score(&self, candidate: &Candidate, ctx: &TurnContext) -> ScoreVector {
        if candidate.text.trim().is_empty() {
            return ScoreVector::neutral();
        }
        ScoreVector {
            context: self.context_score(candidate, ctx),
            persona: self.persona_score(candidate),
            tone: self.tone_score(candidate, ctx),
            coherence: self.coherence_score(candidate, ctx),
        }
    }

    /// Score a candidate in place, filling `scores` and `overall_score`
    pub fn apply(&self, candidate: &mut Candidate, ctx: &TurnContext, weights: &ScoreWeights) {
        candidate.scores = self.score(candidate, ctx);
        candidate.overall_score = candidate.scores.overall(weights);
    }

    /// The tone attached to the candidate upstream, or classified from text
    fn candidate_tone(&self, candidate: &Candidate) -> Tone {
        candidate
            .tone
            .as_deref()
            .and_then(Tone::from_label)
            .unwrap_or_else(|| self.tones.classify_reply(&candidate.text))
    }

    fn context_score(&self, candidate: &Candidate, ctx: &TurnContext) -> f64 {
        let mut score = 0.5;
        let text_lower = candidate.text.to_lowercase();

        if let Some(topic) = &ctx.topic {
            let topic = topic.trim().to_lowercase();
            if !topic.is_empty() && text_lower.contains(&topic) {
                score += 0.2;
            }
        }

        if candidate.has_tag(TOPIC_TRANSITION_TAG) {
            score += 0.1;
        }

        if let Some(emotion) = &ctx.emotion {
            match emotion_tone_compatibility(emotion, self.candidate_tone(candidate)) {
                Some(true) => score += 0.2,
                Some(false) => score -= 0.1,
                None => {}
            }
        }

        if ctx.user_input.contains('?') && candidate.text.contains('?') {
            score += 0.1;
        }

        if self.acknowledgments.is_match(&candidate.text) {
            score += 0.1;
        }

        text::clamp_score(score)
    }

    fn persona_score(&self, candidate: &Candidate) -> f64 {
        // Without a persona collaborator the dimension stays exactly neutral
        let Some(persona) = &self.persona else {
            return 0.5;
        };
        let mut score = 0.5;

        let disposition = persona.disposition().to_lowercase();
        let consistent = match disposition.as_str() {
            "playful" | "humorous" => candidate.has_tag("humorous") || candidate.has_tag("playful"),
            "supportive" | "empathetic" => {
                candidate.has_tag("empathetic") || candidate.has_tag("supportive")
            }
            "curious" => candidate.has_tag("question") || candidate.has_tag("curious"),
            "serious" | "focused" => {
                candidate.has_tag("informational") || candidate.has_tag("serious")
            }
            other => candidate.has_tag(other),
        };
        if consistent || (persona.should_add_humor() && candidate.has_tag("humorous")) {
            score += 0.2;
        }

        if persona.should_ask_question() && candidate.text.contains('?') {
            score += 0.1;
        }

        let text_lower = candidate.text.to_lowercase();
        let mut phrase_bonus: f64 = 0.0;
        if let Some(catchphrase) = persona.catchphrase() {
            let catchphrase = catchphrase.to_lowercase();
            if !catchphrase.is_empty() && text_lower.contains(&catchphrase) {
                phrase_bonus += 0.05;
            }
        }
        for phrase in persona.habitual_phrases() {
            let phrase = phrase.to_lowercase();
            if !phrase.is_empty() && text_lower.contains(&phrase) {
                phrase_bonus += 0.05;
            }
        }
        score += phrase_bonus.min(PHRASE_BONUS_CAP);

        text::clamp_score(score)
    }

    fn tone_score(&self, candidate: &Candidate, ctx: &TurnContext) -> f64 {
        let mut score = 0.5;

        let user_tone = self
            .tones
            .detect_user_tone(&ctx.user_input, ctx.emotion.as_deref());
        let candidate_tone = self.candidate_tone(candidate);

        score += tone_match_adjustment(user_tone, candidate_tone);

        if let Some(intent) = &ctx.intent {
            if intent_allows_tone(intent, candidate_tone) {
                score += 0.2;
            }
        }

        let input_words = text::word_count(&ctx.user_input);
        let candidate_words = text::word_count(&candidate.text);
        if input_words > 0 && candidate_words > 0 {
            let ratio = candidate_words as f64 / input_words as f64;
            if ratio >= LENGTH_RATIO_BAND.0 && ratio <= LENGTH_RATIO_BAND.1 {
                score += 0.1;
            }
        }

        text::clamp_score(score)
    }

    fn coherence_score(&self, candidate: &Candidate, ctx: &TurnContext) -> f64 {
        let mut score = 0.5;

        if let Some(last_turn) = ctx.last_turn() {
            if self.shares_discourse_marker(&candidate.text, last_turn) {
                score += 0.2;
            }
        }

        if let Some(references) = &self.references {
            if references.references_resolved(&candidate.text, &ctx.history) {
                score += 0.1;
            }
        }

        if self.connectives.is_match(&candidate.text) {
            score += 0.2;
        }

        let near_duplicate = ctx
            .history
            .iter()
            .any(|turn| text::overlap_ratio(&candidate.text, turn) >= NEAR_DUPLICATE_THRESHOLD);
        if near_duplicate {
            score -= 0.1;
        }

        text::clamp_score(score)
    }

    /// Whether a discourse connective/anaphor word appears in both texts
    fn shares_discourse_marker(&self, candidate_text: &str, previous_turn: &str) -> bool {
        let candidate_words = text::words(candidate_text);
        let previous_words = text::words(previous_turn);
        self.bank
            .discourse_markers
            .iter()
            .map(|m| m.to_lowercase())
            .any(|m| candidate_words.contains(&m) && previous_words.contains(&m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk::capability::{PersonaHandleImpl, ReferenceHandleImpl};

    fn scorer() -> Scorer {
        Scorer::new(Arc::new(PhraseBank::default()))
    }

    struct PlayfulPersona;

    impl PersonaHandleImpl for PlayfulPersona {
        fn disposition(&self) -> String {
            "playful".to_string()
        }
        fn should_ask_question(&self) -> bool {
            true
        }
        fn should_add_humor(&self) -> bool {
            true
        }
        fn style_text(&self, text: &str) -> String {
            text.to_string()
        }
        fn catchphrase(&self) -> Option<String> {
            Some("no worries".to_string())
        }
        fn habitual_phrases(&self) -> Vec<String> {
            vec!["to be fair".to_string()]
        }
        fn clarifying_question(&self) -> Option<String> {
            Some("What do you mean exactly?".to_string())
        }
    }

    struct AlwaysResolved;

    impl ReferenceHandleImpl for AlwaysResolved {
        fn references_resolved(&self, _text: &str, _history: &[String]) -> bool {
            true
        }
    }

    #[test]
    fn test_empty_candidate_degrades_to_neutral() {
        let candidate = Candidate::new("   ", "gen");
        let scores = scorer().score(&candidate, &TurnContext::new("hello"));
        assert_eq!(scores, ScoreVector::neutral());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = scorer();
        let candidate = Candidate::new("I see, that happened because of the deadline.", "gen");
        let ctx = TurnContext::new("Work was rough today")
            .with_topic("work")
            .with_emotion("sad");
        let first = scorer.score(&candidate, &ctx);
        let second = scorer.score(&candidate, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_scores_within_bounds() {
        let scorer = scorer();
        let candidate = Candidate::new(
            "I see, that makes sense because work matters. What next?",
            "gen",
        )
        .with_tag(TOPIC_TRANSITION_TAG);
        let ctx = TurnContext::new("Can you help with work?")
            .with_topic("work")
            .with_emotion("confused")
            .with_intent("question")
            .with_history(vec!["so that went well".to_string()]);
        let scores = scorer.score(&candidate, &ctx);
        for value in [scores.context, scores.persona, scores.tone, scores.coherence] {
            assert!((0.0..=1.0).contains(&value), "score out of range: {value}");
        }
    }

    #[test]
    fn test_context_topic_mention_bonus() {
        let scorer = scorer();
        let on_topic = Candidate::new("My work keeps me busy", "gen");
        let off_topic = Candidate::new("My garden keeps me busy", "gen");
        let ctx = TurnContext::new("tell me things").with_topic("work");
        let on = scorer.score(&on_topic, &ctx).context;
        let off = scorer.score(&off_topic, &ctx).context;
        assert!((on - off - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_context_emotion_match_bonus() {
        // Scenario: happy user, enthusiastic candidate vs. plain question
        let scorer = scorer();
        let enthusiastic = Candidate::new("That's great!", "gen");
        let questioning = Candidate::new("What happened?", "gen");
        let ctx = TurnContext::new("").with_topic("work").with_emotion("happy");
        let a = scorer.score(&enthusiastic, &ctx).context;
        let b = scorer.score(&questioning, &ctx).context;
        assert!(a - b >= 0.2 - 1e-9, "expected emotion bonus gap, got {a} vs {b}");
    }

    #[test]
    fn test_context_dismissive_label_penalty() {
        let scorer = scorer();
        let labeled = Candidate::new("Whatever, moving on", "gen").with_tone("dismissive");
        let unlabeled = Candidate::new("Whatever, moving on", "gen");
        let ctx = TurnContext::new("I got the promotion").with_emotion("happy");
        let a = scorer.score(&labeled, &ctx).context;
        let b = scorer.score(&unlabeled, &ctx).context;
        // upstream label carries through to the emotion table
        assert!((b - a - 0.1).abs() < 1e-9, "expected penalty gap, got {a} vs {b}");
    }

    #[test]
    fn test_context_incompatible_tone_penalty() {
        let scorer = scorer();
        let enthusiastic = Candidate::new("That's awesome!", "gen");
        let ctx = TurnContext::new("everything is falling apart").with_emotion("sad");
        let score = scorer.score(&enthusiastic, &ctx).context;
        assert!((score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_context_mirrored_question_bonus() {
        let scorer = scorer();
        let candidate = Candidate::new("Could you say more?", "gen");
        let with_question = TurnContext::new("what should I do?");
        let without_question = TurnContext::new("tell me what to do");
        let a = scorer.score(&candidate, &with_question).context;
        let b = scorer.score(&candidate, &without_question).context;
        assert!((a - b - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_context_acknowledgment_bonus() {
        let scorer = scorer();
        let with_ack = Candidate::new("I see, carry on", "gen");
        let without_ack = Candidate::new("please carry on", "gen");
        let ctx = TurnContext::new("so that happened");
        let a = scorer.score(&with_ack, &ctx).context;
        let b = scorer.score(&without_ack, &ctx).context;
        assert!((a - b - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_persona_neutral_without_collaborator() {
        let candidate = Candidate::new("Anything at all", "gen").with_tag("humorous");
        let score = scorer().score(&candidate, &TurnContext::new("hi")).persona;
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_persona_tag_and_question_bonuses() {
        let scorer = scorer().with_persona(PersonaHandle::new(Arc::new(PlayfulPersona)));
        let candidate = Candidate::new("Want to hear a joke?", "gen").with_tag("humorous");
        let score = scorer.score(&candidate, &TurnContext::new("hi")).persona;
        // 0.5 + 0.2 (tag) + 0.1 (question)
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_persona_phrase_bonus_is_capped() {
        let scorer = scorer().with_persona(PersonaHandle::new(Arc::new(PlayfulPersona)));
        // catchphrase + habitual phrase, but no tag and no question
        let candidate = Candidate::new("No worries, to be fair it went fine", "gen");
        let score = scorer.score(&candidate, &TurnContext::new("hi")).persona;
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_tone_exact_match() {
        let scorer = scorer();
        let candidate = Candidate::new("That's fantastic!", "gen");
        let ctx = TurnContext::new("I got the job!!").with_emotion("happy");
        let score = scorer.score(&candidate, &ctx).tone;
        // 0.5 + 0.3 (both enthusiastic) + 0.1 (length ratio in band)
        assert!((score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_tone_upstream_label_wins_over_classifier() {
        let scorer = scorer();
        let candidate = Candidate::new("mm", "gen").with_tone("enthusiastic");
        let ctx = TurnContext::new("BEST DAY EVER");
        // label forces enthusiastic -> exact match with shouty input
        let score = scorer.score(&candidate, &ctx).tone;
        assert!(score >= 0.8 - 1e-9);
    }

    #[test]
    fn test_tone_intent_bonus() {
        let scorer = scorer();
        let candidate = Candidate::new("You could try a shorter route", "gen");
        let with_intent = TurnContext::new("ok then").with_intent("information");
        let without_intent = TurnContext::new("ok then");
        let a = scorer.score(&candidate, &with_intent).tone;
        let b = scorer.score(&candidate, &without_intent).tone;
        assert!((a - b - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_tone_length_ratio_bonus() {
        let scorer = scorer();
        let proportionate = Candidate::new("four words right here", "gen");
        let rambling = Candidate::new(
            "this reply goes on and on and on and on far beyond what the input deserves honestly",
            "gen",
        );
        let ctx = TurnContext::new("short question here please");
        let a = scorer.score(&proportionate, &ctx).tone;
        let b = scorer.score(&rambling, &ctx).tone;
        assert!((a - b - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_coherence_connective_bonus() {
        let scorer = scorer();
        let with_connective = Candidate::new("It went badly because of the rain", "gen");
        let without = Candidate::new("It went badly with the rain", "gen");
        let ctx = TurnContext::new("how did it go");
        let a = scorer.score(&with_connective, &ctx).coherence;
        let b = scorer.score(&without, &ctx).coherence;
        assert!((a - b - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_coherence_discourse_link_to_previous_turn() {
        let scorer = scorer();
        let candidate = Candidate::new("So it worked out fine", "gen");
        let linked = TurnContext::new("update?")
            .with_history(vec!["so the plan changed".to_string()]);
        let unlinked = TurnContext::new("update?")
            .with_history(vec!["plans changed".to_string()]);
        let a = scorer.score(&candidate, &linked).coherence;
        let b = scorer.score(&candidate, &unlinked).coherence;
        assert!((a - b - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_coherence_near_duplicate_penalty() {
        let scorer = scorer();
        let candidate = Candidate::new("the meeting moved to friday", "gen");
        let duplicated = TurnContext::new("anything new?")
            .with_history(vec!["yes, the meeting moved to friday afternoon".to_string()]);
        let fresh = TurnContext::new("anything new?")
            .with_history(vec!["nothing much happened today".to_string()]);
        let a = scorer.score(&candidate, &duplicated).coherence;
        let b = scorer.score(&candidate, &fresh).coherence;
        assert!((b - a - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_coherence_reference_resolution_bonus() {
        let plain = scorer();
        let with_refs = scorer().with_references(ReferenceHandle::new(Arc::new(AlwaysResolved)));
        let candidate = Candidate::new("He finished the report", "gen");
        let ctx = TurnContext::new("and then?").with_history(vec!["Sam wrote it".to_string()]);
        let a = with_refs.score(&candidate, &ctx).coherence;
        let b = plain.score(&candidate, &ctx).coherence;
        assert!((a - b - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_apply_fills_overall_score() {
        let scorer = scorer();
        let mut candidate = Candidate::new("It went fine, I see why.", "gen");
        let ctx = TurnContext::new("how was it?");
        scorer.apply(&mut candidate, &ctx, &ScoreWeights::default());
        assert!(candidate.overall_score > 0.0);
        assert!(candidate.overall_score <= 1.0);
    }
}
