//! Core data types for the reply-composition pipeline
//!
//! A [`Candidate`] is one fully formed draft reply proposed by an upstream
//! generator for the current turn. Candidates are scored along four weighted
//! dimensions ([`ScoreVector`], [`ScoreWeights`]) against the [`TurnContext`],
//! then either emitted directly, blended ([`BlendResult`]), or composed from
//! typed fragments ([`ResponseType`], [`CombinedResponse`]).
//!
//! All scores and weights lie in `[0, 1]`. Candidates live for one turn only;
//! nothing here is persisted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Four-dimensional score for one candidate reply
///
/// Each dimension is clamped to `[0, 1]`:
/// - `context`: fit with the current discourse topic and user emotion
/// - `persona`: consistency with the active persona disposition
/// - `tone`: affect match between candidate and user input
/// - `coherence`: logical and referential flow from prior turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub context: f64,
    pub persona: f64,
    pub tone: f64,
    pub coherence: f64,
}

impl ScoreVector {
    /// Neutral score vector used when input is missing or empty
    pub fn neutral() -> Self {
        Self {
            context: 0.5,
            persona: 0.5,
            tone: 0.5,
            coherence: 0.5,
        }
    }

    /// Weighted sum of the four dimensions
    ///
    /// Weights are normalized before use, so the result stays in `[0, 1]`
    /// whenever the individual scores do.
    pub fn overall(&self, weights: &ScoreWeights) -> f64 {
        let w = weights.normalized();
        self.context * w.context
            + self.persona * w.persona
            + self.tone * w.tone
            + self.coherence * w.coherence
    }
}

/// Weights for combining the four score dimensions
///
/// Weights are re-normalized to sum to 1.0 whenever they are used. A zero or
/// negative total falls back to an equal 0.25 weighting rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub context: f64,
    pub persona: f64,
    pub tone: f64,
    pub coherence: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::equal()
    }
}

impl ScoreWeights {
    /// Equal 0.25 weighting, also the fallback for invalid configurations
    pub fn equal() -> Self {
        Self {
            context: 0.25,
            persona: 0.25,
            tone: 0.25,
            coherence: 0.25,
        }
    }

    /// Create weights from raw values, clamping negatives to zero
    pub fn new(context: f64, persona: f64, tone: f64, coherence: f64) -> Self {
        Self {
            context: context.max(0.0),
            persona: persona.max(0.0),
            tone: tone.max(0.0),
            coherence: coherence.max(0.0),
        }
    }

    /// Return a copy normalized so the four weights sum to 1.0
    ///
    /// A non-positive total (all-zero or negative input) yields the equal
    /// 0.25 weighting.
    pub fn normalized(&self) -> Self {
        let c = self.context.max(0.0);
        let p = self.persona.max(0.0);
        let t = self.tone.max(0.0);
        let h = self.coherence.max(0.0);
        let sum = c + p + t + h;
        if sum <= 0.0 || !sum.is_finite() {
            return Self::equal();
        }
        Self {
            context: c / sum,
            persona: p / sum,
            tone: t / sum,
            coherence: h / sum,
        }
    }

    /// Sum of the four weights
    pub fn sum(&self) -> f64 {
        self.context + self.persona + self.tone + self.coherence
    }
}

/// One fully formed draft reply proposed for the current turn
///
/// Candidates are created by upstream generators, scored by the engine, and
/// consumed within the turn. They are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier for this candidate
    pub id: String,
    /// The draft reply text
    pub text: String,
    /// Tag naming the generator that produced this candidate
    pub source: String,
    /// Free-form tags attached by the generator (e.g. "humorous", "question")
    pub tags: Vec<String>,
    /// Emotional-tone label attached by the generator, if any
    pub tone: Option<String>,
    /// Intent-type label attached by the generator, if any
    pub intent: Option<String>,
    /// Creation time (unix seconds)
    pub created_at: i64,
    /// Per-dimension scores, filled in by the scorer
    #[serde(default)]
    pub scores: ScoreVector,
    /// Weighted overall score, filled in by the scorer
    #[serde(default)]
    pub overall_score: f64,
}

impl Candidate {
    /// Create a new unscored candidate
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            source: source.into(),
            tags: Vec::new(),
            tone: None,
            intent: None,
            created_at: Utc::now().timestamp(),
            scores: ScoreVector::default(),
            overall_score: 0.0,
        }
    }

    /// Attach a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Attach an emotional-tone label
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Attach an intent-type label
    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Check whether this candidate carries the given tag (case-insensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Everything the engine knows about the current conversational turn
///
/// All fields except `user_input` are optional signals supplied by external
/// classifiers; absent signals simply skip their scoring bonuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnContext {
    /// The raw user input for this turn
    pub user_input: String,
    /// Current discourse topic, if known
    pub topic: Option<String>,
    /// Detected user emotion label (e.g. "happy", "sad"), if known
    pub emotion: Option<String>,
    /// Detected user intent label (e.g. "question", "venting"), if known
    pub intent: Option<String>,
    /// Ordered prior-turn texts, oldest first
    pub history: Vec<String>,
}

impl TurnContext {
    /// Create a context for the given user input
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            ..Self::default()
        }
    }

    /// Set the current discourse topic
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the detected user emotion label
    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    /// Set the detected user intent label
    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Set the conversation history, oldest first
    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    /// The most recent prior turn, if any
    pub fn last_turn(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

/// Result of merging several candidate texts into one reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendResult {
    /// The merged, deduplicated reply text
    pub text: String,
    /// Ordered tags of the segments that contributed to the merge
    pub sources: Vec<String>,
    /// Diagnostic metadata (dominant tone, original segment count)
    pub metadata: HashMap<String, String>,
    /// Blend-quality score in `[0, 1]`
    pub blend_score: f64,
}

impl BlendResult {
    /// An empty blend, produced for zero inputs
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            sources: Vec::new(),
            metadata: HashMap::new(),
            blend_score: 0.0,
        }
    }
}

/// The eight fixed response-fragment types the combiner understands
///
/// Each type carries a fixed composition priority; higher-priority fragments
/// appear earlier in the combined reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    Informational,
    Emotional,
    Humorous,
    Inquiry,
    Advisory,
    Narrative,
    Affirmative,
    Dissentive,
}

impl ResponseType {
    /// Fixed composition priority; higher comes first
    pub fn priority(&self) -> u8 {
        match self {
            Self::Emotional => 10,
            Self::Inquiry => 9,
            Self::Informational => 8,
            Self::Advisory => 7,
            Self::Affirmative => 6,
            Self::Narrative => 5,
            Self::Humorous => 4,
            Self::Dissentive => 3,
        }
    }

    /// Lowercase label used as a transition topic
    pub fn name(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Emotional => "emotional",
            Self::Humorous => "humorous",
            Self::Inquiry => "inquiry",
            Self::Advisory => "advisory",
            Self::Narrative => "narrative",
            Self::Affirmative => "affirmative",
            Self::Dissentive => "dissentive",
        }
    }

    /// All variants, in declaration order
    pub fn all() -> [ResponseType; 8] {
        [
            Self::Informational,
            Self::Emotional,
            Self::Humorous,
            Self::Inquiry,
            Self::Advisory,
            Self::Narrative,
            Self::Affirmative,
            Self::Dissentive,
        ]
    }
}

/// Result of composing typed response fragments into one reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResponse {
    /// The composed reply text
    pub text: String,
    /// The types actually used, in output order
    pub types_used: Vec<ResponseType>,
    /// The transition phrases inserted between fragments
    pub transitions: Vec<String>,
    /// Coherence score in `[0, 1]`
    pub coherence_score: f64,
}

impl CombinedResponse {
    /// An empty combination, produced for zero usable fragments
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            types_used: Vec::new(),
            transitions: Vec::new(),
            coherence_score: 0.0,
        }
    }
}

/// A connective phrase bridging two discourse topics or response types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionPhrase {
    /// The connective text itself
    pub text: String,
    /// The topic being left
    pub from_topic: String,
    /// The topic being entered
    pub to_topic: String,
    /// How smooth the transition reads, in `[0, 1]`
    pub smoothness: f64,
}
