//! Capability handles for optional collaborators
//!
//! The engine consumes persona, reference-resolution, and phrase-sampling
//! capabilities through narrow handles. Each handle wraps an `Arc<dyn Impl>`
//! so implementations stay swappable: a real persona store in production, a
//! no-op stand-in ([`NullPersona`]) or a deterministic picker
//! ([`FirstPicker`]) in tests. A missing handle never fails a turn; the
//! engine just skips the dependent bonus or styling step.

use std::sync::Arc;

/// Trait for persona/mood implementation (to be implemented by the host)
pub trait PersonaHandleImpl: Send + Sync {
    /// The active disposition label (e.g. "playful", "supportive")
    fn disposition(&self) -> String;

    /// Whether the persona currently favors asking a question
    fn should_ask_question(&self) -> bool;

    /// Whether the persona currently favors adding humor
    fn should_add_humor(&self) -> bool;

    /// Apply persona styling to a finished reply
    fn style_text(&self, text: &str) -> String;

    /// A signature catchphrase, if the persona has one
    fn catchphrase(&self) -> Option<String>;

    /// Habitual phrases the persona tends to use
    fn habitual_phrases(&self) -> Vec<String>;

    /// A clarifying question matching the persona's voice, if any
    fn clarifying_question(&self) -> Option<String>;
}

/// Handle for persona/mood queries and text styling
#[derive(Clone)]
pub struct PersonaHandle {
    inner: Arc<dyn PersonaHandleImpl>,
}

impl PersonaHandle {
    /// Create a new PersonaHandle with the given implementation
    pub fn new(inner: Arc<dyn PersonaHandleImpl>) -> Self {
        Self { inner }
    }

    /// The active disposition label
    pub fn disposition(&self) -> String {
        self.inner.disposition()
    }

    /// Whether the persona currently favors asking a question
    pub fn should_ask_question(&self) -> bool {
        self.inner.should_ask_question()
    }

    /// Whether the persona currently favors adding humor
    pub fn should_add_humor(&self) -> bool {
        self.inner.should_add_humor()
    }

    /// Apply persona styling to a finished reply
    pub fn style_text(&self, text: &str) -> String {
        self.inner.style_text(text)
    }

    /// A signature catchphrase, if the persona has one
    pub fn catchphrase(&self) -> Option<String> {
        self.inner.catchphrase()
    }

    /// Habitual phrases the persona tends to use
    pub fn habitual_phrases(&self) -> Vec<String> {
        self.inner.habitual_phrases()
    }

    /// A clarifying question matching the persona's voice, if any
    pub fn clarifying_question(&self) -> Option<String> {
        self.inner.clarifying_question()
    }
}

/// Trait for reference-resolution implementation
pub trait ReferenceHandleImpl: Send + Sync {
    /// Whether the pronouns/references in `text` resolve against the history
    fn references_resolved(&self, text: &str, history: &[String]) -> bool;
}

/// Handle for the optional reference-resolution collaborator
///
/// Used only as a coherence-scoring signal.
#[derive(Clone)]
pub struct ReferenceHandle {
    inner: Arc<dyn ReferenceHandleImpl>,
}

impl ReferenceHandle {
    /// Create a new ReferenceHandle with the given implementation
    pub fn new(inner: Arc<dyn ReferenceHandleImpl>) -> Self {
        Self { inner }
    }

    /// Whether the pronouns/references in `text` resolve against the history
    pub fn references_resolved(&self, text: &str, history: &[String]) -> bool {
        self.inner.references_resolved(text, history)
    }
}

/// Trait for phrase-sampling implementation
///
/// Returns an index into a list of the given length, or `None` for an empty
/// list. Implementations must be thread-safe; the engine may share one picker
/// across components within a turn.
pub trait PickerImpl: Send + Sync {
    /// Pick an index in `0..len`, or `None` if `len == 0`
    fn pick_index(&self, len: usize) -> Option<usize>;
}

/// Handle for injectable phrase sampling
///
/// Replaces hidden shared pseudorandom state: production hosts wire in a
/// seeded or entropy-backed generator, tests wire in [`FirstPicker`] for
/// full determinism.
#[derive(Clone)]
pub struct PickerHandle {
    inner: Arc<dyn PickerImpl>,
}

impl PickerHandle {
    /// Create a new PickerHandle with the given implementation
    pub fn new(inner: Arc<dyn PickerImpl>) -> Self {
        Self { inner }
    }

    /// Pick one item from the list, or `None` if it is empty
    pub fn pick<'a>(&self, items: &'a [String]) -> Option<&'a str> {
        let idx = self.inner.pick_index(items.len())?;
        items.get(idx).map(String::as_str)
    }
}

/// Deterministic picker that always selects the first item
///
/// Used by tests and as a safe default when no randomness is wired in.
pub struct FirstPicker;

impl PickerImpl for FirstPicker {
    fn pick_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(0)
        }
    }
}

impl PickerHandle {
    /// Handle backed by [`FirstPicker`]
    pub fn first() -> Self {
        Self::new(Arc::new(FirstPicker))
    }
}

/// No-op persona stand-in for isolation tests
///
/// Neutral disposition, never asks or jokes, styles text as identity.
pub struct NullPersona;

impl PersonaHandleImpl for NullPersona {
    fn disposition(&self) -> String {
        "neutral".to_string()
    }

    fn should_ask_question(&self) -> bool {
        false
    }

    fn should_add_humor(&self) -> bool {
        false
    }

    fn style_text(&self, text: &str) -> String {
        text.to_string()
    }

    fn catchphrase(&self) -> Option<String> {
        None
    }

    fn habitual_phrases(&self) -> Vec<String> {
        Vec::new()
    }

    fn clarifying_question(&self) -> Option<String> {
        None
    }
}
