//! Typed-fragment composition
//!
//! Composes heterogeneous typed response fragments (informational,
//! emotional, humorous, ...) into one reply. Fragments are ordered by the
//! fixed type priority, with one exception: an inquiry fragment is deferred
//! to the end so the reply never buries its question mid-paragraph. A
//! transition phrase is inserted before every fragment after the first.

use crate::lexicon::PhraseBank;
use crate::text;
use crate::transition::TransitionGenerator;
use sdk::capability::{PersonaHandle, PickerHandle};
use sdk::types::{CombinedResponse, ResponseType, TurnContext};
use std::collections::HashMap;
use std::sync::Arc;

/// Composes typed response fragments in priority order
pub struct TypeCombiner {
    transitions: TransitionGenerator,
    styler: Option<PersonaHandle>,
}

impl TypeCombiner {
    /// Create a combiner over the given phrase bank and picker
    pub fn new(bank: Arc<PhraseBank>, picker: PickerHandle) -> Self {
        Self {
            transitions: TransitionGenerator::new(bank, picker),
            styler: None,
        }
    }

    /// Attach the optional persona styling collaborator
    pub fn with_styler(mut self, styler: PersonaHandle) -> Self {
        self.styler = Some(styler);
        self
    }

    /// Compose the given fragments into one reply
    ///
    /// Blank fragments are skipped. Unusable input (empty map or all-blank
    /// fragments) yields an empty response with score 0.0 rather than an
    /// error.
    pub fn combine(
        &self,
        fragments: &HashMap<ResponseType, String>,
        _ctx: &TurnContext,
    ) -> CombinedResponse {
        let ordered = order_fragments(fragments);
        if ordered.is_empty() {
            return CombinedResponse::empty();
        }

        let mut parts: Vec<String> = Vec::new();
        let mut types_used: Vec<ResponseType> = Vec::new();
        let mut transitions: Vec<String> = Vec::new();

        for (response_type, fragment) in &ordered {
            if let Some(previous) = types_used.last() {
                let phrase = self
                    .transitions
                    .generate(Some(previous.name()), Some(response_type.name()));
                transitions.push(phrase.text.clone());
                parts.push(phrase.text);
            }
            parts.push(fragment.clone());
            types_used.push(*response_type);
        }

        let merged = parts.join(" ");
        let cleaned = {
            let collapsed = text::collapse_whitespace(&merged);
            let sentences = text::dedup_sentences(text::split_sentences(&collapsed));
            text::join_sentences(&sentences)
        };
        let styled = match &self.styler {
            Some(styler) => styler.style_text(&cleaned),
            None => cleaned,
        };

        let coherence_score = coherence(&types_used, &transitions);

        CombinedResponse {
            text: styled,
            types_used,
            transitions,
            coherence_score,
        }
    }
}

/// Non-blank fragments in output order
///
/// Descending type priority, except that an inquiry fragment goes last so
/// the composed reply ends on its question.
fn order_fragments(fragments: &HashMap<ResponseType, String>) -> Vec<(ResponseType, String)> {
    let mut ordered: Vec<(ResponseType, String)> = fragments
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(t, text)| (*t, text.trim().to_string()))
        .collect();
    ordered.sort_by(|a, b| b.0.priority().cmp(&a.0.priority()));

    if let Some(pos) = ordered
        .iter()
        .position(|(t, _)| *t == ResponseType::Inquiry)
    {
        let inquiry = ordered.remove(pos);
        ordered.push(inquiry);
    }
    ordered
}

fn coherence(types_used: &[ResponseType], transitions: &[String]) -> f64 {
    let mut score = 0.5;
    if !transitions.is_empty() {
        score += 0.2;
    }
    if types_used.contains(&ResponseType::Emotional)
        && types_used.contains(&ResponseType::Informational)
    {
        score += 0.1;
    }
    if types_used.contains(&ResponseType::Inquiry) && types_used.contains(&ResponseType::Advisory) {
        score += 0.1;
    }
    text::clamp_score(score)
}
