//! Per-conversation composition facade
//!
//! A [`Composer`] owns everything scoped to one conversation: the candidate
//! pool, the active score weights, and the wired-up pipeline components.
//! One composer must never be shared across concurrent conversations; the
//! phrase bank and configuration behind it are immutable and safely shared.
//!
//! Per turn, the flow is: add candidates, then either pick the best
//! ([`respond_best`](Composer::respond_best)), merge full texts
//! ([`respond_blend`](Composer::respond_blend)), or compose typed fragments
//! ([`respond_combined`](Composer::respond_combined)); optionally finish
//! with the complexity pass ([`adapt`](Composer::adapt)).

use crate::blender::Blender;
use crate::combiner::TypeCombiner;
use crate::complexity::ComplexityAdapter;
use crate::config::Config;
use crate::lexicon::PhraseBank;
use crate::picker::StdPicker;
use crate::scorer::Scorer;
use crate::selector::{CandidatePool, Selector};
use sdk::capability::{PersonaHandle, PickerHandle, ReferenceHandle};
use sdk::types::{BlendResult, Candidate, CombinedResponse, ResponseType, TurnContext};
use std::collections::HashMap;
use std::sync::Arc;

/// One conversation's composition pipeline
pub struct Composer {
    config: Config,
    bank: Arc<PhraseBank>,
    picker: PickerHandle,
    persona: Option<PersonaHandle>,
    references: Option<ReferenceHandle>,
    selector: Selector,
    blender: Blender,
    combiner: TypeCombiner,
    adapter: ComplexityAdapter,
    pool: CandidatePool,
}

impl Composer {
    /// Create a composer with entropy-seeded phrase sampling
    pub fn new(config: Config) -> Self {
        Self::with_picker(config, StdPicker::handle())
    }

    /// Create a composer with a fixed sampling seed, for reproducible output
    pub fn seeded(config: Config, seed: u64) -> Self {
        Self::with_picker(config, StdPicker::seeded_handle(seed))
    }

    /// Create a composer with a custom picker implementation
    pub fn with_picker(config: Config, picker: PickerHandle) -> Self {
        let bank = Arc::new(PhraseBank::load_or_default(
            config.lexicon.path.as_deref(),
        ));
        let pool = CandidatePool::with_capacity(config.pool.capacity);
        let mut composer = Self {
            selector: Selector::new(
                Scorer::new(Arc::clone(&bank)),
                config.score_weights(),
            ),
            blender: Blender::new(Arc::clone(&bank)),
            combiner: TypeCombiner::new(Arc::clone(&bank), picker.clone()),
            adapter: ComplexityAdapter::new(Arc::clone(&bank), picker.clone()),
            config,
            bank,
            picker,
            persona: None,
            references: None,
            pool,
        };
        composer.rebuild();
        composer
    }

    /// Attach the persona collaborator (scoring, styling, clarifying questions)
    pub fn with_persona(mut self, persona: PersonaHandle) -> Self {
        self.persona = Some(persona);
        self.rebuild();
        self
    }

    /// Attach the reference-resolution collaborator (coherence signal only)
    pub fn with_references(mut self, references: ReferenceHandle) -> Self {
        self.references = Some(references);
        self.rebuild();
        self
    }

    /// Rewire the pipeline components with the current collaborators
    fn rebuild(&mut self) {
        let mut scorer = Scorer::new(Arc::clone(&self.bank));
        let mut blender = Blender::new(Arc::clone(&self.bank));
        let mut combiner = TypeCombiner::new(Arc::clone(&self.bank), self.picker.clone());
        let mut adapter = ComplexityAdapter::new(Arc::clone(&self.bank), self.picker.clone());
        if let Some(persona) = &self.persona {
            scorer = scorer.with_persona(persona.clone());
            blender = blender.with_styler(persona.clone());
            combiner = combiner.with_styler(persona.clone());
            adapter = adapter.with_persona(persona.clone());
        }
        if let Some(references) = &self.references {
            scorer = scorer.with_references(references.clone());
        }
        self.selector = Selector::new(scorer, self.config.score_weights());
        self.blender = blender;
        self.combiner = combiner;
        self.adapter = adapter;
    }

    /// Add a candidate to this turn's pool (FIFO eviction on overflow)
    pub fn add_candidate(&mut self, candidate: Candidate) {
        self.pool.push(candidate);
    }

    /// The current candidate pool
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Drop all pooled candidates, ready for the next turn
    pub fn clear_pool(&mut self) {
        self.pool.clear();
    }

    /// Score the pool and return the best candidate, if any
    pub fn respond_best(&self, ctx: &TurnContext) -> Option<Candidate> {
        self.selector.select_best(&self.pool, ctx)
    }

    /// Score the pool and return the configured top-K slice
    pub fn top_candidates(&self, ctx: &TurnContext) -> Vec<Candidate> {
        self.selector.top_k(&self.pool, ctx, self.config.pool.top_k)
    }

    /// Merge full candidate texts into one reply
    pub fn respond_blend(&self, texts: &[String], ctx: &TurnContext) -> BlendResult {
        self.blender.blend(texts, ctx)
    }

    /// Compose typed response fragments into one reply
    pub fn respond_combined(
        &self,
        fragments: &HashMap<ResponseType, String>,
        ctx: &TurnContext,
    ) -> CombinedResponse {
        self.combiner.combine(fragments, ctx)
    }

    /// Final pass: match the reply's length to the input's complexity
    pub fn adapt(&self, response: &str, ctx: &TurnContext) -> String {
        let complexity = self.adapter.estimate(&ctx.user_input);
        self.adapter.adjust(response, complexity)
    }

    /// Select the best candidate and run the complexity pass over its text
    pub fn respond_best_adapted(&self, ctx: &TurnContext) -> Option<String> {
        self.respond_best(ctx)
            .map(|candidate| self.adapt(&candidate.text, ctx))
    }
}
