//! Candidate pool and ranked selection
//!
//! A [`CandidatePool`] holds the bounded per-turn set of draft replies;
//! inserting beyond capacity silently evicts the oldest member (FIFO). The
//! [`Selector`] re-scores every member against the turn context and returns
//! ranked views without mutating the pool, so multiple callers can hold the
//! same pool without aliasing surprises.

use crate::scorer::Scorer;
use sdk::types::{Candidate, ScoreWeights, TurnContext};
use std::collections::VecDeque;
use tracing::debug;

/// Default maximum number of candidates held per turn
pub const DEFAULT_POOL_CAPACITY: usize = 10;

/// Bounded FIFO pool of candidate replies
#[derive(Debug, Clone)]
pub struct CandidatePool {
    candidates: VecDeque<Candidate>,
    capacity: usize,
}

impl CandidatePool {
    /// Create a pool with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool holding at most `capacity` candidates
    ///
    /// A zero capacity is bumped to one so the pool can always hold the
    /// newest candidate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            candidates: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Add a candidate, evicting the oldest member on overflow
    pub fn push(&mut self, candidate: Candidate) {
        if self.candidates.len() >= self.capacity {
            if let Some(evicted) = self.candidates.pop_front() {
                debug!(id = %evicted.id, "Candidate pool full, evicting oldest");
            }
        }
        self.candidates.push_back(candidate);
    }

    /// Number of candidates currently held
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The candidates in insertion order
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Remove all candidates
    pub fn clear(&mut self) {
        self.candidates.clear();
    }
}

impl Default for CandidatePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks pool members against the turn context
pub struct Selector {
    scorer: Scorer,
    weights: ScoreWeights,
}

impl Selector {
    /// Create a selector with the given scorer and weights
    pub fn new(scorer: Scorer, weights: ScoreWeights) -> Self {
        Self {
            scorer,
            weights: weights.normalized(),
        }
    }

    /// Replace the score weights (re-normalized on the way in)
    pub fn set_weights(&mut self, weights: ScoreWeights) {
        self.weights = weights.normalized();
    }

    /// The normalized weights in use
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score every pool member and return a new descending-ranked view
    ///
    /// The sort is stable: equal overall scores keep insertion order. The
    /// pool itself is left untouched.
    pub fn rank(&self, pool: &CandidatePool, ctx: &TurnContext) -> Vec<Candidate> {
        let mut ranked: Vec<Candidate> = pool
            .candidates()
            .map(|candidate| {
                let mut scored = candidate.clone();
                self.scorer.apply(&mut scored, ctx, &self.weights);
                scored
            })
            .collect();
        ranked.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
        ranked
    }

    /// The single best candidate, or `None` for an empty pool
    pub fn select_best(&self, pool: &CandidatePool, ctx: &TurnContext) -> Option<Candidate> {
        self.rank(pool, ctx).into_iter().next()
    }

    /// The top `k` candidates in descending order
    pub fn top_k(&self, pool: &CandidatePool, ctx: &TurnContext, k: usize) -> Vec<Candidate> {
        let mut ranked = self.rank(pool, ctx);
        ranked.truncate(k);
        ranked
    }
}
