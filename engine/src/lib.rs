//! Riposte Engine Library
//!
//! Multi-criteria scoring, selection, and composition of candidate replies
//! for one conversational turn. Upstream generators propose candidates; this
//! engine scores them along four weighted dimensions, picks or merges them,
//! and shapes the result to match the flow of the ongoing exchange.
//!
//! The pipeline is stateless per turn and fully synchronous: every step is
//! bounded, pure computation over in-memory strings and lookup tables.

/// Configuration management module
pub mod config;

/// Immutable phrase-bank tables
pub mod lexicon;

/// Shared text helpers (sentences, word counts, overlap)
pub mod text;

/// Seedable phrase picker backed by `rand`
pub mod picker;

/// Four-dimensional candidate scoring
pub mod scorer;

/// Candidate pool and ranked selection
pub mod selector;

/// Multi-candidate text blending
pub mod blender;

/// Typed-fragment composition
pub mod combiner;

/// Transition-phrase synthesis between topics
pub mod transition;

/// Output complexity matching
pub mod complexity;

/// Per-conversation composition facade
pub mod composer;

/// Telemetry and Observability
pub mod telemetry;
