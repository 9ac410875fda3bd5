//! Riposte SDK
//!
//! Shared library providing types, errors, and capability traits for the
//! Riposte reply-composition engine. This crate is used by the engine and by
//! applications that embed it (chat shells, bots, test harnesses).

/// Error types and handling
pub mod errors;

/// Core data types: candidates, scores, turn context, composition results
pub mod types;

/// Narrow capability handles for optional collaborators
pub mod capability;

// Re-export commonly used types
pub use capability::{
    FirstPicker, NullPersona, PersonaHandle, PersonaHandleImpl, PickerHandle, PickerImpl,
    ReferenceHandle, ReferenceHandleImpl,
};
pub use errors::{EngineError, RiposteErrorExt};
pub use types::{
    BlendResult, Candidate, CombinedResponse, ResponseType, ScoreVector, ScoreWeights,
    TransitionPhrase, TurnContext,
};
