//! Error types and handling
//!
//! This module provides the error types used throughout the Riposte engine.
//! All errors implement the `RiposteErrorExt` trait which provides
//! user-friendly hints and indicates whether errors are recoverable.
//!
//! Errors only arise from load-time plumbing (configuration files, phrase
//! banks). The composition pipeline itself never fails a turn: invalid or
//! missing inputs degrade to neutral scores or empty outputs instead.

use thiserror::Error;

/// Trait for Riposte error extensions
///
/// Provides additional context for errors, including user-friendly hints and
/// recoverability information. All engine errors implement this trait.
pub trait RiposteErrorExt {
    /// Returns a user-friendly hint for the error
    fn user_hint(&self) -> &str;

    /// Returns whether the error is recoverable
    ///
    /// Recoverable errors can be retried or worked around, typically by
    /// falling back to compiled-in defaults.
    fn is_recoverable(&self) -> bool;
}

/// Main engine error type
///
/// This enum represents all possible errors that can occur while setting up
/// the Riposte engine.
///
/// # Error Categories
///
/// - **Configuration**: Invalid or missing configuration
/// - **Phrase bank**: Malformed phrase-bank override files
/// - **IO**: File access failures during loading
///
/// # Examples
///
/// ```
/// use sdk::errors::{EngineError, RiposteErrorExt};
///
/// let error = EngineError::Config("missing [scoring] section".to_string());
/// println!("Hint: {}", error.user_hint());
/// assert!(error.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Phrase bank errors
    #[error("Phrase bank error: {0}")]
    PhraseBank(String),

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RiposteErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your riposte.toml file for errors",
            Self::PhraseBank(_) => {
                "Check the phrase-bank TOML file; built-in phrases are used as fallback"
            }
            Self::Io(_) => "Check file permissions and that the path exists",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Every load-time failure has a compiled-in fallback
        true
    }
}
