//! Configuration management
//!
//! Loading and validation of the Riposte configuration. Configuration is
//! stored in TOML format; every field has a default so an absent or partial
//! file still yields a working engine.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **scoring**: The four score-dimension weights
//! - **pool**: Candidate pool capacity and default top-K
//! - **lexicon**: Optional phrase-bank override file
//!
//! Invalid weight tables (zero or negative totals) are not an error: they
//! fall back to the equal 0.25 weighting with a warning, so a turn is never
//! failed by configuration.

use sdk::errors::EngineError;
use sdk::types::ScoreWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Core engine settings
    pub core: CoreConfig,

    /// Score-dimension weights
    pub scoring: ScoringConfig,

    /// Candidate pool settings
    pub pool: PoolConfig,

    /// Phrase-bank settings
    pub lexicon: LexiconConfig,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Weights for the four scoring dimensions
///
/// Values are re-normalized to sum to 1.0 before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub context_weight: f64,
    pub persona_weight: f64,
    pub tone_weight: f64,
    pub coherence_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            context_weight: 0.3,
            persona_weight: 0.2,
            tone_weight: 0.25,
            coherence_weight: 0.25,
        }
    }
}

/// Candidate pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum candidates held per turn; oldest is evicted on overflow
    pub capacity: usize,
    /// Default slice size for top-K selection
    pub top_k: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            top_k: 3,
        }
    }
}

/// Phrase-bank configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Optional TOML file overriding built-in phrase tables
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("Invalid TOML in {:?}: {}", path, e)))?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults
    ///
    /// A missing or malformed file is logged and replaced by `Config::default()`
    /// rather than failing startup.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    /// The configured score weights, normalized to sum to 1.0
    ///
    /// A zero or negative total falls back to equal weighting with a warning.
    pub fn score_weights(&self) -> ScoreWeights {
        let raw = ScoreWeights::new(
            self.scoring.context_weight,
            self.scoring.persona_weight,
            self.scoring.tone_weight,
            self.scoring.coherence_weight,
        );
        if raw.sum() <= 0.0 {
            warn!("Score weights sum to zero or less; using equal weighting");
        }
        raw.normalized()
    }

    /// Validate the configuration, reporting non-recoverable mistakes
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pool.capacity == 0 {
            return Err(EngineError::Config(
                "pool.capacity must be at least 1".to_string(),
            ));
        }
        if self.pool.top_k == 0 {
            return Err(EngineError::Config(
                "pool.top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
