use proptest::prelude::*;
use sdk::errors::{EngineError, RiposteErrorExt};
use sdk::types::{Candidate, ScoreVector, ScoreWeights};

proptest! {
    #[test]
    fn test_error_user_hint_completeness(error_str in "\\PC*") {
        let errs = vec![
            EngineError::Config(error_str.clone()),
            EngineError::PhraseBank(error_str.clone()),
        ];

        for err in errs {
            let hint = err.user_hint();
            // Hints are static guidance, never the raw internal message
            prop_assert!(!hint.is_empty());
            prop_assert!(err.is_recoverable());
        }
    }

    #[test]
    fn test_weights_normalize_to_unit_sum(
        context in 0.0..=100.0f64,
        persona in 0.0..=100.0f64,
        tone in 0.0..=100.0f64,
        coherence in 0.0..=100.0f64,
    ) {
        let weights = ScoreWeights::new(context, persona, tone, coherence).normalized();
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(weights.context >= 0.0 && weights.context <= 1.0);
        prop_assert!(weights.persona >= 0.0 && weights.persona <= 1.0);
        prop_assert!(weights.tone >= 0.0 && weights.tone <= 1.0);
        prop_assert!(weights.coherence >= 0.0 && weights.coherence <= 1.0);
    }

    #[test]
    fn test_negative_weights_never_leak_through(
        context in -100.0..=0.0f64,
        persona in -100.0..=0.0f64,
        tone in -100.0..=0.0f64,
        coherence in -100.0..=0.0f64,
    ) {
        let weights = ScoreWeights::new(context, persona, tone, coherence).normalized();
        // all-negative input falls back to the equal weighting
        prop_assert_eq!(weights, ScoreWeights::equal());
    }

    #[test]
    fn test_overall_stays_in_unit_range(
        context in 0.0..=1.0f64,
        persona in 0.0..=1.0f64,
        tone in 0.0..=1.0f64,
        coherence in 0.0..=1.0f64,
        wc in 0.0..=10.0f64,
        wp in 0.0..=10.0f64,
        wt in 0.0..=10.0f64,
        wh in 0.0..=10.0f64,
    ) {
        let scores = ScoreVector { context, persona, tone, coherence };
        let overall = scores.overall(&ScoreWeights::new(wc, wp, wt, wh));
        prop_assert!((0.0..=1.0f64).contains(&overall));
    }

    #[test]
    fn test_candidate_json_round_trip(
        text in "\\PC{0,120}",
        source in "[a-z_]{1,20}",
        tag in "[a-z-]{0,12}",
    ) {
        let mut candidate = Candidate::new(&text, &source);
        if !tag.is_empty() {
            candidate = candidate.with_tag(&tag);
        }

        let json = serde_json::to_string(&candidate).expect("candidate serializes");
        let restored: Candidate = serde_json::from_str(&json).expect("candidate parses");
        prop_assert_eq!(restored.id, candidate.id);
        prop_assert_eq!(restored.text, candidate.text);
        prop_assert_eq!(restored.source, candidate.source);
        prop_assert_eq!(restored.tags, candidate.tags);
        prop_assert_eq!(restored.created_at, candidate.created_at);
    }
}
