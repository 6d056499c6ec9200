//! Property-based tests for the adaptation core.
//!
//! Invariants:
//! - Classification is total and monotone over the whole age domain
//! - Vocabulary adaptation is idempotent for a fixed level
//! - Token budgets always land inside the configured per-level range

use proptest::prelude::*;

use lexadapt::budget::calculate_max_tokens;
use lexadapt::classifier::{build_learning_profile, classify_age};
use lexadapt::config::{EngineConfig, LevelBands, TokenBudgetConfig};
use lexadapt::sentence::adapt_sentence_structure;
use lexadapt::types::{DevelopmentLevel, PerformanceLevel};
use lexadapt::vocabulary::adapt_vocabulary;

// ============================================================================
// Generators
// ============================================================================

fn arb_level_age() -> impl Strategy<Value = i32> {
    prop_oneof![
        (3i32..=8),
        (9i32..=11),
        (12i32..=14),
        (15i32..=90),
    ]
}

/// Word soup drawn from substitution keys, their replacements, and fillers,
/// so generated text exercises both matching and non-matching paths.
fn arb_text() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("synthesize"),
        Just("Theoretical"),
        Just("analyze"),
        Just("framework"),
        Just("put"),
        Just("together"),
        Just("the"),
        Just("cat"),
        Just("quickly"),
        Just("and"),
        Just("ran,"),
    ];
    prop::collection::vec(word, 1..60).prop_map(|words| {
        let mut text = words.join(" ");
        text.push('.');
        text
    })
}

fn arb_performance() -> impl Strategy<Value = Option<PerformanceLevel>> {
    prop_oneof![
        Just(None),
        Just(Some(PerformanceLevel::Developing)),
        Just(Some(PerformanceLevel::Proficient)),
        Just(Some(PerformanceLevel::Advanced)),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn classification_is_total(age in any::<i32>()) {
        let bands = LevelBands::default();
        let level = classify_age(age, &bands);
        prop_assert!(DevelopmentLevel::ALL.contains(&level));
    }

    #[test]
    fn classification_is_monotone(a in any::<i32>(), b in any::<i32>()) {
        let bands = LevelBands::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_age(lo, &bands) <= classify_age(hi, &bands));
    }

    #[test]
    fn vocabulary_adaptation_is_idempotent(age in arb_level_age(), text in arb_text()) {
        let config = EngineConfig::default();
        let profile = build_learning_profile("s1", Some(age), &config, vec![]);
        let once = adapt_vocabulary(&text, &profile);
        let twice = adapt_vocabulary(&once, &profile);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sentence_adaptation_respects_the_average_bound(text in arb_text()) {
        let config = EngineConfig::default();
        let profile = build_learning_profile("s1", Some(7), &config, vec![]);
        let max = profile.vocabulary.sentence_length.max;

        let adapted = adapt_sentence_structure(&text, &profile);
        let sentences: Vec<&str> = adapted
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        prop_assert!(!sentences.is_empty());
        let total: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
        let average = total as f64 / sentences.len() as f64;
        prop_assert!(average <= (max + 5) as f64, "average {} in: {}", average, adapted);
    }

    #[test]
    fn budgets_stay_in_the_level_range(
        age in any::<i32>(),
        performance in arb_performance(),
    ) {
        let config = EngineConfig::default();
        let budgets = TokenBudgetConfig::default();
        let mut profile = build_learning_profile("s1", Some(age), &config, vec![]);
        profile.performance_level = performance;

        let tokens = calculate_max_tokens(&profile, &budgets);
        let budget = budgets.budget_for(profile.development_level);
        prop_assert!(tokens > 0);
        prop_assert!(tokens >= budget.min && tokens <= budget.max);
    }
}
