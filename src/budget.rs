use crate::config::TokenBudgetConfig;
use crate::types::LearningProfile;

/// Generation length cap for the upstream model, decided before generation.
///
/// The level picks the base budget, the performance estimate scales it
/// (developing students get shorter, more scaffolded responses), and the
/// result is clamped into the level's configured range. Always positive.
pub fn calculate_max_tokens(profile: &LearningProfile, budgets: &TokenBudgetConfig) -> i32 {
    let budget = budgets.budget_for(profile.development_level);
    let scale = profile
        .performance_level
        .map(|p| p.budget_scale())
        .unwrap_or(1.0);
    let scaled = (budget.base as f64 * scale).round() as i32;
    scaled.clamp(budget.min, budget.max).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::build_learning_profile;
    use crate::config::EngineConfig;
    use crate::types::{DevelopmentLevel, LearningProfile, PerformanceLevel};

    fn profile(level_age: i32, performance: Option<PerformanceLevel>) -> LearningProfile {
        let mut profile =
            build_learning_profile("s1", Some(level_age), &EngineConfig::default(), vec![]);
        profile.performance_level = performance;
        profile
    }

    #[test]
    fn test_early_developing_stays_in_range() {
        let budgets = TokenBudgetConfig::default();
        let tokens = calculate_max_tokens(&profile(7, Some(PerformanceLevel::Developing)), &budgets);
        assert!((200..=400).contains(&tokens), "got {tokens}");
    }

    #[test]
    fn test_unknown_performance_uses_base() {
        let budgets = TokenBudgetConfig::default();
        let tokens = calculate_max_tokens(&profile(7, None), &budgets);
        assert_eq!(tokens, budgets.early_elementary.base);
    }

    #[test]
    fn test_advanced_clamped_to_level_max() {
        let budgets = TokenBudgetConfig::default();
        for level in DevelopmentLevel::ALL {
            let age = match level {
                DevelopmentLevel::EarlyElementary => 7,
                DevelopmentLevel::LateElementary => 10,
                DevelopmentLevel::MiddleSchool => 13,
                DevelopmentLevel::HighSchool => 16,
            };
            let tokens =
                calculate_max_tokens(&profile(age, Some(PerformanceLevel::Advanced)), &budgets);
            let budget = budgets.budget_for(level);
            assert!(tokens >= budget.min && tokens <= budget.max);
        }
    }

    #[test]
    fn test_budget_grows_with_level() {
        let budgets = TokenBudgetConfig::default();
        let early = calculate_max_tokens(&profile(7, None), &budgets);
        let high = calculate_max_tokens(&profile(16, None), &budgets);
        assert!(high > early);
    }

    #[test]
    fn test_always_positive() {
        let budgets = TokenBudgetConfig::default();
        for age in [-5, 0, 7, 10, 13, 16, 99] {
            for performance in PerformanceLevel::ALL {
                assert!(calculate_max_tokens(&profile(age, Some(performance)), &budgets) > 0);
            }
        }
    }
}
