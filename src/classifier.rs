use crate::config::{EngineConfig, LevelBands};
use crate::types::{DevelopmentLevel, InteractionRecord, LearningProfile, PerformanceLevel};

/// Map an age onto a development level. Total over all of `i32`: ages below
/// the youngest band clamp to early elementary, ages above the oldest to
/// high school.
pub fn classify_age(age: i32, bands: &LevelBands) -> DevelopmentLevel {
    if age <= bands.early_max {
        DevelopmentLevel::EarlyElementary
    } else if age <= bands.late_max {
        DevelopmentLevel::LateElementary
    } else if age <= bands.middle_max {
        DevelopmentLevel::MiddleSchool
    } else {
        DevelopmentLevel::HighSchool
    }
}

/// Estimate performance from recent interaction accuracy.
///
/// Returns `None` below `min_samples` so that thin history never skews the
/// budget; thresholds mirror the proficiency ladder used elsewhere in the
/// product (accuracy < 0.5 developing, < 0.8 proficient, else advanced).
pub fn performance_from_history(
    records: &[InteractionRecord],
    min_samples: usize,
) -> Option<PerformanceLevel> {
    if records.len() < min_samples {
        return None;
    }
    let correct = records.iter().filter(|r| r.is_correct).count();
    let accuracy = correct as f64 / records.len() as f64;

    Some(if accuracy < 0.5 {
        PerformanceLevel::Developing
    } else if accuracy < 0.8 {
        PerformanceLevel::Proficient
    } else {
        PerformanceLevel::Advanced
    })
}

/// Build the per-request learning profile. Missing age degrades to the
/// configured default level rather than failing.
pub fn build_learning_profile(
    student_id: &str,
    student_age: Option<i32>,
    config: &EngineConfig,
    history: Vec<InteractionRecord>,
) -> LearningProfile {
    let development_level = match student_age {
        Some(age) => classify_age(age, &config.bands),
        None => config.default_level,
    };
    let performance_level = performance_from_history(&history, config.history.min_samples);

    LearningProfile {
        student_id: student_id.to_string(),
        development_level,
        vocabulary: config.vocabulary.profile_for(development_level).clone(),
        performance_level,
        recent_interactions: history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(is_correct: bool) -> InteractionRecord {
        InteractionRecord {
            is_correct,
            response_time_ms: 2500,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_band_classification() {
        let bands = LevelBands::default();
        assert_eq!(classify_age(7, &bands), DevelopmentLevel::EarlyElementary);
        assert_eq!(classify_age(10, &bands), DevelopmentLevel::LateElementary);
        assert_eq!(classify_age(13, &bands), DevelopmentLevel::MiddleSchool);
        assert_eq!(classify_age(16, &bands), DevelopmentLevel::HighSchool);
    }

    #[test]
    fn test_out_of_range_ages_clamp() {
        let bands = LevelBands::default();
        assert_eq!(classify_age(0, &bands), DevelopmentLevel::EarlyElementary);
        assert_eq!(classify_age(-3, &bands), DevelopmentLevel::EarlyElementary);
        assert_eq!(classify_age(99, &bands), DevelopmentLevel::HighSchool);
    }

    #[test]
    fn test_band_boundaries() {
        let bands = LevelBands::default();
        assert_eq!(classify_age(8, &bands), DevelopmentLevel::EarlyElementary);
        assert_eq!(classify_age(9, &bands), DevelopmentLevel::LateElementary);
        assert_eq!(classify_age(11, &bands), DevelopmentLevel::LateElementary);
        assert_eq!(classify_age(12, &bands), DevelopmentLevel::MiddleSchool);
        assert_eq!(classify_age(14, &bands), DevelopmentLevel::MiddleSchool);
        assert_eq!(classify_age(15, &bands), DevelopmentLevel::HighSchool);
    }

    #[test]
    fn test_performance_needs_min_samples() {
        let records = vec![record(true), record(true)];
        assert_eq!(performance_from_history(&records, 5), None);
    }

    #[test]
    fn test_performance_thresholds() {
        let mostly_wrong: Vec<_> = (0..10).map(|i| record(i < 4)).collect();
        assert_eq!(
            performance_from_history(&mostly_wrong, 5),
            Some(PerformanceLevel::Developing)
        );

        let mixed: Vec<_> = (0..10).map(|i| record(i < 7)).collect();
        assert_eq!(
            performance_from_history(&mixed, 5),
            Some(PerformanceLevel::Proficient)
        );

        let strong: Vec<_> = (0..10).map(|i| record(i < 9)).collect();
        assert_eq!(
            performance_from_history(&strong, 5),
            Some(PerformanceLevel::Advanced)
        );
    }

    #[test]
    fn test_profile_without_age_uses_default_level() {
        let config = EngineConfig::default();
        let profile = build_learning_profile("s1", None, &config, vec![]);
        assert_eq!(profile.development_level, config.default_level);
        assert_eq!(profile.performance_level, None);
    }

    #[test]
    fn test_profile_snapshots_level_vocabulary() {
        let config = EngineConfig::default();
        let profile = build_learning_profile("s1", Some(7), &config, vec![]);
        assert_eq!(
            profile.vocabulary.sentence_length.max,
            config.vocabulary.early_elementary.sentence_length.max
        );
    }
}
