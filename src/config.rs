use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::DevelopmentLevel;

/// Age bands mapping a student's age onto a development level.
///
/// Ages at or below `early_max` classify as early elementary, and so on up
/// the ladder; anything above `middle_max` is high school. Out-of-range ages
/// clamp to the nearest boundary, so classification is total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBands {
    pub early_max: i32,
    pub late_max: i32,
    pub middle_max: i32,
}

impl Default for LevelBands {
    fn default() -> Self {
        Self {
            early_max: 8,
            late_max: 11,
            middle_max: 14,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceBounds {
    pub min: usize,
    pub max: usize,
}

/// Per-level vocabulary configuration: sentence-length budget plus the
/// complex-term substitution table (complex -> simpler phrase, keys stored
/// lowercase). Immutable after engine construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyProfile {
    pub sentence_length: SentenceBounds,
    pub substitutions: Vec<(String, String)>,
}

impl VocabularyProfile {
    fn new(bounds: SentenceBounds, substitutions: &[(&str, &str)]) -> Self {
        Self {
            sentence_length: bounds,
            substitutions: substitutions
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyConfig {
    pub early_elementary: VocabularyProfile,
    pub late_elementary: VocabularyProfile,
    pub middle_school: VocabularyProfile,
    pub high_school: VocabularyProfile,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            early_elementary: VocabularyProfile::new(
                SentenceBounds { min: 3, max: 8 },
                &[
                    ("synthesize", "put together"),
                    ("theoretical", "imagined"),
                    ("analyze", "look at"),
                    ("fundamental", "basic"),
                    ("demonstrate", "show"),
                    ("approximately", "about"),
                    ("consequently", "so"),
                    ("significant", "big"),
                    ("utilize", "use"),
                    ("concept", "idea"),
                    ("framework", "plan"),
                    ("mathematical", "math"),
                    ("comprehend", "understand"),
                ],
            ),
            late_elementary: VocabularyProfile::new(
                SentenceBounds { min: 4, max: 12 },
                &[
                    ("synthesize", "combine"),
                    ("theoretical", "imagined"),
                    ("fundamental", "basic"),
                    ("demonstrate", "show"),
                    ("approximately", "about"),
                    ("consequently", "as a result"),
                    ("utilize", "use"),
                    ("comprehend", "understand"),
                ],
            ),
            middle_school: VocabularyProfile::new(
                SentenceBounds { min: 5, max: 18 },
                &[
                    ("synthesize", "combine"),
                    ("theoretical", "abstract"),
                    ("utilize", "use"),
                    ("approximately", "roughly"),
                ],
            ),
            // Complex vocabulary is preserved at this level; the empty table
            // makes vocabulary adaptation the identity.
            high_school: VocabularyProfile::new(SentenceBounds { min: 5, max: 200 }, &[]),
        }
    }
}

impl VocabularyConfig {
    pub fn profile_for(&self, level: DevelopmentLevel) -> &VocabularyProfile {
        match level {
            DevelopmentLevel::EarlyElementary => &self.early_elementary,
            DevelopmentLevel::LateElementary => &self.late_elementary,
            DevelopmentLevel::MiddleSchool => &self.middle_school,
            DevelopmentLevel::HighSchool => &self.high_school,
        }
    }

    /// Reject tables whose replacement text reintroduces a substitution key
    /// of the same level. That invariant is what makes vocabulary adaptation
    /// idempotent.
    pub fn validate(&self) -> Result<(), EngineError> {
        for level in DevelopmentLevel::ALL {
            let profile = self.profile_for(level);
            for (key, replacement) in &profile.substitutions {
                if key.is_empty() {
                    return Err(EngineError::InvalidInput(format!(
                        "empty substitution key at {}",
                        level.as_str()
                    )));
                }
                for word in replacement.to_lowercase().split_whitespace() {
                    if profile.substitutions.iter().any(|(k, _)| k == word) {
                        return Err(EngineError::InvalidInput(format!(
                            "substitution for '{key}' at {} reintroduces key '{word}'",
                            level.as_str()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBudget {
    pub base: i32,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBudgetConfig {
    pub early_elementary: TokenBudget,
    pub late_elementary: TokenBudget,
    pub middle_school: TokenBudget,
    pub high_school: TokenBudget,
}

impl Default for TokenBudgetConfig {
    fn default() -> Self {
        Self {
            early_elementary: TokenBudget { base: 300, min: 200, max: 400 },
            late_elementary: TokenBudget { base: 400, min: 280, max: 550 },
            middle_school: TokenBudget { base: 500, min: 350, max: 700 },
            high_school: TokenBudget { base: 600, min: 400, max: 850 },
        }
    }
}

impl TokenBudgetConfig {
    pub fn budget_for(&self, level: DevelopmentLevel) -> &TokenBudget {
        match level {
            DevelopmentLevel::EarlyElementary => &self.early_elementary,
            DevelopmentLevel::LateElementary => &self.late_elementary,
            DevelopmentLevel::MiddleSchool => &self.middle_school,
            DevelopmentLevel::HighSchool => &self.high_school,
        }
    }
}

/// Bounds on the external interaction-history consult, the only suspension
/// point in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    pub timeout_ms: u64,
    pub max_records: usize,
    /// Below this many samples the performance estimate stays `None`.
    pub min_samples: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 500,
            max_records: 50,
            min_samples: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub bands: LevelBands,
    pub vocabulary: VocabularyConfig,
    pub budgets: TokenBudgetConfig,
    pub history: HistoryConfig,
    /// Level used when no age is available at all (fallback path).
    pub default_level: DevelopmentLevel,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LEXADAPT_EARLY_MAX_AGE") {
            config.bands.early_max = val.parse().unwrap_or(config.bands.early_max);
        }
        if let Ok(val) = std::env::var("LEXADAPT_LATE_MAX_AGE") {
            config.bands.late_max = val.parse().unwrap_or(config.bands.late_max);
        }
        if let Ok(val) = std::env::var("LEXADAPT_MIDDLE_MAX_AGE") {
            config.bands.middle_max = val.parse().unwrap_or(config.bands.middle_max);
        }
        if let Ok(val) = std::env::var("LEXADAPT_HISTORY_TIMEOUT_MS") {
            config.history.timeout_ms = val.parse().unwrap_or(config.history.timeout_ms);
        }

        config
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.bands.early_max >= self.bands.late_max
            || self.bands.late_max >= self.bands.middle_max
        {
            return Err(EngineError::InvalidInput(
                "level bands must be strictly increasing".to_string(),
            ));
        }
        for level in DevelopmentLevel::ALL {
            let budget = self.budgets.budget_for(level);
            if budget.min <= 0 || budget.min > budget.max {
                return Err(EngineError::InvalidInput(format!(
                    "token budget range for {} is invalid",
                    level.as_str()
                )));
            }
            let bounds = self.vocabulary.profile_for(level).sentence_length;
            if bounds.max == 0 || bounds.min > bounds.max {
                return Err(EngineError::InvalidInput(format!(
                    "sentence bounds for {} are invalid",
                    level.as_str()
                )));
            }
        }
        self.vocabulary.validate()
    }
}
