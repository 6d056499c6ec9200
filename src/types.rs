use serde::{Deserialize, Serialize};

use crate::config::VocabularyProfile;

/// Discrete reading-complexity tier keyed by student age.
///
/// Ordered by increasing complexity tolerance; the derived `Ord` follows
/// declaration order, so `EarlyElementary < HighSchool`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum DevelopmentLevel {
    EarlyElementary,
    LateElementary,
    #[default]
    MiddleSchool,
    HighSchool,
}

impl DevelopmentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyElementary => "earlyElementary",
            Self::LateElementary => "lateElementary",
            Self::MiddleSchool => "middleSchool",
            Self::HighSchool => "highSchool",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "earlyelementary" | "early_elementary" => Self::EarlyElementary,
            "lateelementary" | "late_elementary" => Self::LateElementary,
            "highschool" | "high_school" => Self::HighSchool,
            _ => Self::MiddleSchool,
        }
    }

    pub const ALL: [DevelopmentLevel; 4] = [
        Self::EarlyElementary,
        Self::LateElementary,
        Self::MiddleSchool,
        Self::HighSchool,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceLevel {
    Developing,
    Proficient,
    Advanced,
}

impl PerformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developing => "developing",
            Self::Proficient => "proficient",
            Self::Advanced => "advanced",
        }
    }

    /// Multiplier applied to a level's base token budget.
    pub fn budget_scale(&self) -> f64 {
        match self {
            Self::Developing => 0.8,
            Self::Proficient => 1.0,
            Self::Advanced => 1.25,
        }
    }

    pub const ALL: [PerformanceLevel; 3] = [Self::Developing, Self::Proficient, Self::Advanced];
}

/// One prior interaction sample, as surfaced by the external history store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub is_correct: bool,
    pub response_time_ms: i64,
    pub timestamp: i64,
}

/// Per-request snapshot of a student's reading profile.
///
/// Created per request; nothing here is shared mutable state. The vocabulary
/// profile is a clone of the immutable configuration table for the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    pub student_id: String,
    pub development_level: DevelopmentLevel,
    pub vocabulary: VocabularyProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_level: Option<PerformanceLevel>,
    #[serde(default)]
    pub recent_interactions: Vec<InteractionRecord>,
}

/// Which rewriting technique actually changed the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdaptationFactor {
    VocabularySimplified,
    SentenceShortened,
}

impl AdaptationFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VocabularySimplified => "vocabulary-simplified",
            Self::SentenceShortened => "sentence-shortened",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
    pub generated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveResponse {
    pub text: String,
    pub development_level: DevelopmentLevel,
    pub adaptation_factors: Vec<AdaptationFactor>,
    pub response_metadata: ResponseMetadata,
}

/// Incoming request. Optional fields stay optional so that missing input
/// routes through the fallback path instead of failing to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveRequest {
    pub student_id: String,
    pub original_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_age: Option<i32>,
}

/// Context available to the fallback producer when normal generation fails.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FallbackContext {
    pub original_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_level: Option<DevelopmentLevel>,
}

/// Outcome of `AdaptiveEngine::generate`.
///
/// Both variants carry a well-formed response; the variant itself records
/// whether the normal pipeline or the fallback producer built it, so the
/// "always returns a valid response" contract is enforced by the type.
#[derive(Debug, Clone)]
pub enum AdaptiveOutcome {
    Adapted(AdaptiveResponse),
    Fallback(AdaptiveResponse),
}

impl AdaptiveOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn response(&self) -> &AdaptiveResponse {
        match self {
            Self::Adapted(r) | Self::Fallback(r) => r,
        }
    }

    pub fn into_response(self) -> AdaptiveResponse {
        match self {
            Self::Adapted(r) | Self::Fallback(r) => r,
        }
    }
}
