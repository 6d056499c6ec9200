use crate::classifier::classify_age;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{
    AdaptiveResponse, DevelopmentLevel, FallbackContext, ResponseMetadata,
};

/// Synthesize a safe substitute response when normal generation fails.
///
/// Last line of defense: this never fails, never re-throws, and never leaks
/// the triggering error into the displayed text. The error kind lands in
/// metadata for observability instead.
pub fn generate_fallback_response(
    context: &FallbackContext,
    error: &EngineError,
    config: &EngineConfig,
) -> AdaptiveResponse {
    let level = resolve_level(context, config);

    AdaptiveResponse {
        text: fallback_text(level).to_string(),
        development_level: level,
        adaptation_factors: vec![],
        response_metadata: ResponseMetadata {
            fallback: true,
            error_kind: Some(error.kind().to_string()),
            max_tokens: None,
            generated_at: chrono::Utc::now().timestamp_millis(),
        },
    }
}

fn resolve_level(context: &FallbackContext, config: &EngineConfig) -> DevelopmentLevel {
    if let Some(level) = context.development_level {
        return level;
    }
    match context.student_age {
        Some(age) => classify_age(age, &config.bands),
        None => config.default_level,
    }
}

fn fallback_text(level: DevelopmentLevel) -> &'static str {
    match level {
        DevelopmentLevel::EarlyElementary => {
            "Oops, let's try that one again! Ask me your question one more time \
             and we will work it out together."
        }
        DevelopmentLevel::LateElementary => {
            "Hmm, I couldn't put together a good answer this time. \
             Please ask your question again and we'll figure it out."
        }
        DevelopmentLevel::MiddleSchool => {
            "Something went wrong while I was writing your answer. \
             Please try asking your question again."
        }
        DevelopmentLevel::HighSchool => {
            "I wasn't able to generate a complete answer this time. \
             Please retry your question."
        }
    }
}
