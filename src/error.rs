use thiserror::Error;

/// Failure taxonomy for the adaptive pipeline.
///
/// None of these escape `AdaptiveEngine::generate`; the orchestration
/// boundary converts every variant into a fallback response. The `kind`
/// slug is what ends up in response metadata for observability.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream generation failed: {0}")]
    Upstream(String),

    #[error("interaction history unavailable: {0}")]
    HistoryUnavailable(String),
}

impl EngineError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid-input",
            Self::Upstream(_) => "upstream-failure",
            Self::HistoryUnavailable(_) => "history-unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_slugs() {
        assert_eq!(EngineError::InvalidInput("x".into()).kind(), "invalid-input");
        assert_eq!(EngineError::Upstream("x".into()).kind(), "upstream-failure");
        assert_eq!(
            EngineError::HistoryUnavailable("x".into()).kind(),
            "history-unavailable"
        );
    }

    #[test]
    fn test_display_includes_message() {
        let err = EngineError::Upstream("model returned nothing".into());
        assert!(err.to_string().contains("model returned nothing"));
    }
}
