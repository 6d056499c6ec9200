use std::sync::Arc;
use std::time::Duration;

use crate::budget::calculate_max_tokens;
use crate::classifier::build_learning_profile;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::fallback::generate_fallback_response;
use crate::history::InteractionStore;
use crate::sentence::adapt_sentence_structure;
use crate::types::{
    AdaptationFactor, AdaptiveOutcome, AdaptiveRequest, AdaptiveResponse, FallbackContext,
    InteractionRecord, LearningProfile, ResponseMetadata,
};
use crate::vocabulary::adapt_vocabulary;

/// Orchestrates the adaptation pipeline: profile resolution, vocabulary and
/// sentence rewriting, token budgeting, and fallback conversion.
///
/// Holds only immutable configuration and an optional read-only history
/// collaborator; every request builds its own profile and response.
pub struct AdaptiveEngine {
    config: Arc<EngineConfig>,
    history: Option<Arc<dyn InteractionStore>>,
}

impl AdaptiveEngine {
    /// Build an engine over a validated configuration. Misconfiguration
    /// (inverted budget or band ranges, substitution tables that break
    /// idempotence) surfaces here, at process start, never mid-request.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            history: None,
        })
    }

    pub fn with_history(
        config: EngineConfig,
        store: Arc<dyn InteractionStore>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            history: Some(store),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a learning profile for a student. The history consult is the
    /// only suspension point and is bounded by the configured timeout; any
    /// failure there degrades to age-only classification.
    pub async fn student_learning_profile(
        &self,
        student_id: &str,
        prompt: &str,
        student_age: Option<i32>,
    ) -> LearningProfile {
        tracing::debug!(student_id, prompt_len = prompt.len(), "resolving learning profile");
        let history = self.fetch_history(student_id).await;
        build_learning_profile(student_id, student_age, &self.config, history)
    }

    async fn fetch_history(&self, student_id: &str) -> Vec<InteractionRecord> {
        let Some(store) = &self.history else {
            return Vec::new();
        };
        let timeout = Duration::from_millis(self.config.history.timeout_ms);
        let lookup = store.recent_interactions(student_id, self.config.history.max_records);
        match tokio::time::timeout(timeout, lookup).await {
            Ok(Ok(records)) => records,
            Ok(Err(err)) => {
                tracing::warn!(
                    error = %err,
                    student_id,
                    "history unavailable, degrading to age-only classification"
                );
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    student_id,
                    timeout_ms = self.config.history.timeout_ms,
                    "history lookup timed out, degrading to age-only classification"
                );
                Vec::new()
            }
        }
    }

    /// Produce an adaptive response for a request. Infallible by contract:
    /// any internal failure is converted into a fallback response.
    pub async fn generate(&self, request: AdaptiveRequest) -> AdaptiveOutcome {
        match self.try_generate(&request).await {
            Ok(response) => AdaptiveOutcome::Adapted(response),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    student_id = %request.student_id,
                    "adaptive generation failed, producing fallback response"
                );
                let context = FallbackContext {
                    original_prompt: request.original_prompt.clone(),
                    student_age: request.student_age,
                    development_level: None,
                };
                AdaptiveOutcome::Fallback(generate_fallback_response(
                    &context,
                    &err,
                    &self.config,
                ))
            }
        }
    }

    async fn try_generate(
        &self,
        request: &AdaptiveRequest,
    ) -> Result<AdaptiveResponse, EngineError> {
        if request.student_id.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "studentId must not be empty".to_string(),
            ));
        }
        let raw = request
            .raw_response
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                EngineError::Upstream("generator returned no text to adapt".to_string())
            })?;

        let profile = self
            .student_learning_profile(
                &request.student_id,
                &request.original_prompt,
                request.student_age,
            )
            .await;

        let mut factors = Vec::new();
        let after_vocabulary = adapt_vocabulary(raw, &profile);
        if after_vocabulary != raw {
            factors.push(AdaptationFactor::VocabularySimplified);
        }
        let adapted = adapt_sentence_structure(&after_vocabulary, &profile);
        if adapted != after_vocabulary {
            factors.push(AdaptationFactor::SentenceShortened);
        }

        let max_tokens = calculate_max_tokens(&profile, &self.config.budgets);
        tracing::debug!(
            student_id = %request.student_id,
            level = profile.development_level.as_str(),
            factor_count = factors.len(),
            max_tokens,
            "adaptive response generated"
        );

        Ok(AdaptiveResponse {
            text: adapted,
            development_level: profile.development_level,
            adaptation_factors: factors,
            response_metadata: ResponseMetadata {
                fallback: false,
                error_kind: None,
                max_tokens: Some(max_tokens),
                generated_at: chrono::Utc::now().timestamp_millis(),
            },
        })
    }

    /// Token budget for a resolved profile; decided before generation and
    /// handed to the upstream model as its length cap.
    pub fn calculate_max_tokens(&self, profile: &LearningProfile) -> i32 {
        calculate_max_tokens(profile, &self.config.budgets)
    }

    /// Direct access to the fallback producer for callers that detect
    /// upstream failure before invoking the pipeline.
    pub fn fallback_response(
        &self,
        context: &FallbackContext,
        error: &EngineError,
    ) -> AdaptiveResponse {
        generate_fallback_response(context, error, &self.config)
    }
}
