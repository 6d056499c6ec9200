//! Adaptive response engine.
//!
//! Rewrites raw model output to match a student's age-based developmental
//! reading level: a level classifier, vocabulary and sentence-structure
//! adapters, a token budgeter, and a fallback producer, composed by
//! [`AdaptiveEngine`].

pub mod budget;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod history;
pub mod logging;
pub mod sentence;
pub mod types;
pub mod vocabulary;

pub use config::EngineConfig;
pub use engine::AdaptiveEngine;
pub use error::EngineError;
pub use history::{InMemoryInteractionStore, InteractionStore};
pub use types::*;
