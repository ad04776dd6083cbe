//! Generator backend contract.
//!
//! The lifecycle manager talks to the generative-text backend through this
//! trait so the backend can be swapped out (and mocked in tests). Failure
//! policy is asymmetric on purpose: drafting a new plan degrades to a fixed
//! placeholder, while revising an existing plan surfaces the error so stored
//! state is never silently replaced.

use async_trait::async_trait;
use thiserror::Error;

use crate::plan::fallback_steps;

/// Transport or backend failure from the generator.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct GeneratorError(pub String);

/// Outcome of a draft request.
///
/// On success the backend's raw response text comes back for parsing. On any
/// failure the adapter substitutes the fixed placeholder steps directly, so
/// parsing is bypassed rather than attempted on garbage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftResult {
    Text(String),
    Fallback(Vec<String>),
}

impl DraftResult {
    /// The structural fallback used when the backend is unreachable.
    pub fn fallback() -> Self {
        Self::Fallback(fallback_steps())
    }
}

/// A source of step text for new and revised plans.
///
/// Both operations make a single attempt with no retries and define no
/// timeout of their own; bounding latency is the transport's concern.
#[async_trait]
pub trait StepSource: Send + Sync {
    /// Ask the backend for 3–5 concise steps toward `task`.
    async fn draft(&self, task: &str) -> DraftResult;

    /// Ask the backend to rework an existing plan per `instruction`.
    ///
    /// Errors must leave the caller free to keep the original plan
    /// untouched — no placeholder substitution on the edit path.
    async fn revise(
        &self,
        task: &str,
        steps: &[String],
        instruction: &str,
    ) -> Result<String, GeneratorError>;
}
