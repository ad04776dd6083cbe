use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// PlanState
// ---------------------------------------------------------------------------

/// Lifecycle state of a plan.
///
/// `Draft` plans are mutable; `Confirmed` plans are locked until deleted.
/// There is no transition back to `Draft` — an AI revision replaces the
/// record with a fresh draft instead of reopening the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanState {
    Draft,
    Confirmed,
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Opaque unique id, never reused across the lifetime of the store.
    pub id: String,
    pub task: String,
    /// Ordered, non-empty step strings. Never empty on a stored plan.
    pub steps: Vec<String>,
    pub state: PlanState,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// Build a fresh draft with a new id and the current timestamp.
    pub fn new(task: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            task: task.into(),
            steps,
            state: PlanState::Draft,
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.state == PlanState::Confirmed
    }
}

/// The placeholder plan used whenever the generator backend is unreachable
/// or its output parses to nothing usable.
pub fn fallback_steps() -> Vec<String> {
    vec![
        "Understand the task".to_string(),
        "Work on the task".to_string(),
        "Review results".to_string(),
    ]
}

// ---------------------------------------------------------------------------
// PlanStats
// ---------------------------------------------------------------------------

/// Store-wide counters returned by the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total: usize,
    pub confirmed: usize,
    pub unconfirmed: usize,
    pub has_final: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_plan_starts_as_draft() {
        let plan = Plan::new("Build a website", fallback_steps());
        assert_eq!(plan.state, PlanState::Draft);
        assert!(!plan.is_confirmed());
        assert_eq!(plan.steps.len(), 3);
    }

    #[test]
    fn ids_are_unique() {
        let a = Plan::new("a", fallback_steps());
        let b = Plan::new("a", fallback_steps());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&PlanState::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let json = serde_json::to_string(&PlanState::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
    }

    #[test]
    fn fallback_is_exactly_three_steps() {
        assert_eq!(
            fallback_steps(),
            vec!["Understand the task", "Work on the task", "Review results"]
        );
    }
}
