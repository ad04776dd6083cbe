//! Plan lifecycle manager.
//!
//! `PlanBoard` owns the ordered plan history and the single "final plan"
//! reference, and enforces the draft → confirmed state machine. The external
//! interface is positional (index into history) for compatibility, but every
//! operation that suspends on the generator captures the target's id first
//! and re-validates it after the await, so a concurrent delete can never make
//! it mutate the wrong record.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{PlanError, Result};
use crate::generator::{DraftResult, StepSource};
use crate::parser;
use crate::plan::{fallback_steps, Plan, PlanState, PlanStats};

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Store {
    /// Insertion order is creation order; entries leave only via delete.
    history: Vec<Plan>,
    /// Weak by-id reference into `history`; resolved on read so a delete
    /// invalidates it automatically.
    final_id: Option<String>,
}

impl Store {
    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.history.len() {
            return Err(PlanError::IndexOutOfRange {
                index,
                len: self.history.len(),
            });
        }
        Ok(())
    }

    fn set_final(&mut self, index: usize) {
        self.history[index].state = PlanState::Confirmed;
        self.final_id = Some(self.history[index].id.clone());
    }
}

// ---------------------------------------------------------------------------
// PlanBoard
// ---------------------------------------------------------------------------

pub struct PlanBoard {
    source: Arc<dyn StepSource>,
    store: Mutex<Store>,
}

impl PlanBoard {
    pub fn new(source: Arc<dyn StepSource>) -> Self {
        Self {
            source,
            store: Mutex::new(Store::default()),
        }
    }

    /// Create a new draft plan for `task`.
    ///
    /// The generator's fallback is used directly; raw text goes through the
    /// step parser, and an unusable (empty) parse also degrades to the
    /// fallback. An empty-step plan is never stored.
    pub async fn create(&self, task: &str) -> Result<Plan> {
        let task = task.trim();
        if task.is_empty() {
            return Err(PlanError::EmptyTask);
        }

        let steps = match self.source.draft(task).await {
            DraftResult::Fallback(steps) => steps,
            DraftResult::Text(raw) => {
                let parsed = parser::parse_steps(&raw);
                if parsed.is_empty() {
                    tracing::warn!(task, "generator output parsed to nothing, using fallback");
                    fallback_steps()
                } else {
                    parsed
                }
            }
        };

        let plan = Plan::new(task, steps);
        tracing::info!(id = %plan.id, steps = plan.steps.len(), "plan created");

        let mut store = self.store.lock().await;
        store.history.push(plan.clone());
        Ok(plan)
    }

    /// Ordered snapshot of all plans, oldest first.
    pub async fn history(&self) -> Vec<Plan> {
        self.store.lock().await.history.clone()
    }

    /// Manual partial update of a draft plan. Confirmed plans are locked.
    pub async fn edit_by_index(
        &self,
        index: usize,
        task: Option<String>,
        steps: Option<Vec<String>>,
    ) -> Result<Plan> {
        // Validate payloads up front so a rejected edit has no side effect.
        if let Some(task) = &task {
            if task.trim().is_empty() {
                return Err(PlanError::EmptyTask);
            }
        }
        if let Some(steps) = &steps {
            if steps.is_empty() || steps.iter().any(|s| s.trim().is_empty()) {
                return Err(PlanError::EmptySteps);
            }
        }

        let mut store = self.store.lock().await;
        store.check_index(index)?;
        let plan = &mut store.history[index];
        if plan.is_confirmed() {
            return Err(PlanError::PlanConfirmed(plan.id.clone()));
        }

        if let Some(task) = task {
            plan.task = task;
        }
        if let Some(steps) = steps {
            plan.steps = steps;
        }
        Ok(plan.clone())
    }

    /// AI-assisted revision of the plan at `index`.
    ///
    /// The result is a fresh record (new id, new timestamp, back to draft)
    /// that replaces the original's slot in history. The target is pinned by
    /// id across the generator await: if it was deleted meanwhile the
    /// operation fails with `PlanMissing` and nothing is touched. A revise
    /// failure likewise leaves the store exactly as it was.
    pub async fn refine(&self, index: usize, instruction: &str) -> Result<Plan> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(PlanError::EmptyInstruction);
        }

        let (id, task, steps) = {
            let store = self.store.lock().await;
            store.check_index(index)?;
            let plan = &store.history[index];
            (plan.id.clone(), plan.task.clone(), plan.steps.clone())
        };

        // Suspension point: the lock is not held across the backend call.
        let raw = self.source.revise(&task, &steps, instruction).await?;

        let (new_task, new_steps) = split_revision(&task, &steps, &raw);
        let plan = Plan::new(new_task, new_steps);

        let mut store = self.store.lock().await;
        let pos = store
            .history
            .iter()
            .position(|p| p.id == id)
            .ok_or(PlanError::PlanMissing(id.clone()))?;
        store.history[pos] = plan.clone();
        // The replacement has a new identity; a final reference to the old
        // record would dangle.
        if store.final_id.as_deref() == Some(id.as_str()) {
            store.final_id = None;
        }
        tracing::info!(old_id = %id, id = %plan.id, "plan revised");
        Ok(plan)
    }

    /// Lock the plan at `index`. Also designates it as the final plan,
    /// matching the historical behavior of the confirm endpoint.
    pub async fn confirm(&self, index: usize) -> Result<Plan> {
        let mut store = self.store.lock().await;
        store.check_index(index)?;
        store.set_final(index);
        Ok(store.history[index].clone())
    }

    /// Designate the plan at `index` as final, confirming it as a side
    /// effect. Kept alongside `confirm` for interface compatibility.
    pub async fn accept(&self, index: usize) -> Result<Plan> {
        let mut store = self.store.lock().await;
        store.check_index(index)?;
        store.set_final(index);
        Ok(store.history[index].clone())
    }

    /// Remove the plan at `index`; later indices shift down by one.
    /// Clears the final reference iff it pointed at the removed record.
    pub async fn remove(&self, index: usize) -> Result<Plan> {
        let mut store = self.store.lock().await;
        store.check_index(index)?;
        let removed = store.history.remove(index);
        if store.final_id.as_deref() == Some(removed.id.as_str()) {
            store.final_id = None;
        }
        tracing::info!(id = %removed.id, "plan deleted");
        Ok(removed)
    }

    /// The current final plan, resolved against history.
    pub async fn final_plan(&self) -> Result<Plan> {
        let store = self.store.lock().await;
        let id = store.final_id.as_deref().ok_or(PlanError::NoFinalPlan)?;
        store
            .history
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(PlanError::NoFinalPlan)
    }

    pub async fn stats(&self) -> PlanStats {
        let store = self.store.lock().await;
        let confirmed = store.history.iter().filter(|p| p.is_confirmed()).count();
        PlanStats {
            total: store.history.len(),
            confirmed,
            unconfirmed: store.history.len() - confirmed,
            has_final: store.final_id.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Revision splitting
// ---------------------------------------------------------------------------

/// Split raw revision output into an updated task and steps.
///
/// If the first non-empty raw line is not enumeration-prefixed it is taken as
/// a replacement task title and the remaining lines are parsed as steps;
/// otherwise the original task is kept and everything is parsed as steps.
/// A parse that yields no steps keeps the original steps.
fn split_revision(
    original_task: &str,
    original_steps: &[String],
    raw: &str,
) -> (String, Vec<String>) {
    let lines: Vec<&str> = raw.lines().collect();
    let first = lines
        .iter()
        .position(|line| !line.trim().is_empty());

    let (task, steps) = match first {
        Some(i) if !parser::starts_with_marker(lines[i]) => {
            let rest = lines[i + 1..].join("\n");
            (lines[i].trim().to_string(), parser::parse_steps(&rest))
        }
        _ => (original_task.to_string(), parser::parse_steps(raw)),
    };

    if steps.is_empty() {
        (task, original_steps.to_vec())
    } else {
        (task, steps)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
